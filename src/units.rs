// units.rs - Human readable byte sizes

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ByteUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

impl ByteUnit {
    /// Largest first, so the first match in `largest_for` wins.
    const DESCENDING: [ByteUnit; 6] = [Self::PB, Self::TB, Self::GB, Self::MB, Self::KB, Self::B];

    pub const fn divisor(self) -> u64 {
        match self {
            Self::B => 1,
            Self::KB => 1 << 10,
            Self::MB => 1 << 20,
            Self::GB => 1 << 30,
            Self::TB => 1 << 40,
            Self::PB => 1 << 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::KB => "KB",
            Self::MB => "MB",
            Self::GB => "GB",
            Self::TB => "TB",
            Self::PB => "PB",
        }
    }

    /// The largest unit in which `bytes` is at least 1. Zero bytes is `B`.
    pub fn largest_for(bytes: u64) -> Self {
        Self::DESCENDING
            .into_iter()
            .find(|unit| bytes >= unit.divisor())
            .unwrap_or(Self::B)
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `bytes` expressed in `to`, rounded to `decimals` places.
pub fn convert(bytes: u64, to: ByteUnit, decimals: u32) -> f64 {
    round_to(bytes as f64 / to.divisor() as f64, decimals)
}

/// e.g. `1536` -> `"1.5 KB"`, `512` -> `"512.0 B"`.
pub fn format_bytes(bytes: u64) -> String {
    let unit = ByteUnit::largest_for(bytes);
    format!("{} {}", Decimal(convert(bytes, unit, 3)), unit)
}

/// Shortest representation of a float that keeps at least one fractional
/// digit, so whole values read as `75.0` rather than `75`.
pub(crate) struct Decimal(pub f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_unit() {
        assert_eq!(ByteUnit::largest_for(0), ByteUnit::B);
        assert_eq!(ByteUnit::largest_for(1023), ByteUnit::B);
        assert_eq!(ByteUnit::largest_for(1024), ByteUnit::KB);
        assert_eq!(ByteUnit::largest_for(5 * 1024 * 1024 - 1), ByteUnit::MB);
        assert_eq!(ByteUnit::largest_for(1 << 30), ByteUnit::GB);
        assert_eq!(ByteUnit::largest_for(3 << 40), ByteUnit::TB);
        assert_eq!(ByteUnit::largest_for(u64::MAX), ByteUnit::PB);
    }

    #[test]
    fn formats_with_three_decimals() {
        assert_eq!(format_bytes(0), "0.0 B");
        assert_eq!(format_bytes(512), "512.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1_250_000), "1.192 MB");
        assert_eq!(format_bytes(1 << 30), "1.0 GB");
    }

    #[test]
    fn convert_to_explicit_unit() {
        assert_eq!(convert(1_572_864, ByteUnit::MB, 3), 1.5);
        assert_eq!(convert(1_572_864, ByteUnit::KB, 3), 1536.0);
        assert_eq!(convert(1000, ByteUnit::KB, 1), 1.0);
    }

    #[test]
    fn converted_value_reconstructs_within_rounding() {
        let samples = [1u64, 999, 1024, 4097, 1_250_000, 5_000_000, 987_654_321, 3 << 40, 7 << 50];
        for bytes in samples {
            let unit = ByteUnit::largest_for(bytes);
            let value = convert(bytes, unit, 3);
            let rebuilt = value * unit.divisor() as f64;
            let tolerance = 0.0005 * unit.divisor() as f64 + 1e-6 * bytes as f64;
            assert!(
                (rebuilt - bytes as f64).abs() <= tolerance,
                "{bytes} -> {value} {unit} -> {rebuilt}"
            );
        }
    }

    #[test]
    fn decimal_keeps_one_fractional_digit() {
        assert_eq!(Decimal(75.0).to_string(), "75.0");
        assert_eq!(Decimal(33.33).to_string(), "33.33");
        assert_eq!(Decimal(0.0).to_string(), "0.0");
    }
}
