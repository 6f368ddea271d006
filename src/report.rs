// report.rs - What a batch run did, and how much it saved

use crate::error::{OptimizeError, Result};
use crate::units::{round_to, Decimal};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_dimensions: (u32, u32),
    pub new_dimensions: (u32, u32),
    pub original_size: u64,
    pub new_size: u64,
}

impl ImageOutcome {
    pub fn filename(&self) -> String {
        self.source
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    pub fn was_resized(&self) -> bool {
        self.original_dimensions != self.new_dimensions
    }
}

/// Magnitude of the relative size change, rounded to two decimals.
/// Always non-negative; the direction lives on [`BatchReport::size_grew`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PercentChange(f64);

impl PercentChange {
    pub fn between(before: u64, after: u64) -> Result<Self> {
        if before == 0 {
            return Err(OptimizeError::ZeroSourceBytes);
        }
        let change = (after as f64 - before as f64) / before as f64 * 100.0;
        Ok(Self(round_to(change, 2).abs()))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", Decimal(self.0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub percent: PercentChange,
}

impl BatchReport {
    pub fn size_grew(&self) -> bool {
        self.bytes_after > self.bytes_before
    }

    pub fn summary(&self) -> String {
        let direction = if self.size_grew() { "increased" } else { "reduced" };
        format!("{} of size was {}", self.percent, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_quarters_saved() {
        let percent = PercentChange::between(5_000_000, 1_250_000).unwrap();
        assert_eq!(percent.to_string(), "75.0%");
    }

    #[test]
    fn growth_is_reported_as_positive() {
        let percent = PercentChange::between(1000, 1500).unwrap();
        assert_eq!(percent.value(), 50.0);
        assert_eq!(percent.to_string(), "50.0%");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(PercentChange::between(3, 2).unwrap().to_string(), "33.33%");
        assert_eq!(PercentChange::between(7, 7).unwrap().to_string(), "0.0%");
    }

    #[test]
    fn zero_before_is_an_error() {
        assert!(matches!(
            PercentChange::between(0, 10),
            Err(OptimizeError::ZeroSourceBytes)
        ));
    }

    #[test]
    fn summary_mentions_direction() {
        let report = BatchReport {
            outcomes: Vec::new(),
            bytes_before: 200,
            bytes_after: 300,
            percent: PercentChange::between(200, 300).unwrap(),
        };
        assert_eq!(report.summary(), "50.0% of size was increased");
    }
}
