// config.rs - Batch settings passed into the optimizer

use crate::error::{OptimizeError, Result};
use std::path::{Path, PathBuf};

/// Encode quality used when the caller does not pick one.
pub const DEFAULT_QUALITY: u8 = 80;

/// Starting value of the minimum dimension field in the shell.
pub const DEFAULT_MIN_DIMENSION: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    WebP,
    Jpeg,
    Png,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::WebP, Self::Jpeg, Self::Png];

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    pub fn supports_quality(&self) -> bool {
        matches!(self, Self::WebP | Self::Jpeg)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::WebP => "WebP lossy (smallest files, good for the web)",
            Self::Jpeg => "JPEG (widest compatibility)",
            Self::Png => "PNG lossless (quality setting ignored)",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebP => write!(f, "WebP"),
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
        }
    }
}

/// How the "after" byte total of a batch is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accounting {
    /// Final size of each distinct file the batch wrote.
    #[default]
    WrittenFiles,
    /// Every regular file directly inside the destination, including ones
    /// that were there before the batch ran.
    DestinationDir,
}

#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub destination: PathBuf,
    pub min_dimension: u32,
    pub quality: u8,
    pub format: OutputFormat,
    pub accounting: Accounting,
}

impl OptimizerConfig {
    pub fn new(destination: impl Into<PathBuf>, min_dimension: u32) -> Self {
        Self {
            destination: destination.into(),
            min_dimension,
            ..Default::default()
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_accounting(mut self, accounting: Accounting) -> Self {
        self.accounting = accounting;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_dimension == 0 {
            return Err(OptimizeError::InvalidMinDimension);
        }
        if self.quality > 100 {
            return Err(OptimizeError::InvalidQuality(self.quality));
        }
        if !self.destination.is_dir() {
            return Err(OptimizeError::DestinationNotFound(self.destination.clone()));
        }
        Ok(())
    }

    /// `destination/<stem>.<ext>` for a source image.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        self.destination
            .join(format!("{}.{}", stem, self.format.file_extension()))
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::new(),
            min_dimension: DEFAULT_MIN_DIMENSION,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::default(),
            accounting: Accounting::default(),
        }
    }
}
