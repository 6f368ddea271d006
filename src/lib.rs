//! Batch downscaling and re-encoding of images for the web.
//!
//! [`Optimizer`] takes a list of image paths and an [`OptimizerConfig`],
//! writes a smaller copy of each into the destination folder and reports
//! how many bytes were saved.

pub mod config;
pub mod dimensions;
pub mod error;
pub mod input;
pub mod optimizer;
pub mod report;
pub mod units;

pub use config::{Accounting, OptimizerConfig, OutputFormat, DEFAULT_MIN_DIMENSION, DEFAULT_QUALITY};
pub use error::{OptimizeError, Result};
pub use optimizer::{optimize_images, Optimizer};
pub use report::{BatchReport, ImageOutcome, PercentChange};
pub use units::{format_bytes, ByteUnit};
