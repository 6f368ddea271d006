// optimizer.rs - Batch downscale and re-encode

use crate::config::{Accounting, OptimizerConfig, OutputFormat};
use crate::dimensions::target_dimensions;
use crate::error::{OptimizeError, Result};
use crate::report::{BatchReport, ImageOutcome, PercentChange};
use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Bicubic resampling.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

type EncodeResult = std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Writes a resized, re-encoded copy of every image into the destination
    /// and measures the byte change. The first failure aborts the batch;
    /// files written before it are left in place.
    pub fn optimize<P: AsRef<Path>>(&self, image_paths: &[P]) -> Result<BatchReport> {
        if image_paths.is_empty() {
            return Err(OptimizeError::EmptyInput);
        }
        self.config.validate()?;

        info!(
            images = image_paths.len(),
            destination = %self.config.destination.display(),
            min_dimension = self.config.min_dimension,
            format = %self.config.format,
            quality = self.config.quality,
            "starting batch"
        );

        let mut bytes_before = 0u64;
        let mut written = BTreeMap::new();
        let mut outcomes = Vec::with_capacity(image_paths.len());

        for path in image_paths {
            let outcome = self.process_single_image(path.as_ref())?;
            bytes_before += outcome.original_size;
            // a later image with the same stem replaces the earlier output
            written.insert(outcome.output.clone(), outcome.new_size);
            outcomes.push(outcome);
        }

        let bytes_after = match self.config.accounting {
            Accounting::WrittenFiles => written.values().sum(),
            Accounting::DestinationDir => destination_bytes(&self.config.destination)?,
        };
        let percent = PercentChange::between(bytes_before, bytes_after)?;

        let report = BatchReport {
            outcomes,
            bytes_before,
            bytes_after,
            percent,
        };

        if report.size_grew() {
            warn!(bytes_before, bytes_after, "optimized output is larger than the sources");
        }
        info!(bytes_before, bytes_after, percent = %report.percent, "batch finished");

        Ok(report)
    }

    fn process_single_image(&self, input_path: &Path) -> Result<ImageOutcome> {
        let original_size = fs::metadata(input_path)
            .map_err(|e| OptimizeError::unreadable(input_path, e))?
            .len();

        let img = open_image(input_path)?;
        let (width, height) = img.dimensions();

        let output_path = self.config.output_path_for(input_path);
        if is_same_file(input_path, &output_path) {
            return Err(OptimizeError::WouldOverwriteSource(output_path));
        }

        let (new_width, new_height) = target_dimensions(width, height, self.config.min_dimension);
        let img = if (new_width, new_height) == (width, height) {
            debug!(path = %input_path.display(), width, height, "below threshold, re-encoding only");
            img
        } else {
            debug!(
                path = %input_path.display(),
                from = ?(width, height),
                to = ?(new_width, new_height),
                "resizing"
            );
            img.resize_exact(new_width, new_height, RESIZE_FILTER)
        };

        let buffer = encode(&img, self.config.format, self.config.quality).map_err(|source| {
            OptimizeError::Encode {
                path: input_path.to_path_buf(),
                source,
            }
        })?;

        fs::write(&output_path, &buffer).map_err(|source| OptimizeError::Write {
            path: output_path.clone(),
            source,
        })?;

        debug!(
            output = %output_path.display(),
            original_size,
            new_size = buffer.len(),
            "written"
        );

        Ok(ImageOutcome {
            source: input_path.to_path_buf(),
            output: output_path,
            original_dimensions: (width, height),
            new_dimensions: (new_width, new_height),
            original_size,
            new_size: buffer.len() as u64,
        })
    }
}

/// Optimizes with the default quality and format and returns the
/// percentage string, e.g. `"75.0%"`.
pub fn optimize_images<P: AsRef<Path>>(
    image_paths: &[P],
    destination: impl Into<PathBuf>,
    min_dimension: u32,
) -> Result<String> {
    let optimizer = Optimizer::new(OptimizerConfig::new(destination, min_dimension));
    Ok(optimizer.optimize(image_paths)?.percent.to_string())
}

// Helper functions
fn open_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| OptimizeError::unreadable(path, e))?
        .decode()
        .map_err(|e| OptimizeError::unreadable(path, e))
}

fn is_same_file(source: &Path, output: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> EncodeResult {
    let mut buffer = Cursor::new(Vec::new());

    match format {
        OutputFormat::WebP => {
            // libwebp only takes 8-bit RGB or RGBA
            let img = if img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            };
            let encoder = webp::Encoder::from_image(&img).map_err(|e| e.to_string())?;
            // libwebp refuses axes over 16383 px
            let memory = encoder
                .encode_simple(false, f32::from(quality))
                .map_err(|e| format!("{e:?}"))?;
            return Ok(memory.to_vec());
        }
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)?;
        }
        OutputFormat::Png => {
            img.write_to(&mut buffer, ImageFormat::Png)?;
        }
    }

    Ok(buffer.into_inner())
}

/// Total size of the regular files directly inside `destination`.
fn destination_bytes(destination: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(destination).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| OptimizeError::DestinationScan {
            path: destination.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let metadata = entry.metadata().map_err(|source| OptimizeError::DestinationScan {
            path: destination.to_path_buf(),
            source,
        })?;
        total += metadata.len();
    }
    Ok(total)
}
