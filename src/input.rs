// input.rs - Picking out the image files a batch should process

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "tif", "tiff"];

pub fn is_image_file(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// A single image file yields itself; a directory yields every image file
/// beneath it, sorted by path. Unreadable directory entries are skipped.
pub fn collect_images(path: &Path) -> Vec<PathBuf> {
    let mut images = Vec::new();

    if path.is_file() && is_image_file(path) {
        images.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if entry.file_type().is_file() && is_image_file(path) {
                images.push(path.to_path_buf());
            }
        }
        images.sort();
    }

    images
}
