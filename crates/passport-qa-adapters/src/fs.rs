//! Filesystem adapter for loading photos.

use anyhow::Result;
use passport_qa_core::{ImageInfo, ImageSource, UnreadableImage};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Filesystem image source adapter.
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Photo files under the configured paths.
    ///
    /// Explicit file arguments keep their order; directory entries are
    /// sorted so runs are reproducible.
    pub fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            match path {
                p if p.is_file() && is_supported_image(p) => files.push(p.clone()),
                p if p.is_file() => warn!("Unsupported file type: {}", p.display()),
                p if p.is_dir() => scan_dir(p, self.recursive, &mut files),
                p => warn!("Path does not exist: {}", p.display()),
            }
        }

        files
    }
}

fn scan_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
        Err(e) => {
            warn!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if recursive {
                scan_dir(&path, recursive, files);
            }
        } else if is_supported_image(&path) {
            files.push(path);
        }
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} photo files", files.len());

        Box::new(files.into_iter().map(|path| load_image(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported image extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

/// Loads a photo from the filesystem.
///
/// # Errors
///
/// Returns [`UnreadableImage`] if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<ImageInfo> {
    let path_str = path.to_string_lossy();
    let image = image::open(path)
        .map_err(|e| UnreadableImage::new(path_str.clone(), e.to_string()))?;
    Ok(ImageInfo::new(path_str, image))
}
