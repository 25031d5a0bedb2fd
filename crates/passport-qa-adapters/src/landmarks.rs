//! Landmark detectors backed by the filesystem.
//!
//! Face detection itself happens upstream. These adapters read landmarks a
//! detector has already produced, or report that none are available.

use std::path::{Path, PathBuf};

use passport_qa_core::{FacialLandmarks, ImageInfo, LandmarkDetector, NoFaceDetected};
use tracing::{debug, warn};

/// Suffix of the landmark file stored next to a photo.
pub const SIDECAR_SUFFIX: &str = "landmarks.json";

/// Reads landmarks from `<stem>.landmarks.json` beside each photo.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarLandmarks;

impl SidecarLandmarks {
    /// Path of the sidecar file for `image_path`.
    #[must_use]
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        image_path.with_file_name(format!("{stem}.{SIDECAR_SUFFIX}"))
    }
}

impl LandmarkDetector for SidecarLandmarks {
    fn name(&self) -> &'static str {
        "sidecar"
    }

    fn detect(&self, image: &ImageInfo) -> Result<FacialLandmarks, NoFaceDetected> {
        let path = Self::sidecar_path(Path::new(&image.path));

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            debug!("No landmark sidecar at {}: {e}", path.display());
            NoFaceDetected::new(format!("no landmark file at {}", path.display()))
        })?;

        let landmarks: FacialLandmarks = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse landmark file {}: {e}", path.display());
            NoFaceDetected::new(format!("unreadable landmark file {}: {e}", path.display()))
        })?;

        debug!(
            "Loaded landmarks for {} (head height {:.1}px)",
            image.path,
            landmarks.head_height()
        );
        Ok(landmarks)
    }
}

/// Detector that never finds a face; geometry rules are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLandmarks;

impl LandmarkDetector for NoLandmarks {
    fn name(&self) -> &'static str {
        "none"
    }

    fn detect(&self, _image: &ImageInfo) -> Result<FacialLandmarks, NoFaceDetected> {
        Err(NoFaceDetected::new("landmark detection disabled"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            SidecarLandmarks::sidecar_path(Path::new("/photos/anna.jpg")),
            PathBuf::from("/photos/anna.landmarks.json")
        );
        assert_eq!(
            SidecarLandmarks::sidecar_path(Path::new("photo.final.png")),
            PathBuf::from("photo.final.landmarks.json")
        );
    }

    #[test]
    fn test_no_landmarks_always_fails() {
        let info = ImageInfo::new("x.png", image::DynamicImage::new_rgb8(4, 4));
        let err = NoLandmarks.detect(&info).unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }
}
