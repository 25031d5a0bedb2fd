//! Image source port: where batches of photos come from.

use thiserror::Error;

use crate::domain::ImageInfo;

/// A photo the source found but could not read or decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to open image {path}: {reason}")]
pub struct UnreadableImage {
    /// Where the photo was found.
    pub path: String,
    /// Why it could not be loaded.
    pub reason: String,
}

impl UnreadableImage {
    /// Creates the condition for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Yields decoded photos for a validation batch.
pub trait ImageSource: Send + Sync {
    /// Iterates the photos in a stable order.
    ///
    /// # Errors
    ///
    /// An item is an error when that photo cannot be read or decoded; the
    /// remaining items are still produced. Sources that know the failing
    /// path report it as an [`UnreadableImage`].
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_>;

    /// Number of photos the source expects to yield, when cheap to know.
    fn count_hint(&self) -> Option<usize> {
        None
    }
}
