//! Image encoding port
//!
//! Turns an uploaded image into a source that can be inlined into the email.

use crate::domain::entities::ImageUpload;
use crate::error::ImageError;

/// Converts uploads into `data:` URIs.
///
/// Implementations are CPU-bound and synchronous; callers run them on a
/// blocking thread.
pub trait ImageEncoder: Send + Sync + 'static {
    fn to_data_uri(&self, upload: &ImageUpload) -> Result<String, ImageError>;
}
