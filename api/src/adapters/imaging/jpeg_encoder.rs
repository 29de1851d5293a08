//! JPEG data-URI encoder backed by the `image` crate
//!
//! Every accepted upload is flattened to RGB (alpha and palettes are dropped)
//! and re-encoded as JPEG, so the inlined source is always `image/jpeg`.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;

use crate::domain::entities::ImageUpload;
use crate::domain::ports::ImageEncoder;
use crate::error::ImageError;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone)]
pub struct JpegDataUriEncoder {
    quality: u8,
    max_bytes: usize,
}

impl JpegDataUriEncoder {
    pub fn new(quality: u8, max_bytes: usize) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            max_bytes,
        }
    }

    /// Decode, flatten to RGB and re-encode as JPEG
    fn reencode(&self, bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        let rgb = decoded.to_rgb8();

        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode_image(&rgb)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

impl Default for JpegDataUriEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY, 10 * 1024 * 1024)
    }
}

impl ImageEncoder for JpegDataUriEncoder {
    fn to_data_uri(&self, upload: &ImageUpload) -> Result<String, ImageError> {
        upload.check_type()?;
        if upload.bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(ImageError::TooLarge {
                size: upload.bytes.len(),
                limit: self.max_bytes,
            });
        }

        let jpeg = self.reencode(&upload.bytes)?;
        tracing::debug!(
            input_bytes = upload.bytes.len(),
            output_bytes = jpeg.len(),
            "Re-encoded upload as JPEG"
        );

        Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg)))
    }
}
