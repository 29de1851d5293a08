//! Image processing adapters

pub mod jpeg_encoder;

pub use jpeg_encoder::{JpegDataUriEncoder, DEFAULT_JPEG_QUALITY};
