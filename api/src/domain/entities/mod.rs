//! Domain entities
//!
//! Pure domain models representing the newsletter and its stored drafts.

pub mod draft;
pub mod newsletter;
pub mod style;
pub mod upload;

pub use draft::{Draft, DraftId, NewDraft};
pub use newsletter::{FooterConfig, HeaderConfig, HeaderImage, Layer, Newsletter};
pub use style::{FontFamily, HexColor, ImageAlignment};
pub use upload::ImageUpload;
