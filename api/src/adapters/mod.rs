//! Adapters layer
//!
//! Concrete implementations of domain ports.
//! - `memory`: process-local draft storage
//! - `imaging`: upload decoding and JPEG re-encoding

pub mod imaging;
pub mod memory;

pub use imaging::{JpegDataUriEncoder, DEFAULT_JPEG_QUALITY};
pub use memory::InMemoryDraftRepository;
