//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod imaging;
pub mod repositories;

pub use imaging::ImageEncoder;
pub use repositories::DraftRepository;
