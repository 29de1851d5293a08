//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and rendering.

pub mod input;
pub mod limits;
pub mod newsletter_service;

pub use input::{FooterInput, HeaderInput, LayerInput, NewsletterInput};
pub use newsletter_service::{NewsletterOptions, NewsletterService};
