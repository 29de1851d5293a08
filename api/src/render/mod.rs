//! Render module
//!
//! Email-safe HTML rendering of composed newsletters.

pub mod html;

pub use html::generate_html;
