//! HTTP handlers
//!
//! Axum request handlers for the builder page, the form submission,
//! the JSON API and draft preview/download.

pub mod builder;
pub mod form;
pub mod newsletters;

pub use builder::{builder_page, get_options};
pub use form::build_from_form;
pub use newsletters::{
    create_newsletter, delete_newsletter, download_newsletter, get_newsletter, list_newsletters,
    preview_newsletter, view_newsletter,
};
