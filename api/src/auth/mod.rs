//! Authentication
//!
//! Optional bearer-key protection for the JSON API.

pub mod api_key;

pub use api_key::{api_key_middleware, hash_api_key};
