//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks are used instead of mockall: they are explicit, easy to
//! debug, and return exactly what a test configures.
//!
//! The HTTP integration tests run against the real in-memory adapters, so the
//! mocks here are only needed at the service layer.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
