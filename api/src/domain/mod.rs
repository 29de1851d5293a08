//! Domain layer
//!
//! Newsletter model and the ports it depends on. Nothing here touches HTTP.
//! - `entities`: newsletter, drafts, styling values, uploads
//! - `ports`: draft storage and image encoding traits

pub mod entities;
pub mod ports;
