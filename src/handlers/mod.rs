//! HTTP handlers for entity CRUD and unmatched requests.

pub mod entity;
pub mod fallback;
pub use entity::*;
