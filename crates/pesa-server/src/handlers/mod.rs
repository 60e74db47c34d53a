//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod health;
pub mod messages;
pub mod summary;

// Re-export all handlers for use in router
pub use health::*;
pub use messages::*;
pub use summary::*;
