//! Resource catalog data model types, remote feed shapes, and slug helpers.
//!
//! This crate defines the entities mirrored from the remote catalog without
//! any database dependencies. Consumers can use these types directly for
//! serialization, display, or passing to `tsindex-db` for persistence.

pub mod feeds;
pub mod slug;
pub mod types;

pub use slug::{container_slug, normalize_slug, parse_container_slug};
pub use types::*;
