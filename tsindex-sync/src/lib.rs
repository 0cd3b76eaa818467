//! Synchronization of remote catalogs into the index, and the download and
//! import pipeline for resource containers.
//!
//! Every remote read goes through the [`Fetch`] trait so callers (and tests)
//! decide how bytes are obtained.

pub mod catalog_sync;
pub mod chunks;
pub mod client;
pub mod error;
pub mod global;
pub mod pipeline;
pub mod progress;
pub mod settings;

pub use catalog_sync::{SyncReport, synchronize_sources};
pub use chunks::{ChunkReport, DEFAULT_VERSIFICATION, update_chunks};
pub use client::{Fetch, HttpFetcher, fetch_json};
pub use error::{FetchError, SyncError};
pub use global::{GlobalReport, update_catalogs};
pub use pipeline::{download, import_resource_container};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use settings::{GLOBAL_CATALOGS, SyncSettings};
