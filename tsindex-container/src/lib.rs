//! On-disk resource containers: the managed library of open and closed
//! containers, the `properties.json` manifest, and conversion of legacy
//! catalog payloads into the container layout.

pub mod convert;
pub mod error;
pub mod library;
pub mod properties;

pub use convert::{LegacySource, convert_legacy_resource, word_links};
pub use error::ContainerError;
pub use library::{ContainerLibrary, ResourceContainer};
pub use properties::ContainerProperties;
pub use tsindex_types::normalize_slug;
