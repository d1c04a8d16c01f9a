//! Installed-resource records.
//!
//! This module provides the typed descriptor for a discovered resource, the
//! dotted version type used throughout discovery, and the decoder that
//! reconstructs a descriptor from a deserialized metadata bag.

mod decode;
mod info;
mod version;

pub use decode::decode_resource;
pub use info::{DependencyConstraint, ResourceInfo, ResourceType};
pub use version::{PsVersion, VersionParseError};
