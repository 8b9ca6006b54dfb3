//! Maven repository model and on-disk discovery.
//!
//! Coordinates are recovered purely from directory layout and file naming;
//! no descriptor content is parsed.

pub mod coordinate;
pub mod record;
pub mod scan;

pub use coordinate::{ArtifactKey, Coordinate};
pub use record::ArtifactRecord;
pub use scan::{scan, AssetLayout, RepositoryScanner, DESCRIPTOR_EXTENSION};
