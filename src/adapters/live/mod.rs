//! Live adapters for real external interactions.

pub mod nexus3;

pub use nexus3::Nexus3Repository;
