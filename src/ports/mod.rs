//! Port traits defining external boundaries.
//!
//! The remote artifact server is the only collaborator the upload core talks
//! to. Implementations live in `src/adapters/`.

pub mod repository;

pub use repository::{extension_of, ArtifactRepository, Existence, StagedAsset, Submission};
