//! # Resource definitions for translation model artifacts
//!
//! The pipeline accesses its model files through Resources: a directory holding
//! the source and target SentencePiece models and the compiled translation
//! model. Two types of resources are pre-defined:
//! - `LocalResource`: points to a model directory already present on disk
//! - `RemoteResource`: points to a model repository on the Hugging Face Hub,
//!   downloaded and cached locally on demand (requires the `remote` feature)
//!
//! For both types, the local location of the model directory is retrieved using
//! `get_local_path`, allowing the pipeline to reference the artifacts
//! regardless of whether the resource is remote or local.

mod local;

use crate::common::error::RustNmtError;
pub use local::LocalResource;
use std::path::PathBuf;

/// # Resource Trait that can provide the location of the model artifacts
pub trait ResourceProvider {
    /// Provides the local path for the model directory, materializing it first
    /// if needed.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the directory holding the model artifacts
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_nmt::resources::{LocalResource, ResourceProvider};
    /// use std::path::PathBuf;
    /// let model_resource = LocalResource {
    ///     local_path: PathBuf::from("path/to/bn2en_base"),
    /// };
    /// let model_path = model_resource.get_local_path();
    /// ```
    fn get_local_path(&self) -> Result<PathBuf, RustNmtError>;
}

#[cfg(feature = "remote")]
mod remote;
#[cfg(feature = "remote")]
pub use remote::RemoteResource;
