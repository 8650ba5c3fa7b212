use crate::common::error::RustNmtError;
use crate::resources::ResourceProvider;
use std::path::PathBuf;

/// # Local resource
#[derive(PartialEq, Clone, Debug)]
pub struct LocalResource {
    /// Local path for the model directory
    pub local_path: PathBuf,
}

impl ResourceProvider for LocalResource {
    /// Gets the path for a local resource.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the model directory
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
    fn get_local_path(&self) -> Result<PathBuf, RustNmtError> {
        Ok(self.local_path.clone())
    }
}
