use super::ResourceProvider;
use crate::common::error::RustNmtError;
use hf_hub::api::sync::ApiBuilder;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// # Remote resource pointing to a model repository on the Hugging Face Hub
///
/// The full snapshot is downloaded and cached locally on demand. Transfer
/// details (authentication, skip-if-already-present, resumable downloads,
/// integrity checks) are handled by the hub client.
#[derive(PartialEq, Clone, Debug)]
pub struct RemoteResource {
    /// `owner/name`-shaped repository identifier
    pub repo_id: String,
    /// Hub access token
    pub token: String,
    /// Optional base directory the model subdirectory is created under
    pub base_dir: Option<PathBuf>,
}

impl RemoteResource {
    /// Creates a new RemoteResource. Note that this does not download the
    /// snapshot (only declares the remote and local locations).
    ///
    /// # Arguments
    ///
    /// * `repo_id` - `&str` repository identifier, e.g. `nascenia/bn2en_base`
    /// * `token` - `&str` hub access token
    /// * `base_dir` - Optional base directory for local storage. When absent,
    ///   the model directory is created relative to the working directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_nmt::resources::RemoteResource;
    /// let model_resource = RemoteResource::new("nascenia/bn2en_base", "hf_xxx", None);
    /// ```
    pub fn new(repo_id: &str, token: &str, base_dir: Option<PathBuf>) -> RemoteResource {
        RemoteResource {
            repo_id: repo_id.to_string(),
            token: token.to_string(),
            base_dir,
        }
    }

    /// Local directory the snapshot is stored under: the base directory joined
    /// with the repository name (the portion of the identifier after the last
    /// `/`), or the repository name alone if no base directory was given.
    pub fn model_directory(&self) -> PathBuf {
        let name = repo_name(&self.repo_id);
        match &self.base_dir {
            Some(base_dir) => base_dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

fn repo_name(repo_id: &str) -> &str {
    repo_id
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(repo_id)
}

impl ResourceProvider for RemoteResource {
    /// Gets the local path for the model directory, downloading the snapshot
    /// from the hub if it is not already cached.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the local snapshot of the model repository
    fn get_local_path(&self) -> Result<PathBuf, RustNmtError> {
        let model_dir = self.model_directory();
        if let Some(parent) = model_dir.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        info!("Downloading model snapshot for {}", self.repo_id);
        let api = ApiBuilder::new()
            .with_token(Some(self.token.clone()))
            .with_cache_dir(model_dir)
            .build()?;
        let repo = api.model(self.repo_id.clone());
        let repo_info = repo.info()?;

        let mut snapshot_root: Option<PathBuf> = None;
        for sibling in &repo_info.siblings {
            let local_file = repo.get(&sibling.rfilename)?;
            if snapshot_root.is_none() {
                let mut root = local_file.clone();
                for _ in Path::new(&sibling.rfilename).components() {
                    root.pop();
                }
                snapshot_root = Some(root);
            }
        }

        let snapshot_root = snapshot_root.ok_or_else(|| {
            RustNmtError::FileDownloadError(format!(
                "No files found in model repository {}",
                self.repo_id
            ))
        })?;
        info!("Model snapshot available at {}", snapshot_root.display());
        Ok(snapshot_root)
    }
}
