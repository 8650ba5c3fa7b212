use crate::common::error::RustNmtError;
use std::env;
use std::path::{Path, PathBuf};

/// Repository used when `HUGGINGFACE_REPO_ID` is not set.
pub const DEFAULT_REPO_ID: &str = "nascenia/bn2en_base";

/// Environment variable holding the model repository identifier.
pub const ENV_REPO_ID: &str = "HUGGINGFACE_REPO_ID";
/// Environment variable holding the optional local storage directory.
pub const ENV_BASE_DIR: &str = "MODEL_BASE_DIR";
/// Environment variable holding the hub access token.
pub const ENV_TOKEN: &str = "HUGGINGFACE_TOKEN";

/// Execution context the pipeline is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Persistent environment with configuration in environment variables
    /// (a `.env` file is honored if present).
    Local,
    /// Restricted or ephemeral execution context (e.g. a hosted notebook)
    /// where all values must be supplied by the caller.
    Ephemeral,
}

/// Configuration sourced from the process environment.
///
/// All values are read eagerly at construction: a missing (or empty) access
/// token fails immediately rather than at first download.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    repo_id: String,
    base_dir: Option<PathBuf>,
    token: String,
}

impl EnvironmentConfig {
    /// Reads the configuration from `HUGGINGFACE_REPO_ID`, `MODEL_BASE_DIR`
    /// and `HUGGINGFACE_TOKEN`, loading a `.env` file first when one exists.
    ///
    /// # Returns
    ///
    /// * `EnvironmentConfig`, or `InvalidConfigurationError` if the token is
    ///   unset or empty
    pub fn from_env() -> Result<EnvironmentConfig, RustNmtError> {
        let _ = dotenvy::dotenv();

        let repo_id = env::var(ENV_REPO_ID).unwrap_or_else(|_| DEFAULT_REPO_ID.to_string());
        let base_dir = env::var_os(ENV_BASE_DIR).map(PathBuf::from);
        let token = env::var(ENV_TOKEN)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                RustNmtError::InvalidConfigurationError(format!(
                    "{} is required in environment variables",
                    ENV_TOKEN
                ))
            })?;

        Ok(EnvironmentConfig {
            repo_id,
            base_dir,
            token,
        })
    }
}

/// Configuration supplied explicitly by the caller. No defaulting, no
/// environment access.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitConfig {
    repo_id: String,
    base_dir: PathBuf,
    token: String,
}

impl ExplicitConfig {
    /// Builds an explicit configuration. All three parameters are required;
    /// the error message names exactly the ones that are missing.
    ///
    /// # Arguments
    ///
    /// * `token` - hub access token (empty counts as missing)
    /// * `base_dir` - directory the model subdirectory is created under
    /// * `repo_id` - `owner/name`-shaped repository identifier
    pub fn new(
        token: Option<String>,
        base_dir: Option<PathBuf>,
        repo_id: Option<String>,
    ) -> Result<ExplicitConfig, RustNmtError> {
        let mut missing = Vec::new();
        if token.as_deref().map_or(true, str::is_empty) {
            missing.push("token");
        }
        if base_dir.is_none() {
            missing.push("base_dir");
        }
        if repo_id.as_deref().map_or(true, str::is_empty) {
            missing.push("repo_id");
        }
        if !missing.is_empty() {
            return Err(RustNmtError::InvalidConfigurationError(format!(
                "Missing required parameters for explicit configuration: {}",
                missing.join(", ")
            )));
        }

        Ok(ExplicitConfig {
            repo_id: repo_id.unwrap(),
            base_dir: base_dir.unwrap(),
            token: token.unwrap(),
        })
    }
}

/// Configuration source for the translation pipeline, either read from the
/// process environment or supplied explicitly by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigProvider {
    Environment(EnvironmentConfig),
    Explicit(ExplicitConfig),
}

impl ConfigProvider {
    /// Builds an environment-sourced configuration, see
    /// [`EnvironmentConfig::from_env`].
    pub fn from_environment() -> Result<ConfigProvider, RustNmtError> {
        Ok(ConfigProvider::Environment(EnvironmentConfig::from_env()?))
    }

    /// Builds an explicit configuration, see [`ExplicitConfig::new`].
    pub fn explicit(
        token: Option<String>,
        base_dir: Option<PathBuf>,
        repo_id: Option<String>,
    ) -> Result<ConfigProvider, RustNmtError> {
        Ok(ConfigProvider::Explicit(ExplicitConfig::new(
            token, base_dir, repo_id,
        )?))
    }

    /// Model repository identifier.
    pub fn repo_id(&self) -> &str {
        match self {
            ConfigProvider::Environment(config) => &config.repo_id,
            ConfigProvider::Explicit(config) => &config.repo_id,
        }
    }

    /// Base directory for local model storage, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            ConfigProvider::Environment(config) => config.base_dir.as_deref(),
            ConfigProvider::Explicit(config) => Some(&config.base_dir),
        }
    }

    /// Hub access token.
    pub fn token(&self) -> &str {
        match self {
            ConfigProvider::Environment(config) => &config.token,
            ConfigProvider::Explicit(config) => &config.token,
        }
    }
}

/// Selects the configuration variant for the given runtime environment.
///
/// For `RuntimeEnvironment::Local` the explicit parameters are ignored and the
/// configuration is read from the process environment. For
/// `RuntimeEnvironment::Ephemeral` all three parameters are required.
///
/// # Example
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// use rust_nmt::pipelines::translation::{config_for_environment, RuntimeEnvironment};
/// use std::path::PathBuf;
///
/// let config = config_for_environment(
///     RuntimeEnvironment::Ephemeral,
///     Some("hf_xxx".to_string()),
///     Some(PathBuf::from("/content/models")),
///     Some("nascenia/bn2en_base".to_string()),
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn config_for_environment(
    environment: RuntimeEnvironment,
    token: Option<String>,
    base_dir: Option<PathBuf>,
    repo_id: Option<String>,
) -> Result<ConfigProvider, RustNmtError> {
    match environment {
        RuntimeEnvironment::Local => ConfigProvider::from_environment(),
        RuntimeEnvironment::Ephemeral => ConfigProvider::explicit(token, base_dir, repo_id),
    }
}
