use super::engine::{split_by_token_budget, Device, TranslationEngine, MAX_BATCH_TOKENS};
use super::tokenizer::TokenizerPair;
use crate::common::error::RustNmtError;
use crate::resources::ResourceProvider;
use log::{info, warn};
use std::path::Path;

#[cfg(feature = "ct2")]
use super::ct2::Ct2Engine;
#[cfg(feature = "ct2")]
use super::tokenizer::SentencePiecePair;

#[cfg(all(feature = "remote", feature = "ct2"))]
use super::config::{config_for_environment, ConfigProvider, RuntimeEnvironment};
#[cfg(all(feature = "remote", feature = "ct2"))]
use crate::resources::RemoteResource;
#[cfg(all(feature = "remote", feature = "ct2"))]
use std::path::PathBuf;

/// Constructs the tokenizer/engine bundle from a resolved model directory.
pub trait ModelLoader {
    fn load(&self, model_dir: &Path, device: Device) -> Result<TranslationModel, RustNmtError>;
}

/// # Loaded translation model
///
/// Bundles a tokenizer pair and an inference engine, implementing the per-call
/// flow: source-encode, batched inference, top hypothesis, target-decode.
pub struct TranslationModel {
    tokenizer: Box<dyn TokenizerPair + Send>,
    engine: Box<dyn TranslationEngine + Send>,
}

impl TranslationModel {
    pub fn new(
        tokenizer: Box<dyn TokenizerPair + Send>,
        engine: Box<dyn TranslationEngine + Send>,
    ) -> TranslationModel {
        TranslationModel { tokenizer, engine }
    }

    /// Translates the provided texts.
    ///
    /// Inputs are grouped into physical batches bounded by
    /// [`MAX_BATCH_TOKENS`] combined tokens; only the top-ranked hypothesis
    /// per input is decoded.
    ///
    /// # Arguments
    ///
    /// * `texts` - texts to translate
    ///
    /// # Returns
    ///
    /// * `Vec<String>` translated texts, in input order
    pub fn translate<S>(&self, texts: &[S]) -> Result<Vec<String>, RustNmtError>
    where
        S: AsRef<str>,
    {
        let encoded = texts
            .iter()
            .map(|text| self.tokenizer.encode(text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut outputs = Vec::with_capacity(texts.len());
        for batch in split_by_token_budget(&encoded, MAX_BATCH_TOKENS) {
            let results = self.engine.translate_batch(batch)?;
            if results.len() != batch.len() {
                return Err(RustNmtError::TranslationError(format!(
                    "Engine returned {} results for a batch of {} inputs",
                    results.len(),
                    batch.len()
                )));
            }
            for result in results {
                let top_hypothesis = result.hypotheses.into_iter().next().ok_or_else(|| {
                    RustNmtError::TranslationError(
                        "Engine returned no hypothesis for an input".to_string(),
                    )
                })?;
                outputs.push(self.tokenizer.decode(&top_hypothesis)?);
            }
        }
        Ok(outputs)
    }
}

enum ServiceState {
    Uninitialized,
    Ready(TranslationModel),
}

/// # Translation service with lazy one-time initialization
///
/// The service starts `Uninitialized` and runs the full setup (resolve model
/// artifacts, load tokenizers and engine) on the first translation call. A
/// failed attempt leaves it `Uninitialized` and setup is re-attempted on the
/// next call, with no backoff; a persistently broken configuration therefore
/// repeats the potentially expensive fetch on every call. Once `Ready`, a
/// failing call does not invalidate the loaded model.
///
/// A service instance is not safe for concurrent use; callers requiring
/// concurrency must serialize access or use one instance per worker.
pub struct TranslationService {
    resource: Box<dyn ResourceProvider + Send>,
    loader: Box<dyn ModelLoader + Send>,
    device: Device,
    state: ServiceState,
}

impl TranslationService {
    /// Builds a service for the given configuration, selecting an accelerated
    /// device when available.
    #[cfg(all(feature = "remote", feature = "ct2"))]
    pub fn new(config: &ConfigProvider) -> TranslationService {
        TranslationService::with_device(config, Device::cuda_if_available())
    }

    /// Builds a service for the given configuration and an explicit device.
    #[cfg(all(feature = "remote", feature = "ct2"))]
    pub fn with_device(config: &ConfigProvider, device: Device) -> TranslationService {
        TranslationService::with_components(
            Box::new(RemoteResource::new(
                config.repo_id(),
                config.token(),
                config.base_dir().map(Path::to_path_buf),
            )),
            Box::new(SentencePieceCt2Loader::default()),
            device,
        )
    }

    /// Builds a service from explicit collaborators. This is the seam used to
    /// substitute stub resources, tokenizers and engines in tests, and allows
    /// pairing a [`crate::resources::LocalResource`] with a custom loader.
    pub fn with_components(
        resource: Box<dyn ResourceProvider + Send>,
        loader: Box<dyn ModelLoader + Send>,
        device: Device,
    ) -> TranslationService {
        TranslationService {
            resource,
            loader,
            device,
            state: ServiceState::Uninitialized,
        }
    }

    /// True once the model bundle has been loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ServiceState::Ready(_))
    }

    fn initialize(&mut self) -> Result<(), RustNmtError> {
        let model_dir = self.resource.get_local_path()?;
        let model = self.loader.load(&model_dir, self.device)?;
        self.state = ServiceState::Ready(model);
        info!("Translation system initialized from {}", model_dir.display());
        Ok(())
    }

    /// Translates `text`, returning `None` on any failure.
    ///
    /// Failures (setup or per-call) are logged with a human-readable message;
    /// callers needing structured errors should use [`Self::try_translate`].
    pub fn translate(&mut self, text: &str) -> Option<String> {
        match self.try_translate(text) {
            Ok(output) => Some(output),
            Err(error) => {
                warn!("Translation failed: {}", error);
                None
            }
        }
    }

    /// Translates several texts in one call, returning `None` on any failure.
    pub fn translate_batch<S>(&mut self, texts: &[S]) -> Option<Vec<String>>
    where
        S: AsRef<str>,
    {
        match self.try_translate_batch(texts) {
            Ok(outputs) => Some(outputs),
            Err(error) => {
                warn!("Translation failed: {}", error);
                None
            }
        }
    }

    /// Translates `text`, surfacing the failure cause instead of collapsing it
    /// into the `None` sentinel. State transitions are identical to
    /// [`Self::translate`].
    pub fn try_translate(&mut self, text: &str) -> Result<String, RustNmtError> {
        let mut outputs = self.try_translate_batch(&[text])?;
        outputs.pop().ok_or_else(|| {
            RustNmtError::TranslationError("Engine returned no output".to_string())
        })
    }

    /// Translates several texts in one call, surfacing the failure cause.
    pub fn try_translate_batch<S>(&mut self, texts: &[S]) -> Result<Vec<String>, RustNmtError>
    where
        S: AsRef<str>,
    {
        if let ServiceState::Uninitialized = self.state {
            self.initialize()?;
        }
        match &self.state {
            ServiceState::Ready(model) => model.translate(texts),
            ServiceState::Uninitialized => Err(RustNmtError::TranslationError(
                "Translation system is not initialized".to_string(),
            )),
        }
    }
}

/// # Production model loader
///
/// Loads the SentencePiece tokenizer pair and the CTranslate2 engine from a
/// resolved model directory. Tokenizer model file names follow the repository
/// layout of the default model (`bn.model` / `en.model`) and can be overridden
/// for repositories using different names.
#[cfg(feature = "ct2")]
pub struct SentencePieceCt2Loader {
    pub source_model_file: String,
    pub target_model_file: String,
}

#[cfg(feature = "ct2")]
impl Default for SentencePieceCt2Loader {
    fn default() -> Self {
        SentencePieceCt2Loader {
            source_model_file: "bn.model".to_string(),
            target_model_file: "en.model".to_string(),
        }
    }
}

#[cfg(feature = "ct2")]
impl ModelLoader for SentencePieceCt2Loader {
    fn load(&self, model_dir: &Path, device: Device) -> Result<TranslationModel, RustNmtError> {
        let tokenizer = SentencePiecePair::from_files(
            &model_dir.join(&self.source_model_file),
            &model_dir.join(&self.target_model_file),
        )?;
        let engine = Ct2Engine::new(model_dir, device)?;
        Ok(TranslationModel::new(Box::new(tokenizer), Box::new(engine)))
    }
}

/// Creates a ready-to-use translation service for the given runtime
/// environment. This is the single construction entry point combining the
/// configuration factory with service construction.
///
/// # Arguments
///
/// * `environment` - `Local` (environment-sourced configuration, explicit
///   parameters ignored) or `Ephemeral` (all parameters required)
/// * `token` / `base_dir` / `repo_id` - explicit configuration values
///
/// # Returns
///
/// * `TranslationService`, or `InvalidConfigurationError` when required
///   configuration is missing (raised before any network or filesystem access)
#[cfg(all(feature = "remote", feature = "ct2"))]
pub fn create_service(
    environment: RuntimeEnvironment,
    token: Option<String>,
    base_dir: Option<PathBuf>,
    repo_id: Option<String>,
) -> Result<TranslationService, RustNmtError> {
    let config = config_for_environment(environment, token, base_dir, repo_id)?;
    Ok(TranslationService::new(&config))
}
