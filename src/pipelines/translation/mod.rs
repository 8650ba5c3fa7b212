//! # Translation pipeline
//!
//! Translation of an input text from a source to a target language, delegating
//! tokenization and inference to pretrained models fetched from a model hub.
//!
//! The pipeline is composed of small collaborators, each reachable through a
//! trait so that they can be replaced in tests:
//! - [`ConfigProvider`]: repository identifier, storage directory and access
//!   token, sourced from the process environment or supplied explicitly
//! - [`crate::resources::ResourceProvider`]: materializes the model artifacts
//!   locally and resolves their directory
//! - [`TokenizerPair`]: source-side encoding and target-side decoding
//! - [`TranslationEngine`]: batched sequence-to-sequence inference
//! - [`TranslationService`]: lazy one-time initialization and the public
//!   `translate` entry point
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(all(feature = "remote", feature = "ct2"))]
//! # fn main() -> anyhow::Result<()> {
//! use rust_nmt::pipelines::translation::{ConfigProvider, TranslationService};
//!
//! let config = ConfigProvider::from_environment()?;
//! let mut service = TranslationService::new(&config);
//! if let Some(output) = service.translate("আমি ভালো আছি") {
//!     println!("{}", output);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "remote", feature = "ct2")))]
//! # fn main() {}
//! ```

mod config;
mod engine;
mod service;
mod tokenizer;

#[cfg(feature = "ct2")]
mod ct2;

pub use config::{
    config_for_environment, ConfigProvider, EnvironmentConfig, ExplicitConfig, RuntimeEnvironment,
    DEFAULT_REPO_ID, ENV_BASE_DIR, ENV_REPO_ID, ENV_TOKEN,
};
pub use engine::{Device, TranslationEngine, TranslationResult, MAX_BATCH_TOKENS};
pub use service::{ModelLoader, TranslationModel, TranslationService};
pub use tokenizer::{SentencePiecePair, TokenizerPair};

#[cfg(feature = "ct2")]
pub use ct2::Ct2Engine;
#[cfg(feature = "ct2")]
pub use service::SentencePieceCt2Loader;

#[cfg(all(feature = "remote", feature = "ct2"))]
pub use service::create_service;
