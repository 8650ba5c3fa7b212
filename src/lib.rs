//! Ready-to-use neural machine translation pipeline.
//!
//! This crate wraps a pretrained translation model published on the Hugging Face
//! Hub behind a single `translate` call. It downloads the model snapshot on
//! first use, loads a pair of SentencePiece tokenizer models (one per language
//! direction) and a compiled CTranslate2 model, then exposes batched
//! sequence-to-sequence translation.
//!
//! The heavy lifting is delegated to external collaborators reached through
//! narrow traits:
//! - model transfer: `hf-hub` (feature `remote`, enabled by default)
//! - tokenization: `rust_tokenizers` (SentencePiece)
//! - inference: `ct2rs` / CTranslate2 (feature `ct2`, requires the native
//!   CTranslate2 library)
//!
//! # Basic usage
//!
//! ```no_run
//! # #[cfg(all(feature = "remote", feature = "ct2"))]
//! # fn main() -> anyhow::Result<()> {
//! use rust_nmt::pipelines::translation::{ConfigProvider, TranslationService};
//!
//! // Reads HUGGINGFACE_REPO_ID, MODEL_BASE_DIR and HUGGINGFACE_TOKEN from the
//! // process environment (a `.env` file is honored if present).
//! let config = ConfigProvider::from_environment()?;
//! let mut service = TranslationService::new(&config);
//!
//! // The first call downloads and loads the model; later calls reuse it.
//! let output = service.translate("আমি ভালো আছি");
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "remote", feature = "ct2")))]
//! # fn main() {}
//! ```
//!
//! Callers in ephemeral execution contexts (no persistent environment) can
//! supply the configuration explicitly instead:
//!
//! ```no_run
//! # #[cfg(all(feature = "remote", feature = "ct2"))]
//! # fn main() -> anyhow::Result<()> {
//! use rust_nmt::pipelines::translation::{create_service, RuntimeEnvironment};
//! use std::path::PathBuf;
//!
//! let mut service = create_service(
//!     RuntimeEnvironment::Ephemeral,
//!     Some("hf_xxx".to_string()),
//!     Some(PathBuf::from("/content/models")),
//!     Some("nascenia/bn2en_base".to_string()),
//! )?;
//! let output = service.translate("আমি ভালো আছি");
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "remote", feature = "ct2")))]
//! # fn main() {}
//! ```

pub mod common;
pub mod pipelines;

pub use common::error::RustNmtError;
pub use common::resources;
