use rust_tokenizers::error::TokenizerError;
use thiserror::Error;

/// Errors raised by the translation pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum RustNmtError {
    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("Model download error: {0}")]
    FileDownloadError(String),

    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    #[error("Translation engine error: {0}")]
    EngineError(String),

    #[error("Translation error: {0}")]
    TranslationError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for RustNmtError {
    fn from(error: std::io::Error) -> Self {
        RustNmtError::IOError(error.to_string())
    }
}

impl From<TokenizerError> for RustNmtError {
    fn from(error: TokenizerError) -> Self {
        RustNmtError::TokenizerError(error.to_string())
    }
}

#[cfg(feature = "remote")]
impl From<hf_hub::api::sync::ApiError> for RustNmtError {
    fn from(error: hf_hub::api::sync::ApiError) -> Self {
        RustNmtError::FileDownloadError(error.to_string())
    }
}
