use crate::common::error::RustNmtError;
use rust_tokenizers::tokenizer::{SentencePieceTokenizer, Tokenizer};
use std::path::Path;

/// Text segmentation for one language direction pair: encoding on the source
/// side, decoding on the target side. The two sides are independent models
/// with no shared vocabulary.
pub trait TokenizerPair {
    /// Segments the source-language text into a sequence of token strings.
    fn encode(&self, text: &str) -> Result<Vec<String>, RustNmtError>;

    /// Reassembles target-language text from a sequence of token strings.
    fn decode(&self, tokens: &[String]) -> Result<String, RustNmtError>;
}

/// # Tokenizer pair backed by two SentencePiece models
pub struct SentencePiecePair {
    source: SentencePieceTokenizer,
    target: SentencePieceTokenizer,
}

impl SentencePiecePair {
    /// Loads the source and target SentencePiece models. Fails if either model
    /// file is missing or malformed; no partial recovery is attempted.
    ///
    /// # Arguments
    ///
    /// * `source_model` - path to the source-language SentencePiece model file
    /// * `target_model` - path to the target-language SentencePiece model file
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use rust_nmt::pipelines::translation::SentencePiecePair;
    /// use std::path::Path;
    ///
    /// let pair = SentencePiecePair::from_files(
    ///     Path::new("bn2en_base/bn.model"),
    ///     Path::new("bn2en_base/en.model"),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_files(
        source_model: &Path,
        target_model: &Path,
    ) -> Result<SentencePiecePair, RustNmtError> {
        let source =
            SentencePieceTokenizer::from_file(source_model.to_string_lossy().as_ref(), false)?;
        let target =
            SentencePieceTokenizer::from_file(target_model.to_string_lossy().as_ref(), false)?;
        Ok(SentencePiecePair { source, target })
    }
}

impl TokenizerPair for SentencePiecePair {
    fn encode(&self, text: &str) -> Result<Vec<String>, RustNmtError> {
        Ok(self.source.tokenize(text))
    }

    fn decode(&self, tokens: &[String]) -> Result<String, RustNmtError> {
        let token_ids = self.target.convert_tokens_to_ids(tokens);
        Ok(self.target.decode(&token_ids, true, true))
    }
}
