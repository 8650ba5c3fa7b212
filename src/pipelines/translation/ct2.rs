use super::engine::{Device, TranslationEngine, TranslationResult, MAX_BATCH_TOKENS};
use crate::common::error::RustNmtError;
use ct2rs::sys::{
    BatchType, Config as Ct2Config, Device as Ct2Device, TranslationOptions, Translator,
};
use std::path::Path;

pub(crate) fn cuda_device_count() -> usize {
    ct2rs::sys::get_cuda_device_count() as usize
}

/// # Translation engine backed by the CTranslate2 runtime
///
/// Loads a compiled CTranslate2 model directory onto the selected device.
/// Requires the native CTranslate2 library.
pub struct Ct2Engine {
    translator: Translator,
}

impl Ct2Engine {
    /// Loads the compiled model found in `model_dir` onto `device`.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - directory holding the converted CTranslate2 model
    /// * `device` - compute device, selected once at construction
    pub fn new(model_dir: &Path, device: Device) -> Result<Ct2Engine, RustNmtError> {
        let config = Ct2Config {
            device: match device {
                Device::Cpu => Ct2Device::CPU,
                Device::Cuda => Ct2Device::CUDA,
            },
            ..Default::default()
        };
        let translator = Translator::new(model_dir, &config)
            .map_err(|error| RustNmtError::EngineError(error.to_string()))?;
        Ok(Ct2Engine { translator })
    }
}

impl TranslationEngine for Ct2Engine {
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
    ) -> Result<Vec<TranslationResult>, RustNmtError> {
        let options = TranslationOptions {
            batch_type: BatchType::Tokens,
            max_batch_size: MAX_BATCH_TOKENS,
            ..Default::default()
        };
        let results = self
            .translator
            .translate_batch(batch, &[], &options)
            .map_err(|error| RustNmtError::EngineError(error.to_string()))?;
        Ok(results
            .into_iter()
            .map(|result| TranslationResult {
                hypotheses: result.hypotheses,
            })
            .collect())
    }
}
