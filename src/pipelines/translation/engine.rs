use crate::common::error::RustNmtError;

/// Upper bound on the combined token count submitted to the engine in a single
/// physical batch. Bounds memory and latency per call regardless of how many
/// inputs are submitted.
pub const MAX_BATCH_TOKENS: usize = 4096;

/// Compute device the translation model is loaded onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Cuda,
}

impl Device {
    /// Returns `Device::Cuda` when an accelerated device is available at
    /// process start, `Device::Cpu` otherwise. The probe requires the `ct2`
    /// feature; without it this always selects the CPU.
    pub fn cuda_if_available() -> Device {
        #[cfg(feature = "ct2")]
        {
            if super::ct2::cuda_device_count() > 0 {
                return Device::Cuda;
            }
        }
        Device::Cpu
    }
}

/// Ranked candidate outputs produced by the engine for one input, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub hypotheses: Vec<Vec<String>>,
}

impl TranslationResult {
    /// The top-ranked hypothesis, if the engine produced any.
    pub fn top_hypothesis(&self) -> Option<&[String]> {
        self.hypotheses.first().map(|hypothesis| hypothesis.as_slice())
    }
}

/// Batched sequence-to-sequence translation over tokenized inputs.
pub trait TranslationEngine {
    /// Translates a batch of tokenized inputs, returning one result per input
    /// in submission order.
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
    ) -> Result<Vec<TranslationResult>, RustNmtError>;
}

/// Groups inputs into contiguous physical batches whose combined token count
/// stays within `max_tokens`. A single input longer than the budget forms a
/// batch of its own.
pub(crate) fn split_by_token_budget(
    inputs: &[Vec<String>],
    max_tokens: usize,
) -> Vec<&[Vec<String>]> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut tokens = 0;
    for (index, input) in inputs.iter().enumerate() {
        if index > start && tokens + input.len() > max_tokens {
            batches.push(&inputs[start..index]);
            start = index;
            tokens = 0;
        }
        tokens += input.len();
    }
    if start < inputs.len() {
        batches.push(&inputs[start..]);
    }
    batches
}
