use rust_nmt::pipelines::translation::{
    Device, ModelLoader, SentencePiecePair, TokenizerPair, TranslationEngine, TranslationModel,
    TranslationResult, TranslationService, MAX_BATCH_TOKENS,
};
use rust_nmt::resources::{LocalResource, ResourceProvider};
use rust_nmt::RustNmtError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type LoaderResult = Result<TranslationModel, RustNmtError>;

//  Stub collaborators

struct FailingResource {
    calls: Arc<AtomicUsize>,
}

impl ResourceProvider for FailingResource {
    fn get_local_path(&self) -> Result<PathBuf, RustNmtError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RustNmtError::FileDownloadError(
            "network unreachable".to_string(),
        ))
    }
}

struct CountingResource {
    calls: Arc<AtomicUsize>,
    local_path: PathBuf,
}

impl ResourceProvider for CountingResource {
    fn get_local_path(&self) -> Result<PathBuf, RustNmtError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.local_path.clone())
    }
}

struct FnLoader<F>(F);

impl<F> ModelLoader for FnLoader<F>
where
    F: Fn(&Path, Device) -> Result<TranslationModel, RustNmtError>,
{
    fn load(&self, model_dir: &Path, device: Device) -> LoaderResult {
        (self.0)(model_dir, device)
    }
}

struct WhitespaceTokenizer;

impl TokenizerPair for WhitespaceTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<String>, RustNmtError> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn decode(&self, tokens: &[String]) -> Result<String, RustNmtError> {
        Ok(tokens.join(" "))
    }
}

/// Returns each input unchanged as its only hypothesis.
struct EchoEngine;

impl TranslationEngine for EchoEngine {
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
    ) -> Result<Vec<TranslationResult>, RustNmtError> {
        Ok(batch
            .iter()
            .map(|input| TranslationResult {
                hypotheses: vec![input.clone()],
            })
            .collect())
    }
}

/// Returns two ranked hypotheses per input; only the top one must be consumed.
struct RankedEngine;

impl TranslationEngine for RankedEngine {
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
    ) -> Result<Vec<TranslationResult>, RustNmtError> {
        Ok(batch
            .iter()
            .map(|_| TranslationResult {
                hypotheses: vec![
                    vec!["I".to_string(), "am".to_string(), "fine".to_string()],
                    vec!["me".to_string(), "good".to_string()],
                ],
            })
            .collect())
    }
}

/// Fails a fixed number of calls, then behaves like `EchoEngine`.
struct FlakyEngine {
    remaining_failures: AtomicUsize,
}

impl TranslationEngine for FlakyEngine {
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
    ) -> Result<Vec<TranslationResult>, RustNmtError> {
        if self.remaining_failures.load(Ordering::SeqCst) > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(RustNmtError::TranslationError(
                "transient engine failure".to_string(),
            ));
        }
        EchoEngine.translate_batch(batch)
    }
}

/// Panics when a physical batch exceeds the token ceiling.
struct CeilingAssertingEngine {
    max_tokens: usize,
    batches_seen: Arc<AtomicUsize>,
}

impl TranslationEngine for CeilingAssertingEngine {
    fn translate_batch(
        &self,
        batch: &[Vec<String>],
    ) -> Result<Vec<TranslationResult>, RustNmtError> {
        let total_tokens: usize = batch.iter().map(Vec::len).sum();
        assert!(
            total_tokens <= self.max_tokens,
            "physical batch of {} tokens exceeds the {} token ceiling",
            total_tokens,
            self.max_tokens
        );
        self.batches_seen.fetch_add(1, Ordering::SeqCst);
        EchoEngine.translate_batch(batch)
    }
}

fn stub_resource(calls: &Arc<AtomicUsize>) -> Box<CountingResource> {
    Box::new(CountingResource {
        calls: calls.clone(),
        local_path: PathBuf::from("stub-model"),
    })
}

fn model_with_engine(engine: Box<dyn TranslationEngine + Send>) -> TranslationModel {
    TranslationModel::new(Box::new(WhitespaceTokenizer), engine)
}

//  Setup failures

#[test]
fn fetch_failure_yields_sentinel_and_is_retried_on_next_call() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let load_calls = Arc::new(AtomicUsize::new(0));
    let load_calls_in_loader = load_calls.clone();

    let mut service = TranslationService::with_components(
        Box::new(FailingResource {
            calls: fetch_calls.clone(),
        }),
        Box::new(FnLoader(move |_: &Path, _| -> LoaderResult {
            load_calls_in_loader.fetch_add(1, Ordering::SeqCst);
            Ok(model_with_engine(Box::new(EchoEngine)))
        })),
        Device::Cpu,
    );

    assert_eq!(service.translate("ami bhalo achi"), None);
    assert!(!service.is_ready());
    assert_eq!(service.translate("ami bhalo achi"), None);

    // Setup is re-attempted on every call; the loader never runs when the
    // fetch fails.
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 2);
    assert_eq!(load_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn load_failure_yields_sentinel_and_is_retried_on_next_call() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let load_calls = Arc::new(AtomicUsize::new(0));
    let load_calls_in_loader = load_calls.clone();

    let mut service = TranslationService::with_components(
        stub_resource(&fetch_calls),
        Box::new(FnLoader(move |_: &Path, _| -> LoaderResult {
            load_calls_in_loader.fetch_add(1, Ordering::SeqCst);
            Err(RustNmtError::TokenizerError(
                "bn.model is missing".to_string(),
            ))
        })),
        Device::Cpu,
    );

    assert_eq!(service.translate("ami bhalo achi"), None);
    assert!(!service.is_ready());
    assert_eq!(service.translate("ami bhalo achi"), None);

    assert_eq!(fetch_calls.load(Ordering::SeqCst), 2);
    assert_eq!(load_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn typed_api_surfaces_the_failure_cause() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let mut service = TranslationService::with_components(
        Box::new(FailingResource { calls: fetch_calls }),
        Box::new(FnLoader(|_: &Path, _| -> LoaderResult {
            Ok(model_with_engine(Box::new(EchoEngine)))
        })),
        Device::Cpu,
    );

    match service.try_translate("ami bhalo achi") {
        Err(RustNmtError::FileDownloadError(message)) => {
            assert!(message.contains("network unreachable"))
        }
        other => panic!("expected FileDownloadError, got {:?}", other),
    }
}

//  Happy path

#[test]
fn end_to_end_returns_the_decoded_top_hypothesis() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let mut service = TranslationService::with_components(
        stub_resource(&fetch_calls),
        Box::new(FnLoader(|_: &Path, _| -> LoaderResult {
            Ok(model_with_engine(Box::new(RankedEngine)))
        })),
        Device::Cpu,
    );

    assert_eq!(
        service.translate("ami bhalo achi"),
        Some("I am fine".to_string())
    );
    assert!(service.is_ready());
}

#[test]
fn initialization_runs_once_across_calls() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let mut service = TranslationService::with_components(
        stub_resource(&fetch_calls),
        Box::new(FnLoader(|_: &Path, _| -> LoaderResult {
            Ok(model_with_engine(Box::new(EchoEngine)))
        })),
        Device::Cpu,
    );

    assert_eq!(
        service.translate("ami bhalo achi"),
        Some("ami bhalo achi".to_string())
    );
    assert_eq!(
        service.translate("tumi kemon acho"),
        Some("tumi kemon acho".to_string())
    );
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn local_resource_skips_the_hub_entirely() {
    let mut service = TranslationService::with_components(
        Box::new(LocalResource {
            local_path: PathBuf::from("/models/bn2en_base"),
        }),
        Box::new(FnLoader(|model_dir: &Path, _| -> LoaderResult {
            assert_eq!(model_dir, Path::new("/models/bn2en_base"));
            Ok(model_with_engine(Box::new(EchoEngine)))
        })),
        Device::Cpu,
    );

    assert_eq!(service.translate("ami"), Some("ami".to_string()));
}

//  Per-call failures once Ready

#[test]
fn engine_failure_leaves_the_service_ready() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let mut service = TranslationService::with_components(
        stub_resource(&fetch_calls),
        Box::new(FnLoader(|_: &Path, _| -> LoaderResult {
            Ok(model_with_engine(Box::new(FlakyEngine {
                remaining_failures: AtomicUsize::new(1),
            })))
        })),
        Device::Cpu,
    );

    // First call fails during inference, after a successful setup.
    assert_eq!(service.translate("ami bhalo achi"), None);
    assert!(service.is_ready());

    // A bad call must not invalidate the loaded model: the next call succeeds
    // without re-running fetch or load.
    assert_eq!(
        service.translate("ami bhalo achi"),
        Some("ami bhalo achi".to_string())
    );
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 1);
}

//  Batching policy

#[test]
fn physical_batches_stay_within_the_token_ceiling() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let batches_seen = Arc::new(AtomicUsize::new(0));
    let batches_seen_in_loader = batches_seen.clone();

    let mut service = TranslationService::with_components(
        stub_resource(&fetch_calls),
        Box::new(FnLoader(move |_: &Path, _| -> LoaderResult {
            Ok(model_with_engine(Box::new(CeilingAssertingEngine {
                max_tokens: MAX_BATCH_TOKENS,
                batches_seen: batches_seen_in_loader.clone(),
            })))
        })),
        Device::Cpu,
    );

    // 1000 inputs of 5 tokens each: 5000 tokens combined, above the ceiling.
    let texts = vec!["ek dui tin char panch"; 1000];
    let outputs = service
        .try_translate_batch(&texts)
        .expect("batched translation failed");

    assert_eq!(outputs.len(), 1000);
    assert!(batches_seen.load(Ordering::SeqCst) >= 2);
}

#[test]
fn top_hypothesis_is_the_first_ranked_candidate() {
    let result = TranslationResult {
        hypotheses: vec![
            vec!["I".to_string(), "am".to_string(), "fine".to_string()],
            vec!["me".to_string(), "good".to_string()],
        ],
    };
    assert_eq!(
        result.top_hypothesis(),
        Some(&["I".to_string(), "am".to_string(), "fine".to_string()][..])
    );
}

//  Filesystem fixtures

#[test]
fn missing_tokenizer_model_files_fail_setup() {
    let model_dir = tempfile::tempdir().expect("failed to create temporary model directory");
    let result = SentencePiecePair::from_files(
        &model_dir.path().join("bn.model"),
        &model_dir.path().join("en.model"),
    );
    match result {
        Err(RustNmtError::TokenizerError(_)) => {}
        Err(other) => panic!("expected TokenizerError, got {:?}", other),
        Ok(_) => panic!("expected TokenizerError, got a loaded tokenizer pair"),
    }
}

#[test]
fn tokenizer_load_failure_degrades_to_the_sentinel() {
    let model_dir = tempfile::tempdir().expect("failed to create temporary model directory");
    let mut service = TranslationService::with_components(
        Box::new(LocalResource {
            local_path: model_dir.path().to_path_buf(),
        }),
        Box::new(FnLoader(|dir: &Path, _| -> LoaderResult {
            let tokenizer =
                SentencePiecePair::from_files(&dir.join("bn.model"), &dir.join("en.model"))?;
            Ok(TranslationModel::new(
                Box::new(tokenizer),
                Box::new(EchoEngine),
            ))
        })),
        Device::Cpu,
    );

    assert_eq!(service.translate("ami bhalo achi"), None);
    assert!(!service.is_ready());
}
