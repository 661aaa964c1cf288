use crate::config::{AnalyzeConfig, Strategy};
use crate::error::Result;
use archmap_extractor::{Extractor, ExtractorConfig};
use archmap_inference::{pack_batches, BatchOutcome, DomainModel, EngineConfig, InferenceEngine};
use archmap_reconciler::{AnalysisResult, ReconcileConfig, Reconciler, RunError, TimingBreakdown};
use archmap_skeleton::{
    render_full_detail, render_skeleton, CompressionStats, Skeleton, SkeletonConfig,
};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The four-stage analysis pipeline.
///
/// The model handle is explicitly owned and injected at construction: no
/// implicit global model state, and a fake slots in for tests. A
/// pipeline without a model can still run `fast` and `compress_only`
/// strategies; `deep`/`hybrid` downgrade to structural-only with a warning.
pub struct Analyzer {
    config: AnalyzeConfig,
    model: Option<Arc<dyn DomainModel>>,
}

impl Analyzer {
    /// Create a pipeline without a semantic model
    pub fn new(config: AnalyzeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model: None,
        })
    }

    /// Create a pipeline around an owned model handle
    pub fn with_model(config: AnalyzeConfig, model: Arc<dyn DomainModel>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model: Some(model),
        })
    }

    /// Run the full pipeline for a directory.
    ///
    /// Fatal only on an unreadable root; every other failure degrades the
    /// result instead of aborting.
    pub async fn analyze(&self, root: impl AsRef<Path>) -> Result<AnalysisResult> {
        let root = root.as_ref();
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let mut errors: Vec<RunError> = Vec::new();

        log::info!(
            "Starting {} analysis of {}",
            self.config.strategy.as_str(),
            root.display()
        );

        // Stage 1: structural extraction (inline, synchronous).
        let extract_start = Instant::now();
        let extractor = Extractor::new(ExtractorConfig {
            exclude: self.config.exclude.clone(),
            max_files: self.config.effective_max_files(),
        });
        let extraction = extractor.extract(root)?;
        timing.extract_ms = extract_start.elapsed().as_millis() as u64;

        let parse_failures = extraction.failures.len();
        for failure in &extraction.failures {
            errors.push(RunError::for_path(
                "extract",
                failure.path.clone(),
                failure.message.clone(),
            ));
        }
        let graph = extraction.graph;

        // Stage 2: context compression (inline, pure).
        let compress_start = Instant::now();
        let skeleton_config = SkeletonConfig::default();
        let mut compression = CompressionStats::new();
        let skeletons: Vec<Skeleton> = graph
            .files
            .iter()
            .map(|file| {
                let detail_len = render_full_detail(file).len();
                let skeleton = render_skeleton(file, &skeleton_config);
                compression.add_file(detail_len, skeleton.text.len(), skeleton.degraded);
                skeleton
            })
            .collect();
        timing.compress_ms = compress_start.elapsed().as_millis() as u64;
        log::info!(
            "Compressed {} files, {:.1}% size reduction",
            compression.files,
            compression.ratio() * 100.0
        );

        // Stage 3: semantic inference (deep/hybrid only).
        let mut outcomes: Vec<BatchOutcome> = Vec::new();
        let mut downgraded = false;

        if self.config.strategy.uses_inference() {
            let inference_start = Instant::now();
            match self.engine() {
                Some(engine) => {
                    let batches =
                        pack_batches(&skeletons, self.config.max_tokens_per_batch);
                    log::info!("Dispatching {} inference batch(es)", batches.len());
                    let overall = self.config.overall_budget_ms.map(Duration::from_millis);
                    outcomes = engine
                        .analyze_all(&batches, self.config.context_hint.as_deref(), overall)
                        .await;

                    for outcome in outcomes.iter().filter(|o| o.is_degraded()) {
                        errors.push(RunError::new(
                            "inference",
                            format!("batch {} degraded: {:?}", outcome.batch, outcome.status),
                        ));
                    }
                }
                None => {
                    log::warn!(
                        "Semantic model unavailable; downgrading {} run to structural-only",
                        self.config.strategy.as_str()
                    );
                    errors.push(RunError::new(
                        "inference",
                        "model unavailable; run downgraded to structural-only",
                    ));
                    downgraded = true;
                }
            }
            timing.inference_ms = inference_start.elapsed().as_millis() as u64;
        }

        let degraded_batches = outcomes.iter().filter(|o| o.is_degraded()).count();

        // Stage 4: reconciliation.
        let reconcile_start = Instant::now();
        let domains = if self.config.strategy == Strategy::CompressOnly {
            Vec::new()
        } else {
            let reconciler = Reconciler::new(ReconcileConfig {
                merge_threshold: self.config.domain_merge_threshold,
            });
            let cover_remainder = self.config.strategy == Strategy::Hybrid;
            reconciler.reconcile(&graph, &outcomes, cover_remainder)
        };
        timing.reconcile_ms = reconcile_start.elapsed().as_millis() as u64;
        timing.total_ms = total_start.elapsed().as_millis() as u64;

        let result = AnalysisResult {
            strategy: self.config.strategy.as_str().to_string(),
            root: root.display().to_string(),
            file_count: graph.file_count(),
            component_count: graph.component_count(),
            edge_count: graph.edge_count(),
            files: graph.files.clone(),
            edges: graph.edges.clone(),
            domains,
            compression,
            timing,
            errors,
            degraded_batches,
            degraded: degraded_batches > 0 || downgraded || parse_failures > 0,
        };

        log::info!(
            "Analysis finished in {} ms: {} domains, {} degraded batch(es)",
            result.timing.total_ms,
            result.domains.len(),
            result.degraded_batches
        );
        Ok(result)
    }

    /// Build the inference engine, or `None` when the run must downgrade
    fn engine(&self) -> Option<InferenceEngine> {
        let model = self.model.as_ref()?.clone();
        let config = EngineConfig {
            workers: self.config.workers,
            timeout: Duration::from_millis(self.config.inference_timeout_ms),
            cache_capacity: self.config.cache_capacity,
            cache_ttl: Duration::from_secs(self.config.cache_ttl_secs),
        };
        match InferenceEngine::new(model, &config) {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::warn!("Failed to initialize inference engine: {e}");
                None
            }
        }
    }
}
