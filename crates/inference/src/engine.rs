use crate::cache::{cache_key, InferenceCache};
use crate::error::{InferenceError, Result};
use crate::model::DomainModel;
use crate::parse::parse_domain_response;
use crate::prompt::build_domain_prompt;
use crate::types::{BatchOutcome, BatchStatus, SkeletonBatch};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Configuration for the inference engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Worker pool size; access to the shared model is serialized at this
    /// width (default 1)
    pub workers: usize,

    /// Per-batch deadline for the model call
    pub timeout: Duration,

    /// Result cache capacity (entries)
    pub cache_capacity: usize,

    /// Result cache entry lifetime
    pub cache_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            timeout: Duration::from_secs(30),
            cache_capacity: 128,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

/// Semantic inference engine: bounded concurrency and caching around a
/// blocking model resource.
///
/// Clones share the model handle, worker pool, and cache.
#[derive(Clone)]
pub struct InferenceEngine {
    model: Arc<dyn DomainModel>,
    semaphore: Arc<Semaphore>,
    cache: Arc<InferenceCache>,
    timeout: Duration,
}

impl InferenceEngine {
    /// Create an engine around an explicitly owned model handle
    pub fn new(model: Arc<dyn DomainModel>, config: &EngineConfig) -> Result<Self> {
        if config.workers == 0 {
            return Err(InferenceError::invalid_config("workers must be > 0"));
        }
        if config.timeout.is_zero() {
            return Err(InferenceError::invalid_config("timeout must be > 0"));
        }

        Ok(Self {
            model,
            semaphore: Arc::new(Semaphore::new(config.workers)),
            cache: Arc::new(InferenceCache::new(config.cache_capacity, config.cache_ttl)),
            timeout: config.timeout,
        })
    }

    /// Analyze one batch.
    ///
    /// The caller suspends while the batch waits for a worker slot and while
    /// the model runs; the per-batch deadline starts once the call is
    /// dispatched. The model call itself is not cancellable: on timeout the
    /// worker slot stays occupied until the call actually returns, and the
    /// late result is discarded.
    pub async fn analyze_batch(&self, batch: &SkeletonBatch, hint: Option<&str>) -> BatchOutcome {
        let key = cache_key(&batch.text);
        if let Some(candidates) = self.cache.get(&key) {
            log::debug!("Cache hit for batch {}", batch.index);
            return BatchOutcome {
                batch: batch.index,
                status: BatchStatus::Cached,
                candidates,
            };
        }

        let Ok(permit) = self.semaphore.clone().acquire_owned().await else {
            return BatchOutcome::degraded(batch.index, BatchStatus::Failed);
        };

        let prompt = build_domain_prompt(&batch.text, hint);
        let model = self.model.clone();
        let call_timeout = self.timeout;
        let handle = tokio::task::spawn_blocking(move || {
            let result = model.infer(&prompt, call_timeout);
            // The worker slot frees only when the model actually returns;
            // releasing it at the deadline would let a second call reach the
            // still-busy model.
            drop(permit);
            result
        });

        let response = match tokio::time::timeout(self.timeout, handle).await {
            Err(_) => {
                log::warn!(
                    "Batch {} timed out after {:?}; any late result is discarded",
                    batch.index,
                    self.timeout
                );
                return BatchOutcome::degraded(batch.index, BatchStatus::TimedOut);
            }
            Ok(Err(join_err)) => {
                log::warn!("Batch {} worker failed: {join_err}", batch.index);
                return BatchOutcome::degraded(batch.index, BatchStatus::Failed);
            }
            Ok(Ok(Err(model_err))) => {
                log::warn!("Batch {} inference failed: {model_err}", batch.index);
                return BatchOutcome::degraded(batch.index, BatchStatus::Failed);
            }
            Ok(Ok(Ok(text))) => text,
        };

        match parse_domain_response(&response) {
            Some(candidates) => {
                self.cache.put(key, candidates.clone());
                BatchOutcome {
                    batch: batch.index,
                    status: BatchStatus::Inferred,
                    candidates,
                }
            }
            None => {
                log::warn!("Batch {} returned a malformed payload", batch.index);
                BatchOutcome::degraded(batch.index, BatchStatus::Malformed)
            }
        }
    }

    /// Analyze every batch, overlapping dispatch up to the pool size.
    ///
    /// `batches` must be the packed batch list (batch index == position).
    /// When the overall budget elapses, not-yet-finished batches are marked
    /// timed out and whatever arrives later is dropped, never merged.
    pub async fn analyze_all(
        &self,
        batches: &[SkeletonBatch],
        hint: Option<&str>,
        overall_budget: Option<Duration>,
    ) -> Vec<BatchOutcome> {
        let deadline = overall_budget.map(|d| tokio::time::Instant::now() + d);
        let mut set: JoinSet<BatchOutcome> = JoinSet::new();

        for batch in batches {
            let engine = self.clone();
            let batch = batch.clone();
            let hint = hint.map(str::to_string);
            set.spawn(async move { engine.analyze_batch(&batch, hint.as_deref()).await });
        }

        let mut outcomes: Vec<Option<BatchOutcome>> = vec![None; batches.len()];
        loop {
            let joined = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, set.join_next()).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            log::warn!(
                                "Overall inference budget elapsed; dropping remaining batches"
                            );
                            set.abort_all();
                            break;
                        }
                    }
                }
                None => set.join_next().await,
            };
            let Some(result) = joined else { break };
            if let Ok(outcome) = result {
                if let Some(slot) = outcomes.get_mut(outcome.batch) {
                    *slot = Some(outcome);
                }
            }
        }

        outcomes
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| BatchOutcome::degraded(index, BatchStatus::TimedOut))
            })
            .collect()
    }

    /// Number of live cache entries (observability hook)
    pub fn cached_batches(&self) -> usize {
        self.cache.len()
    }
}
