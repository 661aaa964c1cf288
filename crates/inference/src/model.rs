use crate::error::ModelError;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// The core's only view of the model-loading facility: one blocking
/// inference operation.
///
/// Implementations wrap whatever runtime actually hosts the model; the
/// engine never touches loading, tokenization, or accelerator plumbing.
/// The handle is explicitly owned and injected, so a fake slots in for tests.
pub trait DomainModel: Send + Sync {
    /// Run one blocking inference call.
    ///
    /// `timeout` is advisory: backends that can bound their own runtime
    /// should honor it, but the engine enforces the deadline either way and
    /// discards late results.
    fn infer(&self, prompt: &str, timeout: Duration) -> Result<String, ModelError>;
}

/// Construction parameters handed to the external model-loading facility
#[derive(Debug, Clone)]
pub struct ModelParams {
    /// Path to the model file
    pub model_path: PathBuf,

    /// Context window size in tokens
    pub context_window: usize,

    /// CPU threads for inference
    pub threads: usize,

    /// Accelerator layer count (0 = CPU only)
    pub gpu_layers: usize,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            context_window: 8192,
            threads: 8,
            gpu_layers: 0,
        }
    }
}

/// In-process fake model for tests and dry runs.
///
/// Replays scripted responses (falling back to a fixed response once the
/// script is exhausted), optionally sleeping to simulate a slow model, and
/// tracks call counts plus the maximum number of concurrent calls observed;
/// the latter is how worker-pool serialization is asserted.
pub struct StubModel {
    responses: Mutex<Vec<String>>,
    fallback: String,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubModel {
    /// Stub that always returns the same response
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response.into(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Stub that replays responses in order, then repeats the last one
    pub fn scripted(responses: Vec<String>) -> Self {
        let fallback = responses.last().cloned().unwrap_or_default();
        let mut queue = responses;
        queue.reverse(); // pop() serves in original order
        Self {
            responses: Mutex::new(queue),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Add an artificial per-call delay
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of inference calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrent calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl DomainModel for StubModel {
    fn infer(&self, _prompt: &str, _timeout: Duration) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let response = {
            let mut queue = self
                .responses
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            queue.pop().unwrap_or_else(|| self.fallback.clone())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(response)
    }
}
