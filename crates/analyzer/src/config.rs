use crate::error::{AnalyzeError, Result};
use serde::{Deserialize, Serialize};

/// Effective file cap for the inference-heavy deep strategy
const DEEP_MAX_FILES: usize = 40;

/// Analysis strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Structural only: inference is skipped entirely
    Fast,
    /// Inference-heavy with a smaller file cap
    Deep,
    /// Structural and semantic signals, reconciled; unclaimed components are
    /// covered by structural-only groupings
    Hybrid,
    /// Stop after compression; no domains are emitted
    CompressOnly,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Deep => "deep",
            Self::Hybrid => "hybrid",
            Self::CompressOnly => "compress_only",
        }
    }

    /// Whether this strategy dispatches inference batches
    pub const fn uses_inference(self) -> bool {
        matches!(self, Self::Deep | Self::Hybrid)
    }
}

/// Configuration recognized by the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Analysis strategy
    pub strategy: Strategy,

    /// Caps structural extraction breadth
    pub max_files: usize,

    /// Exclusion glob patterns relative to the root
    pub exclude: Vec<String>,

    /// Bounds the skeleton batch size fed to inference
    pub max_tokens_per_batch: usize,

    /// Per-batch inference deadline
    pub inference_timeout_ms: u64,

    /// Optional wall-clock budget for the whole inference stage
    pub overall_budget_ms: Option<u64>,

    /// Inference cache entry lifetime
    pub cache_ttl_secs: u64,

    /// Inference cache capacity (entries)
    pub cache_capacity: usize,

    /// Similarity cutoff for domain deduplication
    pub domain_merge_threshold: f32,

    /// Inference worker pool size
    pub workers: usize,

    /// Free-text hint passed to the model alongside each batch
    pub context_hint: Option<String>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Hybrid,
            max_files: 200,
            exclude: Vec::new(),
            max_tokens_per_batch: 2048,
            inference_timeout_ms: 30_000,
            overall_budget_ms: None,
            cache_ttl_secs: 3600,
            cache_capacity: 128,
            domain_merge_threshold: 0.8,
            workers: 1,
            context_hint: None,
        }
    }
}

impl AnalyzeConfig {
    /// Load configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| AnalyzeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(AnalyzeError::invalid_config("max_files must be > 0"));
        }
        if self.max_tokens_per_batch == 0 {
            return Err(AnalyzeError::invalid_config(
                "max_tokens_per_batch must be > 0",
            ));
        }
        if self.inference_timeout_ms == 0 {
            return Err(AnalyzeError::invalid_config(
                "inference_timeout_ms must be > 0",
            ));
        }
        if self.workers == 0 {
            return Err(AnalyzeError::invalid_config("workers must be > 0"));
        }
        if !(self.domain_merge_threshold > 0.0 && self.domain_merge_threshold <= 1.0) {
            return Err(AnalyzeError::invalid_config(format!(
                "domain_merge_threshold must be in (0,1], got {}",
                self.domain_merge_threshold
            )));
        }
        Ok(())
    }

    /// File cap after strategy adjustment: deep trades breadth for model
    /// budget on the most complex files
    pub fn effective_max_files(&self) -> usize {
        match self.strategy {
            Strategy::Deep => self.max_files.min(DEEP_MAX_FILES),
            _ => self.max_files,
        }
    }
}
