use archmap_extractor::ExtractError;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Fatal pipeline errors.
///
/// Everything else (per-file parse failures, degraded batches, a missing
/// model) is represented as data inside the `AnalysisResult`.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The root directory cannot be read; nothing to analyze
    #[error("Fatal input error: {0}")]
    FatalInput(#[from] ExtractError),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyzeError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
