use thiserror::Error;

/// Result type for inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors raised by the model facility behind the `DomainModel` boundary
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// Model resource is missing or could not be loaded
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// A single inference call failed
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Errors that can cross the inference engine boundary.
///
/// Per-batch timeouts and malformed model output never surface here; they
/// degrade the affected batch and are reported as data in its outcome.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Model resource cannot be used at all; strategies that require
    /// semantic analysis must downgrade to structural-only
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Invalid engine configuration
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl InferenceError {
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
