use serde::{Deserialize, Serialize};

/// A compressed, signature-level rendering of one file's components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skeleton {
    /// Source file path
    pub file_path: String,

    /// Compact skeleton text; empty when the file has no components
    pub text: String,

    /// Set when the underlying parse was partial
    pub degraded: bool,
}

impl Skeleton {
    /// Whether this skeleton carries any content worth batching
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Estimated token count (rough heuristic: ~4 chars per token for code)
    #[must_use]
    pub fn estimated_tokens(&self) -> usize {
        (self.text.len() / 4).max(1)
    }
}
