use serde::{Deserialize, Serialize};

/// A bounded batch of skeleton text fed to the model in one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonBatch {
    /// Stable batch index (dispatch and reconciliation order)
    pub index: usize,

    /// Paths of the files contributing to this batch
    pub files: Vec<String>,

    /// Concatenated skeleton text
    pub text: String,

    /// Estimated token count for the batch text
    pub estimated_tokens: usize,
}

/// A domain proposed by the model for one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCandidate {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Member component identifiers or names as the model reported them
    #[serde(default)]
    pub members: Vec<String>,

    /// Confidence in [0,1]
    #[serde(default)]
    pub confidence: f32,

    /// Names of related domains
    #[serde(default)]
    pub relationships: Vec<String>,
}

/// How a batch's inference attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Model call completed and parsed
    Inferred,
    /// Served from the result cache
    Cached,
    /// Deadline elapsed; any late result is discarded
    TimedOut,
    /// Model responded but the payload did not parse
    Malformed,
    /// Model call returned an error
    Failed,
}

/// Outcome of one batch through the inference engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub batch: usize,
    pub status: BatchStatus,
    pub candidates: Vec<DomainCandidate>,
}

impl BatchOutcome {
    /// A batch whose semantic contribution was dropped
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(
            self.status,
            BatchStatus::TimedOut | BatchStatus::Malformed | BatchStatus::Failed
        )
    }

    pub(crate) fn degraded(batch: usize, status: BatchStatus) -> Self {
        Self {
            batch,
            status,
            candidates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_statuses() {
        assert!(BatchOutcome::degraded(0, BatchStatus::TimedOut).is_degraded());
        assert!(BatchOutcome::degraded(0, BatchStatus::Malformed).is_degraded());
        assert!(!BatchOutcome {
            batch: 0,
            status: BatchStatus::Inferred,
            candidates: vec![],
        }
        .is_degraded());
    }
}
