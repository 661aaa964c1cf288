use archmap_extractor::{DependencyEdge, SourceFile};
use archmap_skeleton::CompressionStats;
use serde::{Deserialize, Serialize};

/// Structural statistics derived for a domain by mapping its members back
/// into the component graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStats {
    /// Distinct files contributing members
    pub file_count: usize,

    /// Member component count
    pub component_count: usize,

    /// Aggregate complexity of the contributing files
    pub complexity: usize,
}

/// A discovered functional grouping of components.
///
/// Domains are created by the reconciler and never mutated after emission;
/// confidence blending happens before a domain is built, not after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,

    pub description: String,

    /// Member component ids, sorted for deterministic output
    pub members: Vec<String>,

    /// Confidence in [0,1]
    pub confidence: f32,

    /// Names of related domains
    pub relationships: Vec<String>,

    /// True when the domain was derived from structural clustering alone,
    /// without semantic confirmation
    pub structural_only: bool,

    /// Derived structural statistics
    pub stats: DomainStats,
}

/// Per-stage timing for one pipeline run, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingBreakdown {
    pub extract_ms: u64,
    pub compress_ms: u64,
    pub inference_ms: u64,
    pub reconcile_ms: u64,
    pub total_ms: u64,
}

/// A stage-tagged error carried in the result instead of thrown past the
/// pipeline boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    /// Pipeline stage that produced the error
    pub stage: String,

    /// File path when the error is file-scoped
    pub path: Option<String>,

    pub message: String,
}

impl RunError {
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            path: None,
            message: message.into(),
        }
    }

    pub fn for_path(
        stage: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            path: Some(path.into()),
            message: message.into(),
        }
    }
}

/// The unified output of one analysis run.
///
/// Partial failures are represented as data: `errors` collects file- and
/// batch-scoped problems, `degraded` flags any loss of signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Strategy the run executed under
    pub strategy: String,

    /// Analyzed root directory
    pub root: String,

    pub file_count: usize,
    pub component_count: usize,
    pub edge_count: usize,

    /// The component graph as plain data: parsed files with their components
    pub files: Vec<SourceFile>,

    /// Resolved dependency edges
    pub edges: Vec<DependencyEdge>,

    /// Final reconciled domains
    pub domains: Vec<Domain>,

    /// Compression statistics from the skeleton pass
    pub compression: CompressionStats,

    /// Per-stage timing
    pub timing: TimingBreakdown,

    /// Collected recoverable errors
    pub errors: Vec<RunError>,

    /// Batches whose semantic contribution was dropped
    pub degraded_batches: usize,

    /// True when any signal was lost (parse failures, degraded batches, or a
    /// downgraded run)
    pub degraded: bool,
}
