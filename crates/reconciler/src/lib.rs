//! # Archmap Reconciler
//!
//! Merges structural graph data with semantic domain candidates into a
//! single analysis result.
//!
//! Domain candidates from different batches are deduplicated by fuzzy name
//! similarity, contested components are attributed deterministically, and
//! every emitted domain is annotated with structural statistics. When no
//! semantic signal is available the reconciler falls back to purely
//! structural clustering, flagged `structural_only` and never presented as
//! semantically confirmed.

mod fallback;
mod merge;
mod reconciler;
mod similarity;
mod types;

pub use reconciler::{ReconcileConfig, Reconciler};
pub use similarity::name_similarity;
pub use types::{AnalysisResult, Domain, DomainStats, RunError, TimingBreakdown};
