//! # Archmap Analyzer
//!
//! The four-stage analysis pipeline: structural extraction, context
//! compression, semantic inference, and reconciliation into a single
//! [`AnalysisResult`].
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Structural Extractor ──> component graph
//!     │
//!     ├──> Context Compressor ──> per-file skeletons + stats
//!     │
//!     ├──> Inference Engine ──> domain candidates        (deep / hybrid)
//!     │      └─ worker pool, cache, per-batch deadlines
//!     │
//!     └──> Reconciler ──> unified AnalysisResult
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use archmap_analyzer::{AnalyzeConfig, Analyzer, Strategy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalyzeConfig {
//!         strategy: Strategy::Fast,
//!         ..Default::default()
//!     };
//!     let analyzer = Analyzer::new(config)?;
//!     let result = analyzer.analyze("/path/to/project").await?;
//!
//!     for domain in &result.domains {
//!         println!("{} ({} members)", domain.name, domain.members.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Extraction and compression run inline on the calling task; only inference
//! suspends. File- and batch-scoped failures never abort the pipeline; they
//! are carried in the result's `errors` collection and `degraded` flag. Only
//! an unreadable root directory or an invalid configuration is fatal.

mod config;
mod error;
mod pipeline;

pub use archmap_reconciler::{AnalysisResult, Domain, DomainStats, RunError, TimingBreakdown};
pub use config::{AnalyzeConfig, Strategy};
pub use error::{AnalyzeError, Result};
pub use pipeline::Analyzer;
