//! # Archmap Inference
//!
//! Semantic inference over skeleton batches: a locally hosted model proposes
//! domain candidates for compressed code skeletons.
//!
//! ## Execution model
//!
//! The underlying model call is blocking and resource-heavy; the loaded
//! model is effectively a singleton. Calls go through a small fixed-size
//! worker pool (default size 1) so access to the shared model is strictly
//! serialized; the pool protects memory and context-window limits rather
//! than exploiting parallelism. The orchestrator suspends at the dispatch
//! boundary and resumes when the worker completes or the deadline elapses;
//! a timed-out call is not forcibly terminated, its late result is simply
//! discarded.
//!
//! ## Caching
//!
//! Results are cached by a SHA-256 digest of the *full* batch skeleton text.
//! Anything less than full content risks silent false hits between
//! similar-but-different code.

mod batch;
mod cache;
mod engine;
mod error;
mod model;
mod parse;
mod prompt;
mod types;

pub use batch::pack_batches;
pub use cache::{cache_key, InferenceCache};
pub use engine::{EngineConfig, InferenceEngine};
pub use error::{InferenceError, ModelError, Result};
pub use model::{DomainModel, ModelParams, StubModel};
pub use parse::parse_domain_response;
pub use prompt::build_domain_prompt;
pub use types::{BatchOutcome, BatchStatus, DomainCandidate, SkeletonBatch};
