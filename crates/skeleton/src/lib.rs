//! # Archmap Skeleton
//!
//! Context compression: renders a file's component list into a compact,
//! signature-level textual skeleton suitable as semantic-model input.
//!
//! Rendering is a pure function of the component list: identical input
//! always produces identical skeleton text, making compression restartable
//! and cacheable. Targets a ≥ 70% size reduction versus the full-detail
//! rendering of the same components.

mod config;
mod render;
mod stats;
mod types;

pub use config::SkeletonConfig;
pub use render::{render_full_detail, render_skeleton};
pub use stats::CompressionStats;
pub use types::Skeleton;
