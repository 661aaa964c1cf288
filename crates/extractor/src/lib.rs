//! # Archmap Extractor
//!
//! Deterministic structural extraction: walks a directory tree, parses source
//! files with tree-sitter, and produces an ordered component graph (files,
//! components, dependency edges).
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> File Scanner (.gitignore aware, exclusion globs, size cap)
//!     │      └─> Candidate paths, lexicographically ordered
//!     │
//!     ├──> Component Parser (tree-sitter)
//!     │      ├─> Classes, functions, constants with signatures
//!     │      └─> Import/reference dependency edges
//!     │
//!     └──> Component Graph
//!            ├─> Complexity-ranked file cap
//!            └─> petgraph file dependency graph
//! ```
//!
//! A single file failing to parse is recoverable (recorded, skipped); an
//! unreadable root directory aborts extraction.

mod error;
mod extractor;
mod graph;
mod language;
mod parser;
mod scanner;
mod types;

pub use error::{ExtractError, Result};
pub use extractor::{Extraction, Extractor, ExtractorConfig};
pub use graph::ComponentGraph;
pub use language::Language;
pub use parser::{ComponentParser, ParsedFile};
pub use scanner::FileScanner;
pub use types::{
    Component, ComponentKind, DependencyEdge, EdgeEndpoint, EdgeKind, ParseFailure, SourceFile,
};
