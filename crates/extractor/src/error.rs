use std::path::PathBuf;
use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur during structural extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Root directory is missing or cannot be read; aborts the whole pass
    #[error("Root directory unreadable: {path}: {reason}")]
    RootUnreadable { path: PathBuf, reason: String },

    /// A single file failed to parse (recoverable at the extraction level)
    #[error("Parse error in {path}: {reason}")]
    ParseError { path: String, reason: String },

    /// Language is not supported for AST parsing
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Invalid exclusion pattern
    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExtractError {
    /// Create a per-file parse error
    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a fatal root error
    pub fn root_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::RootUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// Whether this error aborts the extraction pass entirely
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::RootUnreadable { .. })
    }
}
