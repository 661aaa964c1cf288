use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Kind of extracted component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Class-like declaration (class, struct, enum, trait, interface)
    Class,
    /// Free function or method
    Function,
    /// Constant or static value
    Constant,
}

impl ComponentKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Constant => "constant",
        }
    }
}

/// A named structural unit extracted from a source file.
///
/// Components are created once during extraction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Stable identifier: `"{file_path}:{qualified_name}"`
    pub id: String,

    /// Bare symbol name (e.g. "login")
    pub name: String,

    /// Qualified name including parent scope (e.g. "AuthService.login")
    pub qualified_name: String,

    /// Component kind
    pub kind: ComponentKind,

    /// Owning file path (workspace-relative)
    pub file_path: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// Parameter names for functions, member names for class-likes
    pub signature: Vec<String>,

    /// First line of the preceding doc comment; empty when absent
    pub description: String,
}

impl Component {
    /// Build the stable component id for a file/name pair
    pub fn make_id(file_path: &str, qualified_name: &str) -> String {
        format!("{file_path}:{qualified_name}")
    }

    /// Get the number of lines this component spans
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// A parsed source file and the components it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Workspace-relative path with `/` separators
    pub path: String,

    /// Detected language
    pub language: Language,

    /// Raw size in bytes
    pub size_bytes: u64,

    /// Total line count
    pub line_count: usize,

    /// Components extracted from this file
    pub components: Vec<Component>,

    /// Set when the file parsed but component extraction was partial
    pub parse_degraded: bool,
}

/// Endpoint of a dependency edge: a whole file or a single component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum EdgeEndpoint {
    File(String),
    Component(String),
}

impl EdgeEndpoint {
    /// The file path this endpoint belongs to
    pub fn file_path(&self) -> &str {
        match self {
            Self::File(path) => path,
            Self::Component(id) => id.split(':').next().unwrap_or(id),
        }
    }
}

/// Kind of dependency relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Derived from an import/use statement
    Import,
    /// Derived from a name reference inside a file
    Reference,
}

/// A dependency edge derived from import/reference statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: EdgeEndpoint,
    pub to: EdgeEndpoint,
    pub kind: EdgeKind,
}

/// A recoverable per-file parse failure recorded during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_format() {
        assert_eq!(
            Component::make_id("src/auth.py", "AuthService.login"),
            "src/auth.py:AuthService.login"
        );
    }

    #[test]
    fn test_component_line_count() {
        let component = Component {
            id: "a.rs:foo".to_string(),
            name: "foo".to_string(),
            qualified_name: "foo".to_string(),
            kind: ComponentKind::Function,
            file_path: "a.rs".to_string(),
            start_line: 10,
            end_line: 14,
            signature: vec![],
            description: String::new(),
        };
        assert_eq!(component.line_count(), 5);
    }

    #[test]
    fn test_endpoint_file_path() {
        let file = EdgeEndpoint::File("src/lib.rs".to_string());
        assert_eq!(file.file_path(), "src/lib.rs");

        let component = EdgeEndpoint::Component("src/lib.rs:Config".to_string());
        assert_eq!(component.file_path(), "src/lib.rs");
    }
}
