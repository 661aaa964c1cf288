use crate::error::{ExtractError, Result};
use crate::language::Language;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB

const IGNORED_SCOPES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    ".cache",
    "node_modules",
    "build",
    "dist",
    "coverage",
    "target",
    ".venv",
    "venv",
    "vendor",
    "third_party",
    "__pycache__",
];

/// Scanner for finding parseable source files under a root directory
pub struct FileScanner {
    root: PathBuf,
    excludes: GlobSet,
}

impl FileScanner {
    /// Create a scanner with user exclusion glob patterns
    pub fn new(root: impl AsRef<Path>, exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| ExtractError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }
        let excludes = builder
            .build()
            .map_err(|e| ExtractError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            excludes,
        })
    }

    /// Scan the root for source files (.gitignore aware), lexicographically ordered.
    ///
    /// An unreadable root is fatal; unreadable entries below it are skipped
    /// with a warning.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let meta = std::fs::metadata(&self.root)
            .map_err(|e| ExtractError::root_unreadable(&self.root, e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExtractError::root_unreadable(
                &self.root,
                "not a directory".to_string(),
            ));
        }

        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);
        builder.filter_entry(move |entry| !FileScanner::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !Language::from_path(path).supports_ast() {
                        continue;
                    }

                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > MAX_FILE_SIZE_BYTES {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                MAX_FILE_SIZE_BYTES
                            );
                            continue;
                        }
                    }

                    if self.is_excluded(path) {
                        log::debug!("Excluded by pattern: {}", path.display());
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        // Lexicographic path order keeps extraction deterministic.
        files.sort();
        log::info!("Found {} source files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Relative path (with `/` separators) for a scanned file
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excludes.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.excludes.is_match(relative) || self.excludes.is_match(path)
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let std::path::Component::Normal(name) = component {
                    let lowered = name.to_string_lossy().to_lowercase();
                    if IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered) {
                        return true;
                    }
                }
            }
        }
        false
    }
}
