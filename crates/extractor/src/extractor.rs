use crate::error::Result;
use crate::graph::ComponentGraph;
use crate::language::Language;
use crate::parser::{ComponentParser, ParsedFile};
use crate::scanner::FileScanner;
use crate::types::{DependencyEdge, EdgeEndpoint, EdgeKind, ParseFailure};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Configuration for structural extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Exclusion glob patterns relative to the root
    pub exclude: Vec<String>,

    /// Maximum number of files kept in the graph
    pub max_files: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            max_files: 200,
        }
    }
}

/// Output of an extraction pass
#[derive(Debug)]
pub struct Extraction {
    /// The ordered component graph
    pub graph: ComponentGraph,

    /// Per-file parse failures (recoverable; excluded from the graph)
    pub failures: Vec<ParseFailure>,
}

/// Structural extractor: directory walk + AST parsing into a component graph
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract the component graph for a directory tree.
    ///
    /// An unreadable root is fatal; per-file parse failures are collected and
    /// extraction continues.
    pub fn extract(&self, root: impl AsRef<Path>) -> Result<Extraction> {
        let root = root.as_ref();
        let scanner = FileScanner::new(root, &self.config.exclude)?;
        let paths = scanner.scan()?;

        let mut parsers: HashMap<Language, ComponentParser> = HashMap::new();
        let mut parsed: Vec<ParsedFile> = Vec::new();
        let mut failures = Vec::new();

        for path in &paths {
            let relative = scanner.relative_path(path);
            let language = Language::from_path(path);

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping unreadable file {relative}: {e}");
                    failures.push(ParseFailure {
                        path: relative,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let parser = match parsers.entry(language) {
                std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(ComponentParser::new(language)?)
                }
            };

            match parser.parse(&content, &relative, content.len() as u64) {
                Ok(file) => parsed.push(file),
                Err(e) => {
                    log::warn!("Parse failure in {relative}: {e}");
                    failures.push(ParseFailure {
                        path: relative,
                        message: e.to_string(),
                    });
                }
            }
        }

        let edges = resolve_edges(&parsed);

        if parsed.len() > self.config.max_files {
            parsed = self.rank_and_cap(parsed, &edges);
        }

        // Drop edges whose endpoints fell out of the capped set.
        let kept: HashSet<&str> = parsed.iter().map(|p| p.file.path.as_str()).collect();
        let edges: Vec<DependencyEdge> = edges
            .into_iter()
            .filter(|e| kept.contains(e.from.file_path()) && kept.contains(e.to.file_path()))
            .collect();

        let files = parsed.into_iter().map(|p| p.file).collect();
        let graph = ComponentGraph::new(files, edges);

        log::info!(
            "Extracted {} files, {} components, {} edges ({} parse failures)",
            graph.file_count(),
            graph.component_count(),
            graph.edge_count(),
            failures.len()
        );

        Ok(Extraction { graph, failures })
    }

    /// Rank files by complexity and keep the top `max_files`, path order as
    /// the stable tie-break. Survivors are re-sorted by path so the final
    /// ordering stays deterministic.
    fn rank_and_cap(&self, parsed: Vec<ParsedFile>, edges: &[DependencyEdge]) -> Vec<ParsedFile> {
        let mut out_degree: HashMap<&str, usize> = HashMap::new();
        for edge in edges {
            *out_degree.entry(edge.from.file_path()).or_insert(0) += 1;
        }

        let mut ranked: Vec<ParsedFile> = parsed;
        ranked.sort_by_key(|p| {
            let deps = out_degree.get(p.file.path.as_str()).copied().unwrap_or(0);
            let score = 10 * p.file.components.len() + 5 * deps + p.file.line_count / 20;
            (Reverse(score), p.file.path.clone())
        });

        log::debug!(
            "Capping extraction to {} of {} candidate files",
            self.config.max_files,
            ranked.len()
        );
        ranked.truncate(self.config.max_files);
        ranked.sort_by(|a, b| a.file.path.cmp(&b.file.path));
        ranked
    }
}

/// Resolve raw import targets and name references into dependency edges.
///
/// Imports resolve to project files by matching the final path segment
/// against file stems; references resolve against the global component name
/// index. Unresolvable targets are dropped.
fn resolve_edges(parsed: &[ParsedFile]) -> Vec<DependencyEdge> {
    let mut stem_index: HashMap<String, Vec<&str>> = HashMap::new();
    let mut name_index: HashMap<&str, &str> = HashMap::new();

    for file in parsed {
        let stem = Path::new(&file.file.path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        stem_index.entry(stem).or_default().push(&file.file.path);

        for component in &file.file.components {
            // First definition wins; duplicates across files keep the
            // earliest file in lexicographic order.
            name_index
                .entry(component.name.as_str())
                .or_insert(component.id.as_str());
        }
    }

    let mut edges = Vec::new();
    let mut seen = HashSet::new();

    for file in parsed {
        for import in &file.imports {
            let Some(stem) = import_stem(import) else {
                continue;
            };
            let Some(targets) = stem_index.get(&stem) else {
                continue;
            };
            for target in targets {
                if *target == file.file.path {
                    continue;
                }
                let key = (file.file.path.clone(), (*target).to_string(), EdgeKind::Import);
                if seen.insert(key) {
                    edges.push(DependencyEdge {
                        from: EdgeEndpoint::File(file.file.path.clone()),
                        to: EdgeEndpoint::File((*target).to_string()),
                        kind: EdgeKind::Import,
                    });
                }
            }
        }

        for (component_id, referenced) in &file.references {
            let Some(target_id) = name_index.get(referenced.as_str()) else {
                continue;
            };
            if *target_id == component_id.as_str() {
                continue;
            }
            let key = (
                component_id.clone(),
                (*target_id).to_string(),
                EdgeKind::Reference,
            );
            if seen.insert(key) {
                edges.push(DependencyEdge {
                    from: EdgeEndpoint::Component(component_id.clone()),
                    to: EdgeEndpoint::Component((*target_id).to_string()),
                    kind: EdgeKind::Reference,
                });
            }
        }
    }

    edges
}

/// Final path segment of an import target, lowercased for stem matching.
/// Brace groups (`use a::{b, c}`) and globs resolve by their parent segment.
fn import_stem(import: &str) -> Option<String> {
    let cleaned = import.trim().trim_matches(['"', '\'']);
    let mut segments = cleaned.rsplit(['/', ':', '.']).filter(|s| !s.is_empty());
    let last = segments.next()?.trim();
    if last.contains('{') || last == "*" {
        return segments.next().map(|s| s.trim().to_lowercase());
    }
    Some(last.to_lowercase())
}
