use crate::types::Domain;
use archmap_extractor::ComponentGraph;
use std::collections::{BTreeMap, HashSet};

/// Confidence assigned to structural-only groupings: low enough to lose any
/// attribution conflict against a semantic candidate, nonzero so the
/// grouping still ranks above "no signal".
const STRUCTURAL_CONFIDENCE: f32 = 0.25;

/// Derive domains from structural clustering alone.
///
/// Dependency-graph clusters are refined by top-level directory; components
/// listed in `claimed` are left out (the hybrid path uses this to cover only
/// what semantic domains did not claim). Emitted domains carry
/// `structural_only = true` and stats are filled by the caller.
pub(crate) fn structural_domains(graph: &ComponentGraph, claimed: &HashSet<String>) -> Vec<Domain> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for cluster in graph.file_clusters() {
        for path in cluster {
            let Some(file) = graph.file_by_path(&path) else {
                continue;
            };
            let members: Vec<String> = file
                .components
                .iter()
                .filter(|c| !claimed.contains(&c.id))
                .map(|c| c.id.clone())
                .collect();
            if members.is_empty() {
                continue;
            }
            groups
                .entry(group_name(&path))
                .or_default()
                .extend(members);
        }
    }

    groups
        .into_iter()
        .map(|(name, mut members)| {
            members.sort();
            members.dedup();
            let file_count = member_files(&members).len();
            Domain {
                description: format!(
                    "Structural grouping of {} component{} across {} file{}",
                    members.len(),
                    plural(members.len()),
                    file_count,
                    plural(file_count),
                ),
                name,
                members,
                confidence: STRUCTURAL_CONFIDENCE,
                relationships: Vec::new(),
                structural_only: true,
                stats: Default::default(),
            }
        })
        .collect()
}

/// Group label for a file: its top-level directory, or the file stem for
/// root-level files
fn group_name(path: &str) -> String {
    let label = match path.split('/').next() {
        Some(first) if first != path => first,
        _ => path.rsplit('/').next().unwrap_or(path).split('.').next().unwrap_or(path),
    };
    capitalize(label)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn member_files(members: &[String]) -> HashSet<&str> {
    members
        .iter()
        .map(|id| id.split(':').next().unwrap_or(id))
        .collect()
}

const fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
