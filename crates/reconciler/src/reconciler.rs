use crate::fallback::structural_domains;
use crate::merge::merge_candidates;
use crate::types::{Domain, DomainStats};
use archmap_extractor::ComponentGraph;
use archmap_inference::BatchOutcome;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Configuration for reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Name-similarity cutoff for merging domain candidates
    pub merge_threshold: f32,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            merge_threshold: 0.8,
        }
    }
}

impl ReconcileConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.merge_threshold) || self.merge_threshold == 0.0 {
            return Err(format!(
                "merge_threshold must be in (0,1], got {}",
                self.merge_threshold
            ));
        }
        Ok(())
    }
}

/// Merges semantic domain candidates with the structural graph
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Reconcile semantic candidates against the structural graph.
    ///
    /// With zero usable candidates the output falls back to structural
    /// clustering, every domain flagged `structural_only`. When
    /// `cover_remainder` is set, components no semantic domain claimed are
    /// additionally grouped into structural-only domains so the final map
    /// covers the whole graph.
    pub fn reconcile(
        &self,
        graph: &ComponentGraph,
        outcomes: &[BatchOutcome],
        cover_remainder: bool,
    ) -> Vec<Domain> {
        let merged = merge_candidates(outcomes, self.config.merge_threshold);

        if merged.is_empty() {
            log::info!("No semantic candidates available; emitting structural-only domains");
            let mut domains = structural_domains(graph, &HashSet::new());
            for domain in &mut domains {
                domain.stats = enrich(graph, &domain.members);
            }
            return domains;
        }

        // Resolve raw member strings against the graph; unresolvable names
        // (model hallucinations, dropped files) are discarded.
        let resolved: Vec<Vec<String>> = merged
            .iter()
            .map(|domain| {
                domain
                    .members
                    .iter()
                    .filter_map(|raw| match graph.resolve_component(raw) {
                        Some(component) => Some(component.id.clone()),
                        None => {
                            log::debug!(
                                "Dropping unresolvable member '{raw}' of domain '{}'",
                                domain.name
                            );
                            None
                        }
                    })
                    .collect()
            })
            .collect();

        // Attribute contested components: highest confidence wins, exact
        // ties go to the first-discovered domain (stable batch order).
        let mut claims: HashMap<&str, (usize, f32)> = HashMap::new();
        for (pos, members) in resolved.iter().enumerate() {
            let confidence = merged[pos].confidence;
            for id in members {
                let wins = match claims.get(id.as_str()) {
                    Some((_, held)) => confidence > *held,
                    None => true,
                };
                if wins {
                    claims.insert(id, (pos, confidence));
                }
            }
        }

        let mut domains = Vec::new();
        for (pos, domain) in merged.iter().enumerate() {
            let mut members: Vec<String> = resolved[pos]
                .iter()
                .filter(|id| claims.get(id.as_str()).is_some_and(|(owner, _)| *owner == pos))
                .cloned()
                .collect();
            members.sort();
            members.dedup();

            if members.is_empty() {
                log::debug!(
                    "Dropping domain '{}' (discovered #{}) with no surviving members",
                    domain.name,
                    domain.discovery_order
                );
                continue;
            }

            let stats = enrich(graph, &members);
            domains.push(Domain {
                name: domain.name.clone(),
                description: domain.description.clone(),
                members,
                confidence: domain.confidence.clamp(0.0, 1.0),
                relationships: domain.relationships.clone(),
                structural_only: false,
                stats,
            });
        }

        if cover_remainder {
            let claimed: HashSet<String> = domains
                .iter()
                .flat_map(|d| d.members.iter().cloned())
                .collect();
            let mut leftovers = structural_domains(graph, &claimed);
            for domain in &mut leftovers {
                domain.stats = enrich(graph, &domain.members);
            }
            if !leftovers.is_empty() {
                log::debug!(
                    "Covering {} unclaimed component group(s) structurally",
                    leftovers.len()
                );
            }
            domains.extend(leftovers);
        }

        domains
    }
}

/// Map member ids back into the graph for structural statistics
fn enrich(graph: &ComponentGraph, members: &[String]) -> DomainStats {
    let files: HashSet<&str> = members
        .iter()
        .filter_map(|id| graph.component_by_id(id).map(|c| c.file_path.as_str()))
        .collect();

    DomainStats {
        file_count: files.len(),
        component_count: members.len(),
        complexity: graph.aggregate_complexity(files.into_iter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archmap_extractor::{Component, ComponentKind, Language, SourceFile};
    use archmap_inference::{BatchStatus, DomainCandidate};
    use pretty_assertions::assert_eq;

    fn file(path: &str, names: &[(&str, ComponentKind)]) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            language: Language::Python,
            size_bytes: 100,
            line_count: 40,
            components: names
                .iter()
                .map(|(name, kind)| Component {
                    id: Component::make_id(path, name),
                    name: (*name).to_string(),
                    qualified_name: (*name).to_string(),
                    kind: *kind,
                    file_path: path.to_string(),
                    start_line: 1,
                    end_line: 10,
                    signature: vec![],
                    description: String::new(),
                })
                .collect(),
            parse_degraded: false,
        }
    }

    fn graph() -> ComponentGraph {
        ComponentGraph::new(
            vec![
                file(
                    "auth.py",
                    &[
                        ("AuthService", ComponentKind::Class),
                        ("login", ComponentKind::Function),
                    ],
                ),
                file("billing.py", &[("Invoice", ComponentKind::Class)]),
            ],
            vec![],
        )
    }

    fn candidate(name: &str, members: &[&str], confidence: f32) -> DomainCandidate {
        DomainCandidate {
            name: name.to_string(),
            description: format!("{name} things"),
            members: members.iter().map(|m| (*m).to_string()).collect(),
            confidence,
            relationships: vec![],
        }
    }

    fn outcome(batch: usize, candidates: Vec<DomainCandidate>) -> BatchOutcome {
        BatchOutcome {
            batch,
            status: BatchStatus::Inferred,
            candidates,
        }
    }

    #[test]
    fn fuzzy_merge_unions_members() {
        let outcomes = vec![
            outcome(0, vec![candidate("Auth", &["AuthService"], 0.9)]),
            outcome(1, vec![candidate("auth ", &["login"], 0.7)]),
        ];
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &outcomes, false);

        assert_eq!(domains.len(), 1);
        assert_eq!(
            domains[0].members,
            vec!["auth.py:AuthService", "auth.py:login"]
        );
        assert!(!domains[0].structural_only);
    }

    #[test]
    fn contested_component_goes_to_higher_confidence() {
        let outcomes = vec![outcome(
            0,
            vec![
                candidate("Billing", &["Invoice"], 0.6),
                candidate("Payments", &["Invoice"], 0.9),
            ],
        )];
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &outcomes, false);

        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name, "Payments");
        assert_eq!(domains[0].members, vec!["billing.py:Invoice"]);
    }

    #[test]
    fn exact_tie_resolves_to_first_discovered() {
        let outcomes = vec![outcome(
            0,
            vec![
                candidate("Billing", &["Invoice"], 0.8),
                candidate("Payments", &["Invoice"], 0.8),
            ],
        )];
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &outcomes, false);

        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name, "Billing");
    }

    #[test]
    fn unresolvable_members_are_dropped() {
        let outcomes = vec![outcome(
            0,
            vec![candidate("Auth", &["AuthService", "GhostComponent"], 0.9)],
        )];
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &outcomes, false);

        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].members, vec!["auth.py:AuthService"]);
    }

    #[test]
    fn no_candidates_falls_back_to_structural() {
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &[], false);

        assert!(!domains.is_empty());
        assert!(domains.iter().all(|d| d.structural_only));
    }

    #[test]
    fn remainder_coverage_adds_structural_domains() {
        let outcomes = vec![outcome(0, vec![candidate("Auth", &["AuthService", "login"], 0.9)])];
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &outcomes, true);

        assert_eq!(domains.len(), 2);
        assert!(!domains[0].structural_only);
        assert!(domains[1].structural_only);
        assert_eq!(domains[1].members, vec!["billing.py:Invoice"]);
    }

    #[test]
    fn stats_map_members_back_into_graph() {
        let outcomes = vec![outcome(0, vec![candidate("Auth", &["AuthService", "login"], 0.9)])];
        let reconciler = Reconciler::new(ReconcileConfig::default());
        let domains = reconciler.reconcile(&graph(), &outcomes, false);

        let stats = &domains[0].stats;
        assert_eq!(stats.file_count, 1);
        assert_eq!(stats.component_count, 2);
        assert!(stats.complexity > 0);
    }

    #[test]
    fn threshold_validation() {
        assert!(ReconcileConfig::default().validate().is_ok());
        assert!(ReconcileConfig {
            merge_threshold: 0.0
        }
        .validate()
        .is_err());
        assert!(ReconcileConfig {
            merge_threshold: 1.5
        }
        .validate()
        .is_err());
    }
}
