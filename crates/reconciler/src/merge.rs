use crate::similarity::name_similarity;
use archmap_inference::BatchOutcome;

/// A domain candidate after fuzzy deduplication across batches, before
/// member attribution
#[derive(Debug, Clone)]
pub(crate) struct MergedDomain {
    pub name: String,
    pub description: String,
    /// Raw member strings in discovery order, deduplicated
    pub members: Vec<String>,
    /// Member-count-weighted average of the merged inputs' confidences
    pub confidence: f32,
    pub relationships: Vec<String>,
    /// Stable discovery index (batch order, then candidate order)
    pub discovery_order: usize,
    /// Highest single-input confidence seen; decides whose name wins
    best_confidence: f32,
    /// Accumulated weight for the running average
    weight: f32,
}

/// Fold candidates from all batches into merged domains.
///
/// Candidates are visited in stable batch order; a candidate joins the first
/// existing domain whose name similarity meets the threshold, otherwise it
/// opens a new one. Merged confidence is a weighted average favoring inputs
/// with more members and higher confidence.
pub(crate) fn merge_candidates(outcomes: &[BatchOutcome], threshold: f32) -> Vec<MergedDomain> {
    let mut merged: Vec<MergedDomain> = Vec::new();
    let mut discovery = 0usize;

    for outcome in outcomes {
        for candidate in &outcome.candidates {
            let weight = candidate.members.len().max(1) as f32;

            let target = merged
                .iter()
                .position(|m| name_similarity(&m.name, &candidate.name) >= threshold);

            match target {
                Some(idx) => {
                    let domain = &mut merged[idx];
                    log::debug!(
                        "Merging candidate '{}' into domain '{}'",
                        candidate.name,
                        domain.name
                    );

                    domain.confidence = (domain.confidence * domain.weight
                        + candidate.confidence * weight)
                        / (domain.weight + weight);
                    domain.weight += weight;

                    for member in &candidate.members {
                        if !domain.members.contains(member) {
                            domain.members.push(member.clone());
                        }
                    }
                    for relation in &candidate.relationships {
                        if !domain.relationships.contains(relation) {
                            domain.relationships.push(relation.clone());
                        }
                    }

                    // The higher-confidence side names the domain; ties keep
                    // the first-discovered name.
                    if candidate.confidence > domain.best_confidence {
                        domain.best_confidence = candidate.confidence;
                        domain.name = candidate.name.clone();
                        if !candidate.description.is_empty() {
                            domain.description = candidate.description.clone();
                        }
                    } else if domain.description.is_empty() {
                        domain.description = candidate.description.clone();
                    }
                }
                None => {
                    merged.push(MergedDomain {
                        name: candidate.name.clone(),
                        description: candidate.description.clone(),
                        members: dedup_preserving_order(&candidate.members),
                        confidence: candidate.confidence,
                        relationships: dedup_preserving_order(&candidate.relationships),
                        discovery_order: discovery,
                        best_confidence: candidate.confidence,
                        weight,
                    });
                }
            }
            discovery += 1;
        }
    }

    merged
}

fn dedup_preserving_order(values: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use archmap_inference::{BatchStatus, DomainCandidate};
    use pretty_assertions::assert_eq;

    fn candidate(name: &str, members: &[&str], confidence: f32) -> DomainCandidate {
        DomainCandidate {
            name: name.to_string(),
            description: format!("{name} domain"),
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
    fn similar_names_merge_with_member_union() {
        let outcomes = vec![
            outcome(0, vec![candidate("Auth", &["AuthService"], 0.8)]),
            outcome(1, vec![candidate("auth ", &["SessionManager"], 0.6)]),
        ];
        let merged = merge_candidates(&outcomes, 0.8);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].members, vec!["AuthService", "SessionManager"]);
    }

    #[test]
    fn confidence_is_member_weighted() {
        let outcomes = vec![
            outcome(0, vec![candidate("Auth", &["a", "b", "c"], 0.9)]),
            outcome(1, vec![candidate("Auth", &["d"], 0.5)]),
        ];
        let merged = merge_candidates(&outcomes, 0.8);

        // (0.9 * 3 + 0.5 * 1) / 4 = 0.8
        assert_eq!(merged.len(), 1);
        assert!((merged[0].confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn higher_confidence_side_names_the_domain() {
        let outcomes = vec![
            outcome(0, vec![candidate("auth", &["a"], 0.4)]),
            outcome(1, vec![candidate("Auth", &["b"], 0.9)]),
        ];
        let merged = merge_candidates(&outcomes, 0.8);
        assert_eq!(merged[0].name, "Auth");
    }

    #[test]
    fn equal_confidence_keeps_first_discovered_name() {
        let outcomes = vec![
            outcome(0, vec![candidate("auth", &["a"], 0.7)]),
            outcome(1, vec![candidate("Auth", &["b"], 0.7)]),
        ];
        let merged = merge_candidates(&outcomes, 0.8);
        assert_eq!(merged[0].name, "auth");
    }

    #[test]
    fn dissimilar_names_stay_separate() {
        let outcomes = vec![outcome(
            0,
            vec![
                candidate("Auth", &["a"], 0.8),
                candidate("Billing", &["b"], 0.8),
            ],
        )];
        let merged = merge_candidates(&outcomes, 0.8);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].discovery_order, 0);
        assert_eq!(merged[1].discovery_order, 1);
    }
}
