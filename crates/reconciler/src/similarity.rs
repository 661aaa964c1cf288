use std::collections::BTreeSet;

/// Tokenize a domain name: case- and whitespace-insensitive, split on
/// non-alphanumerics and camelCase boundaries
pub(crate) fn name_tokens(name: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower && !current.is_empty() {
                tokens.insert(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
            prev_lower = ch.is_lowercase() || ch.is_numeric();
        } else {
            if !current.is_empty() {
                tokens.insert(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        tokens.insert(current);
    }
    tokens
}

/// Token-overlap similarity between two domain names in [0,1].
///
/// Jaccard overlap of the normalized token sets; names with no tokens at all
/// never match anything.
pub fn name_similarity(a: &str, b: &str) -> f32 {
    let tokens_a = name_tokens(a);
    let tokens_b = name_tokens(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f32 / union as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(name_similarity("Auth", "auth "), 1.0);
        assert_eq!(name_similarity("User Management", "user_management"), 1.0);
    }

    #[test]
    fn camel_case_splits() {
        let tokens = name_tokens("UserAuthService");
        assert!(tokens.contains("user"));
        assert!(tokens.contains("auth"));
        assert!(tokens.contains("service"));
    }

    #[test]
    fn partial_overlap() {
        let sim = name_similarity("User Auth", "Auth");
        assert!((sim - 0.5).abs() < 1e-6);
    }

    #[test]
    fn disjoint_names() {
        assert_eq!(name_similarity("Billing", "Telemetry"), 0.0);
    }

    #[test]
    fn empty_names_never_match() {
        assert_eq!(name_similarity("", ""), 0.0);
        assert_eq!(name_similarity("  ", "Auth"), 0.0);
    }
}
