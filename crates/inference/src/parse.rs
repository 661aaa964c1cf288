use crate::types::DomainCandidate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DomainPayload {
    #[serde(default)]
    domains: Vec<PayloadDomain>,
}

#[derive(Debug, Deserialize)]
struct PayloadDomain {
    name: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    confidence: f32,

    #[serde(default, alias = "primary_components", alias = "components")]
    members: Vec<String>,

    #[serde(default)]
    relationships: Vec<String>,
}

/// Tolerantly parse a free-form model response into domain candidates.
///
/// The response is expected to embed a JSON payload somewhere: surrounding
/// prose and markdown fences are stripped, the outermost brace span is
/// sliced out, and the remainder must parse strictly. `None` means the
/// payload was malformed; the caller degrades the batch instead of
/// propagating an error.
pub fn parse_domain_response(raw: &str) -> Option<Vec<DomainCandidate>> {
    let json = extract_json_object(raw)?;
    let payload: DomainPayload = match serde_json::from_str(json) {
        Ok(payload) => payload,
        Err(e) => {
            log::debug!("Model payload failed to parse: {e}");
            return None;
        }
    };

    let candidates = payload
        .domains
        .into_iter()
        .filter(|d| !d.name.trim().is_empty())
        .map(|d| DomainCandidate {
            name: d.name.trim().to_string(),
            description: d.description.trim().to_string(),
            members: d.members,
            confidence: d.confidence.clamp(0.0, 1.0),
            relationships: d.relationships,
        })
        .collect();

    Some(candidates)
}

/// Slice the outermost `{ … }` span out of a free-form response
fn extract_json_object(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
