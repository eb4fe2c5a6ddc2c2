//! `automations.yaml` parsing.

use autoviz_domain::automation::Automation;

/// Parse the contents of `automations.yaml`.
///
/// The file is a top-level list; an empty file or bare `null` document
/// yields an empty list rather than an error.
pub(crate) fn parse_automations(content: &str) -> Result<Vec<Automation>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let automations: Option<Vec<Automation>> = serde_yaml::from_str(content)?;
    Ok(automations.unwrap_or_default())
}
