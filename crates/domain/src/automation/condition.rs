//! Condition — a guard that must hold for the automation to proceed.

use serde::{Deserialize, Serialize};

use super::{SHORTHAND_LABEL_MAX, entity_id_list, truncate_label};

/// A single condition entry from an automation config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Detailed(ConditionConfig),
    Shorthand(String),
    Other(serde_json::Value),
}

/// Detailed condition configuration. The condition kind lives under the
/// `condition:` key (`state`, `time`, `numeric_state`, …).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionConfig {
    #[serde(default, rename = "condition", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<serde_json::Value>,
    #[serde(
        default,
        rename = "_friendly_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub friendly_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConditionConfig {
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("unknown")
    }

    #[must_use]
    pub fn entity_label(&self) -> Option<String> {
        if let Some(name) = &self.friendly_name {
            return Some(name.clone());
        }
        let ids = self.entity_id.as_ref().map(|v| entity_id_list(v))?;
        if ids.is_empty() {
            None
        } else {
            Some(ids.join(", "))
        }
    }
}

impl Condition {
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Detailed(cfg) => cfg.kind().to_string(),
            Self::Shorthand(text) => truncate_label(text, SHORTHAND_LABEL_MAX),
            Self::Other(_) => "unknown".to_string(),
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Detailed(cfg) => cfg.entity_label(),
            Self::Shorthand(_) | Self::Other(_) => None,
        }
    }

    /// Multi-line flowchart node label.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut label = format!("Condition: {}", self.kind());
        if let Some(detail) = self.detail() {
            label.push('\n');
            label.push_str(&detail);
        }
        label
    }
}
