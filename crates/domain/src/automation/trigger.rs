//! Trigger — the event pattern that activates an automation.

use serde::{Deserialize, Serialize};

use super::{SHORTHAND_LABEL_MAX, entity_id_list, truncate_label};

/// A single trigger entry from an automation config.
///
/// Home Assistant accepts detailed maps, bare string shorthands, and —
/// in malformed configs — arbitrary scalars. All three are preserved so
/// a single odd entry never fails the whole automation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    Detailed(TriggerConfig),
    Shorthand(String),
    Other(serde_json::Value),
}

/// Detailed trigger configuration.
///
/// The trigger kind lives under the legacy `platform:` key or the
/// 2024-style `trigger:` key; unknown keys are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, rename = "trigger", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Single entity id string or a list of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<serde_json::Value>,
    /// Friendly name resolved from the entity registry, if available.
    #[serde(
        default,
        rename = "_friendly_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub friendly_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TriggerConfig {
    /// The trigger kind, preferring the modern `trigger:` key.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind
            .as_deref()
            .or(self.platform.as_deref())
            .unwrap_or("unknown")
    }

    /// Entity line for labels: the friendly name when resolved, else the
    /// raw entity id(s).
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

impl Trigger {
    /// Short kind label for card rendering.
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Detailed(cfg) => cfg.kind().to_string(),
            Self::Shorthand(text) => truncate_label(text, SHORTHAND_LABEL_MAX),
            Self::Other(_) => "unknown".to_string(),
        }
    }

    /// Secondary line (entity or friendly name), if any.
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
        let mut label = format!("Trigger: {}", self.kind());
        if let Some(detail) = self.detail() {
            label.push('\n');
            label.push_str(&detail);
        }
        label
    }
}
