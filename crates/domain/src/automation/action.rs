//! Action — the effect performed when an automation fires.

use serde::{Deserialize, Serialize};

use super::{SHORTHAND_LABEL_MAX, entity_id_list, truncate_label};

/// A single action entry from an automation config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Detailed(ActionConfig),
    Shorthand(String),
    Other(serde_json::Value),
}

/// Detailed action configuration.
///
/// The action kind lives under the legacy `service:` key or the
/// 2024-style `action:` key. Targets may appear as a top-level
/// `entity_id` or nested under `target:`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, rename = "action", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(
        default,
        rename = "_friendly_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub friendly_name: Option<String>,
    /// Friendly name of the target entity, if resolved.
    #[serde(
        default,
        rename = "_target_friendly_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_friendly_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Service call target block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ActionConfig {
    /// The action kind, preferring the legacy `service:` key.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.service
            .as_deref()
            .or(self.kind.as_deref())
            .unwrap_or("unknown")
    }

    /// Entity ids targeted by the action, from either spelling.
    #[must_use]
    pub fn target_entity_ids(&self) -> Vec<String> {
        if let Some(value) = &self.entity_id {
            return entity_id_list(value);
        }
        self.target
            .as_ref()
            .and_then(|target| target.entity_id.as_ref())
            .map(|value| entity_id_list(value))
            .unwrap_or_default()
    }

    /// Target line for labels: resolved friendly name, else raw ids.
    #[must_use]
    pub fn target_label(&self) -> Option<String> {
        if let Some(name) = &self.target_friendly_name {
            return Some(name.clone());
        }
        if let Some(name) = &self.friendly_name {
            return Some(name.clone());
        }
        let ids = self.target_entity_ids();
        if ids.is_empty() {
            None
        } else {
            Some(ids.join(", "))
        }
    }
}

impl Action {
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
            Self::Detailed(cfg) => cfg.target_label(),
            Self::Shorthand(_) | Self::Other(_) => None,
        }
    }

    /// Multi-line flowchart node label.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut label = format!("Action: {}", self.kind());
        if let Some(detail) = self.detail() {
            label.push('\n');
            label.push_str(&detail);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_summarize_service_call_with_nested_target() {
        let json = serde_json::json!({
            "service": "light.turn_on",
            "target": {"entity_id": "light.porch"},
        });
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.summary(), "Action: light.turn_on\nlight.porch");
    }

    #[test]
    fn should_fall_back_to_modern_action_key() {
        let json = serde_json::json!({"action": "scene.turn_on"});
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.kind(), "scene.turn_on");
    }

    #[test]
    fn should_prefer_top_level_entity_id_over_target() {
        let json = serde_json::json!({
            "service": "switch.toggle",
            "entity_id": "switch.fan",
            "target": {"entity_id": "switch.other"},
        });
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.detail().unwrap(), "switch.fan");
    }

    #[test]
    fn should_prefer_target_friendly_name_when_enriched() {
        let action = Action::Detailed(ActionConfig {
            service: Some("light.turn_on".to_string()),
            target: Some(Target {
                entity_id: Some(serde_json::json!("light.porch")),
                ..Target::default()
            }),
            target_friendly_name: Some("Porch Light".to_string()),
            ..ActionConfig::default()
        });
        assert_eq!(action.summary(), "Action: light.turn_on\nPorch Light");
    }

    #[test]
    fn should_truncate_string_shorthand_actions() {
        let long = "y".repeat(48);
        let action: Action = serde_json::from_value(serde_json::json!(long)).unwrap();
        assert_eq!(action.kind().chars().count(), SHORTHAND_LABEL_MAX);
    }

    #[test]
    fn should_label_unknown_for_kindless_maps() {
        let json = serde_json::json!({"delay": "00:00:05"});
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.kind(), "unknown");
    }
}
