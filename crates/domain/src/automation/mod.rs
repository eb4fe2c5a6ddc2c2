//! Automation — trigger → condition → action rules, as Home Assistant
//! stores them.
//!
//! Home Assistant automation configuration is loosely typed YAML: every
//! block may be a single map, a list of maps, a bare string shorthand, or
//! absent, and both singular (`trigger:`) and plural (`triggers:`) key
//! spellings occur in the wild. The types here accept all of those forms
//! and expose summaries suitable for diagram labels.

mod action;
mod condition;
mod trigger;

pub use action::{Action, ActionConfig, Target};
pub use condition::{Condition, ConditionConfig};
pub use trigger::{Trigger, TriggerConfig};

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum length of a string shorthand in a diagram label.
pub const SHORTHAND_LABEL_MAX: usize = 30;

/// A user-defined Home Assistant automation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Automation {
    /// Stable identifier assigned by Home Assistant.
    #[serde(default = "unknown_id")]
    pub id: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Entity id of the automation itself (`automation.*`), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(
        default,
        rename = "trigger",
        alias = "triggers",
        deserialize_with = "one_or_many"
    )]
    pub triggers: Vec<Trigger>,
    #[serde(
        default,
        rename = "condition",
        alias = "conditions",
        deserialize_with = "one_or_many"
    )]
    pub conditions: Vec<Condition>,
    #[serde(
        default,
        rename = "action",
        alias = "actions",
        deserialize_with = "one_or_many"
    )]
    pub actions: Vec<Action>,
}

fn unknown_id() -> String {
    "unknown".to_string()
}

impl Automation {
    /// Name to display in the diagram: the alias, or a fallback built
    /// from the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.alias {
            Some(alias) if !alias.is_empty() => alias.clone(),
            _ => format!("Automation {}", self.id),
        }
    }

    /// Entity id of the automation itself.
    #[must_use]
    pub fn automation_entity_id(&self) -> String {
        self.entity_id
            .clone()
            .unwrap_or_else(|| format!("automation.{}", self.id))
    }
}

/// Deserialize a field that may be absent, `null`, a single item, or a list.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    let value = Option::<OneOrMany<T>>::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

/// Extract entity ids from a Home Assistant `entity_id` value, which may
/// be a single string or a list of strings.
#[must_use]
pub fn entity_id_list(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(id) => vec![id.clone()],
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(ToString::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Truncate a label to `max` characters (char-safe).
pub(crate) fn truncate_label(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        value.chars().take(max).collect()
    }
}
