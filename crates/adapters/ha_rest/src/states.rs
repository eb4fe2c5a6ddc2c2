//! `/api/states` payload handling.

use std::collections::HashMap;

use serde::Deserialize;

use autoviz_domain::automation::{
    Action, ActionConfig, Automation, Trigger, TriggerConfig,
};

/// Placeholder used when the automation config itself is unreachable and
/// only the state listing is available.
pub(crate) const CONFIG_NOT_ACCESSIBLE: &str = "Config not accessible - check YAML path";

/// One entry of the Home Assistant `/api/states` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StateObject {
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl StateObject {
    pub(crate) fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(|v| v.as_str())
    }
}

/// Build the `entity_id → friendly_name` cache.
pub(crate) fn friendly_name_map(states: &[StateObject]) -> HashMap<String, String> {
    states
        .iter()
        .filter(|state| !state.entity_id.is_empty())
        .map(|state| {
            let name = state
                .friendly_name()
                .unwrap_or(&state.entity_id)
                .to_string();
            (state.entity_id.clone(), name)
        })
        .collect()
}

/// Synthesize placeholder automation configs from enabled `automation.*`
/// entities when the YAML file cannot be read.
pub(crate) fn automations_from_states(states: &[StateObject]) -> Vec<Automation> {
    states
        .iter()
        .filter(|state| state.entity_id.starts_with("automation.") && state.state == "on")
        .map(|state| Automation {
            id: "unknown".to_string(),
            alias: Some(
                state
                    .friendly_name()
                    .unwrap_or(&state.entity_id)
                    .to_string(),
            ),
            entity_id: Some(state.entity_id.clone()),
            triggers: vec![Trigger::Detailed(TriggerConfig {
                platform: Some("unknown".to_string()),
                entity_id: Some(serde_json::Value::String(
                    CONFIG_NOT_ACCESSIBLE.to_string(),
                )),
                ..TriggerConfig::default()
            })],
            conditions: Vec::new(),
            actions: vec![Action::Detailed(ActionConfig {
                service: Some("unknown".to_string()),
                ..ActionConfig::default()
            })],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<StateObject> {
        serde_json::from_value(serde_json::json!([
            {
                "entity_id": "light.porch",
                "state": "off",
                "attributes": {"friendly_name": "Porch Light"},
            },
            {
                "entity_id": "automation.sunset",
                "state": "on",
                "attributes": {"friendly_name": "Sunset Routine"},
            },
            {
                "entity_id": "automation.disabled",
                "state": "off",
                "attributes": {},
            },
            {"entity_id": "sensor.bare", "state": "3", "attributes": {}},
        ]))
        .unwrap()
    }

    #[test]
    fn should_map_entity_ids_to_friendly_names() {
        let map = friendly_name_map(&states());
        assert_eq!(map.get("light.porch").unwrap(), "Porch Light");
        // Entities without a friendly name map to their own id.
        assert_eq!(map.get("sensor.bare").unwrap(), "sensor.bare");
    }

    #[test]
    fn should_synthesize_configs_for_enabled_automations_only() {
        let automations = automations_from_states(&states());
        assert_eq!(automations.len(), 1);
        let auto = &automations[0];
        assert_eq!(auto.display_name(), "Sunset Routine");
        assert_eq!(auto.automation_entity_id(), "automation.sunset");
        assert_eq!(auto.triggers.len(), 1);
        assert!(auto.triggers[0].summary().contains(CONFIG_NOT_ACCESSIBLE));
        assert_eq!(auto.actions[0].kind(), "unknown");
    }
}
