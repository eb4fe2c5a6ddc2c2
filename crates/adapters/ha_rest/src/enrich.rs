//! Friendly-name enrichment for trigger/condition/action entries.

use std::collections::HashMap;

use autoviz_domain::automation::{Action, Automation, Condition, Trigger, entity_id_list};

/// Fill in `_friendly_name`/`_target_friendly_name` fields from the
/// entity-name cache. Existing names are never overwritten.
pub(crate) fn apply(automations: &mut [Automation], names: &HashMap<String, String>) {
    if names.is_empty() {
        return;
    }
    for automation in automations {
        for trigger in &mut automation.triggers {
            if let Trigger::Detailed(cfg) = trigger
                && cfg.friendly_name.is_none()
            {
                cfg.friendly_name = lookup(cfg.entity_id.as_ref(), names);
            }
        }
        for condition in &mut automation.conditions {
            if let Condition::Detailed(cfg) = condition
                && cfg.friendly_name.is_none()
            {
                cfg.friendly_name = lookup(cfg.entity_id.as_ref(), names);
            }
        }
        for action in &mut automation.actions {
            if let Action::Detailed(cfg) = action
                && cfg.target_friendly_name.is_none()
            {
                cfg.target_friendly_name = cfg
                    .target_entity_ids()
                    .iter()
                    .find_map(|id| names.get(id).cloned());
            }
        }
    }
}

fn lookup(
    value: Option<&serde_json::Value>,
    names: &HashMap<String, String>,
) -> Option<String> {
    let ids = entity_id_list(value?);
    ids.iter().find_map(|id| names.get(id).cloned())
}
