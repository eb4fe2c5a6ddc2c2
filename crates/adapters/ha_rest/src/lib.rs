//! # autoviz-adapter-ha-rest
//!
//! Home Assistant adapter implementing the
//! [`AutomationSource`](autoviz_app::ports::AutomationSource) port.
//!
//! ## Responsibilities
//! - Resolve a working base URL by probing candidate hosts (primary then
//!   fallback) with a short timeout
//! - Read and normalize `automations.yaml` when a path is configured
//! - Fall back to synthesizing placeholder configs from `/api/states`
//!   when the YAML file is unreadable
//! - Cache `entity_id → friendly_name` mappings and enrich trigger,
//!   condition, and action entries with them
//!
//! ## Dependency rule
//! Depends on `autoviz-app` (port trait) and `autoviz-domain`. Never leaks
//! reqwest or serde_yaml types across the port boundary.

mod client;
mod config;
mod enrich;
mod error;
mod states;
mod yaml;

pub use client::HaClient;
pub use config::HaConfig;
pub use error::HaError;
