//! Connection settings for the Home Assistant adapter.

use std::path::PathBuf;
use std::time::Duration;

/// Home Assistant connection configuration.
#[derive(Debug, Clone)]
pub struct HaConfig {
    /// Candidate hosts, probed in order (primary first).
    pub hosts: Vec<String>,
    /// Home Assistant API port.
    pub port: u16,
    /// Long-lived access token.
    pub token: String,
    /// Path to `automations.yaml`; when unset, only the REST fallback
    /// is available.
    pub automations_yaml: Option<PathBuf>,
    /// Timeout for the per-host connectivity probe.
    pub probe_timeout: Duration,
    /// Timeout for regular API requests.
    pub request_timeout: Duration,
}

impl Default for HaConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["homeassistant.local".to_string()],
            port: 8123,
            token: String::new(),
            automations_yaml: None,
            probe_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl HaConfig {
    /// Base URLs to probe, in priority order.
    #[must_use]
    pub fn candidate_urls(&self) -> Vec<String> {
        self.hosts
            .iter()
            .map(|host| format!("http://{host}:{}", self.port))
            .collect()
    }
}
