//! Home Assistant API client with YAML file reading and host fallback.

use std::collections::HashMap;
use std::path::Path;

use tokio::sync::RwLock;

use autoviz_app::ports::AutomationSource;
use autoviz_domain::automation::Automation;
use autoviz_domain::error::VizError;

use crate::config::HaConfig;
use crate::error::HaError;
use crate::states::StateObject;
use crate::{enrich, states, yaml};

/// Client for the Home Assistant API.
///
/// The working base URL and the entity-name cache persist across calls;
/// the URL is probed once and reused until the process restarts.
pub struct HaClient {
    http: reqwest::Client,
    config: HaConfig,
    base_url: RwLock<Option<String>>,
    entity_names: RwLock<HashMap<String, String>>,
}

impl HaClient {
    /// Create a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`HaError::Http`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: HaConfig) -> Result<Self, HaError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            config,
            base_url: RwLock::new(None),
            entity_names: RwLock::new(HashMap::new()),
        })
    }

    /// Fetch the current automation list.
    ///
    /// Prefers the configured `automations.yaml`, which works without any
    /// reachable host; falls back to synthesizing placeholder configs from
    /// `/api/states` when the file is missing, malformed, or empty. Name
    /// enrichment is best effort and skipped while offline.
    ///
    /// # Errors
    ///
    /// Returns [`HaError::NoReachableHost`] when the REST fallback is
    /// needed and no candidate host answers, or an HTTP error from the
    /// fallback request.
    pub async fn automations(&self) -> Result<Vec<Automation>, HaError> {
        let from_file = match &self.config.automations_yaml {
            Some(path) => match self.from_yaml(path).await {
                Ok(list) if !list.is_empty() => Some(list),
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "automations file is empty");
                    None
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        path = %path.display(),
                        "failed to read automations file, falling back to REST"
                    );
                    None
                }
            },
            None => None,
        };

        let base = match self.working_url().await {
            Ok(base) => {
                self.refresh_entity_names(&base).await;
                Some(base)
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping entity name enrichment");
                None
            }
        };

        let mut automations = match from_file {
            Some(list) => list,
            None => {
                let base = base.ok_or(HaError::NoReachableHost)?;
                self.from_states(&base).await?
            }
        };

        let names = self.entity_names.read().await;
        enrich::apply(&mut automations, &names);
        tracing::info!(count = automations.len(), "loaded automations");
        Ok(automations)
    }

    /// Resolve and cache a working base URL, probing hosts in order.
    async fn working_url(&self) -> Result<String, HaError> {
        if let Some(url) = self.base_url.read().await.clone() {
            return Ok(url);
        }
        for url in self.config.candidate_urls() {
            match self.probe(&url).await {
                Ok(true) => {
                    tracing::info!(%url, "connected to Home Assistant");
                    *self.base_url.write().await = Some(url.clone());
                    return Ok(url);
                }
                Ok(false) => tracing::debug!(%url, "host rejected the probe"),
                Err(err) => tracing::debug!(%url, error = %err, "host probe failed"),
            }
        }
        Err(HaError::NoReachableHost)
    }

    async fn probe(&self, base: &str) -> Result<bool, reqwest::Error> {
        let response = self
            .http
            .get(format!("{base}/api/"))
            .bearer_auth(&self.config.token)
            .timeout(self.config.probe_timeout)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    async fn fetch_states(&self, base: &str) -> Result<Vec<StateObject>, HaError> {
        let response = self
            .http
            .get(format!("{base}/api/states"))
            .bearer_auth(&self.config.token)
            .send()
            .await?;
        let states = response.error_for_status()?.json().await?;
        Ok(states)
    }

    /// Refresh the entity-name cache, best effort.
    async fn refresh_entity_names(&self, base: &str) {
        match self.fetch_states(base).await {
            Ok(list) => {
                let map = states::friendly_name_map(&list);
                tracing::debug!(count = map.len(), "cached entity friendly names");
                *self.entity_names.write().await = map;
            }
            Err(err) => tracing::warn!(error = %err, "failed to fetch entity names"),
        }
    }

    async fn from_yaml(&self, path: &Path) -> Result<Vec<Automation>, HaError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(yaml::parse_automations(&content)?)
    }

    async fn from_states(&self, base: &str) -> Result<Vec<Automation>, HaError> {
        let list = self.fetch_states(base).await?;
        Ok(states::automations_from_states(&list))
    }
}

impl AutomationSource for HaClient {
    async fn fetch_automations(&self) -> Result<Vec<Automation>, VizError> {
        self.automations().await.map_err(VizError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::time::Duration;

    /// Config pointed at a closed loopback port, so every probe is
    /// refused immediately and no test touches the network.
    fn offline_config(automations_yaml: Option<PathBuf>) -> HaConfig {
        HaConfig {
            hosts: vec!["127.0.0.1".to_string()],
            port: 1,
            automations_yaml,
            probe_timeout: Duration::from_millis(200),
            request_timeout: Duration::from_millis(200),
            ..HaConfig::default()
        }
    }

    fn write_temp_yaml(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.yaml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn should_serve_yaml_automations_without_reachable_host() {
        let path = write_temp_yaml(
            "autoviz-offline",
            "- id: '1'\n  alias: Porch light\n  trigger:\n    platform: sun\n",
        );
        let client = HaClient::new(offline_config(Some(path.clone()))).unwrap();

        let automations = client.automations().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(automations.len(), 1);
        assert_eq!(automations[0].display_name(), "Porch light");
    }

    #[tokio::test]
    async fn should_fail_without_reachable_host_when_no_yaml_configured() {
        let client = HaClient::new(offline_config(None)).unwrap();

        let err = client.automations().await.unwrap_err();
        assert!(matches!(err, HaError::NoReachableHost));
    }

    #[tokio::test]
    async fn should_require_reachable_host_when_yaml_is_malformed() {
        let path = write_temp_yaml("autoviz-malformed", "- alias: [unclosed");
        let client = HaClient::new(offline_config(Some(path.clone()))).unwrap();

        let err = client.automations().await.unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, HaError::NoReachableHost));
    }
}
