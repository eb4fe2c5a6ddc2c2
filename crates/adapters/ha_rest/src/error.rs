//! Adapter-specific error type wrapping reqwest, IO, and YAML errors.

use autoviz_domain::error::VizError;

/// Errors originating from the Home Assistant adapter.
#[derive(Debug, thiserror::Error)]
pub enum HaError {
    /// No candidate host answered the connectivity probe.
    #[error("no reachable Home Assistant host")]
    NoReachableHost,

    /// An HTTP request failed or returned an unusable body.
    #[error("Home Assistant request failed")]
    Http(#[from] reqwest::Error),

    /// Reading `automations.yaml` failed.
    #[error("failed to read automations file")]
    Io(#[from] std::io::Error),

    /// Parsing `automations.yaml` failed.
    #[error("failed to parse automations file")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<HaError> for VizError {
    fn from(err: HaError) -> Self {
        Self::source(err)
    }
}
