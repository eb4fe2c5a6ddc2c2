//! Automation source port — where automation configs come from.

use std::future::Future;

use autoviz_domain::automation::Automation;
use autoviz_domain::error::VizError;

/// Provider of the current Home Assistant automation list.
///
/// Implementations are expected to return the normalized configuration
/// of every automation (YAML file, REST API, or a stub in tests).
pub trait AutomationSource {
    /// Fetch all automation configurations.
    fn fetch_automations(
        &self,
    ) -> impl Future<Output = Result<Vec<Automation>, VizError>> + Send;
}
