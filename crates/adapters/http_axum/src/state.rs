//! Shared application state for axum handlers.

use std::time::Duration;

use autoviz_app::refresh::RefreshHandle;

/// Application state shared across all axum handlers.
///
/// Handlers talk to the refresh loop exclusively through the clonable
/// [`RefreshHandle`]; the automation source and renderer stay behind it.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the background refresh loop.
    pub refresh: RefreshHandle,
    /// Poll interval advertised to the browser page, also used as the
    /// upper bound when waiting on a manual refresh.
    pub refresh_interval: Duration,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(refresh: RefreshHandle, refresh_interval: Duration) -> Self {
        Self {
            refresh,
            refresh_interval,
        }
    }
}
