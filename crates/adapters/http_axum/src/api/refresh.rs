//! `POST /api/refresh` — manual refresh.

use axum::Json;
use axum::extract::State;

use autoviz_domain::diagram::DiagramResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// Trigger an immediate refresh and return the resulting envelope.
///
/// The wait is bounded by the refresh interval; when the upstream is
/// slower than that, the current snapshot is returned and the fresh one
/// lands on the next poll.
pub async fn trigger(
    State(state): State<AppState>,
) -> Result<Json<DiagramResponse>, ApiError> {
    let wait = tokio::time::timeout(
        state.refresh_interval,
        state.refresh.trigger_and_wait(),
    );
    match wait.await {
        Ok(Ok(snapshot)) => Ok(Json(snapshot.response)),
        Ok(Err(_closed)) => Err(ApiError::RefreshUnavailable),
        Err(_elapsed) => Ok(Json(state.refresh.snapshot().response)),
    }
}
