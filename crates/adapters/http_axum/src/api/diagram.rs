//! `GET /api/diagram` — the current diagram envelope.

use axum::Json;
use axum::extract::State;

use autoviz_domain::diagram::DiagramResponse;

use crate::state::AppState;

/// Return the envelope from the most recent refresh snapshot.
///
/// Always HTTP 200: logical failures are carried inside the envelope as
/// `success: false` plus a message.
pub async fn latest(State(state): State<AppState>) -> Json<DiagramResponse> {
    Json(state.refresh.snapshot().response)
}
