//! JSON API handler modules.

pub mod diagram;
pub mod refresh;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/diagram", get(diagram::latest))
        .route("/refresh", post(refresh::trigger))
}
