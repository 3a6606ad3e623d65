use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service status plus whether the completion endpoint is currently considered reachable.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api",
        "completion_model": state.config.completion_model,
        "completion_available": state.resolver.completion().availability().is_available()
    }))
}
