use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/usage
/// Session token spend: totals plus a per task:model breakdown.
pub async fn usage_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "session": state.usage.session_total(),
        "by_task": state.usage.by_task(),
    }))
}
