//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::pipeline::{self, MatchFieldsRequest, MatchFieldsResponse};
use crate::state::AppState;

/// POST /api/match-fields
///
/// Receives detected form fields (plus optional job context) from the
/// extension and returns fill values, file attachments, and the fields
/// that still need a human.
pub async fn handle_match_fields(
    State(state): State<AppState>,
    Json(request): Json<MatchFieldsRequest>,
) -> Result<Json<MatchFieldsResponse>, AppError> {
    if request.fields.is_empty() {
        return Err(AppError::Validation(
            "Request must contain at least one field".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        field_count = request.fields.len(),
        company = request.company.as_deref().unwrap_or("-"),
        "match-fields request received"
    );

    let response = pipeline::run(&state, &request).await?;

    info!(
        %request_id,
        filled = response.fill_values.len(),
        needs_human = response.needs_human.len(),
        "match-fields request complete"
    );

    Ok(Json(response))
}
