//! Axum route handlers for generation and export.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::formatter::{to_csv, CSV_FILE_NAME};
use crate::generation::generator::generate_prompts;
use crate::session::SessionResults;
use crate::settings::Settings;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Current form values plus the session to store results under.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub session_id: Option<Uuid>,
    #[serde(flatten)]
    pub form: Settings,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub prompts: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/prompts/generate
///
/// Generates prompts from the submitted form and replaces the session's
/// results. A request without `session_id` opens a new session.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);

    let prompts = generate_prompts(
        &state.workspace,
        state.llm.as_ref(),
        state.policy(),
        &request.form,
    )
    .await?;

    let SessionResults {
        prompts,
        generated_at,
    } = state.sessions.replace(session_id, prompts).await;

    info!(
        "Stored {} prompt(s) for session {}",
        prompts.len(),
        session_id
    );

    Ok(Json(GenerateResponse {
        session_id,
        prompts,
        generated_at,
    }))
}

/// GET /api/v1/sessions/:id/prompts
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResults>, AppError> {
    let results = lookup(&state, session_id).await?;
    Ok(Json(results))
}

/// GET /api/v1/sessions/:id/prompts.csv
///
/// Downloads the session's prompts as `generated_prompts.csv`.
pub async fn handle_export_csv(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let results = lookup(&state, session_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILE_NAME}\""),
            ),
        ],
        to_csv(&results.prompts),
    ))
}

async fn lookup(state: &AppState, session_id: Uuid) -> Result<SessionResults, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No generated prompts for session {session_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_flattens_form() {
        let json = serde_json::json!({
            "api_key": "sk-test",
            "initial_keywords": "lighthouse, storm",
            "num_prompts": 3,
            "temperature": 8
        });
        let request: GenerateRequest = serde_json::from_value(json).unwrap();

        assert!(request.session_id.is_none());
        assert_eq!(request.form.initial_keywords, "lighthouse, storm");
        assert_eq!(request.form.num_prompts, 3);
        assert_eq!(request.form.temperature, 8.0);
        assert_eq!(request.form.model, "gpt-4o-mini");
    }
}
