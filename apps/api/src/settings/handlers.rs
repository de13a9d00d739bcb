//! Axum route handlers for settings, rules and parameters.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::settings::{params, rules, store, Settings, SuffixMode, AR_PRESETS};
use crate::state::AppState;

/// Everything the form needs to render its defaults.
#[derive(Debug, Serialize)]
pub struct SettingsFormResponse {
    pub settings: Settings,
    pub suffix_mode: SuffixMode,
    pub temperature_slider: u8,
    /// Params layout only; empty otherwise.
    pub param_options: Vec<String>,
    /// Option the parameter selector should preselect.
    pub displayed_param: String,
    pub ar_presets: Vec<&'static str>,
    pub active_aspect_ratio: String,
}

#[derive(Debug, Serialize)]
pub struct SaveSettingsResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub rules: String,
}

#[derive(Debug, Serialize)]
pub struct ParamsResponse {
    pub params: Vec<String>,
}

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<SettingsFormResponse> {
    let settings = store::load(&state.workspace);
    let suffix_mode = state.config.suffix_mode;
    let param_options = match suffix_mode {
        SuffixMode::Params => params::load(&state.workspace),
        SuffixMode::AspectRatio => Vec::new(),
    };

    Json(SettingsFormResponse {
        temperature_slider: settings.temperature_slider(),
        displayed_param: settings.displayed_param(&param_options).to_string(),
        active_aspect_ratio: settings.active_aspect_ratio().to_string(),
        ar_presets: AR_PRESETS.to_vec(),
        param_options,
        suffix_mode,
        settings,
    })
}

/// PUT /api/v1/settings
///
/// Persists the form exactly as submitted; nothing is range-checked here.
pub async fn handle_save_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<SaveSettingsResponse>, AppError> {
    store::save(&state.workspace, &settings)?;
    info!("Settings saved");

    Ok(Json(SaveSettingsResponse {
        message: "Settings saved successfully.",
    }))
}

/// GET /api/v1/rules
pub async fn handle_get_rules(State(state): State<AppState>) -> Json<RulesResponse> {
    Json(RulesResponse {
        rules: rules::load(&state.workspace),
    })
}

/// GET /api/v1/params
pub async fn handle_get_params(State(state): State<AppState>) -> Json<ParamsResponse> {
    Json(ParamsResponse {
        params: params::load(&state.workspace),
    })
}
