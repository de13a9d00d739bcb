pub mod health;
pub mod ui;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Settings, rules and parameters
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_save_settings),
        )
        .route("/api/v1/rules", get(settings::handle_get_rules))
        .route("/api/v1/params", get(settings::handle_get_params))
        // Generation and export
        .route(
            "/api/v1/prompts/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/prompts",
            get(generation::handle_get_session),
        )
        .route(
            "/api/v1/sessions/:id/prompts.csv",
            get(generation::handle_export_csv),
        )
        .with_state(state)
}
