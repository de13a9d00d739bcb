use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::GenerationPolicy;
use crate::llm_client::CompletionProvider;
use crate::session::SessionStore;
use crate::settings::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Data directory holding settings, rules and parameters.
    pub workspace: Workspace,
    /// Completion backend. `OpenAiClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionProvider>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            suffix_mode: self.config.suffix_mode,
            batch_strategy: self.config.batch_strategy,
        }
    }
}
