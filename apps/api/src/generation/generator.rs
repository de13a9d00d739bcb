//! Prompt generation — orchestrates one generate action.
//!
//! Flow: validate form → load rules → build messages → resolve suffix →
//!       completion call(s) → normalize + decorate.
//!
//! All-or-nothing: any failure returns an error and no prompts.

use tracing::info;

use crate::errors::{AppError, MISSING_API_KEY, MISSING_KEYWORDS};
use crate::generation::builder;
use crate::generation::formatter::{decorate, normalize_completion};
use crate::llm_client::{
    self, to_api_temperature, BatchStrategy, CompletionProvider, CompletionRequest, MAX_TOKENS,
};
use crate::settings::{
    params, rules, Settings, SuffixMode, Workspace, MAX_PROMPTS, MIN_PROMPTS,
};

/// Deployment-wide choices that shape a generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationPolicy {
    pub suffix_mode: SuffixMode,
    pub batch_strategy: BatchStrategy,
}

/// Runs one generation for the submitted form values.
///
/// Checks, in order: API key, keywords, prompt count, rules. None of them
/// touch the completion API when they fail.
pub async fn generate_prompts(
    workspace: &Workspace,
    provider: &dyn CompletionProvider,
    policy: GenerationPolicy,
    form: &Settings,
) -> Result<Vec<String>, AppError> {
    let api_key = form.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::MissingInput(MISSING_API_KEY));
    }
    if form.initial_keywords.trim().is_empty() {
        return Err(AppError::MissingInput(MISSING_KEYWORDS));
    }
    if !(MIN_PROMPTS..=MAX_PROMPTS).contains(&form.num_prompts) {
        return Err(AppError::Validation(format!(
            "num_prompts must be between {MIN_PROMPTS} and {MAX_PROMPTS}, got {}",
            form.num_prompts
        )));
    }

    let rules_text = rules::load(workspace);
    let messages = builder::build(&rules_text, &form.initial_keywords)?;

    let suffix = match policy.suffix_mode {
        SuffixMode::Params => form.resolve_suffix(policy.suffix_mode, &params::load(workspace))?,
        SuffixMode::AspectRatio => form.resolve_suffix(policy.suffix_mode, &[])?,
    };

    let request = CompletionRequest {
        api_key: api_key.to_string(),
        model: form.model.trim().to_string(),
        system_message: messages.system_message,
        user_message: messages.user_message,
        temperature: to_api_temperature(form.temperature),
        max_tokens: MAX_TOKENS,
        n: 1,
    };

    info!(
        "Generating {} prompt(s) with model {} ({} strategy, temperature {:.2})",
        form.num_prompts, request.model, policy.batch_strategy, request.temperature
    );

    let texts =
        llm_client::generate(provider, policy.batch_strategy, request, form.num_prompts).await?;

    Ok(texts
        .iter()
        .map(|text| decorate(&normalize_completion(text), &suffix))
        .collect())
}
