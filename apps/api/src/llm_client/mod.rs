/// Completion client: the only module that talks to the text-generation API.
///
/// The API sits behind [`CompletionProvider`] so generation can run against a
/// deterministic stub in tests. [`OpenAiClient`] is the production backend.
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::settings::MAX_TEMPERATURE;

/// Token budget per completion.
pub const MAX_TOKENS: u32 = 77;

/// Slider (0–10) to API temperature conversion: 10 maps to 2.0.
pub const TEMPERATURE_SCALE: f64 = 0.2;

/// Converts the 0–10 slider value to the API's 0–2 range.
pub fn to_api_temperature(slider: f64) -> f64 {
    slider.clamp(0.0, MAX_TEMPERATURE) * TEMPERATURE_SCALE
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Expected {expected} completions, received {received}")]
    ChoiceCount { expected: usize, received: usize },
}

/// How `count` completions are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStrategy {
    /// One request asking for `n = count` completions.
    #[default]
    Batched,
    /// `count` single-completion requests issued one after another.
    Sequential,
}

impl FromStr for BatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "batched" | "batch" => Ok(BatchStrategy::Batched),
            "sequential" => Ok(BatchStrategy::Sequential),
            other => Err(format!(
                "unknown batch strategy '{other}' (expected 'batched' or 'sequential')"
            )),
        }
    }
}

impl fmt::Display for BatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStrategy::Batched => write!(f, "batched"),
            BatchStrategy::Sequential => write!(f, "sequential"),
        }
    }
}

/// One request to the completion API.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub api_key: String,
    pub model: String,
    pub system_message: String,
    pub user_message: String,
    /// Already in the API's native range.
    pub temperature: f64,
    pub max_tokens: u32,
    pub n: u32,
}

/// The external text-generation capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Issues one request and returns the generated texts in choice order.
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, LlmError>;
}

/// Obtains `count` completions for the same prompt using `strategy`.
///
/// All-or-nothing: the first failure aborts and nothing collected so far is
/// returned. No retries.
pub async fn generate(
    provider: &dyn CompletionProvider,
    strategy: BatchStrategy,
    request: CompletionRequest,
    count: u32,
) -> Result<Vec<String>, LlmError> {
    let expected = count as usize;

    match strategy {
        BatchStrategy::Batched => {
            let request = CompletionRequest { n: count, ..request };
            let texts = provider.complete(&request).await?;
            if texts.len() != expected {
                return Err(LlmError::ChoiceCount {
                    expected,
                    received: texts.len(),
                });
            }
            Ok(texts)
        }
        BatchStrategy::Sequential => {
            let request = CompletionRequest { n: 1, ..request };
            let mut texts = Vec::with_capacity(expected);
            for _ in 0..count {
                let text = provider
                    .complete(&request)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(LlmError::EmptyContent)?;
                texts.push(text);
            }
            Ok(texts)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI chat completions backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    n: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

impl ChatResponse {
    fn into_texts(self) -> Result<Vec<String>, LlmError> {
        self.choices
            .into_iter()
            .map(|c| c.message.content.ok_or(LlmError::EmptyContent))
            .collect()
    }
}

/// Chat-completions client. The API key travels with each request because it
/// is supplied by the user through the form, not by the deployment.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, LlmError> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_message,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_message,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            n: request.n,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OpenAiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Completion succeeded: choices={}, prompt_tokens={}, completion_tokens={}",
                parsed.choices.len(),
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        parsed.into_texts()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Records every request and answers with a fixed list of texts.
    pub(crate) struct StubProvider {
        pub texts: Vec<String>,
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<CompletionRequest>>,
        pub fail_with: Option<(u16, String)>,
    }

    impl StubProvider {
        pub(crate) fn returning(texts: &[&str]) -> Self {
            Self {
                texts: texts.iter().map(|t| t.to_string()).collect(),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        pub(crate) fn failing(status: u16, message: &str) -> Self {
            Self {
                fail_with: Some((status, message.to_string())),
                ..Self::returning(&[])
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, request: &CompletionRequest) -> Result<Vec<String>, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if let Some((status, message)) = &self.fail_with {
                return Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                });
            }
            Ok(self.texts.clone())
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
            system_message: "system".to_string(),
            user_message: "user".to_string(),
            temperature: 1.0,
            max_tokens: MAX_TOKENS,
            n: 1,
        }
    }

    #[test]
    fn test_temperature_mapping() {
        assert_eq!(to_api_temperature(5.0), 1.0);
        assert_eq!(to_api_temperature(0.0), 0.0);
        assert_eq!(to_api_temperature(10.0), 2.0);
        assert_eq!(to_api_temperature(MAX_TEMPERATURE), 2.0);
        assert_eq!(to_api_temperature(25.0), 2.0);
        assert_eq!(to_api_temperature(-1.0), 0.0);
    }

    #[test]
    fn test_batch_strategy_parsing() {
        assert_eq!(
            "Sequential".parse::<BatchStrategy>().unwrap(),
            BatchStrategy::Sequential
        );
        assert_eq!(
            "batched".parse::<BatchStrategy>().unwrap(),
            BatchStrategy::Batched
        );
        assert!("parallel".parse::<BatchStrategy>().is_err());
    }

    #[tokio::test]
    async fn test_batched_issues_one_request_with_n() {
        let stub = StubProvider::returning(&["a", "b", "c"]);
        let texts = generate(&stub, BatchStrategy::Batched, request(), 3)
            .await
            .unwrap();

        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.requests.lock().unwrap()[0].n, 3);
    }

    #[tokio::test]
    async fn test_batched_rejects_short_answer() {
        let stub = StubProvider::returning(&["only one"]);
        let err = generate(&stub, BatchStrategy::Batched, request(), 2)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LlmError::ChoiceCount {
                expected: 2,
                received: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_sequential_issues_count_requests() {
        let stub = StubProvider::returning(&["first", "ignored"]);
        let texts = generate(&stub, BatchStrategy::Sequential, request(), 4)
            .await
            .unwrap();

        assert_eq!(texts, vec!["first"; 4]);
        assert_eq!(stub.call_count(), 4);
        assert!(stub.requests.lock().unwrap().iter().all(|r| r.n == 1));
    }

    #[tokio::test]
    async fn test_sequential_aborts_on_first_failure() {
        let stub = StubProvider::failing(429, "quota exceeded");
        let err = generate(&stub, BatchStrategy::Sequential, request(), 5)
            .await
            .unwrap_err();

        assert_eq!(stub.call_count(), 1);
        assert_eq!(err.to_string(), "API error (status 429): quota exceeded");
    }

    #[test]
    fn test_chat_response_extracts_choices_in_order() {
        let json = r#"{
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Misty pine forest"}},
                {"index": 1, "message": {"role": "assistant", "content": "Golden autumn trail"}}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 18, "total_tokens": 138}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.into_texts().unwrap(),
            vec!["Misty pine forest", "Golden autumn trail"]
        );
    }

    #[test]
    fn test_chat_response_null_content_is_empty_error() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed.into_texts(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "system",
                content: "hi",
            }],
            temperature: 1.0,
            max_tokens: MAX_TOKENS,
            n: 2,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["max_tokens"], 77);
        assert_eq!(value["n"], 2);
        assert_eq!(value["messages"][0]["role"], "system");
    }
}
