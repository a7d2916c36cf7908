//! OpenAI answer generator using the chat completions API.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::answerer::AnswerGenerator;
use crate::error::{QaError, Result};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_ANSWER_TOKENS: u32 = 150;

/// System prompt instructing the model to answer from context only and to use
/// the no-answer sentinel when the context does not contain an answer.
const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on the \
provided context. If you cannot find a clear answer in the context, respond with \
\"Data Not Available\". Provide direct, concise answers without additional explanation.";

/// An [`AnswerGenerator`] backed by the OpenAI chat completions API.
///
/// Requests use temperature 0 for reproducible answers and a small
/// `max_tokens` cap, since answers are expected to be short and direct.
/// The model output is trimmed of surrounding whitespace before the sentinel
/// comparison happens downstream.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_qa::openai::OpenAIAnswerGenerator;
///
/// let answerer = OpenAIAnswerGenerator::from_env()?;
/// let answer = answerer.generate("What is the deadline?", &context).await?;
/// ```
pub struct OpenAIAnswerGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAIAnswerGenerator {
    /// Create a new generator with the given API key and the default model.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Answer`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(provider_error("API key must not be empty"));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
        })
    }

    /// Create a new generator from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| provider_error("OPENAI_API_KEY environment variable not set"))?;
        Self::new(api_key)
    }

    /// Set the model name (e.g. `gpt-4o`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<serde_json::Value>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn provider_error(message: impl Into<String>) -> QaError {
    QaError::Answer {
        provider: "OpenAI".into(),
        message: message.into(),
    }
}

#[async_trait]
impl AnswerGenerator for OpenAIAnswerGenerator {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, question: &str, context: &str) -> Result<String> {
        debug!(model = %self.model, context_len = context.len(), "generating answer via OpenAI");

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                json!({ "role": "system", "content": SYSTEM_PROMPT }),
                json!({
                    "role": "user",
                    "content": format!("Context: {context}\n\nQuestion: {question}"),
                }),
            ],
            temperature: 0.0,
            max_tokens: MAX_ANSWER_TOKENS,
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "chat completion request failed");
                provider_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(%status, "OpenAI chat completions API error");
            return Err(provider_error(format!("API returned {status}: {detail}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("failed to parse response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| provider_error("API returned no choices"))?;

        Ok(content.trim().to_string())
    }
}
