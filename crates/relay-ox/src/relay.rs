//! Completion relay: one user text in, one reply text out.

use std::sync::Arc;

use async_trait::async_trait;
use azure_ox::{AzureOpenAI, AzureOpenAIError, ChatRequest, ChatResponse};
use tracing::{debug, error, warn};

use crate::config::GenerationSettings;
use crate::replies::{NO_ANSWER_REPLY, SERVICE_UNAVAILABLE_REPLY};

/// Anything that can answer a chat completion request.
///
/// [`AzureOpenAI`] is the production implementation; tests substitute stubs.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AzureOpenAIError>;
}

#[async_trait]
impl CompletionClient for AzureOpenAI {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AzureOpenAIError> {
        self.send(request).await
    }
}

/// Result of relaying one message.
#[derive(Debug)]
pub enum RelayOutcome {
    /// First candidate's text, verbatim.
    Answer(String),
    /// The call succeeded but no candidate carried text.
    NoAnswer { response_id: String, choices: usize },
    /// The call itself failed.
    ServiceUnavailable(AzureOpenAIError),
}

impl RelayOutcome {
    /// Text to show the user. Never empty, never carries error details.
    pub fn into_reply(self) -> String {
        match self {
            Self::Answer(text) => text,
            Self::NoAnswer { .. } => NO_ANSWER_REPLY.to_string(),
            Self::ServiceUnavailable(_) => SERVICE_UNAVAILABLE_REPLY.to_string(),
        }
    }
}

/// Wraps a user message in the fixed prompt and forwards it to the completion API.
#[derive(Clone)]
pub struct CompletionRelay {
    client: Arc<dyn CompletionClient>,
    model: String,
    generation: GenerationSettings,
}

impl CompletionRelay {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        model: impl Into<String>,
        generation: GenerationSettings,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            generation,
        }
    }

    /// The two-message request sent for `user_text`.
    pub fn build_request(&self, user_text: &str) -> ChatRequest {
        ChatRequest::builder()
            .model(self.model.as_str())
            .system_message(self.generation.system_prompt.as_str())
            .user_message(user_text)
            .max_tokens(self.generation.max_tokens)
            .temperature(self.generation.temperature)
            .top_p(self.generation.top_p)
            .build()
    }

    pub async fn relay(&self, user_text: &str) -> RelayOutcome {
        let request = self.build_request(user_text);

        match self.client.complete(&request).await {
            Ok(response) => match response.content() {
                Some(text) => {
                    debug!(
                        response_id = %response.id,
                        finish_reason = ?response.finish_reason(),
                        total_tokens = response.usage.map(|u| u.total_tokens),
                        "completion received"
                    );
                    RelayOutcome::Answer(text.to_string())
                }
                None => {
                    warn!(
                        response_id = %response.id,
                        choices = response.choices.len(),
                        finish_reason = ?response.finish_reason(),
                        filtered = response.is_filtered(),
                        "completion API returned no usable answer"
                    );
                    RelayOutcome::NoAnswer {
                        response_id: response.id,
                        choices: response.choices.len(),
                    }
                }
            },
            Err(e) => {
                error!(
                    error = %e,
                    details = ?e,
                    rate_limited = e.is_rate_limited(),
                    "completion request failed"
                );
                RelayOutcome::ServiceUnavailable(e)
            }
        }
    }

    /// [`relay`](Self::relay) collapsed to the text sent back to the user.
    pub async fn reply(&self, user_text: &str) -> String {
        self.relay(user_text).await.into_reply()
    }
}
