use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{Message, MessageRole};

/// Body of a deployment's `chat/completions` call
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct ChatRequest {
    /// Conversation, oldest message first
    #[builder(field)]
    pub messages: Vec<Message>,

    /// Azure routes by deployment; the service only echoes this back
    #[builder(into)]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// 0.0 to 2.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling mass, in (0.0, 1.0]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl<S: chat_request_builder::State> ChatRequestBuilder<S> {
    fn push(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: Some(content.into()),
            name: None,
        });
        self
    }

    pub fn system_message(self, content: impl Into<String>) -> Self {
        self.push(MessageRole::System, content)
    }

    pub fn user_message(self, content: impl Into<String>) -> Self {
        self.push(MessageRole::User, content)
    }

    pub fn assistant_message(self, content: impl Into<String>) -> Self {
        self.push(MessageRole::Assistant, content)
    }
}
