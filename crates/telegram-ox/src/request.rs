use bon::Builder;
use serde::{Deserialize, Serialize};

/// Parameters of `getUpdates`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct GetUpdatesRequest {
    /// Update kinds to receive
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(field)]
    pub allowed_updates: Option<Vec<String>>,

    /// First update to return; acknowledges every update before it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Long polling timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

impl<S: get_updates_request_builder::State> GetUpdatesRequestBuilder<S> {
    /// Receive updates of the given kind
    pub fn allow(mut self, kind: impl Into<String>) -> Self {
        self.allowed_updates
            .get_or_insert_with(Vec::new)
            .push(kind.into());
        self
    }
}

/// Parameters of `sendMessage`
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
pub struct SendMessageRequest {
    pub chat_id: i64,

    #[builder(into)]
    pub text: String,
}

/// Parameters of `deleteWebhook`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}
