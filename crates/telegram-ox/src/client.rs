use std::time::Duration;

use crate::{
    DeleteWebhookRequest, GetUpdatesRequest, Message, SendMessageRequest, TelegramRequestError,
    Update, User, internal::TelegramRequestHelper, split_text, text::MAX_MESSAGE_LENGTH,
};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Environment variable holding the bot token
pub const TOKEN_ENV: &str = "BOT_TOKEN";

/// Extra time granted to a long poll beyond its server-side timeout
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram Bot API client
#[derive(Clone)]
pub struct Telegram {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for Telegram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telegram")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Telegram {
    /// Create a new client for the bot with the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at another Bot API server (local server, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_helper(&self) -> TelegramRequestHelper {
        TelegramRequestHelper::new(self.client.clone(), &self.base_url, &self.token)
    }

    /// Identity of the bot owning the token
    pub async fn get_me(&self) -> Result<User, TelegramRequestError> {
        self.request_helper()
            .call("getMe", &serde_json::json!({}), None)
            .await
    }

    /// Remove any webhook so `getUpdates` may be used
    pub async fn delete_webhook(
        &self,
        request: &DeleteWebhookRequest,
    ) -> Result<bool, TelegramRequestError> {
        self.request_helper()
            .call("deleteWebhook", request, None)
            .await
    }

    /// Long-poll for new updates
    pub async fn get_updates(
        &self,
        request: &GetUpdatesRequest,
    ) -> Result<Vec<Update>, TelegramRequestError> {
        let timeout = request
            .timeout
            .map(|secs| Duration::from_secs(u64::from(secs)) + POLL_GRACE);

        self.request_helper()
            .call("getUpdates", request, timeout)
            .await
    }

    /// Send a single text message
    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<Message, TelegramRequestError> {
        self.request_helper()
            .call("sendMessage", request, None)
            .await
    }

    /// Send `text` to a chat, split over several messages when it exceeds
    /// Telegram's length limit. Stops at the first piece that fails.
    pub async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
    ) -> Result<Vec<Message>, TelegramRequestError> {
        let pieces = split_text(text, MAX_MESSAGE_LENGTH);
        if pieces.len() > 1 {
            tracing::debug!(chat_id, pieces = pieces.len(), "splitting long reply");
        }

        let mut sent = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let request = SendMessageRequest::builder()
                .chat_id(chat_id)
                .text(piece)
                .build();
            sent.push(self.send_message(&request).await?);
        }
        Ok(sent)
    }
}
