use relay_ox_common::CommonRequestError;
use thiserror::Error;

/// Errors that can occur when calling the Telegram Bot API
#[derive(Debug, Error)]
pub enum TelegramRequestError {
    /// Transport or decoding failure
    #[error(transparent)]
    Request(#[from] CommonRequestError),

    /// The Bot API answered `ok: false`
    #[error("Telegram API error {code}: {description}")]
    Api {
        code: i32,
        description: String,
        /// Seconds to wait before repeating a flood-limited request
        retry_after: Option<u64>,
    },

    /// The envelope said `ok: true` but carried no result
    #[error("Telegram API returned no result for {0}")]
    MissingResult(&'static str),
}

impl From<reqwest::Error> for TelegramRequestError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        Self::Request(CommonRequestError::Http(error.without_url()))
    }
}

impl From<serde_json::Error> for TelegramRequestError {
    fn from(error: serde_json::Error) -> Self {
        Self::Request(CommonRequestError::Json(error))
    }
}

impl TelegramRequestError {
    /// Whether the token was rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { code: 401, .. })
    }

    /// Whether the target chat can no longer receive messages from the bot:
    /// the user blocked it, it was removed from the group, or the chat is gone
    pub fn is_chat_unreachable(&self) -> bool {
        match self {
            Self::Api { code: 403, .. } => true,
            Self::Api {
                code: 400,
                description,
                ..
            } => description.to_ascii_lowercase().contains("chat not found"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: i32, description: &str) -> TelegramRequestError {
        TelegramRequestError::Api {
            code,
            description: description.to_string(),
            retry_after: None,
        }
    }

    #[test]
    fn blocked_or_missing_chat_is_unreachable() {
        assert!(api(403, "Forbidden: bot was blocked by the user").is_chat_unreachable());
        assert!(api(403, "Forbidden: bot was kicked from the group chat").is_chat_unreachable());
        assert!(api(400, "Bad Request: chat not found").is_chat_unreachable());
    }

    #[test]
    fn other_failures_leave_the_chat_reachable() {
        assert!(!api(400, "Bad Request: message text is empty").is_chat_unreachable());
        assert!(!api(429, "Too Many Requests: retry after 3").is_chat_unreachable());
        assert!(!api(401, "Unauthorized").is_chat_unreachable());
        assert!(!TelegramRequestError::MissingResult("sendMessage").is_chat_unreachable());
    }
}
