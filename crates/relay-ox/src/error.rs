use telegram_ox::TelegramRequestError;
use thiserror::Error;

/// Failures that stop the polling dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    /// `getMe` failed, so the bot cannot start
    #[error("failed to fetch bot identity")]
    Identity(#[source] TelegramRequestError),

    /// A webhook is set and could not be removed
    #[error("failed to remove webhook before polling")]
    Webhook(#[source] TelegramRequestError),

    /// The token was revoked while polling
    #[error("bot token rejected while polling for updates")]
    Unauthorized(#[source] TelegramRequestError),
}
