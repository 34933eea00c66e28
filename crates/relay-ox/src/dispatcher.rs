//! Long-polling loop feeding Telegram updates to the [`Bridge`].

use std::sync::Arc;
use std::time::Duration;

use telegram_ox::{DeleteWebhookRequest, GetUpdatesRequest, Telegram, Update};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::error::DispatchError;
use crate::handler::{Bridge, IncomingMessage};
use crate::relay::CompletionRelay;
use crate::replies::UNEXPECTED_ERROR_REPLY;

const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;
const DEFAULT_ERROR_PAUSE: Duration = Duration::from_secs(5);

/// Receives updates by long polling and answers each one in its own task.
pub struct Dispatcher {
    bot: Telegram,
    relay: CompletionRelay,
    poll_timeout: u32,
    error_pause: Duration,
}

impl Dispatcher {
    pub fn new(bot: Telegram, relay: CompletionRelay) -> Self {
        Self {
            bot,
            relay,
            poll_timeout: DEFAULT_POLL_TIMEOUT_SECS,
            error_pause: DEFAULT_ERROR_PAUSE,
        }
    }

    /// Server-side `getUpdates` timeout in seconds; `0` means short polling.
    pub fn with_poll_timeout(mut self, secs: u32) -> Self {
        self.poll_timeout = secs;
        self
    }

    /// Wait after a failed `getUpdates` before polling again.
    pub fn with_error_pause(mut self, pause: Duration) -> Self {
        self.error_pause = pause;
        self
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// Fails only when the bot cannot start or its token is rejected;
    /// every other polling error is logged and retried.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), DispatchError> {
        let Self {
            bot,
            relay,
            poll_timeout,
            error_pause,
        } = self;

        let me = bot.get_me().await.map_err(DispatchError::Identity)?;
        let username = me.username.clone().unwrap_or_default();
        bot.delete_webhook(&DeleteWebhookRequest {
            drop_pending_updates: Some(false),
        })
        .await
        .map_err(DispatchError::Webhook)?;
        info!(bot_id = me.id, %username, "bot started, polling for updates");

        let bridge = Arc::new(Bridge::new(relay, username));
        let mut tasks = JoinSet::new();
        let mut offset: Option<i64> = None;

        loop {
            reap(&mut tasks);

            let request = GetUpdatesRequest::builder()
                .maybe_offset(offset)
                .timeout(poll_timeout)
                .allow("message")
                .build();

            let result = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = bot.get_updates(&request) => result,
            };

            match result {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let span = info_span!("update", update_id = update.update_id);
                        tasks.spawn(
                            handle_update(bot.clone(), bridge.clone(), update).instrument(span),
                        );
                    }
                }
                Err(e) if e.is_unauthorized() => {
                    error!(error = %e, "bot token rejected, stopping");
                    return Err(DispatchError::Unauthorized(e));
                }
                Err(e) => {
                    error!(error = %e, retry_in = ?error_pause, "failed to fetch updates");
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(error_pause) => {}
                    }
                }
            }
        }

        reap(&mut tasks);
        info!(in_flight = tasks.len(), "shutting down, abandoning in-flight updates");
        tasks.detach_all();
        Ok(())
    }
}

fn reap(tasks: &mut JoinSet<()>) {
    while let Some(result) = tasks.try_join_next() {
        if let Err(e) = result {
            error!(error = %e, "update handler panicked");
        }
    }
}

async fn handle_update(bot: Telegram, bridge: Arc<Bridge>, update: Update) {
    let kind = update.kind();
    let Some(message) = update
        .message
        .as_ref()
        .and_then(IncomingMessage::from_message)
    else {
        debug!(%kind, "skipping update without a text message");
        return;
    };

    let Some(reply) = bridge.respond(&message).await else {
        return;
    };

    if let Err(e) = bot.send_text(message.chat_id, &reply).await {
        error!(
            update_id = update.update_id,
            %kind,
            chat_id = message.chat_id,
            error = %e,
            "failed to deliver reply"
        );
        if e.is_chat_unreachable() {
            warn!(chat_id = message.chat_id, "chat unreachable, skipping error notice");
            return;
        }
        if let Err(notice_error) = bot.send_text(message.chat_id, UNEXPECTED_ERROR_REPLY).await {
            debug!(
                chat_id = message.chat_id,
                error = %notice_error,
                "could not deliver error notice"
            );
        }
    }
}
