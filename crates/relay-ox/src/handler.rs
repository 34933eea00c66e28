//! Routing of incoming chat messages to fixed replies or the completion relay.

use strum::Display;
use telegram_ox::Message;
use tracing::{debug, info};

use crate::relay::CompletionRelay;
use crate::replies::{HELP_REPLY, START_REPLY};

/// The parts of a Telegram text message the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub sender_id: Option<i64>,
    pub sender_name: String,
    pub text: String,
}

impl IncomingMessage {
    /// `None` for messages without text (photos, stickers, service messages).
    pub fn from_message(message: &Message) -> Option<Self> {
        let text = message.text.clone()?;
        let (sender_id, sender_name) = match &message.from {
            Some(user) => (Some(user.id), user.first_name.clone()),
            None => (None, message.chat.title.clone().unwrap_or_default()),
        };

        Some(Self {
            chat_id: message.chat.id,
            sender_id,
            sender_name,
            text,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Start,
    Help,
}

impl Command {
    pub fn reply(self) -> &'static str {
        match self {
            Self::Start => START_REPLY,
            Self::Help => HELP_REPLY,
        }
    }
}

/// Where a message text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Command(Command),
    /// A command addressed to some other bot.
    Ignore,
    Relay(&'a str),
}

/// Decide how to answer `text`. Unknown commands are relayed like plain text;
/// `/cmd@name` only counts when `name` is this bot (ASCII case-insensitive).
pub fn route<'a>(text: &'a str, bot_username: &str) -> Route<'a> {
    let Some(rest) = text.strip_prefix('/') else {
        return Route::Relay(text);
    };

    let word = rest.split_whitespace().next().unwrap_or_default();
    let name = match word.split_once('@') {
        Some((name, target)) if target.eq_ignore_ascii_case(bot_username) => name,
        Some(_) => return Route::Ignore,
        None => word,
    };

    match name {
        "start" => Route::Command(Command::Start),
        "help" => Route::Command(Command::Help),
        _ => Route::Relay(text),
    }
}

/// Turns an incoming message into the reply the bot sends back.
#[derive(Clone)]
pub struct Bridge {
    relay: CompletionRelay,
    bot_username: String,
}

impl Bridge {
    pub fn new(relay: CompletionRelay, bot_username: impl Into<String>) -> Self {
        Self {
            relay,
            bot_username: bot_username.into(),
        }
    }

    /// Reply for `message`, or `None` when the bot stays silent.
    pub async fn respond(&self, message: &IncomingMessage) -> Option<String> {
        match route(&message.text, &self.bot_username) {
            Route::Command(command) => {
                debug!(chat_id = message.chat_id, %command, "command received");
                Some(command.reply().to_string())
            }
            Route::Ignore => {
                debug!(
                    chat_id = message.chat_id,
                    text = %message.text,
                    "ignoring command addressed to another bot"
                );
                None
            }
            Route::Relay(text) => {
                info!(
                    sender = %message.sender_name,
                    sender_id = ?message.sender_id,
                    chat_id = message.chat_id,
                    "message received"
                );
                Some(self.relay.reply(text).await)
            }
        }
    }
}
