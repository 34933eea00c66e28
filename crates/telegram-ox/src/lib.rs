//! Telegram Bot API client for Rust
//!
//! A small client for bots that receive updates by long polling:
//! - Bot identity (`getMe`)
//! - Webhook removal so polling is allowed (`deleteWebhook`)
//! - Long polling (`getUpdates`)
//! - Text replies (`sendMessage`), split to fit Telegram's message size limit
//!
//! # Example
//!
//! ```rust,no_run
//! use telegram_ox::{GetUpdatesRequest, Telegram};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot = Telegram::new("123456:ABC-DEF");
//!
//!     let updates = bot
//!         .get_updates(&GetUpdatesRequest::builder().timeout(30).build())
//!         .await?;
//!     for update in updates {
//!         if let Some(message) = update.message {
//!             bot.send_text(message.chat.id, "pong").await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
mod internal;
pub mod request;
pub mod text;
pub mod types;

pub use client::Telegram;
pub use error::TelegramRequestError;
pub use request::{DeleteWebhookRequest, GetUpdatesRequest, SendMessageRequest};
pub use text::{MAX_MESSAGE_LENGTH, split_text};
pub use types::{Chat, ChatKind, Message, ResponseParameters, Update, UpdateKind, User};
