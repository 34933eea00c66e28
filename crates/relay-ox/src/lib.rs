#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::unwrap_used)]

//! Telegram bot relaying chat messages to an Azure OpenAI deployment
//!
//! Every text message a user sends the bot is wrapped in a fixed system
//! instruction, forwarded to the chat-completions deployment, and the first
//! candidate of the answer is sent back. `/start` and `/help` get fixed texts.
//!
//! - [`config`]: environment configuration and startup validation
//! - [`relay`]: the completion relay
//! - [`handler`]: command routing
//! - [`dispatcher`]: long polling and per-update tasks
//! - [`startup`]: `.env` loading and client wiring

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod relay;
pub mod replies;
pub mod startup;
pub mod telemetry;

pub use config::{Config, ConfigError, GenerationSettings, LogSettings};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use handler::{Bridge, Command, IncomingMessage};
pub use relay::{CompletionClient, CompletionRelay, RelayOutcome};
