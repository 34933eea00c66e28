#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared HTTP client abstractions for the relay-ox API clients
//!
//! Both remote services the bridge talks to (the Azure OpenAI deployment and the
//! Telegram Bot API) are JSON-over-HTTPS APIs. This crate holds the request
//! plumbing they share so each client crate only describes its endpoints.

pub mod api_client;
pub mod error;
pub mod openai_format;

pub use api_client::{ApiClient, Credential, Endpoint};
pub use error::CommonRequestError;
pub use openai_format::*;
