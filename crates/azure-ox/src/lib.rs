//! Azure OpenAI chat completions client for Rust
//!
//! Azure hosts OpenAI models behind per-resource endpoints. A request names a
//! *deployment* in the URL path, pins an `api-version` query parameter and
//! authenticates with an `api-key` header instead of a bearer token. The body
//! and response follow the regular OpenAI chat completions format.
//!
//! # Example
//!
//! ```rust,no_run
//! use azure_ox::AzureOpenAI;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AzureOpenAI::new(
//!         "https://my-resource.openai.azure.com",
//!         "your-api-key",
//!         "gpt-4o",
//!         "2024-06-01",
//!     );
//!
//!     let request = client
//!         .chat()
//!         .system_message("Answer briefly.")
//!         .user_message("What is Azure Blob Storage?")
//!         .max_tokens(1000)
//!         .build();
//!
//!     let response = client.send(&request).await?;
//!     println!("{}", response.content().unwrap_or("No content"));
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
mod internal;
pub mod request;
pub mod response;
pub mod usage;

pub use client::AzureOpenAI;
pub use error::AzureOpenAIError;
pub use request::ChatRequest;
pub use response::{ChatResponse, Choice};
pub use usage::Usage;

// Re-export shared types from relay-ox-common
pub use relay_ox_common::openai_format::{Message, MessageRole};
