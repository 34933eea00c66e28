use relay_ox_common::CommonRequestError;
use thiserror::Error;

/// Errors that can occur when talking to an Azure OpenAI deployment
#[derive(Debug, Error)]
pub enum AzureOpenAIError {
    /// Transport, HTTP status or decoding failure of a request
    #[error(transparent)]
    Request(#[from] CommonRequestError),
}

impl AzureOpenAIError {
    /// Whether the deployment rejected the call for exceeding its quota
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_rate_limited())
    }
}
