use bon::Builder;
use std::time::Duration;

use crate::{AzureOpenAIError, ChatRequest, ChatResponse, internal::DeploymentApi};

/// Environment variables that name an Azure OpenAI resource and deployment
pub const ENDPOINT_ENV: &str = "AZURE_OPENAI_ENDPOINT";
pub const API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";
pub const DEPLOYMENT_ENV: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
pub const API_VERSION_ENV: &str = "AZURE_OPENAI_API_VERSION";

/// Same ceiling the official OpenAI SDKs apply to a single request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Azure OpenAI API client bound to one deployment
#[derive(Clone, Builder)]
pub struct AzureOpenAI {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    #[builder(into)]
    endpoint: String,

    /// API key for authentication
    #[builder(into)]
    api_key: String,

    /// Deployment name; also sent as the `model` of each request
    #[builder(into)]
    deployment: String,

    /// Value of the `api-version` query parameter
    #[builder(into)]
    api_version: String,

    /// HTTP client for making requests
    #[builder(default = default_http_client())]
    client: reqwest::Client,
}

impl std::fmt::Debug for AzureOpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAI")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .unwrap_or_default()
}

impl AzureOpenAI {
    /// Create a new client for the given resource endpoint and deployment
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment: deployment.into(),
            api_version: api_version.into(),
            client: default_http_client(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    fn deployment_api(&self) -> DeploymentApi {
        DeploymentApi::new(
            self.client.clone(),
            &self.endpoint,
            &self.api_key,
            &self.deployment,
            &self.api_version,
        )
    }

    /// Chat request builder with `model` already set to the deployment
    pub fn chat(
        &self,
    ) -> crate::request::ChatRequestBuilder<crate::request::chat_request_builder::SetModel> {
        ChatRequest::builder().model(self.deployment.as_str())
    }

    /// Send a chat request and get a response
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, AzureOpenAIError> {
        self.deployment_api().chat_completions(request).await
    }
}
