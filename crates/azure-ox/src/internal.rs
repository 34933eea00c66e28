use relay_ox_common::{ApiClient, Credential, Endpoint};

use crate::{AzureOpenAIError, ChatRequest, ChatResponse};

const API_KEY_HEADER: &str = "api-key";

/// Routes calls to one deployment of an Azure OpenAI resource
pub(crate) struct DeploymentApi {
    api: ApiClient,
    deployment: String,
    api_version: String,
}

impl DeploymentApi {
    pub(crate) fn new(
        http: reqwest::Client,
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        api_version: &str,
    ) -> Self {
        let api = ApiClient::new(http, endpoint)
            .with_credential(Credential::header(API_KEY_HEADER, api_key))
            .with_user_agent(concat!("azure-ox/", env!("CARGO_PKG_VERSION")));

        Self {
            api,
            deployment: deployment.to_string(),
            api_version: api_version.to_string(),
        }
    }

    /// `openai/deployments/{deployment}/{operation}?api-version=…`
    fn operation(&self, operation: &str) -> Endpoint {
        Endpoint::post(format!(
            "openai/deployments/{}/{operation}",
            self.deployment
        ))
        .query("api-version", &self.api_version)
    }

    pub(crate) async fn chat_completions(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, AzureOpenAIError> {
        let endpoint = self.operation("chat/completions");
        Ok(self.api.send_json(&endpoint, request).await?)
    }
}
