use std::time::Duration;

use relay_ox_common::{ApiClient, Endpoint};
use serde::{Serialize, de::DeserializeOwned};

use crate::{TelegramRequestError, types::ApiResponse};

/// Bot API method calls for one bot token
pub(crate) struct TelegramRequestHelper {
    api: ApiClient,
}

impl TelegramRequestHelper {
    pub(crate) fn new(client: reqwest::Client, base_url: &str, token: &str) -> Self {
        // Bot API methods live under /bot<token>/<method>.
        let api = ApiClient::new(client, format!("{}/bot{token}", base_url.trim_end_matches('/')))
            .with_user_agent(concat!("telegram-ox/", env!("CARGO_PKG_VERSION")));

        Self { api }
    }

    /// Call a Bot API method and unwrap its `{ ok, result }` envelope.
    ///
    /// Telegram reports failures with a non-2xx status *and* an `ok: false`
    /// envelope, so the body is decoded regardless of the status code.
    pub(crate) async fn call<T, B>(
        &self,
        method: &'static str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut req = self.api.request(&Endpoint::post(method)).json(body);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let res = req.send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            relay_ox_common::CommonRequestError::UnexpectedResponse(format!(
                "{method}: HTTP {} but failed to decode envelope: {e}; body: {}",
                status.as_u16(),
                String::from_utf8_lossy(&bytes)
            ))
        })?;

        if envelope.ok {
            envelope
                .result
                .ok_or(TelegramRequestError::MissingResult(method))
        } else {
            Err(TelegramRequestError::Api {
                code: envelope
                    .error_code
                    .unwrap_or_else(|| i32::from(status.as_u16())),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
                retry_after: envelope.parameters.and_then(|p| p.retry_after),
            })
        }
    }
}
