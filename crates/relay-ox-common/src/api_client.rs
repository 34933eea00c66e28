use std::fmt;

use reqwest::{Method, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{CommonRequestError, parse_error_response};

/// Key carried in a named header on every request of an [`ApiClient`],
/// e.g. Azure's `api-key`
#[derive(Clone)]
pub struct Credential {
    pub header: &'static str,
    pub value: String,
}

impl Credential {
    pub fn header(header: &'static str, value: impl Into<String>) -> Self {
        Self {
            header,
            value: value.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("header", &self.header)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// One API operation: HTTP method, path below the base URL and query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Base URL, credential and user agent shared by every call to one API
///
/// The base URL may itself carry a secret (Telegram puts the bot token in the
/// path), so neither it nor the credential shows up in `Debug` output.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credential: Option<Credential>,
    user_agent: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("credential", &self.credential)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http,
            base_url,
            credential: None,
            user_agent: None,
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Absolute URL of `endpoint`, without its query string
    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}/{}",
            self.base_url,
            endpoint.path.trim_start_matches('/')
        )
    }

    /// Request for `endpoint` with credential, user agent and query applied
    pub fn request(&self, endpoint: &Endpoint) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .request(endpoint.method.clone(), self.url(endpoint));

        if !endpoint.query.is_empty() {
            req = req.query(&endpoint.query);
        }
        if let Some(credential) = &self.credential {
            req = req.header(credential.header, &credential.value);
        }
        if let Some(user_agent) = &self.user_agent {
            req = req.header(reqwest::header::USER_AGENT, user_agent);
        }

        req
    }

    /// Send `body` as JSON and decode the JSON answer
    pub async fn send_json<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, CommonRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(body)?;
        tracing::trace!(path = %endpoint.path, %payload, "sending JSON request");

        let res = self.request(endpoint).json(&payload).send().await?;
        decode_response(res).await
    }
}

/// Decode a 2xx response as `T`; any other status becomes an API error
async fn decode_response<T>(res: Response) -> Result<T, CommonRequestError>
where
    T: DeserializeOwned,
{
    let status = res.status();
    let body = res.bytes().await?;

    if !status.is_success() {
        return Err(parse_error_response(status, &body));
    }

    serde_json::from_slice(&body).map_err(|e| {
        CommonRequestError::UnexpectedResponse(format!(
            "HTTP {} with undecodable body ({e}): {}",
            status.as_u16(),
            String::from_utf8_lossy(&body)
        ))
    })
}
