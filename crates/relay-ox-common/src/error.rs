use thiserror::Error;

/// Common errors that can occur in relay-ox HTTP requests
#[derive(Error, Debug)]
pub enum CommonRequestError {
    /// HTTP request failed (connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-success status and a structured error body
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        r#type: Option<String>,
    },

    /// The API answered with something we could not interpret
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),
}

impl CommonRequestError {
    /// HTTP status reported by the API, when the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) | Self::UnexpectedResponse(_) => None,
        }
    }

    /// Whether the API rejected the request for exceeding a quota or rate limit
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Parse error response from HTTP status and body
pub fn parse_error_response(status: reqwest::StatusCode, body: &bytes::Bytes) -> CommonRequestError {
    if let Ok(json_value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(error_message) = extract_error_message(&json_value) {
            let error_obj = json_value.get("error");
            return CommonRequestError::Api {
                status: status.as_u16(),
                code: error_obj
                    .and_then(|e| e.get("code"))
                    .and_then(json_scalar_to_string),
                message: error_message,
                r#type: error_obj
                    .and_then(|e| e.get("type"))
                    .and_then(|t| t.as_str())
                    .map(str::to_string),
            };
        }
    }

    CommonRequestError::UnexpectedResponse(format!(
        "HTTP status {}: {}",
        status.as_u16(),
        String::from_utf8_lossy(body)
    ))
}

/// Extract error message from the JSON error formats we talk to
fn extract_error_message(json: &serde_json::Value) -> Option<String> {
    // OpenAI/Azure format: {"error": {"code": "...", "message": "..."}}
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    // Telegram format: {"ok": false, "description": "..."}
    if let Some(description) = json.get("description").and_then(|d| d.as_str()) {
        return Some(description.to_string());
    }

    // Generic message field
    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Azure returns string codes, Telegram numeric ones
fn json_scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
