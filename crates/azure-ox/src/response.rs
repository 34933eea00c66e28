use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Message, MessageRole, Usage};

/// Answer of a `chat/completions` call
///
/// Decoding never fails on shape: a field that is missing, `null` or of the
/// wrong type falls back to its default. Azure omits `choices` entirely when
/// the prompt itself trips the content filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    #[serde(deserialize_with = "or_default")]
    pub id: String,
    /// `"chat.completion"`
    #[serde(deserialize_with = "or_default")]
    pub object: String,
    /// Unix seconds
    #[serde(deserialize_with = "or_default")]
    pub created: u64,
    /// Underlying model version serving the deployment
    #[serde(deserialize_with = "or_default")]
    pub model: String,
    /// Candidates, in `index` order
    #[serde(deserialize_with = "choices")]
    pub choices: Vec<Choice>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "or_default"
    )]
    pub usage: Option<Usage>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "or_default"
    )]
    pub system_fingerprint: Option<String>,
    /// Content-filter verdicts on the prompt, one entry per prompt index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_filter_results: Option<serde_json::Value>,
}

/// One candidate completion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Choice {
    #[serde(deserialize_with = "or_default")]
    pub index: u32,
    /// Missing when the completion was filtered
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "message"
    )]
    pub message: Option<Message>,
    /// `stop`, `length`, `content_filter`, …
    #[serde(deserialize_with = "or_default")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_filter_results: Option<serde_json::Value>,
}

const CONTENT_FILTER: &str = "content_filter";

/// Decode `T`, or `T::default()` when the value is `null` or has another shape
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Candidates keep their position; one that cannot be read becomes an empty choice
fn choices<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Response messages default to the assistant role; non-string content is dropped
fn message<'de, D>(deserializer: D) -> Result<Option<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }

    let role = value
        .get("role")
        .and_then(|role| MessageRole::deserialize(role).ok())
        .unwrap_or(MessageRole::Assistant);
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(Some(Message {
        role,
        content: text("content"),
        name: text("name"),
    }))
}

impl Choice {
    /// Non-empty text of this candidate
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref()?.text()
    }

    /// Whether Azure's content filter cut this candidate
    pub fn is_filtered(&self) -> bool {
        self.finish_reason.as_deref() == Some(CONTENT_FILTER)
    }
}

impl ChatResponse {
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Text of the first candidate; `None` when there is no candidate or it
    /// carries no (or empty) text
    pub fn content(&self) -> Option<&str> {
        self.first_choice()?.text()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.first_choice()?.finish_reason.as_deref()
    }

    /// Whether the content filter cut the first candidate
    pub fn is_filtered(&self) -> bool {
        self.first_choice().is_some_and(Choice::is_filtered)
    }
}
