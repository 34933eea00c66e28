// OpenAI-format chat message types shared by the completion client and the relay

use serde::{Deserialize, Serialize};

/// Core message roles of the OpenAI chat format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Chat message as sent to and returned by OpenAI-format endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    /// Absent on assistant messages that only carry tool calls or were filtered
    #[serde(default)]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            name: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content)
    }

    /// Content, treating an empty string the same as a missing one
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_role_lowercase_and_skips_name() {
        let json = serde_json::to_value(Message::system("be brief")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "role": "system", "content": "be brief" })
        );
    }

    #[test]
    fn null_or_empty_content_has_no_text() {
        let null: Message =
            serde_json::from_str(r#"{"role":"assistant","content":null}"#).unwrap();
        let empty: Message = serde_json::from_str(r#"{"role":"assistant","content":""}"#).unwrap();
        let missing: Message = serde_json::from_str(r#"{"role":"assistant"}"#).unwrap();

        assert_eq!(null.text(), None);
        assert_eq!(empty.text(), None);
        assert_eq!(missing.text(), None);
        assert_eq!(Message::assistant("hola").text(), Some("hola"));
    }
}
