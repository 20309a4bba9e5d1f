//! `generateContent` request payload.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::response::null_as_default;

/// Author of a [`Content`] turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerationRequest {
    /// Single user turn with search grounding enabled.
    pub fn grounded(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            tools: vec![Tool::google_search()],
        }
    }
}

/// One conversation turn: a role tag and its ordered text fragments.
///
/// Shared by requests and by `candidates[].content` in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User.to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Parsed role, if present and recognised.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Capability flags sent alongside the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    /// Enables Google Search grounding.
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

/// Serializes as `{}`; its presence is the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleSearch {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn grounded_request_matches_wire_shape() {
        let request = GenerationRequest::grounded("tell me todays temperature in singapore");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [{"text": "tell me todays temperature in singapore"}]
                }],
                "tools": [{"google_search": {}}]
            })
        );
    }

    #[test]
    fn role_parses_known_values_only() {
        let mut content = Content::user("hi");
        assert_eq!(content.role(), Some(Role::User));

        content.role = Some("model".to_string());
        assert_eq!(content.role(), Some(Role::Model));

        content.role = Some("function".to_string());
        assert_eq!(content.role(), None);
    }
}
