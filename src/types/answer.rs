//! Caller-facing result of a grounded generation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::response::WebSource;

/// A web source cited by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl Citation {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            uri: Some(uri.into()),
        }
    }
}

impl From<&WebSource> for Citation {
    fn from(source: &WebSource) -> Self {
        Self {
            title: source.title.clone(),
            uri: source.uri.clone(),
        }
    }
}

/// Answer text plus the sources that grounded it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub text: String,
    pub citations: Vec<Citation>,
    /// Search queries the model issued, when reported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_queries: Vec<String>,
}

impl fmt::Display for GeneratedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Outcome of a successful round trip.
///
/// `NoAnswer` means the API answered but produced no usable candidate. It is
/// not an error and callers should report it differently from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Answer(GeneratedAnswer),
    NoAnswer,
}

impl Generation {
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }

    pub fn answer(&self) -> Option<&GeneratedAnswer> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::NoAnswer => None,
        }
    }

    pub fn into_answer(self) -> Option<GeneratedAnswer> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::NoAnswer => None,
        }
    }
}
