//! `generateContent` response payload.
//!
//! Every field is optional on the wire. `null` is treated the same as an
//! absent field. Multi-word keys are declared in lowercase for deserialization
//! because [`crate::generation::parse_response`] folds key case before
//! decoding; the camelCase spelling is accepted as an alias.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use super::request::Content;

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a list, treating a `null` list as empty and dropping `null`
/// entries.
pub(crate) fn skip_null_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.into_iter().flatten().collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default, deserialize_with = "skip_null_entries")]
    pub candidates: Vec<Candidate>,
}

/// One generated completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename(serialize = "groundingMetadata", deserialize = "groundingmetadata"),
        alias = "groundingMetadata"
    )]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename(serialize = "finishReason", deserialize = "finishreason"),
        alias = "finishReason"
    )]
    pub finish_reason: Option<String>,
}

impl Candidate {
    /// Parsed finish reason, if present and recognised.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
            .as_deref()
            .and_then(|r| r.parse().ok())
    }

    /// Content parts, empty when the candidate carries no content.
    pub fn parts(&self) -> &[super::request::Part] {
        self.content
            .as_ref()
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
}

/// Sources the model consulted while answering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingMetadata {
    #[serde(
        default,
        deserialize_with = "skip_null_entries",
        skip_serializing_if = "Vec::is_empty",
        rename(serialize = "groundingAttributions", deserialize = "groundingattributions"),
        alias = "groundingAttributions"
    )]
    pub grounding_attributions: Vec<GroundingAttribution>,
    #[serde(
        default,
        deserialize_with = "skip_null_entries",
        skip_serializing_if = "Vec::is_empty",
        rename(serialize = "groundingChunks", deserialize = "groundingchunks"),
        alias = "groundingChunks"
    )]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(
        default,
        deserialize_with = "skip_null_entries",
        skip_serializing_if = "Vec::is_empty",
        rename(serialize = "webSearchQueries", deserialize = "websearchqueries"),
        alias = "webSearchQueries"
    )]
    pub web_search_queries: Vec<String>,
}

impl GroundingMetadata {
    /// Web sources in payload order.
    ///
    /// Reads `groundingAttributions`; falls back to `groundingChunks` when no
    /// attribution carries a web source. Entries without `web` are skipped.
    pub fn web_sources(&self) -> Vec<&WebSource> {
        let attributed: Vec<&WebSource> = self
            .grounding_attributions
            .iter()
            .filter_map(|a| a.web.as_ref())
            .collect();
        if !attributed.is_empty() {
            return attributed;
        }
        self.grounding_chunks
            .iter()
            .filter_map(|c| c.web.as_ref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingAttribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_are_treated_as_absent() {
        let response: GenerationResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":null},"groundingMetadata":{"groundingAttributions":null}}]}"#,
        )
        .unwrap();

        let candidate = &response.candidates[0];
        assert!(candidate.parts().is_empty());
        assert!(candidate
            .grounding_metadata
            .as_ref()
            .unwrap()
            .web_sources()
            .is_empty());

        let empty: GenerationResponse = serde_json::from_str(r#"{"candidates":null}"#).unwrap();
        assert!(empty.candidates.is_empty());
    }

    #[test]
    fn null_list_entries_are_dropped() {
        let response: GenerationResponse = serde_json::from_str(
            r#"{"candidates":[null,{"groundingMetadata":{
                "webSearchQueries":[null,"singapore weather"],
                "groundingAttributions":[null,{"web":{"uri":"https://x","title":"X"}}],
                "groundingChunks":[null]
            }}]}"#,
        )
        .unwrap();

        assert_eq!(response.candidates.len(), 1);
        let metadata = response.candidates[0].grounding_metadata.as_ref().unwrap();
        assert_eq!(metadata.web_search_queries, vec!["singapore weather"]);
        assert_eq!(metadata.grounding_attributions.len(), 1);
        assert!(metadata.grounding_chunks.is_empty());
        assert_eq!(metadata.web_sources()[0].uri.as_deref(), Some("https://x"));
    }

    #[test]
    fn web_sources_fall_back_to_chunks() {
        let metadata: GroundingMetadata = serde_json::from_str(
            r#"{
                "groundingAttributions": [{}],
                "groundingChunks": [
                    {"web": {"uri": "https://a", "title": "A"}},
                    {},
                    {"web": {"uri": "https://b"}}
                ]
            }"#,
        )
        .unwrap();

        let sources = metadata.web_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title.as_deref(), Some("A"));
        assert_eq!(sources[1].title, None);
        assert_eq!(sources[1].uri.as_deref(), Some("https://b"));
    }

    #[test]
    fn finish_reason_parses_wire_spelling() {
        let candidate = Candidate {
            finish_reason: Some("MAX_TOKENS".to_string()),
            ..Default::default()
        };
        assert_eq!(candidate.finish_reason(), Some(FinishReason::MaxTokens));

        let unknown = Candidate {
            finish_reason: Some("BLOCKLIST".to_string()),
            ..Default::default()
        };
        assert_eq!(unknown.finish_reason(), None);
    }
}
