//! Decoding `generateContent` bodies and flattening them into answers.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{Citation, GeneratedAnswer, Generation, GenerationResponse};

/// Decode a response body. Object keys match case-insensitively.
pub fn parse_response(body: &str) -> Result<GenerationResponse> {
    let value: Value = serde_json::from_str(body)?;
    Ok(serde_json::from_value(fold_key_case(value))?)
}

fn fold_key_case(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), fold_key_case(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_key_case).collect()),
        other => other,
    }
}

/// Flatten the first candidate into a [`GeneratedAnswer`].
///
/// Returns [`Generation::NoAnswer`] when there is no candidate or the first
/// candidate has no content parts. Part texts are concatenated in order.
pub fn extract_answer(response: GenerationResponse) -> Generation {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Generation::NoAnswer;
    };
    if candidate.parts().is_empty() {
        return Generation::NoAnswer;
    }

    let text = candidate
        .parts()
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<String>();

    let (citations, search_queries) = match candidate.grounding_metadata {
        Some(metadata) => (
            metadata
                .web_sources()
                .into_iter()
                .map(Citation::from)
                .collect(),
            metadata.web_search_queries,
        ),
        None => (Vec::new(), Vec::new()),
    };

    Generation::Answer(GeneratedAnswer {
        text,
        citations,
        search_queries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroundedError;
    use pretty_assertions::assert_eq;

    fn answer(body: &str) -> Generation {
        extract_answer(parse_response(body).unwrap())
    }

    #[test]
    fn empty_candidates_is_no_answer() {
        assert_eq!(answer(r#"{"candidates":[]}"#), Generation::NoAnswer);
        assert_eq!(answer("{}"), Generation::NoAnswer);
    }

    #[test]
    fn candidate_without_parts_is_no_answer() {
        assert_eq!(answer(r#"{"candidates":[{}]}"#), Generation::NoAnswer);
        assert_eq!(
            answer(r#"{"candidates":[{"content":{"role":"model","parts":[]}}]}"#),
            Generation::NoAnswer
        );
    }

    #[test]
    fn single_part_without_grounding() {
        let generation =
            answer(r#"{"candidates":[{"content":{"parts":[{"text":"Singapore is warm."}]}}]}"#);

        assert_eq!(
            generation,
            Generation::Answer(GeneratedAnswer {
                text: "Singapore is warm.".to_string(),
                citations: vec![],
                search_queries: vec![],
            })
        );
    }

    #[test]
    fn attribution_becomes_one_citation() {
        let generation = answer(
            r#"{"candidates":[{
                "content":{"parts":[{"text":"It is 31C."}]},
                "groundingMetadata":{"groundingAttributions":[{"web":{"uri":"https://x","title":"X"}}]}
            }]}"#,
        );

        let answer = generation.into_answer().unwrap();
        assert_eq!(answer.citations, vec![Citation::new("X", "https://x")]);
    }

    #[test]
    fn citations_keep_payload_order_and_skip_missing_web() {
        let generation = answer(
            r#"{"candidates":[{
                "content":{"parts":[{"text":"a"},{"text":"b"},{}]},
                "groundingMetadata":{
                    "webSearchQueries":["singapore temperature today"],
                    "groundingAttributions":[
                        {"web":{"uri":"https://2","title":"Second"}},
                        {"web":null},
                        {"web":{"uri":"https://1","title":"First"}}
                    ]
                }
            }]}"#,
        );

        let answer = generation.into_answer().unwrap();
        assert_eq!(answer.text, "ab");
        assert_eq!(
            answer.citations,
            vec![
                Citation::new("Second", "https://2"),
                Citation::new("First", "https://1"),
            ]
        );
        assert_eq!(answer.search_queries, vec!["singapore temperature today"]);
    }

    #[test]
    fn null_search_query_does_not_fail_the_answer() {
        let generation = answer(
            r#"{"candidates":[{
                "content":{"parts":[{"text":"31C"}]},
                "groundingMetadata":{"webSearchQueries":[null,"singapore weather"]}
            }]}"#,
        );

        let answer = generation.into_answer().unwrap();
        assert_eq!(answer.text, "31C");
        assert_eq!(answer.search_queries, vec!["singapore weather"]);
    }

    #[test]
    fn keys_match_case_insensitively() {
        let generation = answer(
            r#"{"Candidates":[{
                "Content":{"Parts":[{"TEXT":"hi"}]},
                "GROUNDINGMETADATA":{"GroundingAttributions":[{"Web":{"URI":"https://x","Title":"X"}}]}
            }]}"#,
        );

        let answer = generation.into_answer().unwrap();
        assert_eq!(answer.text, "hi");
        assert_eq!(answer.citations, vec![Citation::new("X", "https://x")]);
    }

    #[test]
    fn only_first_candidate_is_used() {
        let generation = answer(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"first"}]}},
                {"content":{"parts":[{"text":"second"}]}}
            ]}"#,
        );
        assert_eq!(generation.answer().unwrap().text, "first");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(GroundedError::Parse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"candidates":"nope"}"#),
            Err(GroundedError::Parse(_))
        ));
    }
}
