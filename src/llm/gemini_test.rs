use super::*;
use crate::llm::types::LlmError;

#[test]
fn parse_text_candidate() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Plant rice after the first rains." }] },
            "finishReason": "STOP"
        }]
    })
    .to_string();
    let text = parse_generate_response(&json).unwrap();
    assert_eq!(text, "Plant rice after the first rains.");
}

#[test]
fn parse_joins_multiple_text_parts() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Part one. " }, { "text": "Part two." }] }
        }]
    })
    .to_string();
    let text = parse_generate_response(&json).unwrap();
    assert_eq!(text, "Part one. Part two.");
}

#[test]
fn parse_missing_candidates_is_error() {
    let json = serde_json::json!({ "candidates": [] }).to_string();
    let err = parse_generate_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_candidate_without_text_is_empty_answer() {
    // A blocked or tool-only candidate has no text parts; the fallback chain
    // treats the empty string as "no answer", not as a failure.
    let json = serde_json::json!({
        "candidates": [{ "finishReason": "SAFETY" }]
    })
    .to_string();
    let text = parse_generate_response(&json).unwrap();
    assert!(text.is_empty());
}

#[test]
fn parse_invalid_json_is_error() {
    let err = parse_generate_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}
