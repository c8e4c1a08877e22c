//! Extraction of the structured intent-analysis payload from a model reply.
//!
//! Models wrap the JSON in prose or code fences, so the reply is scanned for
//! the first top-level `{...}` block before decoding.

use markread_core::{EditOperation, IntentAnalysisResult};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Fields that must be present for a payload to count as an analysis.
const REQUIRED_FIELDS: [&str; 3] = ["original_text", "operations", "final_text"];

/// Why a reply could not be read as an intent analysis.
#[derive(Debug, Error)]
pub enum IntentParseError {
    #[error("no JSON object found in reply")]
    NoJsonObject,
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("payload does not match the analysis schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Decode the first JSON object in `reply` as an [`IntentAnalysisResult`].
///
/// The required fields are the only gate. Operations that cannot be read
/// (unknown `type`, wrong shape) are dropped one by one.
pub fn parse_intent_analysis(reply: &str) -> Result<IntentAnalysisResult, IntentParseError> {
    let block = first_json_object(reply).ok_or(IntentParseError::NoJsonObject)?;
    let mut value: Value = serde_json::from_str(block).map_err(IntentParseError::InvalidJson)?;

    for field in REQUIRED_FIELDS {
        if !is_present(value.get(field)) {
            return Err(IntentParseError::MissingField(field));
        }
    }

    let raw_operations = value
        .get_mut("operations")
        .map(Value::take)
        .unwrap_or(Value::Null);
    let mut analysis: IntentAnalysisResult =
        serde_json::from_value(value).map_err(IntentParseError::Schema)?;
    analysis.operations = decode_operations(raw_operations);
    Ok(analysis)
}

fn decode_operations(raw: Value) -> Vec<EditOperation> {
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        other => {
            warn!(found = %other, "Ignoring non-list operations field");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(operation) => Some(operation),
            Err(e) => {
                warn!(index, error = %e, "Dropping unreadable edit operation");
                None
            }
        })
        .collect()
}

/// Null, empty strings and absent keys do not count as present.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Slice of the first balanced top-level `{...}` block.
///
/// Braces inside JSON string literals are ignored. Returns `None` if no
/// opening brace exists or the first block is never closed.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use markread_core::EditKind;

    const PAYLOAD: &str = r#"{
        "original_text": "我们明天去公园",
        "operations": [
            {"type": "insert", "target": "下午", "position": "明天之后", "intent": "补充时间"}
        ],
        "final_text": "我们明天下午去公园",
        "semantic_quality_check": {"coherence": "好", "completeness": "好", "accuracy": "好"}
    }"#;

    #[test]
    fn parses_payload_wrapped_in_prose_and_fences() {
        let reply = format!("分析如下：\n```json\n{PAYLOAD}\n```\n以上。");
        let analysis = parse_intent_analysis(&reply).unwrap();
        assert_eq!(analysis.final_text, "我们明天下午去公园");
        assert_eq!(analysis.operations.len(), 1);
        assert_eq!(analysis.operations[0].kind, EditKind::Insert);
        assert!(analysis.semantic_quality_check.is_some());
    }

    #[test]
    fn first_object_stops_at_matching_brace() {
        let text = r#"a {"x": {"y": "}"}} b {"z": 1}"#;
        assert_eq!(first_json_object(text), Some(r#"{"x": {"y": "}"}}"#));
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let text = r#"{"q": "say \"}\" now"} tail"#;
        assert_eq!(first_json_object(text), Some(r#"{"q": "say \"}\" now"}"#));
    }

    #[test]
    fn no_object_or_unterminated() {
        assert!(first_json_object("plain text").is_none());
        assert!(first_json_object(r#"{"open": true"#).is_none());
        assert!(matches!(
            parse_intent_analysis("just text"),
            Err(IntentParseError::NoJsonObject)
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_intent_analysis("{original_text: nope}").unwrap_err();
        assert!(matches!(err, IntentParseError::InvalidJson(_)));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let reply = r#"{"original_text": "a", "operations": []}"#;
        assert!(matches!(
            parse_intent_analysis(reply),
            Err(IntentParseError::MissingField("final_text"))
        ));

        let reply = r#"{"original_text": "a", "operations": [], "final_text": ""}"#;
        assert!(matches!(
            parse_intent_analysis(reply),
            Err(IntentParseError::MissingField("final_text"))
        ));
    }

    #[test]
    fn empty_operations_list_is_accepted() {
        let reply = r#"{"original_text": "a", "operations": [], "final_text": "a"}"#;
        assert_eq!(parse_intent_analysis(reply).unwrap().final_text, "a");
    }

    #[test]
    fn unknown_operation_type_drops_only_that_operation() {
        let reply = r#"{
            "original_text": "a b",
            "operations": [
                {"type": "reposition", "target": "b", "position": "front"},
                {"type": "delete", "target": "a", "position": "start"}
            ],
            "final_text": "b"
        }"#;
        let analysis = parse_intent_analysis(reply).unwrap();
        assert_eq!(analysis.final_text, "b");
        assert_eq!(analysis.operations.len(), 1);
        assert_eq!(analysis.operations[0].kind, EditKind::Delete);
    }

    #[test]
    fn loose_operations_and_nested_nulls_are_tolerated() {
        let reply = r#"{
            "original_text": "a",
            "semantic_analysis": {"document_type": null, "main_theme": "notes"},
            "operations": [{"type": "insert", "target": "x"}],
            "final_text": "ax"
        }"#;
        let analysis = parse_intent_analysis(reply).unwrap();
        assert_eq!(analysis.final_text, "ax");
        assert_eq!(analysis.operations[0].position, "");
        assert_eq!(analysis.semantic_analysis.unwrap().main_theme, "notes");
    }

    #[test]
    fn non_list_operations_are_ignored() {
        let reply = r#"{"original_text": "a", "operations": {"type": "delete"}, "final_text": "b"}"#;
        let analysis = parse_intent_analysis(reply).unwrap();
        assert_eq!(analysis.final_text, "b");
        assert!(analysis.operations.is_empty());
    }
}
