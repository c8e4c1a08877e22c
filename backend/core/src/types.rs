use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Text extracted from one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    /// Final answer: `intent_analysis.final_text` when present, else the raw reply.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_analysis: Option<IntentAnalysisResult>,
}

impl OcrResult {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Build the result from a structured analysis; its `final_text` wins.
    pub fn from_analysis(analysis: IntentAnalysisResult) -> Self {
        Self {
            text: analysis.final_text.clone(),
            intent_analysis: Some(analysis),
            ..Default::default()
        }
    }

    /// Placeholder substituted for an image that failed inside a batch.
    pub fn failed(image_path: &str, message: &str) -> Self {
        Self {
            text: format!("Error processing {image_path}: {message}"),
            confidence: Some(0.0),
            ..Default::default()
        }
    }

    /// True for [`OcrResult::failed`] placeholders. Provider results never set a
    /// zero confidence.
    pub fn is_failure(&self) -> bool {
        self.confidence == Some(0.0)
    }
}

/// The model's structured reconstruction of a handwritten edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentAnalysisResult {
    pub original_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_analysis: Option<SemanticAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_analysis: Option<ModificationAnalysis>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operations: Vec<EditOperation>,
    pub final_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_quality_check: Option<SemanticQualityCheck>,
}

/// One inferred edit instruction found on the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOperation {
    #[serde(rename = "type")]
    pub kind: EditKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_justification: Option<String>,
}

/// Closed set of edit operation tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    Delete,
    Insert,
    Replace,
    Swap,
    Modify,
    Annotate,
    SemanticCorrect,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Delete => "delete",
            Self::Insert => "insert",
            Self::Replace => "replace",
            Self::Swap => "swap",
            Self::Modify => "modify",
            Self::Annotate => "annotate",
            Self::SemanticCorrect => "semantic_correct",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub document_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub main_theme: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key_concepts: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub logical_structure: String,
}

/// Per-category breakdown of the marks the model recognised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModificationAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub deletions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub insertions: Vec<Insertion>,
    #[serde(deserialize_with = "null_as_default")]
    pub replacements: Vec<Replacement>,
    #[serde(deserialize_with = "null_as_default")]
    pub repositions: Vec<Reposition>,
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub uncertain_items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_corrections: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insertion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub old: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reposition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticQualityCheck {
    #[serde(deserialize_with = "null_as_default")]
    pub coherence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub completeness: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accuracy: String,
}

/// Models emit `null` for fields they have nothing to say about.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Input for the single-image path.
#[derive(Debug, Clone)]
pub struct OcrOptions {
    pub api_key: String,
    pub image_path: String,
    pub prompt: Option<String>,
}

/// Credentials and endpoint for the vision provider.
///
/// Resolved once and held for the lifetime of a client.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub api_key: String,
    /// Provider model name; the client default is used when `None`.
    pub model: Option<String>,
    /// API root such as `https://api.openai.com/v1`; the client default is used when `None`.
    pub base_url: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_serializes_camel_case_and_skips_unset() {
        let value = serde_json::to_value(OcrResult::from_text("Hello World")).unwrap();
        assert_eq!(value, json!({ "text": "Hello World" }));
    }

    #[test]
    fn failed_result_has_zero_confidence() {
        let r = OcrResult::failed("missing.png", "Image file not found");
        assert_eq!(r.confidence, Some(0.0));
        assert!(r.text.starts_with("Error processing missing.png: "));
        assert!(r.is_failure());
        assert!(!OcrResult::from_text("ok").is_failure());
    }

    #[test]
    fn nested_nulls_read_as_defaults() {
        let analysis: IntentAnalysisResult = serde_json::from_value(json!({
            "original_text": "a",
            "operations": null,
            "final_text": "b",
            "semantic_analysis": { "document_type": null, "key_concepts": null },
            "modification_analysis": { "insertions": [{ "position": null, "content": "x" }] },
            "semantic_quality_check": { "coherence": null }
        }))
        .unwrap();
        assert!(analysis.operations.is_empty());
        let semantic = analysis.semantic_analysis.unwrap();
        assert_eq!(semantic.document_type, "");
        assert!(semantic.key_concepts.is_empty());
        let insertion = &analysis.modification_analysis.unwrap().insertions[0];
        assert_eq!(insertion.position, "");
        assert_eq!(insertion.content, "x");
    }

    #[test]
    fn operation_without_target_or_position_decodes() {
        let op: EditOperation =
            serde_json::from_value(json!({ "type": "delete", "target": null })).unwrap();
        assert_eq!(op.kind, EditKind::Delete);
        assert_eq!(op.target, "");
        assert_eq!(op.position, "");
    }

    #[test]
    fn edit_kind_uses_snake_case_tags() {
        let op: EditOperation = serde_json::from_value(json!({
            "type": "semantic_correct",
            "target": "teh",
            "new_content": "the",
            "position": "line 2"
        }))
        .unwrap();
        assert_eq!(op.kind, EditKind::SemanticCorrect);
        assert_eq!(op.kind.to_string(), "semantic_correct");
    }

    #[test]
    fn unknown_edit_kind_is_rejected() {
        let op = serde_json::from_value::<EditOperation>(json!({
            "type": "rotate",
            "target": "x",
            "position": "top"
        }));
        assert!(op.is_err());
    }

    #[test]
    fn client_config_debug_hides_key() {
        let cfg = ClientConfig {
            api_key: "sk-secret-value-123".into(),
            ..Default::default()
        };
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("sk-secret-value-123"));
    }

    #[test]
    fn analysis_text_takes_precedence() {
        let analysis = IntentAnalysisResult {
            original_text: "raw".into(),
            semantic_analysis: None,
            modification_analysis: None,
            operations: vec![],
            final_text: "edited".into(),
            semantic_quality_check: None,
        };
        let r = OcrResult::from_analysis(analysis);
        assert_eq!(r.text, "edited");
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["intentAnalysis"]["final_text"], "edited");
    }
}
