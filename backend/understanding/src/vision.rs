//! Vision OCR client: sends one image plus a prompt to an OpenAI-compatible
//! chat-completion endpoint and turns the reply into an [`OcrResult`].

use std::path::Path;
use std::sync::Arc;

use markread_core::{
    validate_api_key, validate_image_path, validate_model, ApiErrorKind, ClientConfig, OcrError,
    OcrResult, Result,
};
use markread_logging::redact_sensitive_data;
use tracing::{debug, info, warn};

use crate::intent::parse_intent_analysis;
use crate::mime::{data_uri, image_mime_type};
use crate::prompts::{requests_json, DEFAULT_OCR_PROMPT, INTENT_ANALYSIS_PROMPT};
use crate::transport::{ChatTransport, HttpReply, ReqwestTransport};
use crate::wire::{ChatCompletionRequest, ChatCompletionResponse, ProviderErrorBody};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Token ceiling sent with every request.
pub const MAX_TOKENS: u32 = 4000;

/// Single configurable client for any OpenAI-compatible vision endpoint.
pub struct VisionClient {
    api_key: String,
    base_url: String,
    model: String,
    transport: Arc<dyn ChatTransport>,
}

impl VisionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn ChatTransport>) -> Result<Self> {
        validate_api_key(&config.api_key)?;
        let model = config
            .model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        validate_model(&model)?;

        let base_url = config
            .base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: config.api_key,
            base_url,
            model,
            transport,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run the structured edit-mark analysis prompt against one image.
    pub async fn perform_ocr_with_intent_analysis(
        &self,
        image_path: impl AsRef<Path>,
    ) -> Result<OcrResult> {
        self.perform_ocr(image_path, Some(INTENT_ANALYSIS_PROMPT)).await
    }

    /// Extract text from one image, using `prompt` or the default extraction prompt.
    ///
    /// When the prompt asks for JSON output, the reply is also scanned for an
    /// intent-analysis payload; its `final_text` then becomes the result text.
    /// A payload that fails to decode is logged and the raw reply is returned.
    pub async fn perform_ocr(
        &self,
        image_path: impl AsRef<Path>,
        prompt: Option<&str>,
    ) -> Result<OcrResult> {
        let path = validate_image_path(image_path)?;

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            OcrError::file(
                format!("Failed to read image file {}: {e}", path.display()),
                &path,
            )
        })?;
        let mime_type = image_mime_type(&path);

        let prompt = prompt.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_OCR_PROMPT);
        let request =
            ChatCompletionRequest::vision(&self.model, prompt, data_uri(mime_type, &bytes), MAX_TOKENS);

        info!(
            image = %path.display(),
            model = %self.model,
            mime = mime_type,
            bytes = bytes.len(),
            "Sending image to vision model"
        );

        let url = format!("{}/chat/completions", self.base_url);
        let reply = self
            .transport
            .post_chat(&url, &self.api_key, &request)
            .await
            .map_err(|e| {
                OcrError::api(
                    ApiErrorKind::Generic,
                    None,
                    format!("OCR failed: {}", redact_sensitive_data(&e.to_string())),
                )
            })?;

        let text = read_reply(reply)?;

        if requests_json(prompt) {
            match parse_intent_analysis(&text) {
                Ok(analysis) => {
                    debug!(operations = analysis.operations.len(), "Parsed intent analysis");
                    return Ok(OcrResult::from_analysis(analysis));
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse JSON response; using plain text");
                }
            }
        }

        Ok(OcrResult::from_text(text))
    }
}

/// Map an HTTP status to its error class.
pub fn classify_status(status: u16) -> ApiErrorKind {
    match status {
        401 | 403 => ApiErrorKind::Auth,
        429 => ApiErrorKind::Quota,
        _ => ApiErrorKind::Generic,
    }
}

/// Turn a raw reply into the trimmed first-choice content, or a classified error.
fn read_reply(reply: HttpReply) -> Result<String> {
    if !reply.is_success() {
        let detail = ProviderErrorBody::parse_message(&reply.body)
            .unwrap_or_else(|| "Unknown error".to_string());
        let reason = reqwest::StatusCode::from_u16(reply.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        let failure = format!("API request failed: {} {} - {}", reply.status, reason, detail);
        debug!(
            status = reply.status,
            body = %redact_sensitive_data(&reply.body),
            "Provider returned an error"
        );

        let kind = classify_status(reply.status);
        let message = match kind {
            ApiErrorKind::Auth => format!("Invalid API key or API error: {failure}"),
            ApiErrorKind::Quota => format!(
                "API quota exceeded. Please check your billing and usage limits. ({failure})"
            ),
            ApiErrorKind::Generic => format!("OCR failed: {failure}"),
        };
        return Err(OcrError::api(kind, Some(reply.status), message));
    }

    let response: ChatCompletionResponse = serde_json::from_str(&reply.body).map_err(|e| {
        OcrError::api(
            ApiErrorKind::Generic,
            Some(reply.status),
            format!("OCR failed: could not decode provider response: {e}"),
        )
    })?;

    Ok(response.first_content().trim().to_string())
}
