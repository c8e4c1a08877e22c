//! OCR tool: the single-image and batch entry points used by the CLI.
//!
//! Batch runs are best-effort. A failing image yields a placeholder result in
//! its slot and processing moves on to the next path.

use markread_core::{
    resolve_path, validate_api_key, validate_image_path, ClientConfig, OcrOptions,
    OcrResult, Result, SUPPORTED_EXTENSIONS,
};
use markread_understanding::VisionClient;
use tracing::{info, warn};

pub struct OcrTool {
    client: VisionClient,
}

impl OcrTool {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(VisionClient::new(config)?))
    }

    pub fn with_client(client: VisionClient) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Extract text from one image. Errors propagate unchanged.
    pub async fn process_image(&self, options: &OcrOptions) -> Result<OcrResult> {
        validate_api_key(&options.api_key)?;
        let absolute = validate_image_path(&options.image_path)?;
        self.client
            .perform_ocr(&absolute, options.prompt.as_deref())
            .await
    }

    /// Run edit-mark intent analysis on one image. Errors propagate unchanged.
    pub async fn process_image_with_intent_analysis(
        &self,
        options: &OcrOptions,
    ) -> Result<OcrResult> {
        validate_api_key(&options.api_key)?;
        let absolute = validate_image_path(&options.image_path)?;
        self.client.perform_ocr_with_intent_analysis(&absolute).await
    }

    /// Process images sequentially, one result per input path, in input order.
    ///
    /// Never fails as a whole: an error on one image becomes a result with
    /// `confidence = 0` and text `Error processing <path>: <message>`.
    pub async fn process_multiple_images<S: AsRef<str>>(
        &self,
        image_paths: &[S],
        prompt: Option<&str>,
    ) -> Vec<OcrResult> {
        let mut results = Vec::with_capacity(image_paths.len());

        for (index, image_path) in image_paths.iter().enumerate() {
            let image_path = image_path.as_ref();
            match self.process_one(image_path, prompt).await {
                Ok(result) => {
                    info!(index, image = image_path, "Image processed");
                    results.push(result);
                }
                Err(e) => {
                    warn!(
                        index,
                        image = image_path,
                        code = e.code(),
                        error = %e,
                        "Image failed; continuing batch"
                    );
                    results.push(OcrResult::failed(image_path, &e.to_string()));
                }
            }
        }

        results
    }

    async fn process_one(&self, image_path: &str, prompt: Option<&str>) -> Result<OcrResult> {
        let absolute = resolve_path(image_path);
        validate_image_path(&absolute)?;
        self.client.perform_ocr(&absolute, prompt).await
    }

    /// Extensions accepted by the validator.
    pub fn supported_formats() -> &'static [&'static str] {
        &SUPPORTED_EXTENSIONS
    }
}
