//! Core types, errors, and input validation shared by every markread crate.

pub mod error;
pub mod types;
pub mod validation;

pub use error::{ApiErrorKind, OcrError, Result};
pub use types::{
    ClientConfig, EditKind, EditOperation, Insertion, IntentAnalysisResult, ModificationAnalysis,
    OcrOptions, OcrResult, Replacement, Reposition, SemanticAnalysis, SemanticQualityCheck,
};
pub use validation::{
    resolve_path, validate_api_key, validate_image_path, validate_model, validate_output_path,
    MAX_IMAGE_BYTES, SUPPORTED_EXTENSIONS,
};
