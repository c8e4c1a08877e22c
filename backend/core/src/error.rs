use std::path::PathBuf;

use thiserror::Error;

/// How a failed provider call is classified.
///
/// Derived from the HTTP status of the reply, never from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401 / 403: the key was rejected.
    Auth,
    /// 429: rate or billing quota exhausted.
    Quota,
    /// Anything else: other non-2xx, network failure, undecodable reply.
    Generic,
}

/// Top-level error type for markread.
#[derive(Debug, Error)]
pub enum OcrError {
    /// Bad input shape: API key, model, empty path.
    #[error("{0}")]
    Validation(String),

    /// File-system state: missing, oversized, unreadable or wrong-type path.
    #[error("{message}")]
    File { message: String, path: PathBuf },

    /// The remote call failed.
    #[error("{message}")]
    Api {
        kind: ApiErrorKind,
        status: Option<u16>,
        message: String,
    },
}

impl OcrError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn file(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn api(kind: ApiErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Machine-readable code printed alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::File { .. } => "FILE_ERROR",
            Self::Api { .. } => "API_ERROR",
        }
    }

    /// Error class name shown to users.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::File { .. } => "FileError",
            Self::Api { .. } => "APIError",
        }
    }

    /// Classification of an API failure, `None` for validation and file errors.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T, E = OcrError> = std::result::Result<T, E>;
