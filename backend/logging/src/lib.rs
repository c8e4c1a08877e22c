//! Structured logging for markread.
//!
//! Handles subscriber setup (console plus optional NDJSON file) and secret redaction.

pub mod logger;
pub mod redact;

pub use logger::{init_logger, LogSettings};
pub use redact::{mask_secret, redact_sensitive_data};
