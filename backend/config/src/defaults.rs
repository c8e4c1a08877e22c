//! Environment variable names and built-in defaults.

pub use markread_understanding::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Log filter directive, overridden by `RUST_LOG`.
pub const LOG_LEVEL_VAR: &str = "MARKREAD_LOG";
/// Directory for NDJSON log files; file logging is off when unset.
pub const LOG_DIR_VAR: &str = "MARKREAD_LOG_DIR";

/// Environment file read at startup when `--env-file` is not given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Variables that must resolve for any command that calls the provider.
pub const REQUIRED_VARS: [&str; 1] = [API_KEY_VAR];
