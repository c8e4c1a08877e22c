//! Log Redaction Layer
//!
//! Scrubs API keys and bearer tokens from strings prior to logging.

use once_cell::sync::Lazy;
use regex::Regex;

static API_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(sk|pk|rk)-[A-Za-z0-9_\-]{16,}").unwrap());
static BEARER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9\-\._~+/]+=*").unwrap());

/// Redacts API keys and bearer tokens in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "Bearer [REDACTED_TOKEN]");
    API_KEY_RE
        .replace_all(&redacted, "[REDACTED_KEY]")
        .into_owned()
}

/// Show only the first four characters of a secret, e.g. `sk-1…(32 chars)`.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return "***".to_string();
    }
    let head: String = secret.chars().take(4).collect();
    format!("{head}…({len} chars)")
}
