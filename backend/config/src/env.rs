//! Environment snapshot: `.env` file values layered under the process environment.
//!
//! Loading is an explicit step at process entry. Nothing here mutates the
//! process environment; callers get an [`Environment`] value instead.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Error reading or parsing a `.env` file.
#[derive(Debug, thiserror::Error)]
pub enum DotenvError {
    #[error("failed to load env file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("invalid env file contents: {0}")]
    Parse(#[source] dotenvy::Error),
}

/// Parse `.env` formatted text without touching the process environment.
///
/// Later duplicates win.
pub fn parse_dotenv(contents: &str) -> Result<HashMap<String, String>, DotenvError> {
    dotenvy::from_read_iter(contents.as_bytes())
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(DotenvError::Parse)
}

/// Read and parse a `.env` file. A missing file yields an empty map.
pub fn load_dotenv(path: &Path) -> Result<HashMap<String, String>, DotenvError> {
    let load_error = |source| DotenvError::Load {
        path: path.to_path_buf(),
        source,
    };

    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(load_error(e)),
    };
    let vars = entries
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(load_error)?;

    debug!(path = %path.display(), count = vars.len(), "Loaded env file");
    Ok(vars)
}

/// Read-only view of configuration variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the process environment layered over the `.env` file at `dotenv_path`.
    ///
    /// Values already set in the process environment take precedence.
    pub fn capture(dotenv_path: &Path) -> Result<Self, DotenvError> {
        let mut vars = load_dotenv(dotenv_path)?;
        vars.extend(std::env::vars());
        Ok(Self { vars })
    }

    /// Build from an explicit map (useful for testing).
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Value of `key`, treating empty strings as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_quoted_values() {
        let vars = parse_dotenv(
            r#"
# provider settings
OPENAI_API_KEY=sk-abc123456789
export OPENAI_MODEL=qwen-vl-max   # trailing comment
OPENAI_BASE_URL="https://example.com/v1"
GREETING="line1\nline2 \"quoted\""
LITERAL='keep \n as-is'
EMPTY=
"#,
        )
        .unwrap();

        assert_eq!(vars["OPENAI_API_KEY"], "sk-abc123456789");
        assert_eq!(vars["OPENAI_MODEL"], "qwen-vl-max");
        assert_eq!(vars["OPENAI_BASE_URL"], "https://example.com/v1");
        assert_eq!(vars["GREETING"], "line1\nline2 \"quoted\"");
        assert_eq!(vars["LITERAL"], r"keep \n as-is");
        assert_eq!(vars["EMPTY"], "");
    }

    #[test]
    fn later_duplicates_win() {
        let vars = parse_dotenv("A=1\nA=2").unwrap();
        assert_eq!(vars["A"], "2");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_dotenv("GOOD=1\nnot a pair"),
            Err(DotenvError::Parse(_))
        ));
        assert!(parse_dotenv("A=\"open").is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = load_dotenv(&dir.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "not a pair\n").unwrap();
        let err = load_dotenv(&path).unwrap_err();
        assert!(matches!(err, DotenvError::Load { .. }));
        assert!(err.to_string().contains(".env"));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "MARKREAD_TEST_ONLY_VAR=from-file\n").unwrap();
        let env = Environment::capture(&path).unwrap();
        assert_eq!(env.get("MARKREAD_TEST_ONLY_VAR"), Some("from-file"));
        assert!(std::env::var("MARKREAD_TEST_ONLY_VAR").is_err());
    }

    #[test]
    fn process_environment_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PATH=/from/env/file\n").unwrap();
        let env = Environment::capture(&path).unwrap();
        let real = std::env::var("PATH").unwrap();
        assert_eq!(env.get("PATH"), Some(real.as_str()));
    }

    #[test]
    fn empty_values_read_as_unset() {
        let env = Environment::from_map(HashMap::from([("A".to_string(), String::new())]));
        assert_eq!(env.get("A"), None);
        assert_eq!(env.get("B"), None);
    }
}
