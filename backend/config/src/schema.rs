//! Resolved runtime configuration.
//!
//! Every value follows the same priority: explicit flag, then environment
//! variable, then built-in default.

use std::fmt;
use std::path::PathBuf;

use markread_core::{ClientConfig, OcrError, Result};
use markread_logging::{mask_secret, LogSettings};

use crate::defaults::{
    API_KEY_VAR, BASE_URL_VAR, DEFAULT_MODEL, LOG_DIR_VAR, LOG_LEVEL_VAR, MODEL_VAR,
    REQUIRED_VARS,
};
use crate::env::Environment;

/// Values supplied on the command line. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Provider settings for one invocation.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    /// `None` means the client's default endpoint.
    pub base_url: Option<String>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AppConfig {
    /// Resolve provider settings from flags and the environment.
    pub fn resolve(overrides: &Overrides, env: &Environment) -> Result<Self> {
        let api_key = pick(overrides.api_key.as_deref(), env.get(API_KEY_VAR)).ok_or_else(|| {
            OcrError::validation(format!(
                "API key is required. Use --api-key option or set {API_KEY_VAR} environment variable."
            ))
        })?;

        Ok(Self {
            api_key,
            model: resolve_model(overrides.model.as_deref(), env),
            base_url: pick(overrides.base_url.as_deref(), env.get(BASE_URL_VAR)),
        })
    }

    /// Required variables that are not set in `env`.
    pub fn missing_env_vars(env: &Environment) -> Vec<&'static str> {
        REQUIRED_VARS
            .iter()
            .copied()
            .filter(|var| env.get(var).is_none())
            .collect()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            model: Some(self.model.clone()),
            base_url: self.base_url.clone(),
        }
    }
}

/// Model name: flag, then `OPENAI_MODEL`, then the built-in default.
pub fn resolve_model(flag: Option<&str>, env: &Environment) -> String {
    pick(flag, env.get(MODEL_VAR)).unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Logging settings from `MARKREAD_LOG` / `MARKREAD_LOG_DIR`.
pub fn log_settings(env: &Environment) -> LogSettings {
    let mut settings = LogSettings::default();
    if let Some(level) = env.get(LOG_LEVEL_VAR) {
        settings.level = level.to_string();
    }
    settings.log_dir = env.get(LOG_DIR_VAR).map(PathBuf::from);
    settings
}

fn pick(flag: Option<&str>, env_value: Option<&str>) -> Option<String> {
    flag.filter(|v| !v.is_empty())
        .or(env_value)
        .map(str::to_string)
}
