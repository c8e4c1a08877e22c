//! `markread-config`: configuration loading for markread.
//!
//! Provides:
//! - `.env` parsing into an explicit [`Environment`] snapshot
//! - flag > environment > default resolution of provider settings
//! - logging settings

pub mod defaults;
pub mod env;
pub mod schema;

pub use env::{load_dotenv, parse_dotenv, DotenvError, Environment};
pub use schema::{log_settings, resolve_model, AppConfig, Overrides};
