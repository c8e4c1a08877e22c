//! Structured Logger
//!
//! Wraps `tracing` with a console layer on stderr, an optional rolling NDJSON
//! file layer, and environment-based level control. Stdout stays reserved for
//! command output.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a configured level is set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Where and how verbosely to log.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `info` or `markread_understanding=debug`.
    pub level: String,
    /// When set, NDJSON logs are also written to `<dir>/markread.log.YYYY-MM-DD`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

/// Initialize the global subscriber. `RUST_LOG` overrides `settings.level`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = settings.log_dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "markread.log");
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
