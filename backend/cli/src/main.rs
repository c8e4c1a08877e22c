mod analyze_cmd;
mod batch_cmd;
mod extract_cmd;
mod formats_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use markread_config::defaults::DEFAULT_ENV_FILE;
use markread_config::{log_settings, AppConfig, Environment, Overrides};
use markread_logging::init_logger;

#[derive(Parser)]
#[command(name = "markread")]
#[command(about = "OCR and edit-mark analysis via OpenAI-compatible vision APIs")]
#[command(version)]
struct Cli {
    /// `.env` file with provider settings; ignored when missing
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from an image
    Extract(extract_cmd::ExtractArgs),
    /// Extract text from multiple images
    Batch(batch_cmd::BatchArgs),
    /// Analyze handwritten editing marks (insertions, deletions, replacements, moves)
    Analyze(analyze_cmd::AnalyzeArgs),
    /// List supported image formats
    Formats,
}

/// Provider flags shared by every command that calls the API.
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// OpenAI-compatible API key (falls back to OPENAI_API_KEY)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Model to use (falls back to OPENAI_MODEL, then gpt-4o-mini)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Custom API base URL (falls back to OPENAI_BASE_URL)
    #[arg(short = 'u', long)]
    pub base_url: Option<String>,
}

impl ProviderArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Resolve provider settings for a command, naming any unset required variables.
pub fn resolve_config(provider: &ProviderArgs, env: &Environment) -> Result<AppConfig> {
    match AppConfig::resolve(&provider.overrides(), env) {
        Ok(config) => {
            debug!(?config, "Resolved configuration");
            Ok(config)
        }
        Err(e) => {
            for var in AppConfig::missing_env_vars(env) {
                warn!(var, "Required environment variable is not set");
            }
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            terminal_output::report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Needs no configuration, so a broken env file must not block it.
    if let Commands::Formats = cli.command {
        formats_cmd::run();
        return Ok(());
    }

    let env = Environment::capture(&cli.env_file)?;

    init_logger(&log_settings(&env));

    match cli.command {
        Commands::Extract(args) => extract_cmd::run(args, &env).await,
        Commands::Batch(args) => batch_cmd::run(args, &env).await,
        Commands::Analyze(args) => analyze_cmd::run(args, &env).await,
        Commands::Formats => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::collections::HashMap;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_flags() {
        let cli = Cli::try_parse_from([
            "markread", "extract", "scan.png", "-k", "sk-1234567890", "-m", "qwen-vl", "-u",
            "http://localhost:8080/v1", "-p", "read it", "-o", "out.json", "-j",
        ])
        .unwrap();
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.image, "scan.png");
        assert_eq!(args.provider.api_key.as_deref(), Some("sk-1234567890"));
        assert_eq!(args.provider.model.as_deref(), Some("qwen-vl"));
        assert_eq!(args.provider.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(args.prompt.as_deref(), Some("read it"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.json);
    }

    #[test]
    fn batch_requires_images_and_accepts_output_dir() {
        assert!(Cli::try_parse_from(["markread", "batch"]).is_err());

        let cli = Cli::try_parse_from([
            "markread", "--env-file", "prod.env", "batch", "a.png", "b.jpg", "--output-dir", "out",
        ])
        .unwrap();
        assert_eq!(cli.env_file, PathBuf::from("prod.env"));
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.images, vec!["a.png", "b.jpg"]);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(!args.json);
    }

    #[test]
    fn analyze_has_no_prompt_flag() {
        assert!(Cli::try_parse_from(["markread", "analyze", "a.png", "-p", "x"]).is_err());
        assert!(Cli::try_parse_from(["markread", "analyze", "a.png", "-j"]).is_ok());
    }

    fn broken_env_file(dir: &std::path::Path) -> String {
        let path = dir.join("broken.env");
        std::fs::write(&path, "OPENAI_MODEL=gpt-4o\nnot a pair\n").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn formats_runs_despite_broken_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = broken_env_file(dir.path());
        let cli = Cli::try_parse_from(["markread", "--env-file", &env_file, "formats"]).unwrap();
        assert!(run(cli).await.is_ok());
    }

    #[tokio::test]
    async fn broken_env_file_fails_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = broken_env_file(dir.path());
        let cli =
            Cli::try_parse_from(["markread", "--env-file", &env_file, "extract", "a.png"]).unwrap();
        let err = run(cli).await.unwrap_err();
        assert_eq!(
            terminal_output::error_lines(&err)[1],
            "Error Code: CONFIG_ERROR"
        );
    }

    #[test]
    fn resolve_config_reports_missing_key() {
        let env = Environment::from_map(HashMap::new());
        let err = resolve_config(&ProviderArgs::default(), &env).unwrap_err();
        let lines = terminal_output::error_lines(&err);
        assert_eq!(lines[1], "Error Code: VALIDATION_ERROR");
        assert!(lines[0].contains("OPENAI_API_KEY"));
    }
}
