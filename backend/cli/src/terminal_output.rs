//! Terminal output utilities: section blocks, ANSI formatting, error reports.
//!
//! Results go to stdout. Errors go to stderr so `--json` output stays parseable.

use std::io::IsTerminal;

use markread_config::DotenvError;
use markread_core::OcrError;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";

/// Check if stderr supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && std::io::stderr().is_terminal()
        && std::env::var("TERM")
            .map(|t| t != "dumb")
            .unwrap_or(false)
}

/// Render `body` between `--- <title> ---` and `--- End ---` markers.
pub fn section(title: &str, body: &str) -> String {
    format!("\n--- {title} ---\n{body}\n--- End ---\n")
}

/// Print a titled section to stdout.
pub fn print_section(title: &str, body: &str) {
    println!("{}", section(title, body));
}

/// Lines printed for a failed command, without color.
///
/// Classified errors print their class and code; anything else is unexpected.
pub fn error_lines(err: &anyhow::Error) -> Vec<String> {
    if let Some(e) = err.downcast_ref::<OcrError>() {
        return vec![
            format!("{}: {}", e.name(), e),
            format!("Error Code: {}", e.code()),
        ];
    }
    if let Some(e) = err.downcast_ref::<DotenvError>() {
        return vec![
            format!("ConfigError: {e}"),
            "Error Code: CONFIG_ERROR".to_string(),
        ];
    }
    vec![format!("Unexpected Error: {err:#}")]
}

/// Print the error report to stderr.
pub fn report_error(err: &anyhow::Error) {
    let color = supports_color();
    for (i, line) in error_lines(err).iter().enumerate() {
        match (color, i) {
            (true, 0) => eprintln!("{RED}{BOLD}{line}{RESET}"),
            (true, _) => eprintln!("{YELLOW}{line}{RESET}"),
            (false, _) => eprintln!("{line}"),
        }
    }
}
