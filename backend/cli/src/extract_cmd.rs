//! CLI Extract Command
//!
//! OCR for a single image, printed as text or a JSON envelope.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use markread_config::Environment;
use markread_core::{
    validate_api_key, validate_image_path, validate_model, validate_output_path, OcrOptions,
    OcrResult,
};
use markread_tools::OcrTool;

use crate::terminal_output::print_section;
use crate::{resolve_config, ProviderArgs};

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the image file
    pub image: String,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Custom prompt for OCR extraction
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the result as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// JSON envelope for a single-image result.
#[derive(Debug, Serialize)]
pub struct ExtractReport<'a> {
    pub success: bool,
    pub image_path: &'a str,
    pub model: &'a str,
    pub result: &'a OcrResult,
}

pub async fn run(args: ExtractArgs, env: &Environment) -> Result<()> {
    let config = resolve_config(&args.provider, env)?;

    validate_api_key(&config.api_key)?;
    validate_image_path(&args.image)?;
    validate_model(&config.model)?;
    if let Some(output) = &args.output {
        validate_output_path(output)?;
    }

    if !args.json {
        println!("Processing image: {}", args.image);
        println!("Using model: {}", config.model);
    }

    let tool = OcrTool::new(config.client_config())?;
    let result = tool
        .process_image(&OcrOptions {
            api_key: config.api_key.clone(),
            image_path: args.image.clone(),
            prompt: args.prompt.clone(),
        })
        .await?;
    info!(image = %args.image, chars = result.text.chars().count(), "Extraction complete");

    if args.json {
        let report = ExtractReport {
            success: true,
            image_path: &args.image,
            model: &config.model,
            result: &result,
        };
        let body = serde_json::to_string_pretty(&report)?;
        match &args.output {
            Some(path) => {
                write_output(path, &body).await?;
                println!("JSON result saved to: {}", path.display());
            }
            None => println!("{body}"),
        }
    } else if let Some(path) = &args.output {
        write_output(path, &result.text).await?;
        println!("Text extracted and saved to: {}", path.display());
    } else {
        print_section("Extracted Text", &result.text);
    }

    Ok(())
}

pub(crate) async fn write_output(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
