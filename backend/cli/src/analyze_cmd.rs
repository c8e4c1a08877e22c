//! CLI Analyze Command
//!
//! Reconstructs the text a reader intended from handwritten editing marks.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use markread_config::Environment;
use markread_core::{
    validate_api_key, validate_image_path, validate_model, validate_output_path, OcrOptions,
};
use markread_tools::OcrTool;

use crate::extract_cmd::{write_output, ExtractReport};
use crate::terminal_output::print_section;
use crate::{resolve_config, ProviderArgs};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the image file
    pub image: String,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Write the final text (or JSON with --json) to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the full analysis as JSON
    #[arg(short, long)]
    pub json: bool,
}

pub async fn run(args: AnalyzeArgs, env: &Environment) -> Result<()> {
    let config = resolve_config(&args.provider, env)?;

    validate_api_key(&config.api_key)?;
    validate_image_path(&args.image)?;
    validate_model(&config.model)?;
    if let Some(output) = &args.output {
        validate_output_path(output)?;
    }

    if !args.json {
        println!("Analyzing editing intentions in image: {}", args.image);
        println!("Using model: {}", config.model);
    }

    let tool = OcrTool::new(config.client_config())?;
    let result = tool
        .process_image_with_intent_analysis(&OcrOptions {
            api_key: config.api_key.clone(),
            image_path: args.image.clone(),
            prompt: None,
        })
        .await?;
    info!(
        image = %args.image,
        structured = result.intent_analysis.is_some(),
        "Analysis complete"
    );

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
        println!("Analysis results saved to: {}", path.display());
    } else {
        print_section("Editing Intention Analysis", &result.text);
    }

    Ok(())
}
