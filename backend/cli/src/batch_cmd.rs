//! CLI Batch Command
//!
//! Runs OCR over several images. One bad image never stops the rest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use markread_config::Environment;
use markread_core::{validate_api_key, validate_model, OcrResult};
use markread_tools::OcrTool;

use crate::extract_cmd::write_output;
use crate::{resolve_config, ProviderArgs};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Paths to the image files
    #[arg(required = true)]
    pub images: Vec<String>,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Custom prompt for OCR extraction
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Directory for per-image `<name>.txt` files; created when missing
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Output all results as one JSON document
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct BatchItem<'a> {
    pub image_path: &'a str,
    pub result: &'a OcrResult,
}

/// JSON envelope for a batch. `success` is false when any image failed.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub success: bool,
    pub model: &'a str,
    pub results: Vec<BatchItem<'a>>,
}

impl<'a> BatchReport<'a> {
    pub fn new(model: &'a str, images: &'a [String], results: &'a [OcrResult]) -> Self {
        let results: Vec<_> = images
            .iter()
            .zip(results)
            .map(|(image_path, result)| BatchItem {
                image_path: image_path.as_str(),
                result,
            })
            .collect();
        Self {
            success: results.iter().all(|item| !item.result.is_failure()),
            model,
            results,
        }
    }
}

pub async fn run(args: BatchArgs, env: &Environment) -> Result<()> {
    let config = resolve_config(&args.provider, env)?;

    validate_api_key(&config.api_key)?;
    validate_model(&config.model)?;

    if let Some(dir) = &args.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    if !args.json {
        println!("Processing {} images...", args.images.len());
        println!("Using model: {}", config.model);
    }

    let tool = OcrTool::new(config.client_config())?;
    let results = tool
        .process_multiple_images(&args.images, args.prompt.as_deref())
        .await;

    let failed = results.iter().filter(|r| r.is_failure()).count();
    info!(total = results.len(), failed, "Batch complete");

    for (image, result) in args.images.iter().zip(&results) {
        if !args.json {
            println!("\n--- {} ---", display_name(image));
            println!("{}", result.text);
        }

        if let Some(dir) = &args.output_dir {
            let path = output_file_for(dir, image);
            write_output(&path, &result.text).await?;
            if !args.json {
                println!("Saved to: {}", path.display());
            }
        }
    }

    if args.json {
        let report = BatchReport::new(&config.model, &args.images, &results);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// File name shown in the per-image header.
fn display_name(image: &str) -> String {
    Path::new(image)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.to_string())
}

/// `<dir>/<image stem>.txt`
fn output_file_for(dir: &Path, image: &str) -> PathBuf {
    let stem = Path::new(image)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    dir.join(format!("{stem}.txt"))
}
