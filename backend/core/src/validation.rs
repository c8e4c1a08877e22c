//! Stateless precondition checks run before any provider call.

use std::path::{Path, PathBuf};

use crate::error::{OcrError, Result};

/// Image extensions accepted for upload, lower-case with leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".webp", ".bmp"];

/// Upper bound on image size accepted for upload (20 MiB).
pub const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

const MIN_API_KEY_LEN: usize = 10;

/// Reject keys that are empty, whitespace-only or implausibly short.
///
/// The key is not checked against the provider.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(OcrError::validation("API key cannot be empty"));
    }
    if api_key.chars().count() < MIN_API_KEY_LEN {
        return Err(OcrError::validation("API key appears to be too short"));
    }
    Ok(())
}

/// Any model name is accepted so arbitrary provider models can be used.
pub fn validate_model(_model: &str) -> Result<()> {
    Ok(())
}

/// Check that `image_path` names a readable, supported image of acceptable size.
///
/// Returns the resolved absolute path on success.
pub fn validate_image_path(image_path: impl AsRef<Path>) -> Result<PathBuf> {
    let image_path = image_path.as_ref();
    if image_path.to_string_lossy().trim().is_empty() {
        return Err(OcrError::validation("Image path cannot be empty"));
    }

    let absolute = resolve_path(image_path);

    let metadata = match std::fs::metadata(&absolute) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(OcrError::file(
                format!("Image file not found: {}", absolute.display()),
                absolute,
            ));
        }
        Err(e) => {
            return Err(OcrError::file(
                format!("Cannot read image file {}: {e}", absolute.display()),
                absolute,
            ));
        }
    };

    if !metadata.is_file() {
        return Err(OcrError::file(
            format!("Path is not a file: {}", absolute.display()),
            absolute,
        ));
    }

    if metadata.len() > MAX_IMAGE_BYTES {
        let mb = (metadata.len() as f64 / 1024.0 / 1024.0).round();
        return Err(OcrError::file(
            format!("Image file too large: {mb}MB. Maximum size is 20MB"),
            absolute,
        ));
    }

    let extension = dotted_extension(&absolute);
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(OcrError::file(
            format!(
                "Unsupported file format: {extension}. Supported formats: {}",
                SUPPORTED_EXTENSIONS.join(", ")
            ),
            absolute,
        ));
    }

    Ok(absolute)
}

/// Check that the directory an output file would land in exists and is writable.
pub fn validate_output_path(output_path: impl AsRef<Path>) -> Result<()> {
    let directory = match output_path.as_ref().parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !directory.is_dir() {
        return Err(OcrError::file(
            format!("Output directory does not exist: {}", directory.display()),
            directory,
        ));
    }

    // Probe with an anonymous temp file; removed on drop.
    if tempfile::tempfile_in(&directory).is_err() {
        return Err(OcrError::file(
            format!("Output directory is not writable: {}", directory.display()),
            directory,
        ));
    }

    Ok(())
}

/// Resolve `path` against the current directory without touching the file system.
pub fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lower-cased extension with its leading dot, or an empty string.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}
