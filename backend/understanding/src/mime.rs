//! MIME type detection and data-URI encoding for uploaded images.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

/// MIME type used when the extension is not a known image type.
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Detect an image MIME type by file extension.
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png"          => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        _              => FALLBACK_IMAGE_MIME,
    }
}

/// `data:<mime>;base64,<payload>` URI for an inline image part.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_png() {
        assert_eq!(image_mime_type(&PathBuf::from("scan.PNG")), "image/png");
    }

    #[test]
    fn detects_jpeg_variants() {
        assert_eq!(image_mime_type(&PathBuf::from("a.jpg")), "image/jpeg");
        assert_eq!(image_mime_type(&PathBuf::from("a.jpeg")), "image/jpeg");
    }

    #[test]
    fn unknown_extension_falls_back_to_jpeg() {
        assert_eq!(image_mime_type(&PathBuf::from("page.heic")), "image/jpeg");
        assert_eq!(image_mime_type(&PathBuf::from("page")), "image/jpeg");
    }

    #[test]
    fn encodes_data_uri() {
        assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
    }
}
