//! Logo file loading
//!
//! Logos are carried as `data:` URLs so the snapshot stays self-contained.
//! Only formats the raster engine can decode are accepted; vector logos are
//! refused at load time.

use anyhow::{Context, Result, anyhow};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fs;
use std::path::Path;
use tracing::info;

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file into a base64 data URL
///
/// The bytes are decoded once here so a file the renderer cannot draw fails
/// before it is attached.
pub fn load_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read logo file {}", path.display()))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("Unsupported logo image {}", path.display()))?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        width = image.width(),
        height = image.height(),
        "Loaded logo"
    );
    Ok(encode_data_url(mime_for(path), &bytes))
}

/// Split a base64 data URL into its mime type and decoded bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("Logo is not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("Malformed data URL (missing ',')"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| anyhow!("Only base64 data URLs are supported"))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .context("Failed to decode base64 logo payload")?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn write_image(path: &Path, format: ImageFormat) {
        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save_with_format(path, format)
            .unwrap();
    }

    #[test]
    fn test_load_and_decode_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Logo.PNG");
        write_image(&path, ImageFormat::Png);
        let written = fs::read(&path).unwrap();

        let url = load_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, written);
    }

    #[test]
    fn test_webp_logo_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.webp");
        write_image(&path, ImageFormat::WebP);

        let url = load_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn test_undecodable_logo_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        fs::write(
            &svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8" fill="red"/></svg>"#,
        )
        .unwrap();
        let err = load_data_url(&svg).unwrap_err();
        assert!(err.to_string().contains("Unsupported logo image"));

        let garbage = dir.path().join("logo.png");
        fs::write(&garbage, [0x89, b'P', b'N', b'G', 1, 2, 3]).unwrap();
        assert!(load_data_url(&garbage).is_err());
    }

    #[test]
    fn test_unknown_extension_mime() {
        assert_eq!(mime_for(Path::new("logo.bmp")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("logo.svg")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("logo.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("logo")), "application/octet-stream");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_data_url(&dir.path().join("nope.png")).is_err());
    }

    #[test]
    fn test_decode_rejects_non_base64_urls() {
        assert!(decode_data_url("https://example.com/logo.png").is_err());
        assert!(decode_data_url("data:image/png,rawbytes").is_err());
        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
    }
}
