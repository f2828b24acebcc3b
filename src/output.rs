//! Output naming, data URI decoding, and format conversion.

use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::{DateTime, Utc};

use crate::error::FusionError;
use crate::intake::parse_data_uri;

/// Output formats the result can be written as.
pub const FORMATS: &[&str] = &["png", "jpeg", "webp"];

/// Validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    if FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(format!("Unsupported format '{format}'. Valid: {}", FORMATS.join(", ")))
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "jpeg" => "jpg",
        "webp" => "webp",
        _ => "png",
    }
}

/// Download-style filename: `stylefusion-<unix millis>.<ext>`.
#[must_use]
pub fn auto_filename(created: DateTime<Utc>, format: &str) -> String {
    format!("stylefusion-{}.{}", created.timestamp_millis(), format_extension(format))
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, created: DateTime<Utc>, format: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(created, format)),
    }
}

/// Decode a base64 data URI and write it, converting to `target_format` if needed.
///
/// # Errors
///
/// Returns an error if the URI is malformed, the payload is not base64,
/// conversion fails, or the file cannot be written.
pub fn save_data_uri(data_uri: &str, target_format: &str, output_path: &Path) -> Result<(), FusionError> {
    let inline = parse_data_uri(data_uri)?;
    let data = base64::engine::general_purpose::STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| FusionError::InvalidDataUri(format!("payload is not valid base64: {e}")))?;
    save_image(&data, &inline.mime_type, target_format, output_path)
}

/// Save raw image bytes to a file, converting format if necessary.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(
    data: &[u8],
    source_mime: &str,
    target_format: &str,
    output_path: &Path,
) -> Result<(), FusionError> {
    if mime_matches_format(source_mime, target_format) {
        std::fs::write(output_path, data).map_err(FusionError::Io)
    } else {
        tracing::debug!(source_mime, target_format, "converting output image");
        convert_and_save(data, target_format, output_path)
    }
}

fn mime_matches_format(mime: &str, format: &str) -> bool {
    mime.strip_prefix("image/") == Some(format)
}

fn convert_and_save(
    data: &[u8],
    target_format: &str,
    output_path: &Path,
) -> Result<(), FusionError> {
    let img = image::load_from_memory(data)
        .map_err(|e| FusionError::ImageConversion(format!("Failed to decode image: {e}")))?;

    let image_format = match target_format {
        "jpeg" => image::ImageFormat::Jpeg,
        "png" => image::ImageFormat::Png,
        "webp" => image::ImageFormat::WebP,
        other => {
            return Err(FusionError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    // JPEG has no alpha channel.
    let img = if image_format == image::ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    img.save_with_format(output_path, image_format)
        .map_err(|e| FusionError::ImageConversion(format!("Failed to save as {target_format}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::new_rgba8(2, 2);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn validate_format_values() {
        assert!(validate_format("png").is_ok());
        assert!(validate_format("jpeg").is_ok());
        assert!(validate_format("webp").is_ok());
        assert!(validate_format("gif").unwrap_err().contains("Unsupported format 'gif'"));
    }

    #[test]
    fn format_extension_mapping() {
        assert_eq!(format_extension("jpeg"), "jpg");
        assert_eq!(format_extension("png"), "png");
        assert_eq!(format_extension("webp"), "webp");
    }

    #[test]
    fn auto_filename_embeds_timestamp() {
        let created = Utc.timestamp_millis_opt(1_767_225_600_123).unwrap();
        assert_eq!(auto_filename(created, "png"), "stylefusion-1767225600123.png");
        assert_eq!(auto_filename(created, "jpeg"), "stylefusion-1767225600123.jpg");
    }

    #[test]
    fn resolve_explicit_and_auto() {
        let created = Utc.timestamp_millis_opt(42).unwrap();
        assert_eq!(resolve_output_path(Some("me.png"), created, "jpeg"), PathBuf::from("me.png"));
        assert_eq!(resolve_output_path(None, created, "webp"), PathBuf::from("stylefusion-42.webp"));
    }

    #[test]
    fn mime_matches() {
        assert!(mime_matches_format("image/jpeg", "jpeg"));
        assert!(mime_matches_format("image/png", "png"));
        assert!(!mime_matches_format("image/jpeg", "png"));
        assert!(!mime_matches_format("png", "png"));
    }

    #[test]
    fn saves_matching_format_verbatim() {
        let dir = std::env::temp_dir().join("stylefusion_output_verbatim_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.png");
        let png = tiny_png();
        let uri = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&png)
        );

        save_data_uri(&uri, "png", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), png);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn converts_png_to_jpeg() {
        let dir = std::env::temp_dir().join("stylefusion_output_convert_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.jpg");
        let uri = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(tiny_png())
        );

        save_data_uri(&uri, "jpeg", &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[..3], &[0xFF, 0xD8, 0xFF]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bad_payload_is_rejected() {
        let path = std::env::temp_dir().join("stylefusion_output_never_written.png");
        let err = save_data_uri("data:image/png;base64,%%%", "png", &path).unwrap_err();
        assert!(matches!(err, FusionError::InvalidDataUri(_)));
    }
}
