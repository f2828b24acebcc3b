//! Image intake: local files to base64 payloads tagged with a sniffed media type.

use std::path::{Path, PathBuf};

use base64::Engine;
use tracing::debug;

use crate::error::FusionError;
use crate::ports::InlineImage;

/// Media type assumed when the byte signature is not recognised.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// An image read from disk, ready to be sent to the generative service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base64 payload and media type.
    pub inline: InlineImage,
    /// Path the image was read from, if any.
    pub source: Option<PathBuf>,
}

impl EncodedImage {
    /// Encode raw bytes, detecting the media type from their signature.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8], source: Option<PathBuf>) -> Result<Self, FusionError> {
        if bytes.is_empty() {
            let what = source.as_deref().map_or_else(|| "input".into(), |p| p.display().to_string());
            return Err(FusionError::InvalidImage(format!("{what} is empty")));
        }
        let mime_type = sniff_mime_type(bytes);
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self { inline: InlineImage { mime_type: mime_type.to_string(), data }, source })
    }

    /// Build from a data URI or a bare base64 string.
    ///
    /// The payload is decoded and sniffed either way; a URI's declared media
    /// type is not trusted.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a base64 data URI nor valid
    /// base64, or if it decodes to nothing.
    pub fn from_encoded(value: &str) -> Result<Self, FusionError> {
        let payload = if value.starts_with("data:") {
            parse_data_uri(value)?.data
        } else {
            value.trim().to_string()
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&payload)
            .map_err(|e| FusionError::InvalidImage(format!("not base64: {e}")))?;
        Self::from_bytes(&bytes, None)
    }
}

/// Read an image file and encode it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is empty.
pub async fn read_image(path: &Path) -> Result<EncodedImage, FusionError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        FusionError::Io(std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))
    })?;
    let image = EncodedImage::from_bytes(&bytes, Some(path.to_path_buf()))?;
    debug!(
        path = %path.display(),
        mime_type = %image.inline.mime_type,
        bytes = bytes.len(),
        "image loaded"
    );
    Ok(image)
}

/// Load an image argument: either a `data:` URI or a path to a file.
///
/// # Errors
///
/// Returns an error if the URI is malformed or the file cannot be read.
pub async fn load_image(arg: &str) -> Result<EncodedImage, FusionError> {
    if arg.starts_with("data:") {
        EncodedImage::from_encoded(arg)
    } else {
        read_image(Path::new(arg)).await
    }
}

/// Detect the media type of encoded image bytes.
#[must_use]
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes).map_or(DEFAULT_MIME_TYPE, |format| format.to_mime_type())
}

/// Render an inline image as `data:<mime>;base64,<data>`.
#[must_use]
pub fn to_data_uri(image: &InlineImage) -> String {
    format!("data:{};base64,{}", image.mime_type, image.data)
}

/// Split a base64 data URI into its media type and payload.
///
/// # Errors
///
/// Returns an error if the value is not a `data:<type>/<subtype>...;base64,` URI.
pub fn parse_data_uri(uri: &str) -> Result<InlineImage, FusionError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| FusionError::InvalidDataUri("missing 'data:' scheme".into()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| FusionError::InvalidDataUri("missing ',' separator".into()))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default();
    if !params.any(|p| p == "base64") {
        return Err(FusionError::InvalidDataUri("payload is not base64".into()));
    }
    if !is_media_type(mime_type) {
        return Err(FusionError::InvalidDataUri(format!("bad media type '{mime_type}'")));
    }

    Ok(InlineImage { mime_type: mime_type.to_string(), data: data.to_string() })
}

/// Drop a leading `data:image/<x>;base64,` header, if present.
#[must_use]
pub fn strip_data_uri_prefix(value: &str) -> &str {
    let Some(rest) = value.strip_prefix("data:image/") else {
        return value;
    };
    match rest.split_once(";base64,") {
        Some((subtype, data)) if subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
            data
        }
        _ => value,
    }
}

fn is_media_type(value: &str) -> bool {
    let Some((kind, subtype)) = value.split_once('/') else {
        return false;
    };
    !kind.is_empty()
        && kind.chars().all(|c| c.is_ascii_alphanumeric())
        && !subtype.is_empty()
        && subtype.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '+'))
}
