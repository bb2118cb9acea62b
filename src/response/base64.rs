//! Base64 and data URI utilities

use base64::{engine::general_purpose::STANDARD, Engine};
use crate::error::{AppError, Result};

/// Media type used when neither the caller nor the content says otherwise
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Encode binary data to base64 string
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode base64 string to binary data
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    // Handle data URL format (e.g., "data:image/png;base64,...")
    let data = match encoded.split_once(',') {
        Some((_, payload)) => payload,
        None => encoded,
    };

    STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::InvalidRequest(format!("Invalid base64 data: {}", e)))
}

/// Create a data URL from binary data and its full media type
pub fn create_data_url(data: &[u8], media_type: &str) -> String {
    format!("data:{};base64,{}", media_type, encode(data))
}

/// Split a base64 data URL into its media type and decoded bytes
pub fn parse_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::InvalidRequest("Not a data URL".to_string()))?;
    let (header, _) = rest
        .split_once(',')
        .ok_or_else(|| AppError::InvalidRequest("Data URL has no payload".to_string()))?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::InvalidRequest("Data URL is not base64 encoded".to_string()))?;

    let media_type = if media_type.is_empty() {
        FALLBACK_MEDIA_TYPE
    } else {
        media_type
    };

    Ok((media_type.to_string(), decode(data_url)?))
}

/// Detect an image media type from binary data using magic bytes
pub fn detect_media_type(data: &[u8]) -> Option<&'static str> {
    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    // BMP: BM followed by the rest of the 14-byte file header
    if data.len() >= 14 && data.starts_with(b"BM") {
        return Some("image/bmp");
    }

    None
}
