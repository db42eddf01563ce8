//! Local image attachment.
//!
//! Images are embedded in the product as `data:` URIs, so attaching one is a
//! purely local operation: read the file, base64 it, no upload.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// MIME type guessed from the file extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a `data:` URI.
#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read a file and encode it as a `data:` URI.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read.
pub async fn read_as_data_uri(path: &Path) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(encode_data_uri(mime_for_path(path), &bytes))
}
