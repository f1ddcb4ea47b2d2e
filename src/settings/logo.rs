use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AppError, AppResult};

pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

const ACCEPTED_MIME: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

/// MIME type guessed from the file extension.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Checks size and format, then encodes the image as a `data:` URL.
pub fn encode_logo(bytes: &[u8], mime: &str) -> AppResult<String> {
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(AppError::Validation(
            "Le fichier est trop volumineux. Taille maximale : 2MB".to_string(),
        ));
    }
    if !ACCEPTED_MIME.contains(&mime) {
        return Err(AppError::Validation(
            "Format non accepté. Utilisez PNG ou JPG".to_string(),
        ));
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Reads a logo from disk. Format is taken from the extension.
pub fn load_logo_file(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)?;
    let mime = mime_from_path(path).unwrap_or("application/octet-stream");
    encode_logo(&bytes, mime)
}
