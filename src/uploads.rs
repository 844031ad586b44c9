//! Quiz cover images: validation, naming and storage on disk, plus the route
//! that serves them back.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path as UrlPath, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
    Router,
};
use color_eyre::{eyre::eyre, Result};
use ulid::Ulid;

use crate::{names, rejections::AppError, AppState};

const UPLOAD_CACHE_CONTROL: &str = "max-age=86400";

pub fn routes() -> Router<AppState> {
    Router::new().route("/{file}", get(send_upload))
}

/// Lowercased extension of `file_name` when it is an accepted image type.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    names::ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Keeps ASCII letters, digits, `-` and `_`; everything else becomes `_`.
pub fn sanitize_stem(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('_');

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<stem>_<unix-seconds>_<8 chars of a ULID>.<ext>`
pub fn unique_file_name(stem: &str, ext: &str, unix_seconds: u64, ulid: Ulid) -> String {
    let ulid = ulid.to_string().to_ascii_lowercase();
    let suffix = &ulid[ulid.len() - 8..];
    format!("{stem}_{unix_seconds}_{suffix}.{ext}")
}

/// Whether `file` is a bare file name that stays inside the upload dir.
pub fn is_safe_file_name(file: &str) -> bool {
    !file.is_empty()
        && !file.contains('/')
        && !file.contains('\\')
        && !file.contains("..")
        && !file.starts_with('.')
}

/// Writes the image to `upload_dir` and returns its public URL.
pub async fn save_image(upload_dir: &Path, original_name: &str, bytes: &[u8]) -> Result<String> {
    let ext = allowed_extension(original_name)
        .ok_or_else(|| eyre!("unsupported image type: {original_name}"))?;
    let unix_seconds = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let file_name = unique_file_name(&sanitize_stem(original_name), &ext, unix_seconds, Ulid::new());

    tokio::fs::create_dir_all(upload_dir).await?;
    let path: PathBuf = upload_dir.join(&file_name);
    tokio::fs::write(&path, bytes).await?;

    tracing::info!("stored upload {} ({} bytes)", path.display(), bytes.len());
    Ok(names::upload_url(&file_name))
}

fn content_type(file: &str) -> &'static str {
    match allowed_extension(file).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn send_upload(
    State(state): State<AppState>,
    UrlPath(file): UrlPath<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_safe_file_name(&file) || allowed_extension(&file).is_none() {
        tracing::warn!("rejected upload path {file:?}");
        return Err(AppError::NotFound);
    }

    let bytes = tokio::fs::read(state.upload_dir.join(&file))
        .await
        .map_err(|_| AppError::NotFound)?;

    Ok((
        [
            (CONTENT_TYPE, content_type(&file)),
            (CACHE_CONTROL, UPLOAD_CACHE_CONTROL),
        ],
        bytes,
    ))
}
