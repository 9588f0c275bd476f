//! Image upload and serving of stored uploads
use super::api::{ApiError, ApiResult, Envelope};
use super::AppState;
use crate::auth::AdminToken;
use crate::upload::{UploadError, UploadFile, Uploaded};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::*;
use tokio::fs;
use tracing::instrument;

/// Uploads larger than this are refused before they reach the handler
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// `POST /api/upload` with the image in the multipart field `file`
#[instrument(skip_all)]
pub async fn upload(
    _admin: AdminToken,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Uploaded> {
    let bad_form = |e: axum::extract::multipart::MultipartError| ApiError::BadRequest(e.body_text());
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(bad_form)?;
        file = Some(UploadFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }
    let file = file.ok_or(UploadError::MissingFile)?;
    let uploaded = state.uploader.upload(file).await?;
    Ok(Envelope::ok(uploaded))
}

/// The content type of a stored upload, from its extension
pub fn content_type_for(key: &str) -> &'static str {
    let ext = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// `GET /uploads/*key`
pub async fn serve(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let path = match state.uploads.resolve(&key) {
        Some(path) => path,
        None => {
            warn!("Rejected suspicious upload path {:?}", key);
            return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
        }
    };
    match fs::read(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(content_type_for(&key))),
                (
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
        Err(e) => {
            error!("Failed to read upload {:?}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response()
        }
    }
}
