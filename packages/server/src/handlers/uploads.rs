use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::storage::StorageError;
use common::storage::filename::validate_flat_filename;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Serve a stored upload read-only, streaming it from the upload directory.
///
/// Only `/uploads/{stored name}` is served; nested or aliased paths are rejected.
#[instrument(skip(state))]
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    validate_flat_filename(&path)
        .map_err(|_| AppError::BadRequest("Invalid file name".into()))?;

    let size = state.blob_store.size(&path).await.map_err(storage_error)?;
    let reader = state
        .blob_store
        .get_stream(&path)
        .await
        .map_err(storage_error)?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(ReaderStream::new(reader)))
        .map_err(|e| AppError::Failed {
            message: "Error serving file",
            detail: e.to_string(),
            expose_detail: false,
        })
}

fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(_) => AppError::NotFound("File not found".into()),
        StorageError::InvalidName(_) => AppError::BadRequest("Invalid file name".into()),
        other => AppError::Failed {
            message: "Error serving file",
            detail: other.to_string(),
            expose_detail: false,
        },
    }
}
