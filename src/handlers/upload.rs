use crate::error::AppError;
use crate::files::{format_file_size, naming};
use crate::state::SharedState;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use futures_util::StreamExt;
use serde::Serialize;
use std::io;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{error, info};

/// Header carrying the URL-encoded original filename.
pub const FILENAME_HEADER: &str = "x-filename";

#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub size: u64,
}

/// Stores the raw request body as a new file in the download directory.
pub async fn upload_file(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<UploadResponse>, AppError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    if declared == 0 {
        return Err(AppError::BadRequest("No file data received".to_string()));
    }

    let limit = state.config.max_upload_size;
    if let Some(max) = limit {
        if declared > max {
            return Err(AppError::PayloadTooLarge(format!(
                "File too large ({} > {})",
                format_file_size(declared),
                format_file_size(max)
            )));
        }
    }

    let filename = headers
        .get(FILENAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(naming::sanitize_filename)
        .unwrap_or_else(naming::fallback_name);

    let naming::ClaimedFile {
        filename,
        path,
        mut file,
    } = naming::claim_unique(&state.config.download_dir, &filename).await?;

    let mut written: u64 = 0;
    let mut stream = body.into_data_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            error!("Upload of {} interrupted: {}", filename, e);
            io::Error::new(io::ErrorKind::UnexpectedEof, e.to_string())
        })?;
        written += chunk.len() as u64;
        if limit.is_some_and(|max| written > max) {
            drop(file);
            fs::remove_file(&path).await.ok();
            return Err(AppError::PayloadTooLarge("File too large".to_string()));
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    info!("File saved: {} ({})", filename, format_file_size(written));

    Ok(Json(UploadResponse {
        success: true,
        filename,
        size: written,
    }))
}
