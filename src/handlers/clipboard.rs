use crate::clipboard::{push_image_bytes, ImageFormat};
use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::State;
use bytes::Bytes;
use tracing::info;

/// Puts the posted image on the host clipboard and answers in plain text.
pub async fn push_image(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<String, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("No image data received".to_string()));
    }
    let format = ImageFormat::sniff(&body).ok_or_else(|| {
        AppError::UnsupportedMediaType(
            "Unrecognised image format (expected PNG, JPEG, GIF, WebP or BMP)".to_string(),
        )
    })?;

    let size = body.len();
    push_image_bytes(state.clipboard.clone(), body, format).await?;

    info!(
        "Image copied to clipboard via {} ({}, {} bytes)",
        state.clipboard.name(),
        format.mime(),
        size
    );
    Ok(format!("Image copied to clipboard ({} bytes)", size))
}
