use crate::error::AppError;
use crate::files::naming;
use crate::state::SharedState;
use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::info;

/// Download bodies are read and sent in chunks of this size.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Streams a file from the download directory as an attachment.
pub async fn download_file(
    State(state): State<SharedState>,
    AxumPath(requested): AxumPath<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("File not found".to_string());

    let filename = naming::local_base_name(&requested).ok_or_else(not_found)?;
    let path = state.config.download_dir.join(&filename);

    let metadata = match fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta,
        _ => return Err(not_found()),
    };
    let file = fs::File::open(&path).await?;

    let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime_type.as_ref())
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));
    headers.insert(header::CONTENT_DISPOSITION, content_disposition(&filename));

    info!("Downloading: {} ({} bytes)", filename, metadata.len());

    let stream = ReaderStream::with_capacity(file, CHUNK_SIZE);
    Ok((StatusCode::OK, headers, Body::from_stream(stream)).into_response())
}

/// `attachment; filename="..."`, with an RFC 5987 `filename*` parameter when
/// the name cannot travel as a plain quoted string. The plain parameter then
/// carries an ASCII approximation for clients that ignore `filename*`.
pub fn content_disposition(filename: &str) -> HeaderValue {
    let quotable = |c: char| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\';

    let value = if filename.chars().all(quotable) {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        let fallback: String = filename
            .chars()
            .map(|c| if quotable(c) { c } else { '_' })
            .collect();
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_name_uses_quoted_form() {
        assert_eq!(
            content_disposition("report 2024.pdf"),
            "attachment; filename=\"report 2024.pdf\""
        );
    }

    #[test]
    fn test_non_ascii_name_uses_extended_form() {
        assert_eq!(
            content_disposition("résumé.pdf"),
            "attachment; filename=\"r_sum_.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
        );
        assert_eq!(
            content_disposition("写真.png"),
            "attachment; filename=\"__.png\"; filename*=UTF-8''%E5%86%99%E7%9C%9F.png"
        );
    }

    #[test]
    fn test_quote_in_name_is_not_emitted_raw() {
        assert_eq!(
            content_disposition("say \"hi\".txt"),
            "attachment; filename=\"say _hi_.txt\"; filename*=UTF-8''say%20%22hi%22.txt"
        );
    }
}
