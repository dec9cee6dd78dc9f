use crate::files::{list_files, FileEntry};
use crate::state::SharedState;
use axum::{extract::State, Json};

pub async fn list(State(state): State<SharedState>) -> Json<Vec<FileEntry>> {
    Json(list_files(&state.config.download_dir).await)
}
