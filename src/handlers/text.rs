use crate::state::SharedState;
use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

#[derive(Serialize, Debug)]
pub struct TextPayload {
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct TextUpdated {
    pub success: bool,
    pub length: usize,
}

pub async fn get_text(State(state): State<SharedState>) -> Json<TextPayload> {
    Json(TextPayload {
        text: state.text.get().await,
    })
}

/// Replaces the synced text with the request body.
pub async fn set_text(State(state): State<SharedState>, body: String) -> Json<TextUpdated> {
    let length = state.text.replace(body).await;
    info!("Text synced ({} chars)", length);
    Json(TextUpdated {
        success: true,
        length,
    })
}
