use crate::handlers::{clipboard, download, files, text, ui, upload};
use crate::state::SharedState;
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// The CORS layer answers every OPTIONS request itself (200, allowed methods
/// and headers) and stamps `Access-Control-Allow-Origin: *` on the rest.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(upload::FILENAME_HEADER),
        ])
        .allow_origin(Any);

    Router::new()
        // GET serves the page, POST uploads: the page posts to its own URL
        .route(
            "/",
            get(ui::index)
                .post(upload::upload_file)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/files", get(files::list))
        .route("/download/*name", get(download::download_file))
        .route("/text", get(text::get_text).post(text::set_text))
        .route(
            "/clipboard",
            post(clipboard::push_image).layer(DefaultBodyLimit::disable()),
        )
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// POSTs to unknown paths are uploads as well; everything else is 404.
async fn fallback(
    method: Method,
    state: State<SharedState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    if method == Method::POST {
        upload::upload_file(state, headers, body)
            .await
            .into_response()
    } else {
        (StatusCode::NOT_FOUND, "Not found").into_response()
    }
}
