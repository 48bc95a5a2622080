pub mod config;
pub mod delegates;
pub mod docs;
pub mod openai;
pub mod routes;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::{config::Config, openai::CompletionsClient, storage::Storage};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub completions: CompletionsClient,
    pub storage: Storage,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completions = CompletionsClient::new(&config);
        let storage = Storage::init(config.db.as_ref());
        Self {
            config,
            completions,
            storage,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Relay Service",
        description = "Forwards user text to a chat-completions API; uploaded files are read and discarded."
    ),
    paths(
        routes::index::index,
        routes::chat::chat,
        routes::upload::upload_document,
    ),
    components(schemas(
        routes::chat::ChatReply,
        routes::chat::AttachmentEcho,
        routes::upload::UploadReply,
    ))
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    let origin = state
        .config
        .allowed_origin
        .parse::<HeaderValue>()
        .expect("ALLOWED_ORIGIN must be a valid header value");

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index::index))
        .route("/chat", post(routes::chat::chat))
        .route("/upload-document", post(routes::upload::upload_document))
        .route("/docs", get(docs::handlers::docs))
        .route("/openapi.json", get(docs::handlers::openapi))
        // Uploads are read fully into memory with no size cap.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .with_state(state)
}
