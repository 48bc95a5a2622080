use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, config::Config, router};

const BOUNDARY: &str = "test-boundary";

pub struct FilePart {
    pub name: &'static str,
    pub content_type: &'static str,
    pub contents: &'static str,
}

pub fn test_state(openai_api_base: String) -> AppState {
    AppState::new(Config {
        bind_addr: "127.0.0.1:0".to_string(),
        openai_api_key: "test-key".to_string(),
        openai_api_base,
        openai_model: "gpt-3.5-turbo".to_string(),
        allowed_origin: "http://localhost:3000".to_string(),
        db: None,
    })
}

fn completion_json(reply: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": reply},
            "finish_reason": "stop"
        }]
    })
}

/// Upstream double that always answers with a single-choice completion.
pub async fn spawn_upstream(reply: &'static str) -> String {
    serve(Router::new().route(
        "/chat/completions",
        post(move || async move { Json(completion_json(reply)) }),
    ))
    .await
}

/// Upstream double that also records the request body it receives.
pub async fn spawn_capturing_upstream(
    reply: &'static str,
) -> (String, Arc<Mutex<Option<Value>>>) {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let recorded = seen.clone();

    let base = serve(Router::new().route(
        "/chat/completions",
        post(move |Json(request): Json<Value>| {
            let recorded = recorded.clone();
            async move {
                *recorded.lock().expect("record upstream request") = Some(request);
                Json(completion_json(reply))
            }
        }),
    ))
    .await;

    (base, seen)
}

/// Upstream double that fails every call with the given error body.
pub async fn spawn_failing_upstream(detail: &'static str) -> String {
    serve(Router::new().route(
        "/chat/completions",
        post(move || async move { (StatusCode::INTERNAL_SERVER_ERROR, detail) }),
    ))
    .await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test upstream");
    });
    format!("http://{addr}")
}

pub fn multipart_request(uri: &str, text: Option<&str>, files: &[FilePart]) -> Request<Body> {
    let mut body = String::new();

    if let Some(text) = text {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"text\"\r\n\r\n{text}\r\n"
        ));
    }

    for file in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n{}\r\n",
            file.name, file.content_type, file.contents
        ));
    }

    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    raw_multipart_request(uri, body)
}

/// Multipart body whose file part is opened but never terminated, so reading
/// the field fails mid-stream.
pub fn truncated_multipart_request(uri: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"x.txt\"\r\nContent-Type: text/plain\r\n\r\ntruncated"
    );
    raw_multipart_request(uri, body)
}

fn raw_multipart_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build multipart request")
}

/// Routes one request through the app and returns the status plus parsed body.
pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(request)
        .await
        .expect("infallible router");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let body = serde_json::from_slice(&bytes).expect("JSON response body");

    (status, body)
}
