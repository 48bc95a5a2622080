use axum::{
    Json,
    response::{Html, IntoResponse},
};
use maud::html;
use utoipa::OpenApi;

use crate::ApiDoc;

pub async fn docs() -> impl IntoResponse {
    Html(html! {
		html {
			head {
				title { "Chat Relay Service" }
				script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference" {}
			}
			body {
				div id="app" {}
				script { "const app = Scalar.createApiReference('#app', { url: '/openapi.json', hideDownloadButton: true, hideClientButton: true, hideModels: true });" }
			}
		}
	}.into_string())
}

pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
