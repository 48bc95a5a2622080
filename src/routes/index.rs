use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use maud::html;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", body = String)
    ),
    tag = "Index"
)]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        html! {
            html lang="en" {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    title { "Chat Relay Service" }
                }
                body {
                    header {
                        h1 { "Chat Relay Service" }
                        p {
                            "Forwards chat messages to a completions API and echoes "
                            "attachment metadata back. Current model: "
                            b { code { (state.config.openai_model) } }
                        }
                    }
                    section {
                        h2 { "Usage" }
                        h3 { "Chat" }
                        pre {
                            code {
                                "curl -X POST http://" (state.config.bind_addr) "/chat \\\n"
                                "    -F \"text=Hello\" \\\n"
                                "    -F \"files=@manual.pdf\""
                            }
                        }
                        h3 { "Upload documents" }
                        pre {
                            code {
                                "curl -X POST http://" (state.config.bind_addr) "/upload-document \\\n"
                                "    -F \"files=@manual.pdf\""
                            }
                        }
                        p {
                            "Uploaded files are read and discarded; document "
                            "ingestion is not implemented."
                        }
                    }
                    section {
                        h2 { "Docs" }
                        p {
                            a href="/docs" { "Link" }
                        }
                    }
                }
            }
        }
        .into_string(),
    )
}
