use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartError},
    },
    http::StatusCode,
};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::{AppState, delegates::error::ApiError};

/// Metadata echoed back for an uploaded attachment. The bytes themselves are
/// discarded.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttachmentEcho {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
    pub attachments: Vec<AttachmentEcho>,
}

fn chat_error(err: MultipartError) -> ApiError {
    ApiError::internal(format!("Erro no chat: {err}"))
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body(
        content_type = "multipart/form-data",
        description = "Form with a required `text` field and optional `files` parts"
    ),
    responses(
        (status = 200, description = "Model reply with attachment metadata", body = ChatReply),
        (status = 422, description = "Missing or empty `text` field"),
        (status = 500, description = "File read or completions call failed")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChatReply>, ApiError> {
    let mut text: Option<String> = None;
    let mut attachments = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(chat_error)? {
        match field.name().unwrap_or("") {
            "text" => {
                text = Some(field.text().await.map_err(chat_error)?);
            }
            "files" => {
                let name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                // Read the bytes fully and drop them. Persisting attachments
                // belongs to the ingestion pipeline, which does not exist yet.
                let bytes = field.bytes().await.map_err(chat_error)?;
                debug!(name = %name, size = bytes.len(), "discarding attachment bytes");

                attachments.push(AttachmentEcho { name, content_type });
            }
            other => {
                debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            return Err(ApiError {
                code: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Erro no chat: campo 'text' obrigatório".to_string(),
            });
        }
    };

    let response = state
        .completions
        .complete(&text)
        .await
        .map_err(|e| ApiError::internal(format!("Erro no chat: {e}")))?;

    Ok(Json(ChatReply {
        response,
        attachments,
    }))
}
