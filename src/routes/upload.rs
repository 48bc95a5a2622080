use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartError},
    },
};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::{AppState, delegates::error::ApiError};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadReply {
    pub message: String,
}

fn upload_error(err: MultipartError) -> ApiError {
    ApiError::internal(format!("Erro ao processar documentos: {err}"))
}

#[utoipa::path(
    post,
    path = "/upload-document",
    request_body(
        content_type = "multipart/form-data",
        description = "One or more `files` parts"
    ),
    responses(
        (status = 200, description = "Count of documents read", body = UploadReply),
        (status = 500, description = "File read failed")
    ),
    tag = "Documents"
)]
pub async fn upload_document(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReply>, ApiError> {
    let mut processed = 0usize;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some("files") {
            continue;
        }

        let name = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(upload_error)?;
        debug!(name = %name, size = bytes.len(), "read document");

        // Parsing, embedding and persisting the document into the storage
        // pool goes here once the ingestion pipeline exists.
        processed += 1;
    }

    Ok(Json(UploadReply {
        message: format!("{processed} documento(s) processado(s) com sucesso"),
    }))
}
