//! File upload and parsing endpoint.

use axum::{
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::ingest::{self, IngestError};

use super::types::{ErrorResponse, ParseFileResponse};

/// `POST /api/parse-file` - decode an uploaded file into text.
///
/// Expects a multipart form with a `file` field. Unsupported extensions and
/// a missing file are client errors; a decoder failure on recognized bytes
/// is a server error.
pub(super) async fn parse_file(mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

        upload = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "No file provided".to_string());
    };

    match ingest::extract_text(&bytes, &file_name) {
        Ok(content) => Json(ParseFileResponse {
            content,
            file_name,
            file_size: bytes.len(),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!("File parsing error for {}: {}", file_name, e);
            error_response(ingest_error_status(&e), e.to_string())
        }
    }
}

/// Client error for inputs we refuse; server error for bytes we fail on.
fn ingest_error_status(error: &IngestError) -> StatusCode {
    match error {
        IngestError::UnsupportedType => StatusCode::BAD_REQUEST,
        IngestError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
