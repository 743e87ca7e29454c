//! Upload routes: statement parsing via the rule-based or ML pipeline.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::warn;

use crate::session::DocumentSession;
use crate::state::AppState;
use ledgerlens_core::ParsedStatement;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload-pdf", post(upload_pdf))
        .route("/upload-ml", post(upload_ml))
}

/// POST /api/upload-pdf: rule-based parsing of a statement PDF.
async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    let bytes = match read_document_field(multipart).await {
        Some(bytes) => bytes,
        None => return error_body("No file found in the upload"),
    };

    match ledgerlens_rules::parse_statement(&bytes) {
        Ok((text, record)) => success_body(&state, text, record),
        Err(e) => {
            warn!(error = %e, "rule-based parsing failed");
            error_body(&e.to_string())
        }
    }
}

/// POST /api/upload-ml: ML-assisted parsing through the document service.
async fn upload_ml(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> impl IntoResponse {
    let provider = match &state.docai {
        Some(provider) => provider.clone(),
        None => return error_body("Document AI service is not configured"),
    };

    let bytes = match read_document_field(multipart).await {
        Some(bytes) => bytes,
        None => return error_body("No file found in the upload"),
    };

    match ledgerlens_docai::parse_with_docai(provider.as_ref(), &bytes).await {
        Ok((text, record)) => success_body(&state, text, record),
        Err(e) => {
            warn!(error = %e, "ML-assisted parsing failed");
            error_body(&e.to_string())
        }
    }
}

/// Read the first multipart field carrying data. The upload contract is one
/// PDF per request; extra fields are ignored.
async fn read_document_field(mut multipart: Multipart) -> Option<Vec<u8>> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if let Ok(bytes) = field.bytes().await {
            if !bytes.is_empty() {
                return Some(bytes.to_vec());
            }
        }
    }
    None
}

/// Cache a new session and render the success envelope.
fn success_body(
    state: &AppState,
    text: String,
    record: ParsedStatement,
) -> (StatusCode, Json<serde_json::Value>) {
    let session_id = uuid::Uuid::new_v4().to_string();
    state.sessions.put(
        session_id.clone(),
        DocumentSession {
            text,
            record: record.clone(),
        },
    );

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "data": record,
            "session_id": session_id,
        })),
    )
}

/// Pipeline failures surface as an error envelope, not an HTTP error.
fn error_body(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "error",
            "message": message,
        })),
    )
}
