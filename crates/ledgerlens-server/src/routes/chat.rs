//! Chat route: intent routing over a cached document session.
//!
//! A "summary" prompt renders the parsed fields; anything else goes through
//! the TF-IDF relevance search over the session's full text.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;

use crate::state::AppState;
use ledgerlens_core::ParsedStatement;
use ledgerlens_search::RelevanceIndex;

const NO_MATCH_MESSAGE: &str = "Sorry, I couldn't find a relevant answer in the document.";
const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching the document.";

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub session_id: String,
    pub prompt: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

/// POST /api/chat: answer a free-text prompt against an uploaded document.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(query): Json<ChatQuery>,
) -> impl IntoResponse {
    let session = match state.sessions.get(&query.session_id) {
        Some(session) => session,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "Document session not found. Please upload again.",
                })),
            );
        }
    };

    let response = if is_summary_intent(&query.prompt) {
        render_summary(&session.record)
    } else {
        answer_from_text(&session.text, &query.prompt)
    };

    (StatusCode::OK, Json(serde_json::json!({ "response": response })))
}

fn is_summary_intent(prompt: &str) -> bool {
    let prompt_lower = prompt.to_lowercase();
    prompt_lower.contains("summary") || prompt_lower.contains("summarise")
}

/// Bullet rendering of every cached field, sentinel values included.
fn render_summary(record: &ParsedStatement) -> String {
    let mut lines = vec!["Here is a summary of the document:".to_string()];
    for (key, value) in record.display_fields() {
        lines.push(format!("- **{}:** {}", key, value));
    }
    lines.join("\n")
}

/// Relevance search, with failures softened into advisory messages.
fn answer_from_text(text: &str, prompt: &str) -> String {
    match RelevanceIndex::build(text) {
        Ok(index) => index
            .answer(prompt)
            .map(str::to_string)
            .unwrap_or_else(|| NO_MATCH_MESSAGE.to_string()),
        Err(e) => {
            warn!(error = %e, "relevance index build failed");
            SEARCH_FAILED_MESSAGE.to_string()
        }
    }
}
