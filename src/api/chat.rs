//! Agent turn endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::{AgentRequest, AgentResponse, ErrorResponse, TurnMeta};
use super::AppState;

/// `POST /api/agent` - run one conversation turn.
pub(super) async fn run_agent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AgentRequest>,
) -> Response {
    let query = compose_query(request.query, request.file_content, request.file_name);

    match state.agent.run_turn(query, request.memory).await {
        Ok(outcome) => Json(AgentResponse {
            response: outcome.response,
            memory: outcome.memory,
            meta: TurnMeta {
                llm_calls: outcome.llm_calls,
            },
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Agent turn failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("{:#}", e),
                }),
            )
                .into_response()
        }
    }
}

/// Fold attached file text into the user message.
fn compose_query(query: String, file_content: Option<String>, file_name: Option<String>) -> String {
    match file_content {
        Some(content) if !content.is_empty() => {
            let name = file_name.unwrap_or_else(|| "uploaded file".to_string());
            format!("{}\n\n[Attached file: {}]\n{}", query, name, content)
        }
        _ => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_without_file_is_untouched() {
        let query = compose_query("what is 2+2?".to_string(), None, None);
        assert_eq!(query, "what is 2+2?");
    }

    #[test]
    fn file_content_is_appended_with_name() {
        let query = compose_query(
            "summarize this".to_string(),
            Some("file body".to_string()),
            Some("notes.txt".to_string()),
        );
        assert_eq!(
            query,
            "summarize this\n\n[Attached file: notes.txt]\nfile body"
        );
    }

    #[test]
    fn empty_file_content_is_ignored() {
        let query = compose_query(
            "hello".to_string(),
            Some(String::new()),
            Some("empty.txt".to_string()),
        );
        assert_eq!(query, "hello");
    }
}
