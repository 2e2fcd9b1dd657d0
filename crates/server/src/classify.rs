//! Classification endpoints: the raw classifier contract and the chat.

use api_types::{
    chat::{ChatReply, ChatRequest},
    classifier::{ClassifyRequest, ErrorReply},
};
use assistant::{ChatOutcome, ClassifierError, QUOTA_EXHAUSTED_MESSAGE, RATE_LIMITED_MESSAGE};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::server::ServerState;

const GENERIC_ERROR_MESSAGE: &str = "Desculpe, ocorreu um erro. Tente novamente.";

/// Classifies a message and returns the reply untouched.
///
/// Failures use the `{error, type, response}` body with 429, 402 or 500.
pub async fn parse_command(
    State(state): State<ServerState>,
    Json(payload): Json<ClassifyRequest>,
) -> Response {
    match state.assistant.classifier().classify(&payload.message).await {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => {
            let (status, message) = match err {
                ClassifierError::RateLimited => {
                    (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE)
                }
                ClassifierError::QuotaExhausted => {
                    (StatusCode::PAYMENT_REQUIRED, QUOTA_EXHAUSTED_MESSAGE)
                }
                other => {
                    tracing::error!("classify endpoint failed: {other}");
                    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
                }
            };
            (status, Json(ErrorReply::new(message))).into_response()
        }
    }
}

/// Runs a chat turn. Answers 409 with the wait message while another turn
/// is still being classified.
pub async fn chat(
    State(state): State<ServerState>,
    Json(payload): Json<ChatRequest>,
) -> (StatusCode, Json<ChatReply>) {
    let outcome = state.assistant.chat(&state.engine, &payload.message).await;
    let status = match outcome {
        ChatOutcome::Replied(_) => StatusCode::OK,
        ChatOutcome::Busy => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ChatReply {
            reply: outcome.text().to_string(),
        }),
    )
}
