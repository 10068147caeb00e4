//! Webhook delivery

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode};
use serde_json::Value;

use crate::{
    error::{ServerError, ServerResult},
    state::AppState,
};

/// Receive a JSON payload and hand it to the first matching hook.
///
/// Answers 200 with an empty body as soon as a hook is selected; its action
/// keeps running in the background.
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ServerResult<StatusCode> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            state
                .event_log
                .error(format!("Unhandled exception thrown: {}", e));
            return Err(ServerError::MalformedPayload(e));
        }
    };

    let compact = payload.to_string();
    state
        .event_log
        .debug(format!("Handling POST request:{}", compact));

    let outcome = state.dispatcher.dispatch(&payload);
    if outcome.handled {
        tracing::debug!(hook = ?outcome.hook_name, "Webhook handled");
        return Ok(StatusCode::OK);
    }

    let error = ServerError::Unhandled;
    state.event_log.warning(format!("{}:{}", error, compact));
    Err(error)
}
