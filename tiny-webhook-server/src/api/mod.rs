//! HTTP surface of tiny-webhook.
//!
//! Every path behaves the same: POST delivers a payload, GET returns the recent
//! event log when the web portal is enabled, anything else is rejected.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{MethodRouter, post},
};
use tiny_webhook::logging::EventLog;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer};

use crate::{error::ServerError, state::AppState};

pub mod portal;
pub mod webhooks;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let log = state.event_log.clone();

    Router::new()
        .route("/", hook_routes())
        .route("/{*path}", hook_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_request_size))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| handle_panic(&log, panic),
        ))
        .with_state(state)
}

fn hook_routes() -> MethodRouter<Arc<AppState>> {
    post(webhooks::receive_webhook)
        .get(portal::show_log)
        .fallback(unsupported_method)
}

/// Rejects every method other than POST and GET
pub async fn unsupported_method(
    State(state): State<Arc<AppState>>,
    method: Method,
) -> ServerError {
    reject_method(&state, method)
}

pub(crate) fn reject_method(state: &AppState, method: Method) -> ServerError {
    state.event_log.warning(format!(
        "Unsupported HTTP method ({}) request received",
        method
    ));
    ServerError::MethodNotAllowed(method)
}

fn handle_panic(log: &EventLog, panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    log.error(format!("Unhandled exception thrown: {}", message));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}
