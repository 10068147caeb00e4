//! Web portal: the recent event log over GET

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

const TITLE: &str = "tiny-webhook log";

/// Return the most recent log lines, newest first, as plain text.
///
/// Behaves like any other unsupported method when the portal is disabled.
pub async fn show_log(State(state): State<Arc<AppState>>, method: Method) -> Response {
    if !state.portal.enabled {
        return super::reject_method(&state, method).into_response();
    }

    let body = render_log(&state.event_log.recent(state.portal.count));
    // Recorded after rendering so a response never contains its own request
    state
        .event_log
        .info("HTTP GET request received. Sending log...");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Render log lines under a title.
pub fn render_log(lines: &[String]) -> String {
    let mut body = format!("{}\n{}\n", TITLE, "=".repeat(TITLE.len()));
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    body
}
