//! Host header validation.
//!
//! Requests whose `Host` header does not match the configured allow
//! list are rejected with 400 before they reach any handler. Entries
//! may be exact hosts, `*.domain` wildcards, or `*` to disable the
//! check.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header::HOST, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::server::routes::ApiResponse;

/// Check whether a host matches an allow-list entry.
fn entry_matches(entry: &str, host: &str) -> bool {
    if entry == "*" {
        return true;
    }
    if let Some(suffix) = entry.strip_prefix("*.") {
        return host
            .strip_suffix(suffix)
            .is_some_and(|rest| rest.ends_with('.'));
    }
    entry == host
}

/// Strip a trailing `:port` from a host header value.
fn host_without_port(value: &str) -> &str {
    match value.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => value,
    }
}

pub async fn enforce_trusted_host(
    allowed: Arc<Vec<String>>,
    request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(host_without_port);

    let trusted = match host {
        Some(host) => allowed.iter().any(|entry| entry_matches(entry, host)),
        None => false,
    };

    if !trusted {
        warn!(host = host.unwrap_or("<missing>"), "rejecting untrusted host");
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::err("Invalid host header")),
        )
            .into_response();
    }

    next.run(request).await
}
