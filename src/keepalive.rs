//! Keepalive HTTP server for uptime monitoring.
//!
//! Runs as its own tokio task next to the bot dispatcher and shares the
//! [`Liveness`] container with it. `GET /` is an unauthenticated liveness
//! probe; `/ping` and `/health` optionally require a shared-secret `token`
//! query parameter.

use crate::config::WEB_HOST;
use crate::state::Liveness;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for the keepalive routes.
#[derive(Clone)]
pub struct KeepaliveState {
    /// Liveness timestamps shared with the message pipeline
    pub liveness: Arc<Liveness>,
    /// Shared secret; `None` disables the token check entirely
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Token gate: with no configured secret every request is accepted,
/// otherwise the query token must match exactly.
fn authorized(secret: Option<&str>, token: Option<&str>) -> bool {
    match secret {
        Some(expected) => token == Some(expected),
        None => true,
    }
}

fn forbidden() -> Response {
    // Not an application error, so no error-level logging here.
    (StatusCode::FORBIDDEN, Json(json!({ "ok": false }))).into_response()
}

async fn index() -> &'static str {
    "OK"
}

async fn ping(
    State(state): State<KeepaliveState>,
    Query(query): Query<TokenQuery>,
) -> Response {
    if !authorized(state.secret.as_deref(), query.token.as_deref()) {
        return forbidden();
    }
    let timestamp = state.liveness.mark_ping(Utc::now().timestamp()).await;
    Json(json!({ "ok": true, "timestamp": timestamp })).into_response()
}

async fn health(
    State(state): State<KeepaliveState>,
    Query(query): Query<TokenQuery>,
) -> Response {
    if !authorized(state.secret.as_deref(), query.token.as_deref()) {
        return forbidden();
    }
    Json(state.liveness.snapshot().await).into_response()
}

/// Builds the keepalive router; split out so tests can serve it on an
/// ephemeral port.
#[must_use]
pub fn router(state: KeepaliveState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ping", get(ping))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves the keepalive server until shutdown.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn run(state: KeepaliveState, port: u16) -> Result<()> {
    let addr = SocketAddr::from((WEB_HOST, port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind keepalive port")?;

    info!(address = %addr, "keepalive_server_listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Keepalive server error")?;

    info!("keepalive_server_shutdown_complete");
    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_secret_accepts_everything() {
        assert!(authorized(None, None));
        assert!(authorized(None, Some("anything")));
    }

    #[test]
    fn test_secret_requires_exact_match() {
        assert!(authorized(Some("s3cret"), Some("s3cret")));
        assert!(!authorized(Some("s3cret"), Some("s3cret ")));
        assert!(!authorized(Some("s3cret"), Some("wrong")));
        assert!(!authorized(Some("s3cret"), None));
    }
}
