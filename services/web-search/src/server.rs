//! HTTP listener for web search
//!
//! Accepts `GET /?q=<term>`, runs the search and answers in plain text:
//!
//! | Outcome                    | Status |
//! |----------------------------|--------|
//! | results                    | 200    |
//! | missing or empty `q`       | 400    |
//! | invalid configuration      | 500    |
//! | any other search failure   | 503    |

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::fmt::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::backends::SearchBackend;
use crate::error::SearchError;
use crate::types::SearchResults;

/// Shared state for the search handler
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn SearchBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

/// Query parameters accepted by the search handler
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Start the listener on `addr` and serve until the process ends
pub async fn serve(addr: SocketAddr, backend: Arc<dyn SearchBackend>) -> Result<()> {
    let app = create_router(AppState::new(backend));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(search_handler))
        .with_state(state)
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let term = match params.q {
        Some(term) if !term.is_empty() => term,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "Bad request. Request should be ?q=[term]",
            )
                .into_response();
        }
    };

    match state.backend.search(&term).await {
        Ok(results) => {
            tracing::info!(term = %term, count = results.len(), "Search succeeded");
            (StatusCode::OK, render_results(&results)).into_response()
        }
        Err(err) => {
            let (status, prefix) = error_status(&err);
            let upstream_status = err.status();
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(
                    term = %term,
                    ?upstream_status,
                    "Search backend misconfigured: {}",
                    err
                );
            } else {
                tracing::warn!(term = %term, ?upstream_status, "Search failed: {}", err);
            }
            (status, format!("{} {}", prefix, err)).into_response()
        }
    }
}

fn error_status(err: &SearchError) -> (StatusCode, &'static str) {
    if err.is_invalid_configuration() {
        (StatusCode::INTERNAL_SERVER_ERROR, "Bad config.")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Upstream unavailable.")
    }
}

fn render_results(results: &SearchResults) -> String {
    let mut body = format!("OK - {} records found\n", results.len());
    for result in results {
        let _ = writeln!(body, "{} - {}", result.title, result.link);
    }
    body
}
