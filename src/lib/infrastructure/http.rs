//! HTTP Server

use std::time::Duration;

use anyhow::Result;
use axum::{
    async_trait,
    extract::Request,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    Router,
};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, info_span};

use crate::domain::quotes::QuoteService;

use self::{handlers::panic_handler, state::AppState};

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod servers;
pub mod state;

/// Methods accepted by the API, as advertised to browsers
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Request headers accepted by the API, as advertised to browsers
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,

    /// The origin allowed to call the API
    #[arg(long, env = "CORS_ALLOW_ORIGIN", default_value = "*")]
    pub cors_allow_origin: HeaderValue,

    /// Path to a PEM certificate; HTTPS is served when both paths are set
    #[arg(long, env = "TLS_CERT_PATH")]
    pub cert_path: Option<String>,

    /// Path to the PEM private key for `cert_path`
    #[arg(long, env = "TLS_KEY_PATH")]
    pub key_path: Option<String>,
}

/// A server that can be run until shutdown
#[async_trait]
pub trait Server {
    /// Serve requests until a shutdown signal is received
    async fn run(self) -> Result<()>;
}

/// Create the application's router
pub fn router<Q: QuoteService>(state: AppState<Q>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    let allow_origin = state.config.cors_allow_origin.clone();

    Router::new()
        .nest("/api", handlers::router())
        .layer(CatchPanicLayer::custom(panic_handler))
        .layer(trace_layer)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            allow_origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
