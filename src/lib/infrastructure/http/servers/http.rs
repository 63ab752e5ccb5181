//! The application's HTTP server.

use std::net::{SocketAddr, TcpListener};

use anyhow::{Context, Result};
use axum::{async_trait, Router};
use axum_server::Handle;
use tracing::{debug, info};

use crate::{
    domain::quotes::QuoteService,
    infrastructure::http::{router, shutdown_signal, state::AppState, Server},
};

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to `address`.
    pub async fn new(address: SocketAddr, state: AppState<impl QuoteService>) -> Result<Self> {
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {address}"))?;

        listener
            .set_nonblocking(true)
            .context("failed to set listener to non-blocking")?;

        Ok(Self {
            router: router(state),
            listener,
        })
    }
}

#[async_trait]
impl Server for HttpServer {
    /// Runs the HTTP server.
    #[mutants::skip]
    async fn run(self) -> Result<()> {
        info!(
            "HTTP Server listening on {}",
            self.listener
                .local_addr()
                .context("failed to get local address")?
        );

        let handle = Handle::new();

        let server = axum_server::from_tcp(self.listener)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::spawn(shutdown_signal(Some(handle)));

        server.await.context("server error")?;

        debug!("HTTP server stopped");

        Ok(())
    }
}
