//! HTTPS application server

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{async_trait, Router};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{debug, info};

use crate::{
    domain::quotes::QuoteService,
    infrastructure::http::{router, shutdown_signal, state::AppState, Server},
};

/// The application's HTTPS server
#[derive(Debug)]
pub struct HttpsServer {
    router: Router,
    address: SocketAddr,
    tls_config: RustlsConfig,
}

impl HttpsServer {
    /// Returns a new HTTPS server for `address`, loading the PEM certificate and key.
    pub async fn new(
        address: SocketAddr,
        cert_path: &str,
        key_path: &str,
        state: AppState<impl QuoteService>,
    ) -> Result<Self> {
        let tls_config = RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .context("failed to load TLS config")?;

        Ok(Self {
            router: router(state),
            address,
            tls_config,
        })
    }
}

#[async_trait]
impl Server for HttpsServer {
    #[mutants::skip]
    async fn run(self) -> Result<()> {
        info!("HTTPS Server listening on {}", self.address);

        let handle = Handle::new();

        let server = axum_server::bind_rustls(self.address, self.tls_config)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::spawn(shutdown_signal(Some(handle)));

        server.await.context("server error")?;

        debug!("HTTPS server stopped");

        Ok(())
    }
}
