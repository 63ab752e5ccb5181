#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! REST API for the quote notification service

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::{anyhow, Result};
use clap::Parser;
use quote_mailer::{
    domain::{communication::email_addresses::EmailAddress, quotes::QuoteServiceImpl},
    infrastructure::{
        email::mailjet::{MailjetConfig, MailjetMailer},
        http::{
            servers::{http::HttpServer, https::HttpsServer},
            state::{AppConfig, AppState},
            HttpServerConfig, Server,
        },
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The Mailjet account configuration
    #[clap(flatten)]
    pub mailjet: MailjetConfig,

    /// Internal address copied on every notification
    #[clap(long, env = "RECIPIENT_EMAIL")]
    pub recipient_email: Option<EmailAddress>,

    /// Address client replies are sent to
    #[clap(long, env = "REPLY_TO")]
    pub reply_to: Option<EmailAddress>,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = MailjetMailer::new(args.mailjet);

    if !mailer.is_configured() {
        warn!("MJ_API_KEY, MJ_API_SECRET or MAIL_FROM_EMAIL is missing, quotes will not be sent");
    }

    let quotes = QuoteServiceImpl::new(Arc::new(mailer), args.recipient_email, args.reply_to);

    let config = AppConfig {
        cors_allow_origin: args.server.cors_allow_origin.clone(),
    };

    let state = AppState::new(config, quotes);
    let address = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), args.server.port);

    match (&args.server.cert_path, &args.server.key_path) {
        (Some(cert_path), Some(key_path)) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| anyhow!("failed to install the rustls crypto provider"))?;

            info!("serving HTTPS on port {}", args.server.port);

            HttpsServer::new(address, cert_path, key_path, state)
                .await?
                .run()
                .await
        }
        _ => {
            info!("serving HTTP on port {}", args.server.port);

            HttpServer::new(address, state).await?.run().await
        }
    }
}
