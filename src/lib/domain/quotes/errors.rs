//! Error types for quote notifications

use thiserror::Error;

use crate::domain::communication::{email_addresses::EmailAddressError, mailer::MailerError};

/// Errors that can occur when sending a quote notification
#[derive(Debug, Error)]
pub enum SendQuoteError {
    /// The client's email address is missing or malformed
    #[error("invalid client email: {0}")]
    InvalidClientEmail(#[from] EmailAddressError),

    /// The HTML body could not be rendered
    #[error("failed to render the email: {0}")]
    Render(#[from] askama::Error),

    /// The mailer could not deliver the notification
    #[error(transparent)]
    Mailer(#[from] MailerError),
}
