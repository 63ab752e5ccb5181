//! Quote notification service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Mailer, Message},
};

use super::{QuoteEmail, QuoteRequest, SendQuoteError};

/// Quote notification service
#[async_trait]
pub trait QuoteService: Clone + Send + Sync + 'static {
    /// Validates the request, renders the confirmation email and sends it to
    /// the client.
    ///
    /// # Arguments
    /// * `request` - The [`QuoteRequest`] submitted by the form.
    ///
    /// # Returns
    /// [`Ok`] once the mailer has accepted the email, or a [`SendQuoteError`]
    /// if the request is invalid or the email could not be sent. Nothing is
    /// sent when the client's address is invalid.
    async fn send_quote(&self, request: QuoteRequest) -> Result<(), SendQuoteError>;
}

#[cfg(test)]
mock! {
    pub QuoteService {}

    impl Clone for QuoteService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl QuoteService for QuoteService {
        async fn send_quote(&self, request: QuoteRequest) -> Result<(), SendQuoteError>;
    }
}

/// Quote notification service implementation
#[derive(Debug)]
pub struct QuoteServiceImpl<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    copy_to: Option<EmailAddress>,
    reply_to: Option<EmailAddress>,
}

impl<M: Mailer> Clone for QuoteServiceImpl<M> {
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            copy_to: self.copy_to.clone(),
            reply_to: self.reply_to.clone(),
        }
    }
}

impl<M> QuoteServiceImpl<M>
where
    M: Mailer,
{
    /// Creates a new quote service.
    ///
    /// `copy_to` receives a copy of every notification and `reply_to` is where
    /// the client's replies are directed.
    pub fn new(
        mailer: Arc<M>,
        copy_to: Option<EmailAddress>,
        reply_to: Option<EmailAddress>,
    ) -> Self {
        Self {
            mailer,
            copy_to,
            reply_to,
        }
    }
}

#[async_trait]
impl<M> QuoteService for QuoteServiceImpl<M>
where
    M: Mailer,
{
    async fn send_quote(&self, request: QuoteRequest) -> Result<(), SendQuoteError> {
        let to = request.client_email()?;
        let email = QuoteEmail::render(&request)?;

        let message = Message {
            to,
            cc: self.copy_to.clone(),
            reply_to: self.reply_to.clone(),
            subject: email.subject,
            html_body: email.html,
            plain_body: email.plain,
        };

        self.mailer.send(&message).await?;

        info!(action = ?request.action_type(), "quote notification sent");

        Ok(())
    }
}
