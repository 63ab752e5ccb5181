//! Mailer module

mod errors;
mod message;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::Message;

/// Sends transactional email through an external provider
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a single message.
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver.
    ///
    /// # Returns
    /// [`Ok`] once the provider has accepted the message, or a [`MailerError`]
    /// describing why it was not sent. Implementations make at most one
    /// delivery attempt.
    async fn send(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &Message) -> Result<(), MailerError>;
    }
}
