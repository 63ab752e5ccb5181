//! Mailer errors

use serde_json::Value;
use thiserror::Error;

/// Fallback message when the provider gives no reason for a failed send
pub const DEFAULT_REJECTION_MESSAGE: &str = "Échec Mailjet";

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// Credentials or sender address are missing from the deployment
    #[error("Configuration Mailjet manquante (MJ_API_KEY, MJ_API_SECRET, MAIL_FROM_EMAIL).")]
    NotConfigured,

    /// The provider answered but did not accept the message
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_REJECTION_MESSAGE))]
    Rejected {
        /// The provider's error message, if it gave one
        message: Option<String>,

        /// The provider's raw response body
        detail: Option<Value>,
    },

    /// The provider could not be reached
    #[error("Échec de l'appel Mailjet: {0}")]
    Transport(#[source] anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_rejected_uses_provider_message() {
        let err = MailerError::Rejected {
            message: Some("Invalid sender".to_string()),
            detail: Some(json!({ "Messages": [] })),
        };

        assert_eq!(err.to_string(), "Invalid sender");
    }

    #[test]
    fn test_rejected_falls_back_to_default_message() {
        let err = MailerError::Rejected {
            message: None,
            detail: None,
        };

        assert_eq!(err.to_string(), DEFAULT_REJECTION_MESSAGE);
    }
}
