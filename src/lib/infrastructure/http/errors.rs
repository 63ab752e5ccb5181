//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{communication::mailer::MailerError, quotes::SendQuoteError};

/// Message returned for an invalid client email address
pub const INVALID_CLIENT_EMAIL: &str = "Adresse e-mail client invalide.";

/// Message returned when an unexpected error has no message of its own
pub const GENERIC_SERVER_ERROR: &str = "Erreur serveur";

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub ok: bool,

    /// The error message
    #[schema(example = "Adresse e-mail client invalide.")]
    pub error: String,

    /// The email provider's raw response, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// Create a new error response body
    pub fn new(error: &str) -> Self {
        Self {
            ok: false,
            error: error.to_string(),
            detail: None,
        }
    }
}

/// An error raised in the API
#[derive(Debug)]
pub struct ApiError {
    /// The status code
    pub status: StatusCode,

    /// The error message
    pub message: String,

    /// Upstream response attached to the error
    pub detail: Option<Value>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail: None,
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a new method not allowed error
    pub fn new_405(message: &str) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Create a new bad gateway error
    pub fn new_502(message: &str, detail: Option<Value>) -> Self {
        Self {
            detail,
            ..Self::new(StatusCode::BAD_GATEWAY, message)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                ok: false,
                error: self.message,
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        unknown_error(&err)
    }
}

impl From<SendQuoteError> for ApiError {
    fn from(err: SendQuoteError) -> Self {
        match err {
            SendQuoteError::InvalidClientEmail(_) => ApiError::new_400(INVALID_CLIENT_EMAIL),
            SendQuoteError::Render(err) => unknown_error(&anyhow::Error::new(err)),
            SendQuoteError::Mailer(err) => err.into(),
        }
    }
}

impl From<MailerError> for ApiError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::NotConfigured => ApiError::new_500(&err.to_string()),
            MailerError::Rejected { ref detail, .. } => {
                ApiError::new_502(&err.to_string(), detail.clone())
            }
            MailerError::Transport(_) => ApiError::new_502(&err.to_string(), None),
            MailerError::UnknownError(err) => unknown_error(&err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new_400(&rejection.body_text())
    }
}

fn unknown_error(err: &anyhow::Error) -> ApiError {
    error!("send-quote error: {err:?}");

    let message = err.to_string();

    if message.is_empty() {
        ApiError::new_500(GENERIC_SERVER_ERROR)
    } else {
        ApiError::new_500(&message)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::domain::communication::email_addresses::EmailAddressError;

    #[tokio::test]
    async fn test_error_response() -> TestResult {
        let error = ApiError::new_500("Erreur serveur");

        let response = error.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, r#"{"ok":false,"error":"Erreur serveur"}"#);

        Ok(())
    }

    #[tokio::test]
    async fn test_error_response_with_detail() -> TestResult {
        let error = ApiError::new_502("Échec Mailjet", Some(json!({ "Messages": [] })));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: Value = serde_json::from_slice(&body)?;

        assert_eq!(
            json,
            json!({ "ok": false, "error": "Échec Mailjet", "detail": { "Messages": [] } })
        );

        Ok(())
    }

    #[test]
    fn test_api_error_from_error() {
        let error = anyhow!("Internal server error");
        let api_error = ApiError::from(error);

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, "Internal server error");
    }

    #[test]
    fn test_invalid_email_is_bad_request() {
        let api_error = ApiError::from(SendQuoteError::InvalidClientEmail(
            EmailAddressError::InvalidEmailAddress,
        ));

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.message, INVALID_CLIENT_EMAIL);
    }

    #[test]
    fn test_render_failure_is_server_error() {
        let api_error = ApiError::from(SendQuoteError::Render(askama::Error::Fmt(fmt::Error)));

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_error.message.starts_with("failed to render the email"));
    }

    #[test]
    fn test_missing_configuration_is_server_error() {
        let api_error = ApiError::from(SendQuoteError::Mailer(MailerError::NotConfigured));

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_error.message.contains("MJ_API_KEY"));
    }

    #[test]
    fn test_rejection_is_bad_gateway() {
        let api_error = ApiError::from(MailerError::Rejected {
            message: Some("Invalid recipient".to_string()),
            detail: Some(json!({ "Messages": [{ "Status": "error" }] })),
        });

        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api_error.message, "Invalid recipient");
        assert!(api_error.detail.is_some());
    }

    #[test]
    fn test_transport_failure_is_bad_gateway() {
        let api_error = ApiError::from(MailerError::Transport(anyhow!("connection refused")));

        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert!(api_error.message.contains("connection refused"));
    }
}
