//! Mailjet email service implementation (send API v3.1)

use async_trait::async_trait;
use clap::Parser;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::{Mailer, MailerError, Message},
};

/// Mailjet configuration
#[derive(Clone, Debug, Default, Parser)]
pub struct MailjetConfig {
    /// The Mailjet public API key
    #[clap(long, env = "MJ_API_KEY")]
    pub api_key: Option<String>,

    /// The Mailjet secret API key
    #[clap(long, env = "MJ_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// The verified sender email address
    #[clap(long, env = "MAIL_FROM_EMAIL")]
    pub from_email: Option<String>,

    /// The sender display name
    #[clap(long, env = "MAIL_FROM_NAME", default_value = "MrClean")]
    pub from_name: String,

    /// The Mailjet API base URL
    #[clap(long, env = "MAILJET_API_URL", default_value = "https://api.mailjet.com")]
    pub api_url: String,
}

/// Credentials and sender, present only when fully configured
#[derive(Debug)]
struct Account {
    api_key: String,
    api_secret: Secret<String>,
    from_email: String,
}

/// Mailjet mailer
#[derive(Debug)]
pub struct MailjetMailer {
    client: Client,
    account: Option<Account>,
    from_name: String,
    send_url: String,
}

impl MailjetMailer {
    /// Create a new Mailjet mailer.
    ///
    /// Missing credentials are not an error here: every send is refused with
    /// [`MailerError::NotConfigured`] until they are provided.
    pub fn new(config: MailjetConfig) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let account = match (
            non_empty(config.api_key),
            non_empty(config.api_secret),
            non_empty(config.from_email),
        ) {
            (Some(api_key), Some(api_secret), Some(from_email)) => Some(Account {
                api_key,
                api_secret: Secret::new(api_secret),
                from_email,
            }),
            _ => None,
        };

        Self {
            client: Client::new(),
            account,
            from_name: config.from_name,
            send_url: format!("{}/v3.1/send", config.api_url.trim_end_matches('/')),
        }
    }

    /// Whether credentials and a sender address are all set
    pub fn is_configured(&self) -> bool {
        self.account.is_some()
    }
}

/// A sender or recipient
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Contact<'a> {
    email: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> Contact<'a> {
    fn address(email: &'a EmailAddress) -> Self {
        Self {
            email: email.as_str(),
            name: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutboundMessage<'a> {
    from: Contact<'a>,
    to: Vec<Contact<'a>>,
    cc: Vec<Contact<'a>>,
    subject: &'a str,
    text_part: &'a str,
    #[serde(rename = "HTMLPart")]
    html_part: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Contact<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: Vec<OutboundMessage<'a>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResponse {
    #[serde(default)]
    messages: Vec<MessageResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageResult {
    status: Option<String>,
    errors: Option<Vec<MessageError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageError {
    error_message: Option<String>,
}

impl SendResponse {
    fn first(&self) -> Option<&MessageResult> {
        self.messages.first()
    }

    fn is_success(&self) -> bool {
        self.first()
            .and_then(|message| message.status.as_deref())
            .is_some_and(|status| status == "success")
    }

    fn error_message(&self) -> Option<String> {
        self.first()
            .and_then(|message| message.errors.as_ref()?.first())
            .and_then(|error| error.error_message.clone())
    }
}

#[async_trait]
impl Mailer for MailjetMailer {
    async fn send(&self, message: &Message) -> Result<(), MailerError> {
        let Some(account) = &self.account else {
            error!("Mailjet credentials or sender address are not configured");
            return Err(MailerError::NotConfigured);
        };

        let request = SendRequest {
            messages: vec![OutboundMessage {
                from: Contact {
                    email: &account.from_email,
                    name: Some(self.from_name.as_str()),
                },
                to: vec![Contact::address(&message.to)],
                cc: message.cc.iter().map(Contact::address).collect(),
                subject: &message.subject,
                text_part: &message.plain_body,
                html_part: &message.html_body,
                reply_to: message.reply_to.as_ref().map(Contact::address),
            }],
        };

        let response = self
            .client
            .post(&self.send_url)
            .basic_auth(&account.api_key, Some(account.api_secret.expose_secret()))
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "Mailjet request failed");
                MailerError::Transport(err.into())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| MailerError::Transport(err.into()))?;

        debug!(status = %status, body = %body, "Mailjet send response");

        let detail = serde_json::from_str::<Value>(&body).ok();
        let parsed = detail
            .clone()
            .and_then(|value| serde_json::from_value::<SendResponse>(value).ok())
            .unwrap_or_default();

        if !status.is_success() || !parsed.is_success() {
            let reason = parsed.error_message();

            warn!(
                status = %status,
                error = reason.as_deref().unwrap_or("none"),
                "Mailjet did not accept the message"
            );

            return Err(MailerError::Rejected {
                message: reason,
                detail,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        matchers::{header_exists, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn config(api_url: &str) -> MailjetConfig {
        MailjetConfig {
            api_key: Some("public-key".to_string()),
            api_secret: Some("secret-key".to_string()),
            from_email: Some("no-reply@example.com".to_string()),
            from_name: "MrClean".to_string(),
            api_url: api_url.to_string(),
        }
    }

    fn message() -> Message {
        Message {
            to: EmailAddress::new("client@example.com").expect("valid email"),
            cc: Some(EmailAddress::new("equipe@example.com").expect("valid email")),
            reply_to: None,
            subject: "Confirmation de devis — MrClean".to_string(),
            html_body: "<p>Bonjour</p>".to_string(),
            plain_body: "Bonjour".to_string(),
        }
    }

    fn success_body() -> Value {
        json!({ "Messages": [{ "Status": "success", "To": [{ "Email": "client@example.com" }] }] })
    }

    #[tokio::test]
    async fn test_send_success() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3.1/send"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        MailjetMailer::new(config(&server.uri()))
            .send(&message())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_payload() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3.1/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let mut message = message();
        message.reply_to = Some(EmailAddress::new("contact@example.com")?);

        MailjetMailer::new(config(&server.uri()))
            .send(&message)
            .await?;

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);

        let payload: Value = serde_json::from_slice(&requests[0].body)?;

        assert_eq!(
            payload,
            json!({
                "Messages": [{
                    "From": { "Email": "no-reply@example.com", "Name": "MrClean" },
                    "To": [{ "Email": "client@example.com" }],
                    "Cc": [{ "Email": "equipe@example.com" }],
                    "Subject": "Confirmation de devis — MrClean",
                    "TextPart": "Bonjour",
                    "HTMLPart": "<p>Bonjour</p>",
                    "ReplyTo": { "Email": "contact@example.com" }
                }]
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_without_copy_has_empty_cc() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let mut message = message();
        message.cc = None;

        MailjetMailer::new(config(&server.uri()))
            .send(&message)
            .await?;

        let requests = server.received_requests().await.unwrap_or_default();
        let payload: Value = serde_json::from_slice(&requests[0].body)?;

        assert_eq!(payload["Messages"][0]["Cc"], json!([]));
        assert!(payload["Messages"][0].get("ReplyTo").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_send_error_status() {
        let server = MockServer::start().await;

        let body = json!({
            "Messages": [{
                "Status": "error",
                "Errors": [{ "ErrorMessage": "Sender not validated", "StatusCode": 400 }]
            }]
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let result = MailjetMailer::new(config(&server.uri()))
            .send(&message())
            .await;

        match result {
            Err(MailerError::Rejected { message, detail }) => {
                assert_eq!(message.as_deref(), Some("Sender not validated"));
                assert_eq!(detail, Some(body));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let result = MailjetMailer::new(config(&server.uri()))
            .send(&message())
            .await;

        match result {
            Err(MailerError::Rejected { message, detail }) => {
                assert_eq!(message, None);
                assert_eq!(detail, None);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_http_error_with_success_body_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(success_body()))
            .mount(&server)
            .await;

        let result = MailjetMailer::new(config(&server.uri()))
            .send(&message())
            .await;

        assert!(matches!(result, Err(MailerError::Rejected { .. })));
    }

    #[tokio::test]
    async fn test_send_unreachable_provider() {
        let result = MailjetMailer::new(config("http://127.0.0.1:1"))
            .send(&message())
            .await;

        assert!(matches!(result, Err(MailerError::Transport(_))));
    }

    #[tokio::test]
    async fn test_not_configured_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = config(&server.uri());
        config.api_secret = Some("  ".to_string());

        let mailer = MailjetMailer::new(config);
        assert!(!mailer.is_configured());

        let result = mailer.send(&message()).await;

        assert!(matches!(result, Err(MailerError::NotConfigured)));
    }
}
