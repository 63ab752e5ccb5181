//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// Email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The recipient of the email
    pub to: EmailAddress,

    /// Internal recipient copied on the email
    pub cc: Option<EmailAddress>,

    /// Address replies should go to
    pub reply_to: Option<EmailAddress>,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,

    /// The plain text body of the email
    pub plain_body: String,
}
