//! Outbound communication: email addresses and the mailer abstraction

pub mod email_addresses;
pub mod mailer;
