//! Quote and booking notifications.
//!
//! A visitor fills in the simulator form, the resulting [`QuoteRequest`] is
//! validated and rendered into a [`QuoteEmail`], and the email is handed to a
//! [`Mailer`](crate::domain::communication::mailer::Mailer) exactly once.

mod display;
mod email;
mod errors;
mod request;
mod service;

pub use display::{list_or_dash, value_or_dash, PLACEHOLDER};
pub use email::{QuoteEmail, QuoteEmailTemplate};
pub use errors::SendQuoteError;
pub use request::{ActionType, FieldValue, QuoteRequest, Totals};
pub use service::{QuoteService, QuoteServiceImpl};
