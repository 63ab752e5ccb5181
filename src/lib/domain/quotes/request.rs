//! Quote request submitted by the simulator form

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use utoipa::ToSchema;

use crate::domain::communication::email_addresses::{EmailAddress, EmailAddressError};

/// A scalar form value.
///
/// The form sends numbers and strings interchangeably, so both are accepted and
/// only ever used for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A string value
    Text(String),

    /// A numeric value
    Number(Number),

    /// A boolean value
    Flag(bool),
}

impl FieldValue {
    /// Returns the trimmed display text, or [`None`] when it is blank.
    pub fn non_blank(&self) -> Option<String> {
        let text = self.to_string();
        let trimmed = text.trim();

        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Returns the display text untouched, or [`None`] when the value is empty,
    /// zero or `false`.
    pub fn non_empty(&self) -> Option<String> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Number(number) if number.as_f64() == Some(0.0) => None,
            Self::Flag(false) => None,
            _ => Some(self.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(number) => match number.as_f64() {
                // `3.0`, `1e2` and `-0.0` display as `3`, `100` and `0`
                Some(float) if number.is_f64() && float.fract() == 0.0 => {
                    write!(f, "{}", float + 0.0)
                }
                _ => write!(f, "{number}"),
            },
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// What the visitor asked for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// A quote ("devis")
    #[default]
    Devis,

    /// A booked time slot ("créneau")
    Creneau,
}

impl From<String> for ActionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "creneau" => Self::Creneau,
            _ => Self::Devis,
        }
    }
}

impl ActionType {
    /// Subject used when the request does not provide one
    pub fn default_subject(&self) -> &'static str {
        match self {
            Self::Devis => "Confirmation de devis — MrClean",
            Self::Creneau => "Confirmation de réservation — MrClean",
        }
    }

    /// How the request is named in the email copy
    pub fn label(&self) -> &'static str {
        match self {
            Self::Devis => "demande de devis",
            Self::Creneau => "réservation de créneau",
        }
    }
}

/// Amounts computed by the simulator, already formatted for display
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Totals {
    /// Estimated amount
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>, example = "120,00 €")]
    pub estimate_eur_text: Option<FieldValue>,

    /// Total including tax per week
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>, example = "144,00 €")]
    pub week_eur_text: Option<FieldValue>,

    /// Total including tax per month
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>, example = "624,00 €")]
    pub month_eur_text: Option<FieldValue>,
}

/// A quote or booking request
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    /// The visitor's email address
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = String, example = "client@example.com")]
    pub client_email: Option<FieldValue>,

    /// Subject override
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>)]
    pub subject: Option<FieldValue>,

    /// Plain text body override
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<FieldValue>,

    /// HTML body override
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>)]
    pub html: Option<FieldValue>,

    /// `devis` or `creneau`, defaults to `devis`
    #[serde(default, deserialize_with = "deserialize_action_type")]
    #[schema(value_type = Option<String>, example = "devis")]
    pub action_type: Option<ActionType>,

    /// Spaces to clean
    #[serde(default, deserialize_with = "deserialize_spaces")]
    #[schema(value_type = Vec<String>, example = json!(["Bureaux", "Sanitaires"]))]
    pub spaces: Vec<FieldValue>,

    /// Days per week
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>, example = "3")]
    pub days_per_week: Option<FieldValue>,

    /// Hours per day
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>, example = "2")]
    pub hours_per_day: Option<FieldValue>,

    /// City or postal code
    #[serde(default, deserialize_with = "deserialize_scalar")]
    #[schema(value_type = Option<String>, example = "75011 Paris")]
    pub postal_city: Option<FieldValue>,

    /// Computed totals
    #[serde(default, deserialize_with = "deserialize_totals")]
    pub totals: Option<Totals>,
}

impl QuoteRequest {
    /// Validates and returns the client's email address.
    ///
    /// Only a JSON string is accepted; numbers and booleans are rejected as
    /// invalid rather than coerced.
    pub fn client_email(&self) -> Result<EmailAddress, EmailAddressError> {
        match &self.client_email {
            Some(FieldValue::Text(raw)) => EmailAddress::new(raw),
            Some(_) => Err(EmailAddressError::InvalidEmailAddress),
            None => Err(EmailAddressError::EmptyEmailAddress),
        }
    }

    /// The requested action, `devis` when absent
    pub fn action_type(&self) -> ActionType {
        self.action_type.unwrap_or_default()
    }
}

/// Keeps scalar values; objects and arrays count as absent.
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Anything but the string `creneau` is a quote.
fn deserialize_action_type<'de, D>(deserializer: D) -> Result<Option<ActionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(ActionType::from(raw)),
        Some(_) => Some(ActionType::Devis),
    })
}

/// Totals given as anything other than an object are ignored.
fn deserialize_totals<'de, D>(deserializer: D) -> Result<Option<Totals>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(totals @ Value::Object(_)) => serde_json::from_value(totals).ok(),
        _ => None,
    })
}

/// Accepts any JSON for `spaces`: arrays keep their scalar items, anything
/// else counts as no spaces at all.
fn deserialize_spaces<'de, D>(deserializer: D) -> Result<Vec<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
