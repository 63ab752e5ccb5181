//! Rendering of the confirmation email

use askama::Template;

use super::{
    display::{list_or_dash, value_or_dash},
    request::{FieldValue, QuoteRequest, Totals},
};

const SIGNATURE: &str = "Cet e-mail a été envoyé automatiquement par notre simulateur.";

/// The rendered confirmation email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteEmail {
    /// Subject line
    pub subject: String,

    /// Plain text body
    pub plain: String,

    /// HTML body
    pub html: String,
}

/// Quote confirmation template
#[derive(Debug, Template)]
#[template(path = "emails/quotes/confirmation.html")]
pub struct QuoteEmailTemplate {
    /// Subject line, repeated as the heading
    pub subject: String,

    /// How the request is named in the copy
    pub label: &'static str,

    /// Spaces to clean
    pub spaces: String,

    /// Days per week
    pub days_per_week: String,

    /// Hours per day
    pub hours_per_day: String,

    /// City or postal code
    pub postal_city: String,

    /// Estimated amount
    pub estimate: String,

    /// Total per week
    pub week: String,

    /// Total per month
    pub month: String,

    /// Closing line
    pub signature: &'static str,
}

impl QuoteEmailTemplate {
    /// Creates a new `QuoteEmailTemplate` with placeholders for missing values
    pub fn new(subject: &str, request: &QuoteRequest) -> Self {
        let Totals {
            estimate_eur_text,
            week_eur_text,
            month_eur_text,
        } = request.totals.clone().unwrap_or_default();

        Self {
            subject: subject.to_string(),
            label: request.action_type().label(),
            spaces: list_or_dash(&request.spaces),
            days_per_week: value_or_dash(request.days_per_week.as_ref()),
            hours_per_day: value_or_dash(request.hours_per_day.as_ref()),
            postal_city: value_or_dash(request.postal_city.as_ref()),
            estimate: value_or_dash(estimate_eur_text.as_ref()),
            week: value_or_dash(week_eur_text.as_ref()),
            month: value_or_dash(month_eur_text.as_ref()),
            signature: SIGNATURE,
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        [
            "Bonjour,".to_string(),
            String::new(),
            format!("Merci pour votre {}.", self.label),
            "Voici votre récapitulatif :".to_string(),
            String::new(),
            format!("Espaces : {}", self.spaces),
            format!("Jours/semaine : {}", self.days_per_week),
            format!("Heures/jour : {}", self.hours_per_day),
            format!("Ville/CP : {}", self.postal_city),
            String::new(),
            format!("Montant estimé : {}", self.estimate),
            format!("Total TTC / semaine : {}", self.week),
            format!("Total TTC / mois : {}", self.month),
            String::new(),
            "—".to_string(),
            self.signature.to_string(),
        ]
        .join("\n")
    }
}

impl QuoteEmail {
    /// Renders the email for a request, honouring any subject, summary or HTML
    /// override it carries.
    pub fn render(request: &QuoteRequest) -> Result<Self, askama::Error> {
        // A subject override is used as given, whitespace included.
        let subject = request
            .subject
            .as_ref()
            .and_then(FieldValue::non_empty)
            .unwrap_or_else(|| request.action_type().default_subject().to_string());

        let template = QuoteEmailTemplate::new(&subject, request);

        let plain = request
            .summary
            .as_ref()
            .and_then(FieldValue::non_blank)
            .unwrap_or_else(|| template.render_plain());

        // An HTML override is sent exactly as provided.
        let html = match &request.html {
            Some(FieldValue::Text(html)) if !html.trim().is_empty() => html.clone(),
            _ => template.render()?,
        };

        Ok(Self {
            subject,
            plain,
            html,
        })
    }
}
