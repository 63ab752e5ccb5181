//! Send quote handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::ALLOW, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::quotes::{QuoteRequest, QuoteService},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
        ALLOWED_METHODS,
    },
};

/// Send quote response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendQuoteResponse {
    /// Always `true`
    #[schema(example = true)]
    pub ok: bool,
}

/// Email the client a summary of their quote or booking request
#[utoipa::path(
    post,
    operation_id = "send_quote",
    tag = "Quotes",
    path = "/api/send-quote",
    request_body = QuoteRequest,
    responses(
        (status = StatusCode::OK, description = "Email sent", body = SendQuoteResponse),
        (status = StatusCode::BAD_REQUEST, description = "Invalid client email", body = ErrorResponse, example = json!({ "ok": false, "error": "Adresse e-mail client invalide." })),
        (status = StatusCode::METHOD_NOT_ALLOWED, description = "Method not allowed", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Missing configuration or unexpected error", body = ErrorResponse),
        (status = StatusCode::BAD_GATEWAY, description = "The email provider did not accept the email", body = ErrorResponse, example = json!({ "ok": false, "error": "Échec Mailjet", "detail": { "Messages": [{ "Status": "error" }] } })),
    )
)]
pub async fn handler<Q: QuoteService>(
    State(state): State<AppState<Q>>,
    request: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<SendQuoteResponse>, ApiError> {
    let Json(request) = request?;

    state.quotes.send_quote(request).await?;

    Ok(Json(SendQuoteResponse { ok: true }))
}

/// Answer CORS preflight requests
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Reject every method other than `POST` and `OPTIONS`
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        [(ALLOW, ALLOWED_METHODS)],
        ApiError::new_405("Method not allowed"),
    )
}
