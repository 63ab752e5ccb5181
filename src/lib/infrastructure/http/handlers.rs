//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::error;
use utoipa::OpenApi;

use crate::domain::quotes::QuoteService;

use super::{
    errors::{ErrorResponse, GENERIC_SERVER_ERROR},
    open_api::ApiDocs,
    state::AppState,
};

pub mod send_quote;

/// Routes served under `/api`
pub fn router<Q: QuoteService>() -> Router<AppState<Q>> {
    Router::new()
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route(
            "/send-quote",
            post(send_quote::handler)
                .options(send_quote::preflight)
                .fallback(send_quote::method_not_allowed),
        )
}

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        GENERIC_SERVER_ERROR.to_string()
    };

    error!("send-quote error: {details}");

    let error = ErrorResponse::new(&details);

    (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
}
