//! OpenAPI module

use utoipa::OpenApi;

use crate::{
    domain::quotes::{QuoteRequest, Totals},
    infrastructure::http::{
        errors::ErrorResponse,
        handlers::send_quote,
    },
};

/// OpenAPI document for the HTTP API
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Quote Mailer"),
    paths(send_quote::handler),
    components(schemas(
        QuoteRequest,
        Totals,
        send_quote::SendQuoteResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::Value;
    use testresult::TestResult;

    use crate::infrastructure::http::{router, state::test_state};

    #[tokio::test]
    async fn test_openapi_document() -> TestResult {
        let response = TestServer::new(router(test_state(None)))?
            .get("/api/openapi.json")
            .await;

        response.assert_status_ok();

        let json = response.json::<Value>();

        assert!(json["paths"].get("/api/send-quote").is_some());
        assert!(json["components"]["schemas"].get("QuoteRequest").is_some());

        Ok(())
    }
}
