//! Application state module

use std::{fmt, sync::Arc};

use axum::http::HeaderValue;

use crate::domain::quotes::QuoteService;

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Value of the `Access-Control-Allow-Origin` response header
    pub cors_allow_origin: HeaderValue,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allow_origin: HeaderValue::from_static("*"),
        }
    }
}

/// Global application state
#[derive(Clone)]
pub struct AppState<Q: QuoteService> {
    /// The application configuration
    pub config: AppConfig,

    /// Quote notification service
    pub quotes: Arc<Q>,
}

impl<Q> AppState<Q>
where
    Q: QuoteService,
{
    /// Create a new application state
    pub fn new(config: AppConfig, quotes: Q) -> Self {
        Self {
            config,
            quotes: Arc::new(quotes),
        }
    }
}

impl<Q> fmt::Debug for AppState<Q>
where
    Q: QuoteService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("quotes", &"QuoteService")
            .finish()
    }
}

#[cfg(test)]
use crate::domain::quotes::tests::MockQuoteService;

/// State backed by a [`MockQuoteService`] and the default configuration
#[cfg(test)]
pub fn test_state(quotes: Option<MockQuoteService>) -> AppState<MockQuoteService> {
    AppState::new(AppConfig::default(), quotes.unwrap_or_default())
}

/// Like [`test_state`] with a specific allowed origin
#[cfg(test)]
pub fn test_state_with_origin(
    quotes: Option<MockQuoteService>,
    origin: &'static str,
) -> AppState<MockQuoteService> {
    let config = AppConfig {
        cors_allow_origin: HeaderValue::from_static(origin),
    };

    AppState::new(config, quotes.unwrap_or_default())
}
