//! Quote source trait and structured error types.
//!
//! The QuoteSource trait abstracts over where intraday prices come from (Yahoo
//! Finance in production, scripted in-memory sources in tests) so the fetch
//! pipeline never depends on a concrete provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One intraday price point as reported by a quote source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, open: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            close,
        }
    }
}

/// Structured error types for quote retrieval.
///
/// These end up in `RecordStatus::FetchError` and in the log, never in a panic.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: quote provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("http client setup failed: {0}")]
    Client(String),

    #[error("quote error: {0}")]
    Other(String),
}

/// Trait for intraday quote providers.
///
/// `fetch` returns the current session's series, oldest point first. An empty
/// series is a valid answer (market closed, no trades yet) and is not an error.
pub trait QuoteSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch today's intraday series for `symbol`.
    fn fetch(&self, symbol: &str) -> Result<Vec<PricePoint>, QuoteError>;
}
