//! Yahoo Finance quote source.
//!
//! Fetches the current session's one-minute bars from Yahoo's v8 chart API.
//! Handles retries with exponential backoff, response parsing, and the circuit
//! breaker.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; anything we cannot parse becomes `QuoteError::ResponseFormatChanged`
//! and shows up as a fetch error on that row only.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{PricePoint, QuoteError, QuoteSource};
use crate::config::ProviderConfig;
use chrono::DateTime;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance intraday quote source.
pub struct YahooQuoteSource {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooQuoteSource {
    pub fn new(
        config: &ProviderConfig,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, QuoteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| QuoteError::Client(e.to_string()))?;

        Ok(Self {
            client,
            circuit_breaker,
            base_url: CHART_BASE_URL.to_string(),
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        })
    }

    /// Build the chart API URL for today's one-minute series.
    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/{symbol}?range=1d&interval=1m", self.base_url)
    }

    /// Parse the chart API response into price points, oldest first.
    ///
    /// A result without timestamps means the session has no trades yet and maps
    /// to an empty series. Points where either open or close is null are
    /// skipped; Yahoo emits those for minutes without trades.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PricePoint>, QuoteError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    QuoteError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    QuoteError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                QuoteError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("result array is empty".into()))?;

        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let open = quote.open.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let (Some(open), Some(close)) = (open, close) else {
                continue;
            };

            let timestamp = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                QuoteError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;
            points.push(PricePoint::new(timestamp, open, close));
        }

        Ok(points)
    }

    /// Execute the HTTP request with retry and circuit breaker logic.
    fn fetch_with_retry(&self, symbol: &str) -> Result<Vec<PricePoint>, QuoteError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(QuoteError::CircuitBreakerTripped);
        }

        let url = self.chart_url(symbol);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(QuoteError::CircuitBreakerTripped);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        // IP ban — immediately trip the circuit breaker
                        self.circuit_breaker.trip();
                        return Err(QuoteError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(QuoteError::SymbolNotFound {
                            symbol: symbol.to_string(),
                        });
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(QuoteError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status.is_client_error() {
                        return Err(QuoteError::Other(format!("HTTP {status} for {symbol}")));
                    }

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(QuoteError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let chart: ChartResponse = resp.json().map_err(|e| {
                        QuoteError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;

                    let points = Self::parse_response(symbol, chart)?;
                    self.circuit_breaker.record_success();
                    return Ok(points);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(QuoteError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(QuoteError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| QuoteError::Other("max retries exceeded".into())))
    }
}

impl QuoteSource for YahooQuoteSource {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<PricePoint>, QuoteError> {
        self.fetch_with_retry(symbol)
    }
}
