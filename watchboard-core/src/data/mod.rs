//! Quote retrieval: the source trait, the Yahoo Finance provider, and its
//! circuit breaker.

pub mod circuit_breaker;
pub mod provider;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use provider::{PricePoint, QuoteError, QuoteSource};
pub use yahoo::YahooQuoteSource;
