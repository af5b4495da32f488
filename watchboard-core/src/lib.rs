//! Watchboard Core — the refresh pipeline behind the terminal dashboard.
//!
//! - Quote sources (Yahoo Finance, circuit breaker) behind the `QuoteSource` trait
//! - Session metrics (open, last, absolute and percent change)
//! - Fetch cycles: concurrent per-symbol fetches joined into one snapshot
//! - State publication: the published snapshot, the loading flag, change notifications
//! - Scheduling: fixed cadence with single-flight supersession by generation
//! - Configuration loaded from TOML

pub mod config;
pub mod cycle;
pub mod data;
pub mod metrics;
pub mod publisher;
pub mod scheduler;
pub mod snapshot;

pub use config::{ConfigError, ProviderConfig, WatchConfig};
pub use cycle::{CycleOutcome, FetchCycle};
pub use data::{CircuitBreaker, PricePoint, QuoteError, QuoteSource, YahooQuoteSource};
pub use metrics::MetricsError;
pub use publisher::{PublishError, RefreshState, StatePublisher};
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerError};
pub use snapshot::{Generation, InstrumentRecord, Metrics, RecordStatus, Snapshot, StatusKind};
