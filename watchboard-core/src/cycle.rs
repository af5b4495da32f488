//! One full refresh of the watch-list.
//!
//! Every symbol is fetched concurrently on a private rayon pool (not the
//! global one). Results are collected by index, so the snapshot follows
//! watch-list order no matter which fetch finishes first. Failures stay on
//! their own row.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;

use crate::data::provider::QuoteSource;
use crate::metrics::{self, MetricsError};
use crate::snapshot::{Generation, InstrumentRecord, Snapshot, StatusKind};

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed(Snapshot),
    /// A newer cycle started before this one finished; nothing to publish.
    Superseded(Generation),
}

/// A single refresh of every watch-list symbol.
pub struct FetchCycle {
    generation: Generation,
    symbols: Arc<[String]>,
    source: Arc<dyn QuoteSource>,
    max_concurrency: usize,
}

impl FetchCycle {
    pub fn new(
        generation: Generation,
        symbols: Arc<[String]>,
        source: Arc<dyn QuoteSource>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            generation,
            symbols,
            source,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Run the cycle, checking `still_current` before each fetch and once at the end.
    ///
    /// Fetches that have not started when the cycle goes stale are skipped.
    /// Fetches already in flight run to completion and their results are dropped.
    pub fn run<F>(&self, still_current: F) -> CycleOutcome
    where
        F: Fn() -> bool + Sync,
    {
        let started = Instant::now();
        let results = self.fetch_all(|symbol| still_current().then(|| self.fetch_one(symbol)));

        if !still_current() {
            log::debug!("cycle {} superseded after {:?}", self.generation, started.elapsed());
            return CycleOutcome::Superseded(self.generation);
        }

        let records: Option<Vec<InstrumentRecord>> = results.into_iter().collect();
        match records {
            Some(records) => CycleOutcome::Completed(self.finish(records, started)),
            None => CycleOutcome::Superseded(self.generation),
        }
    }

    /// Run without any supersession check (one-shot use).
    pub fn run_to_completion(&self) -> Snapshot {
        let started = Instant::now();
        let records = self.fetch_all(|symbol| self.fetch_one(symbol));
        self.finish(records, started)
    }

    /// Apply `fetch` to every symbol on a private pool, keeping watch-list order.
    fn fetch_all<T, F>(&self, fetch: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&String) -> T + Sync + Send,
    {
        log::debug!(
            "cycle {} started: {} symbols via {}",
            self.generation,
            self.symbols.len(),
            self.source.name()
        );

        let threads = self.symbols.len().clamp(1, self.max_concurrency);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("watchboard-fetch-{i}"))
            .build();

        match pool {
            Ok(pool) => pool.install(|| self.symbols.par_iter().map(&fetch).collect()),
            Err(e) => {
                log::warn!("fetch pool unavailable ({e}), fetching sequentially");
                self.symbols.iter().map(&fetch).collect()
            }
        }
    }

    fn finish(&self, records: Vec<InstrumentRecord>, started: Instant) -> Snapshot {
        let snapshot = Snapshot::new(self.generation, Utc::now(), records);
        log::info!(
            "cycle {} finished in {:?}: {} ok, {} no data, {} errors",
            self.generation,
            started.elapsed(),
            snapshot.count(StatusKind::Ok),
            snapshot.count(StatusKind::NoData),
            snapshot.count(StatusKind::FetchError),
        );
        snapshot
    }

    fn fetch_one(&self, symbol: &str) -> InstrumentRecord {
        let fetched = panic::catch_unwind(AssertUnwindSafe(|| self.source.fetch(symbol)));

        match fetched {
            Ok(Ok(series)) => match metrics::compute(&series) {
                Ok(m) => InstrumentRecord::ok(symbol, m),
                Err(MetricsError::EmptySeries) => InstrumentRecord::no_data(symbol),
                Err(e) => {
                    log::warn!("{symbol}: unusable series: {e}");
                    InstrumentRecord::fetch_error(symbol, e.to_string())
                }
            },
            Ok(Err(e)) => {
                log::warn!("{symbol}: fetch failed: {e}");
                InstrumentRecord::fetch_error(symbol, e.to_string())
            }
            Err(_) => {
                log::error!("{symbol}: quote source panicked");
                InstrumentRecord::fetch_error(symbol, "quote source panicked")
            }
        }
    }
}
