//! Refresh cadence and single-flight supervision.
//!
//! The scheduler thread owns the timer. Each trigger asks the publisher for a
//! fresh generation and hands the cycle to its own thread, so a slow provider
//! never delays the next trigger. Whichever cycle holds the newest generation
//! is the only one allowed to publish; older ones are dropped on arrival.
//!
//! Communication with the scheduler thread is via an `mpsc` channel.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::WatchConfig;
use crate::cycle::{CycleOutcome, FetchCycle};
use crate::data::provider::QuoteSource;
use crate::publisher::StatePublisher;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Commands sent to the scheduler thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Trigger a cycle now and restart the cadence from here.
    RefreshNow,
    Shutdown,
}

/// What the scheduler needs from the configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub symbols: Arc<[String]>,
    pub max_concurrency: usize,
}

impl SchedulerConfig {
    pub fn from_watch_config(config: &WatchConfig) -> Self {
        Self {
            interval: config.refresh_interval(),
            symbols: config.watchlist.iter().cloned().collect(),
            max_concurrency: config.max_concurrency,
        }
    }
}

/// Handle to the running scheduler thread.
///
/// Dropping the handle stops the scheduler.
pub struct Scheduler {
    cmd_tx: Sender<SchedulerCommand>,
    handle: Option<JoinHandle<()>>,
    publisher: Arc<StatePublisher>,
}

impl Scheduler {
    /// Spawn the scheduler thread. The first cycle is triggered immediately.
    pub fn start(
        config: SchedulerConfig,
        source: Arc<dyn QuoteSource>,
        publisher: Arc<StatePublisher>,
    ) -> Result<Self, SchedulerError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let loop_publisher = Arc::clone(&publisher);

        log::info!(
            "scheduler starting: {} symbols every {:?}",
            config.symbols.len(),
            config.interval
        );

        let handle = thread::Builder::new()
            .name("watchboard-scheduler".into())
            .spawn(move || {
                let mut next_due = trigger(&config, &source, &loop_publisher);
                loop {
                    let wait = next_due.saturating_duration_since(Instant::now());
                    match cmd_rx.recv_timeout(wait) {
                        Ok(SchedulerCommand::RefreshNow) | Err(RecvTimeoutError::Timeout) => {
                            next_due = trigger(&config, &source, &loop_publisher);
                        }
                        Ok(SchedulerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                            break;
                        }
                    }
                }
                log::info!("scheduler stopped");
            })?;

        Ok(Self {
            cmd_tx,
            handle: Some(handle),
            publisher,
        })
    }

    /// Trigger a cycle now, superseding any cycle in flight.
    pub fn refresh_now(&self) {
        let _ = self.cmd_tx.send(SchedulerCommand::RefreshNow);
    }

    /// Stop triggering and abandon any in-flight cycle.
    ///
    /// Safe to call more than once. The published snapshot is left intact.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let _ = self.cmd_tx.send(SchedulerCommand::Shutdown);
        if handle.join().is_err() {
            log::error!("scheduler thread panicked");
        }
        self.publisher.abandon();
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start one cycle on its own thread and return the trigger time plus interval.
fn trigger(
    config: &SchedulerConfig,
    source: &Arc<dyn QuoteSource>,
    publisher: &Arc<StatePublisher>,
) -> Instant {
    let triggered_at = Instant::now();
    let generation = publisher.begin_cycle();
    let cycle = FetchCycle::new(
        generation,
        Arc::clone(&config.symbols),
        Arc::clone(source),
        config.max_concurrency,
    );
    let cycle_publisher = Arc::clone(publisher);

    let spawned = thread::Builder::new()
        .name(format!("watchboard-cycle-{}", generation.0))
        .spawn(move || {
            match cycle.run(|| cycle_publisher.is_current(generation)) {
                CycleOutcome::Completed(snapshot) => {
                    if let Err(e) = cycle_publisher.publish(snapshot) {
                        log::debug!("dropping result: {e}");
                    }
                }
                CycleOutcome::Superseded(g) => log::debug!("cycle {g} abandoned"),
            }
        });

    if let Err(e) = spawned {
        // The cadence carries on; the next trigger gets another chance.
        log::error!("failed to spawn cycle {generation}: {e}");
        publisher.abandon();
    }

    triggered_at + config.interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{PricePoint, QuoteError};

    struct EmptySource;

    impl QuoteSource for EmptySource {
        fn name(&self) -> &str {
            "empty"
        }

        fn fetch(&self, _symbol: &str) -> Result<Vec<PricePoint>, QuoteError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn config_follows_watch_config() {
        let watch = WatchConfig {
            watchlist: vec!["AAA".into(), "BBB".into()],
            refresh_interval_secs: 5,
            ..WatchConfig::default()
        };
        let config = SchedulerConfig::from_watch_config(&watch);
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(&*config.symbols, &["AAA".to_string(), "BBB".to_string()]);
        assert_eq!(config.max_concurrency, watch.max_concurrency);
    }

    #[test]
    fn stop_is_idempotent() {
        let publisher = Arc::new(StatePublisher::new());
        let config = SchedulerConfig {
            interval: Duration::from_secs(60),
            symbols: vec!["AAA".to_string()].into(),
            max_concurrency: 1,
        };
        let mut scheduler =
            Scheduler::start(config, Arc::new(EmptySource), Arc::clone(&publisher)).unwrap();
        assert!(scheduler.is_running());

        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!publisher.state().loading);
        scheduler.refresh_now(); // no-op once stopped
    }
}
