//! Single source of truth for what the dashboard should currently display.
//!
//! The publisher owns the only shared mutable state in the pipeline: the
//! `RefreshState` plus the latest started generation. Both live behind one
//! mutex, so the "is this cycle still current?" check and the snapshot swap are
//! a single atomic step. Readers get a cheap clone (the snapshot is behind an
//! `Arc`) and change notifications arrive over `mpsc` channels.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::snapshot::{Generation, Snapshot};

/// What the renderer sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshState {
    /// A cycle is in flight.
    pub loading: bool,
    /// Last published snapshot; `None` until the first cycle completes.
    pub current: Option<Arc<Snapshot>>,
    /// Bumped on every observable change.
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    /// A newer cycle was started after this snapshot's cycle.
    #[error("cycle {stale} superseded by {latest}")]
    Superseded {
        stale: Generation,
        latest: Generation,
    },
}

#[derive(Debug, Default)]
struct Inner {
    state: RefreshState,
    latest: Generation,
    subscribers: Vec<Sender<u64>>,
}

impl Inner {
    fn changed(&mut self) {
        self.state.revision += 1;
        let revision = self.state.revision;
        self.subscribers.retain(|tx| tx.send(revision).is_ok());
    }
}

/// Holds the published snapshot and the loading flag.
#[derive(Debug, Default)]
pub struct StatePublisher {
    inner: Mutex<Inner>,
}

impl StatePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new cycle: assign its generation and mark loading, atomically.
    ///
    /// Any cycle started earlier is superseded from this point on.
    pub fn begin_cycle(&self) -> Generation {
        let mut inner = self.lock();
        inner.latest = inner.latest.next();
        inner.state.loading = true;
        inner.changed();
        inner.latest
    }

    /// Set `loading` without touching the current snapshot.
    pub fn mark_loading(&self) {
        let mut inner = self.lock();
        if !inner.state.loading {
            inner.state.loading = true;
            inner.changed();
        }
    }

    /// Replace the current snapshot and clear `loading`.
    ///
    /// Rejected if a newer generation has been started since the snapshot's
    /// cycle began. Republishing a snapshot equal to the current one keeps the
    /// existing one and only clears `loading`.
    pub fn publish(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        let mut inner = self.lock();
        let generation = snapshot.generation();
        if generation < inner.latest {
            return Err(PublishError::Superseded {
                stale: generation,
                latest: inner.latest,
            });
        }
        inner.latest = generation;

        let unchanged = inner
            .state
            .current
            .as_deref()
            .is_some_and(|cur| *cur == snapshot);

        if unchanged {
            if inner.state.loading {
                inner.state.loading = false;
                inner.changed();
            }
            return Ok(());
        }

        inner.state.current = Some(Arc::new(snapshot));
        inner.state.loading = false;
        inner.changed();
        Ok(())
    }

    /// Invalidate every started cycle and clear `loading`.
    ///
    /// The current snapshot stays as it is.
    pub fn abandon(&self) {
        let mut inner = self.lock();
        inner.latest = inner.latest.next();
        if inner.state.loading {
            inner.state.loading = false;
            inner.changed();
        }
    }

    /// True while `generation` is the newest started cycle.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.lock().latest == generation
    }

    /// Read the current state.
    pub fn state(&self) -> RefreshState {
        self.lock().state.clone()
    }

    /// Receive the new revision number after every change.
    pub fn subscribe(&self) -> Receiver<u64> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::InstrumentRecord;
    use chrono::Utc;

    fn snapshot(generation: Generation) -> Snapshot {
        Snapshot::new(generation, Utc::now(), vec![InstrumentRecord::no_data("AAA")])
    }

    #[test]
    fn starts_empty_and_idle() {
        let publisher = StatePublisher::new();
        let state = publisher.state();
        assert!(!state.loading);
        assert!(state.current.is_none());
        assert_eq!(state.revision, 0);
    }

    #[test]
    fn begin_cycle_marks_loading_and_keeps_current() {
        let publisher = StatePublisher::new();
        let g1 = publisher.begin_cycle();
        publisher.publish(snapshot(g1)).unwrap();

        let g2 = publisher.begin_cycle();
        assert_eq!(g2, g1.next());
        let state = publisher.state();
        assert!(state.loading);
        assert_eq!(state.current.unwrap().generation(), g1);
    }

    #[test]
    fn publish_clears_loading() {
        let publisher = StatePublisher::new();
        let g = publisher.begin_cycle();
        publisher.publish(snapshot(g)).unwrap();
        let state = publisher.state();
        assert!(!state.loading);
        assert_eq!(state.current.unwrap().generation(), g);
    }

    #[test]
    fn stale_generation_is_rejected() {
        let publisher = StatePublisher::new();
        let g1 = publisher.begin_cycle();
        let g2 = publisher.begin_cycle();

        let err = publisher.publish(snapshot(g1)).unwrap_err();
        assert_eq!(err, PublishError::Superseded { stale: g1, latest: g2 });

        let state = publisher.state();
        assert!(state.loading, "newer cycle still in flight");
        assert!(state.current.is_none());
    }

    #[test]
    fn stale_result_after_newer_publish_is_rejected() {
        let publisher = StatePublisher::new();
        let g1 = publisher.begin_cycle();
        let g2 = publisher.begin_cycle();
        publisher.publish(snapshot(g2)).unwrap();

        assert!(publisher.publish(snapshot(g1)).is_err());
        assert_eq!(publisher.state().current.unwrap().generation(), g2);
    }

    #[test]
    fn republishing_same_snapshot_is_a_no_op() {
        let publisher = StatePublisher::new();
        let g = publisher.begin_cycle();
        let snap = snapshot(g);
        publisher.publish(snap.clone()).unwrap();
        let before = publisher.state();

        publisher.publish(snap).unwrap();
        let after = publisher.state();

        assert_eq!(before, after);
        assert!(Arc::ptr_eq(
            before.current.as_ref().unwrap(),
            after.current.as_ref().unwrap()
        ));
    }

    #[test]
    fn abandon_keeps_snapshot_and_invalidates_in_flight() {
        let publisher = StatePublisher::new();
        let g1 = publisher.begin_cycle();
        publisher.publish(snapshot(g1)).unwrap();
        let g2 = publisher.begin_cycle();

        publisher.abandon();

        assert!(!publisher.is_current(g2));
        assert!(publisher.publish(snapshot(g2)).is_err());
        let state = publisher.state();
        assert!(!state.loading);
        assert_eq!(state.current.unwrap().generation(), g1);
    }

    #[test]
    fn subscribers_see_every_change() {
        let publisher = StatePublisher::new();
        let rx = publisher.subscribe();

        let g = publisher.begin_cycle();
        publisher.publish(snapshot(g)).unwrap();

        let revisions: Vec<u64> = rx.try_iter().collect();
        assert_eq!(revisions, vec![1, 2]);
        assert_eq!(publisher.state().revision, 2);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let publisher = StatePublisher::new();
        let rx = publisher.subscribe();
        drop(rx);
        publisher.mark_loading();
        assert!(publisher.lock().subscribers.is_empty());
    }

    #[test]
    fn mark_loading_is_idempotent() {
        let publisher = StatePublisher::new();
        publisher.mark_loading();
        publisher.mark_loading();
        let state = publisher.state();
        assert!(state.loading);
        assert_eq!(state.revision, 1);
    }
}
