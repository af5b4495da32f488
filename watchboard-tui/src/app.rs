//! Application state, owned by the main thread.
//!
//! The pipeline runs on background threads and publishes through the
//! `StatePublisher`; this struct keeps the last `RefreshState` it read and
//! reloads it whenever a change notification arrives.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use watchboard_core::{RefreshState, StatePublisher};

use crate::theme::Theme;

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub state: RefreshState,
    pub theme: Theme,
    /// Number of watch-list symbols, for the loading placeholder.
    pub symbol_count: usize,
    /// Seconds between refreshes, shown in the footer.
    pub refresh_secs: u64,

    publisher: Arc<StatePublisher>,
    changes: Receiver<u64>,
}

impl AppState {
    pub fn new(publisher: Arc<StatePublisher>, symbol_count: usize, refresh_secs: u64) -> Self {
        let changes = publisher.subscribe();
        let state = publisher.state();
        Self {
            running: true,
            state,
            theme: Theme::default(),
            symbol_count,
            refresh_secs,
            publisher,
            changes,
        }
    }

    /// Drain pending change notifications. Returns true if a redraw is due.
    pub fn sync(&mut self) -> bool {
        if self.changes.try_iter().count() == 0 {
            return false;
        }
        let state = self.publisher.state();
        if state == self.state {
            return false;
        }
        self.state = state;
        true
    }
}
