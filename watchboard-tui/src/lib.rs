//! Watchboard TUI - live terminal dashboard for an intraday watch-list
//!
//! Shows one row per symbol with open, last, and change since open, refreshed
//! on a fixed cadence by the core scheduler:
//! - Gains in green, losses in pink, flat or missing rows neutral
//! - Previous rows stay on screen while a refresh is in flight
//! - `r` refreshes now, `q` quits

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod view;

pub use app::AppState;
pub use input::{handle_key, InputAction};
pub use theme::Theme;
