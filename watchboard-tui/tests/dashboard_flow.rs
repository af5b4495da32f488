//! Scheduler → publisher → renderer, end to end with an in-memory source.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use ratatui::Terminal;
use watchboard_core::{
    PricePoint, QuoteError, QuoteSource, Scheduler, SchedulerConfig, StatePublisher,
};
use watchboard_tui::{ui, AppState};

/// AAA rises from 100 to 110, BBB has no session yet.
struct TwoSymbols;

impl QuoteSource for TwoSymbols {
    fn name(&self) -> &str {
        "two-symbols"
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<PricePoint>, QuoteError> {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        match symbol {
            "AAA" => Ok(vec![
                PricePoint::new(t0, 100.0, 100.0),
                PricePoint::new(t0 + chrono::Duration::minutes(1), 105.0, 110.0),
            ]),
            _ => Ok(Vec::new()),
        }
    }
}

/// Foreground color of the first cell of the first occurrence of `needle`.
fn color_of(buffer: &Buffer, needle: &str) -> Option<Color> {
    let width = buffer.area.width as usize;
    buffer.content().chunks(width).find_map(|row| {
        let line: String = row.iter().map(|c| c.symbol()).collect();
        let col = line.find(needle)?;
        // Cells are one char each on this screen, so byte offset == column
        // as long as nothing before `needle` is multi-byte.
        let col = line[..col].chars().count();
        Some(row[col].fg)
    })
}

#[test]
fn first_refresh_renders_colored_rows() {
    let publisher = Arc::new(StatePublisher::new());
    let mut app = AppState::new(Arc::clone(&publisher), 2, 60);

    let mut scheduler = Scheduler::start(
        SchedulerConfig {
            interval: Duration::from_secs(60),
            symbols: ["AAA", "BBB"].iter().map(|s| s.to_string()).collect(),
            max_concurrency: 2,
        },
        Arc::new(TwoSymbols),
        Arc::clone(&publisher),
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        app.sync();
        if app.state.current.is_some() {
            break;
        }
        assert!(Instant::now() < deadline, "no snapshot published");
        thread::sleep(Duration::from_millis(5));
    }
    scheduler.stop();
    app.sync();

    let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
    terminal.draw(|f| ui::draw(f, &app)).unwrap();
    let buffer = terminal.backend().buffer();

    assert_eq!(color_of(buffer, "AAA"), Some(app.theme.positive));
    assert_eq!(color_of(buffer, "BBB"), Some(app.theme.neutral));
    assert_eq!(color_of(buffer, "+10.00%"), Some(app.theme.positive));
    assert!(!app.state.loading);
}
