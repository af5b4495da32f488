//! Top-level UI layout: title line above the quote table, status bar below.

pub mod quote_table;
pub mod status_bar;

use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: 1-line title + table + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_title(f, chunks[0], app);
    quote_table::render(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(" Watchboard ", theme.accent_bold())];

    if let Some(snapshot) = &app.state.current {
        let updated = snapshot.generated_at().with_timezone(&Local);
        spans.push(Span::styled(
            format!("updated {}", updated.format("%H:%M:%S")),
            theme.muted(),
        ));
    }
    if app.state.loading {
        spans.push(Span::styled("  refreshing…", theme.warning()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
