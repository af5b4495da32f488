//! Bottom status bar with key hints and a per-status tally.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::view;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        format!(" r:refresh q:quit  every {}s", app.refresh_secs),
        theme.muted(),
    ));

    if let Some((ok, no_data, errors)) = view::tally(&app.state) {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(format!("{ok} ok"), theme.text()));
        if no_data > 0 {
            spans.push(Span::styled(format!(" · {no_data} no data"), theme.muted()));
        }
        if errors > 0 {
            spans.push(Span::styled(format!(" · {errors} errors"), theme.warning()));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
