//! Quote table: one row per watch-list symbol, colored by direction.

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::AppState;
use crate::view::{self, TableView, COLUMNS};

const WIDTHS: [Constraint; 5] = [
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Length(10),
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted())
        .title(" Watch-list ")
        .title_style(theme.accent_bold());

    match view::build(&app.state) {
        TableView::Loading => {
            let msg = format!("Loading quotes for {} symbols…", app.symbol_count);
            let para = Paragraph::new(Line::from(msg))
                .style(theme.muted())
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(para, area);
        }
        TableView::Rows(rows) => {
            let header = Row::new(
                COLUMNS
                    .iter()
                    .enumerate()
                    .map(|(i, title)| aligned_cell(title, i)),
            )
            .style(theme.accent_bold());

            let body = rows.iter().map(|row| {
                Row::new(
                    row.cells()
                        .into_iter()
                        .enumerate()
                        .map(|(i, text)| aligned_cell(text, i)),
                )
                .style(theme.row(row.style))
            });

            let table = Table::new(body, WIDTHS)
                .header(header)
                .column_spacing(2)
                .block(block);
            f.render_widget(table, area);
        }
    }
}

/// Symbol left-aligned, numbers right-aligned.
fn aligned_cell(text: &str, column: usize) -> Cell<'static> {
    let line = Line::from(text.to_string());
    if column == 0 {
        Cell::from(line)
    } else {
        Cell::from(line.alignment(Alignment::Right))
    }
}
