//! Row view-model: turns a `RefreshState` into display strings and style tags.
//!
//! Nothing here touches the terminal, so the table contents can be tested
//! without a backend.

use watchboard_core::{InstrumentRecord, RecordStatus, RefreshState, StatusKind};

/// Column headers, left to right.
pub const COLUMNS: [&str; 5] = ["Symbol", "Open", "Now", "Change %", "Δ Price"];

/// Color class of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Positive,
    Negative,
    Neutral,
}

/// Style a record by the sign of its absolute change.
///
/// Rows without metrics are always neutral.
pub fn row_style(record: &InstrumentRecord) -> RowStyle {
    match record.metrics() {
        Some(m) if m.absolute_change > 0.0 => RowStyle::Positive,
        Some(m) if m.absolute_change < 0.0 => RowStyle::Negative,
        _ => RowStyle::Neutral,
    }
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub symbol: String,
    pub open: String,
    pub now: String,
    pub change_pct: String,
    pub change_abs: String,
    pub style: RowStyle,
}

impl TableRow {
    pub fn from_record(record: &InstrumentRecord) -> Self {
        let style = row_style(record);
        match &record.status {
            RecordStatus::Ok(m) => Self {
                symbol: record.symbol.clone(),
                open: format!("{:.2}", m.open),
                now: format!("{:.2}", m.last),
                change_pct: format!("{:+.2}%", m.percent_change),
                change_abs: format!("{:+.2}", m.absolute_change),
                style,
            },
            RecordStatus::NoData => Self::placeholder(record, "no data", style),
            RecordStatus::FetchError(_) => Self::placeholder(record, "error", style),
        }
    }

    fn placeholder(record: &InstrumentRecord, label: &str, style: RowStyle) -> Self {
        Self {
            symbol: record.symbol.clone(),
            open: label.to_string(),
            now: "-".into(),
            change_pct: "-".into(),
            change_abs: "-".into(),
            style,
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            self.symbol.as_str(),
            self.open.as_str(),
            self.now.as_str(),
            self.change_pct.as_str(),
            self.change_abs.as_str(),
        ]
    }
}

/// What the table area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// No snapshot has been published yet.
    Loading,
    Rows(Vec<TableRow>),
}

pub fn build(state: &RefreshState) -> TableView {
    match &state.current {
        None => TableView::Loading,
        Some(snapshot) => TableView::Rows(
            snapshot
                .records()
                .iter()
                .map(TableRow::from_record)
                .collect(),
        ),
    }
}

/// Footer tally: (ok, no data, errors).
pub fn tally(state: &RefreshState) -> Option<(usize, usize, usize)> {
    state.current.as_ref().map(|s| {
        (
            s.count(StatusKind::Ok),
            s.count(StatusKind::NoData),
            s.count(StatusKind::FetchError),
        )
    })
}
