//! Per-cycle data model: instrument records and the immutable snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing tag assigned to every triggered cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Generation {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Derived performance figures for one instrument over the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub open: f64,
    pub last: f64,
    pub percent_change: f64,
    pub absolute_change: f64,
}

/// Outcome of one symbol within a cycle.
///
/// Prices only exist inside `Ok`, so a missing quote can never be confused with
/// an unchanged one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordStatus {
    Ok(Metrics),
    NoData,
    /// Diagnostic message; not shown in the table.
    FetchError(String),
}

/// Discriminant of [`RecordStatus`] without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Ok,
    NoData,
    FetchError,
}

/// One row of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub symbol: String,
    pub status: RecordStatus,
}

impl InstrumentRecord {
    pub fn ok(symbol: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            symbol: symbol.into(),
            status: RecordStatus::Ok(metrics),
        }
    }

    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            status: RecordStatus::NoData,
        }
    }

    pub fn fetch_error(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            status: RecordStatus::FetchError(message.into()),
        }
    }

    pub fn kind(&self) -> StatusKind {
        match self.status {
            RecordStatus::Ok(_) => StatusKind::Ok,
            RecordStatus::NoData => StatusKind::NoData,
            RecordStatus::FetchError(_) => StatusKind::FetchError,
        }
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        match &self.status {
            RecordStatus::Ok(m) => Some(m),
            _ => None,
        }
    }
}

/// Immutable result of one completed cycle.
///
/// Records are stored in watch-list order. There are no mutating methods; a
/// newer snapshot replaces this one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    generation: Generation,
    generated_at: DateTime<Utc>,
    records: Vec<InstrumentRecord>,
}

impl Snapshot {
    pub fn new(
        generation: Generation,
        generated_at: DateTime<Utc>,
        records: Vec<InstrumentRecord>,
    ) -> Self {
        Self {
            generation,
            generated_at,
            records,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Records in watch-list order.
    pub fn records(&self) -> &[InstrumentRecord] {
        &self.records
    }

    pub fn get(&self, symbol: &str) -> Option<&InstrumentRecord> {
        self.records.iter().find(|r| r.symbol == symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.records.iter().filter(|r| r.kind() == kind).count()
    }
}
