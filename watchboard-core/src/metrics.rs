//! Session metrics from a raw intraday series.
//!
//! Pure and recomputed from scratch every cycle.

use crate::data::provider::PricePoint;
use crate::snapshot::Metrics;
use thiserror::Error;

/// Why a series could not be turned into metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("empty series")]
    EmptySeries,

    /// A zero open leaves the percent change undefined.
    #[error("opening price is zero")]
    ZeroOpen,

    #[error("non-finite price (open {open}, last {last})")]
    NonFinite { open: f64, last: f64 },
}

/// Compute open/last/change from a session series (oldest point first).
///
/// `open` is the first point's open and `last` is the final point's close.
pub fn compute(series: &[PricePoint]) -> Result<Metrics, MetricsError> {
    let (first, last_point) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(MetricsError::EmptySeries),
    };

    let open = first.open;
    let last = last_point.close;

    if !open.is_finite() || !last.is_finite() {
        return Err(MetricsError::NonFinite { open, last });
    }
    if open == 0.0 {
        return Err(MetricsError::ZeroOpen);
    }

    let absolute_change = last - open;
    let percent_change = absolute_change / open * 100.0;

    Ok(Metrics {
        open,
        last,
        percent_change,
        absolute_change,
    })
}
