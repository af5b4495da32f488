//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Metric identities — absolute and percent change are exact functions of open/last
//! 2. Zero open — never produces an Ok record
//! 3. Snapshot shape — one record per symbol, watch-list order, whatever the outcomes
//! 4. Empty series — always NoData with no prices

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use watchboard_core::metrics::{compute, MetricsError};
use watchboard_core::{
    FetchCycle, Generation, PricePoint, QuoteError, QuoteSource, RecordStatus, StatusKind,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (0.01..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_series() -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec((arb_price(), arb_price()), 1..40).prop_map(|pairs| {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (o, c))| PricePoint::new(t0 + chrono::Duration::minutes(i as i64), o, c))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum Scripted {
    Series { open: f64, last: f64 },
    Empty,
    Error,
    ZeroOpen,
}

fn arb_scripted() -> impl Strategy<Value = Scripted> {
    prop_oneof![
        (arb_price(), arb_price()).prop_map(|(open, last)| Scripted::Series { open, last }),
        Just(Scripted::Empty),
        Just(Scripted::Error),
        Just(Scripted::ZeroOpen),
    ]
}

struct ScriptedSource {
    script: HashMap<String, (Scripted, u64)>,
}

impl QuoteSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<PricePoint>, QuoteError> {
        let (reply, delay_ms) = &self.script[symbol];
        thread::sleep(Duration::from_millis(*delay_ms));
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        match reply {
            Scripted::Series { open, last } => Ok(vec![
                PricePoint::new(t0, *open, *open),
                PricePoint::new(t0 + chrono::Duration::minutes(1), *open, *last),
            ]),
            Scripted::Empty => Ok(Vec::new()),
            Scripted::Error => Err(QuoteError::NetworkUnreachable("scripted".into())),
            Scripted::ZeroOpen => Ok(vec![PricePoint::new(t0, 0.0, 1.0)]),
        }
    }
}

// ── 1. Metric identities ─────────────────────────────────────────────

proptest! {
    #[test]
    fn changes_are_exact(series in arb_series()) {
        let m = compute(&series).unwrap();
        prop_assert_eq!(m.open, series[0].open);
        prop_assert_eq!(m.last, series[series.len() - 1].close);
        prop_assert_eq!(m.absolute_change, m.last - m.open);
        prop_assert_eq!(m.percent_change, m.absolute_change / m.open * 100.0);
        prop_assert!(m.percent_change.is_finite());
    }
}

// ── 2. Zero open ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn zero_open_never_computes(mut series in arb_series()) {
        series[0].open = 0.0;
        prop_assert_eq!(compute(&series), Err(MetricsError::ZeroOpen));
    }
}

// ── 3 & 4. Snapshot shape ────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn snapshot_covers_watchlist_in_order(
        script in prop::collection::vec((arb_scripted(), 0u64..8), 1..8)
    ) {
        let symbols: Vec<String> = (0..script.len()).map(|i| format!("SYM{i}")).collect();
        let source = Arc::new(ScriptedSource {
            script: symbols.iter().cloned().zip(script.iter().cloned()).collect(),
        });
        let cycle = FetchCycle::new(
            Generation(1),
            symbols.iter().cloned().collect(),
            source,
            4,
        );

        let snapshot = cycle.run_to_completion();
        prop_assert_eq!(snapshot.len(), symbols.len());

        for ((record, symbol), (reply, _)) in snapshot.records().iter().zip(&symbols).zip(&script) {
            prop_assert_eq!(&record.symbol, symbol);
            match reply {
                Scripted::Series { open, last } => {
                    let m = record.metrics().unwrap();
                    prop_assert_eq!(m.open, *open);
                    prop_assert_eq!(m.last, *last);
                }
                Scripted::Empty => {
                    prop_assert_eq!(&record.status, &RecordStatus::NoData);
                }
                Scripted::Error | Scripted::ZeroOpen => {
                    prop_assert_eq!(record.kind(), StatusKind::FetchError);
                    prop_assert!(record.metrics().is_none());
                }
            }
        }
    }
}
