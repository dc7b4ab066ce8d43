// =============================================================================
// Series — validated, ordered, read-only bar sequence
// =============================================================================
//
// Every pipeline stage that produces bars hands them through `Series::from_bars`
// so the invariants hold everywhere downstream:
//   - every bar satisfies the OHLC ordering invariant and is finite,
//   - timestamps are strictly increasing with no duplicates.
//
// The data source is untrusted: a bar that violates the invariant is dropped
// where it is detected and the rest of the series survives.

use serde::Serialize;
use tracing::warn;

use crate::types::Bar;

/// An ordered sequence of bars, read-only once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    pub fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    /// Build a series from raw bars, enforcing the invariants:
    ///
    /// 1. Bars failing [`Bar::is_valid`] are dropped (with a warning).
    /// 2. Bars are sorted by timestamp.
    /// 3. Among bars sharing a timestamp the last one supplied wins — a
    ///    later observation for the same bucket supersedes the earlier one.
    pub fn from_bars(bars: Vec<Bar>) -> Self {
        let total = bars.len();
        let mut valid: Vec<Bar> = bars.into_iter().filter(Bar::is_valid).collect();

        let dropped = total - valid.len();
        if dropped > 0 {
            warn!(dropped, total, "dropped bars violating the OHLC invariant");
        }

        // Stable sort keeps supply order within equal timestamps, so keeping
        // the last bar of each run implements last-wins deduplication.
        valid.sort_by_key(|bar| bar.timestamp);

        let mut bars: Vec<Bar> = Vec::with_capacity(valid.len());
        for bar in valid {
            if let Some(prev) = bars.last_mut() {
                if prev.timestamp == bar.timestamp {
                    *prev = bar;
                    continue;
                }
            }
            bars.push(bar);
        }

        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
