// =============================================================================
// Adaptive Tick Resampler
// =============================================================================
//
// Tick-level sources supply one scalar price per instant, so bars are
// synthesized per bucket: open = first price, high = max, low = min,
// close = last. The bucket width is chosen from the requested history span —
// it must shrink with the span so the 200-period slow moving average keeps
// meaningful coverage, without exploding the bar count on long spans.
//
// Buckets with no observations are forward-filled from the previous bucket's
// close. Buckets before the first observation are never fabricated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::series::Series;
use crate::types::{Bar, PricePoint};

// =============================================================================
// BucketWidth
// =============================================================================

/// Fixed bucket widths the resampler chooses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketWidth {
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    FourHours,
    OneDay,
}

impl BucketWidth {
    /// Bucket width for a requested history span in days.
    ///
    /// | span (days) | width |
    /// |---|---|
    /// | ≤ 1 | 5 minutes |
    /// | 2–7 | 15 minutes |
    /// | 8–30 | 1 hour |
    /// | 31–90 | 4 hours |
    /// | > 90 | 1 day |
    pub fn for_span_days(days: u32) -> Self {
        match days {
            0..=1 => Self::FiveMinutes,
            2..=7 => Self::FifteenMinutes,
            8..=30 => Self::OneHour,
            31..=90 => Self::FourHours,
            _ => Self::OneDay,
        }
    }

    pub fn as_millis(self) -> i64 {
        match self {
            Self::FiveMinutes => 5 * 60 * 1_000,
            Self::FifteenMinutes => 15 * 60 * 1_000,
            Self::OneHour => 60 * 60 * 1_000,
            Self::FourHours => 4 * 60 * 60 * 1_000,
            Self::OneDay => 24 * 60 * 60 * 1_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }
}

impl std::fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Tick cleaning
// =============================================================================

/// Drop unusable ticks and normalise ordering.
///
/// Non-finite or negative prices are dropped with a warning. Ticks are then
/// sorted by timestamp; among duplicates the last one supplied wins.
fn clean_ticks(ticks: Vec<PricePoint>) -> Vec<PricePoint> {
    let total = ticks.len();
    let mut valid: Vec<PricePoint> = ticks.into_iter().filter(PricePoint::is_valid).collect();

    let dropped = total - valid.len();
    if dropped > 0 {
        warn!(dropped, total, "dropped ticks with non-finite or negative prices");
    }

    valid.sort_by_key(|tick| tick.timestamp);

    let mut cleaned: Vec<PricePoint> = Vec::with_capacity(valid.len());
    for tick in valid {
        if let Some(prev) = cleaned.last_mut() {
            if prev.timestamp == tick.timestamp {
                *prev = tick;
                continue;
            }
        }
        cleaned.push(tick);
    }
    cleaned
}

// =============================================================================
// Resampling
// =============================================================================

/// Resample irregular ticks covering `span_days` of history into fixed-width
/// OHLC bars, choosing the width from the span lookup table.
pub fn resample(ticks: Vec<PricePoint>, span_days: u32) -> Series {
    let width = BucketWidth::for_span_days(span_days);
    resample_with(ticks, width)
}

/// Resample irregular ticks into OHLC bars of an explicit `width`.
///
/// Bar timestamps are bucket starts, floored to a multiple of the width on
/// the UTC epoch. Interior buckets with no ticks become flat bars carrying
/// the previous close forward.
pub fn resample_with(ticks: Vec<PricePoint>, width: BucketWidth) -> Series {
    let ticks = clean_ticks(ticks);
    let Some(first) = ticks.first() else {
        return Series::empty();
    };

    let width_ms = width.as_millis();
    let bucket_index = |tick: &PricePoint| tick.timestamp.timestamp_millis().div_euclid(width_ms);
    let bucket_start = |tick: &PricePoint| {
        let rem = tick.timestamp.timestamp_millis().rem_euclid(width_ms);
        tick.timestamp - Duration::milliseconds(rem)
    };

    let tick_count = ticks.len();
    let mut bars: Vec<Bar> = Vec::new();

    let mut current_index = bucket_index(first);
    let mut current_start: DateTime<Utc> = bucket_start(first);
    let (mut open, mut high, mut low, mut close) =
        (first.price, first.price, first.price, first.price);

    for tick in &ticks[1..] {
        let index = bucket_index(tick);
        if index == current_index {
            high = high.max(tick.price);
            low = low.min(tick.price);
            close = tick.price;
            continue;
        }

        bars.push(Bar::new(current_start, open, high, low, close));

        // Forward-fill buckets between the finished one and this tick's.
        for skipped in 1..(index - current_index) {
            let start = current_start + Duration::milliseconds(width_ms * skipped);
            bars.push(Bar::flat(start, close));
        }

        current_index = index;
        current_start = bucket_start(tick);
        open = tick.price;
        high = tick.price;
        low = tick.price;
        close = tick.price;
    }
    bars.push(Bar::new(current_start, open, high, low, close));

    debug!(
        width = %width,
        ticks = tick_count,
        bars = bars.len(),
        "resampled ticks into bars"
    );

    Series::from_bars(bars)
}
