// =============================================================================
// Cross-Rate Converter
// =============================================================================
//
// Converts a bar series priced in currency A into currency B by multiplying
// every OHLC field by an A→B exchange-rate series aligned to the base
// timestamps.
//
// Alignment: the rate's close is carried forward onto the base grid
// (last-known value, no look-ahead). The two grids need not match — the rate
// feed is typically sparser than the instrument feed. Base bars with no prior
// rate observation are dropped, as are bars whose carried rate is not a
// positive finite number.

use tracing::debug;

use crate::series::Series;

/// Produce a synthetic series where each base bar is repriced through the
/// rate aligned to its timestamp.
///
/// An empty base, an empty rate series, or zero overlap yields an empty
/// series — "no analysis possible", not a fault.
pub fn convert(base: &Series, rate: &Series) -> Series {
    if base.is_empty() || rate.is_empty() {
        return Series::empty();
    }

    let rate_bars = rate.bars();
    let mut next_rate = 0usize;
    let mut carried: Option<f64> = None;
    let mut converted = Vec::with_capacity(base.len());

    for bar in base.bars() {
        // Advance the carried rate to the last observation at or before
        // this bar's timestamp.
        while next_rate < rate_bars.len() && rate_bars[next_rate].timestamp <= bar.timestamp {
            carried = Some(rate_bars[next_rate].close);
            next_rate += 1;
        }

        match carried {
            Some(rate) if rate.is_finite() && rate > 0.0 => converted.push(bar.scaled(rate)),
            Some(rate) => {
                debug!(timestamp = %bar.timestamp, rate, "non-positive rate, dropping bar");
            }
            // No rate observed yet — this timestamp precedes the rate feed.
            None => {}
        }
    }

    Series::from_bars(converted)
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn series(bars: Vec<Bar>) -> Series {
        Series::from_bars(bars)
    }

    #[test]
    fn constant_rate_scales_all_fields() {
        let base = series(vec![Bar::new(ts(0), 1.0, 2.0, 0.5, 1.5)]);
        let rate = series(vec![Bar::flat(ts(0), 2.0)]);

        let out = convert(&base, &rate);
        assert_eq!(out.len(), 1);
        let bar = out.bars()[0];
        assert_eq!(bar.open, 2.0);
        assert_eq!(bar.high, 4.0);
        assert_eq!(bar.low, 1.0);
        assert_eq!(bar.close, 3.0);
    }

    #[test]
    fn rate_is_forward_filled_across_sparser_grid() {
        // Base every 60s, rate only at 0s and 180s.
        let base = series(vec![
            Bar::flat(ts(0), 10.0),
            Bar::flat(ts(60), 11.0),
            Bar::flat(ts(120), 12.0),
            Bar::flat(ts(180), 13.0),
        ]);
        let rate = series(vec![Bar::flat(ts(0), 2.0), Bar::flat(ts(180), 3.0)]);

        let out = convert(&base, &rate);
        assert_eq!(out.closes(), vec![20.0, 22.0, 24.0, 39.0]);
    }

    #[test]
    fn base_bars_before_first_rate_are_dropped() {
        let base = series(vec![Bar::flat(ts(0), 10.0), Bar::flat(ts(60), 11.0)]);
        let rate = series(vec![Bar::flat(ts(60), 2.0)]);

        let out = convert(&base, &rate);
        assert_eq!(out.len(), 1);
        assert_eq!(out.bars()[0].timestamp, ts(60));
        assert_eq!(out.closes(), vec![22.0]);
    }

    #[test]
    fn zero_rate_drops_that_timestamp() {
        let base = series(vec![Bar::flat(ts(0), 10.0), Bar::flat(ts(60), 11.0)]);
        let rate = series(vec![Bar::flat(ts(0), 0.0), Bar::flat(ts(60), 2.0)]);

        let out = convert(&base, &rate);
        assert_eq!(out.closes(), vec![22.0]);
    }

    #[test]
    fn empty_inputs_yield_empty_series() {
        let populated = series(vec![Bar::flat(ts(0), 10.0)]);
        assert!(convert(&Series::empty(), &populated).is_empty());
        assert!(convert(&populated, &Series::empty()).is_empty());
    }

    #[test]
    fn no_overlap_yields_empty_series() {
        // All base bars precede the first rate observation.
        let base = series(vec![Bar::flat(ts(0), 10.0), Bar::flat(ts(60), 11.0)]);
        let rate = series(vec![Bar::flat(ts(3600), 2.0)]);
        assert!(convert(&base, &rate).is_empty());
    }

    #[test]
    fn output_preserves_ohlc_invariant() {
        let base = series(vec![
            Bar::new(ts(0), 1.0, 2.0, 0.5, 1.5),
            Bar::new(ts(60), 1.5, 1.8, 1.4, 1.6),
        ]);
        let rate = series(vec![Bar::flat(ts(0), 82.5)]);

        let out = convert(&base, &rate);
        assert_eq!(out.len(), 2);
        for bar in out.bars() {
            assert!(bar.is_valid());
        }
    }
}
