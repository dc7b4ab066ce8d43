// =============================================================================
// Trend Analyzer — rule-based assessment of the latest enriched bar
// =============================================================================
//
// A fixed, ordered rule set over the most recent bar of an indicator frame.
// Each rule is skipped when a field it needs is still in warm-up. No
// parameter fitting, no learning — the thresholds are configuration.
//
// Rules, in emission order:
//   1. Trend      — fast SMA above/below slow SMA.
//   2. Momentum   — RSI against the overbought/oversold cutoffs, annotated
//                   with the value to one decimal place.
//   3. Volatility — relative Bollinger band width against its cutoff.

use serde::Serialize;
use tracing::debug;

use crate::config::TrendThresholds;
use crate::engine::IndicatorFrame;

/// Ordered qualitative labels for one analysis run. Ephemeral — recomputed
/// on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Signal {
    pub labels: Vec<String>,
}

impl Signal {
    /// The terminal signal for an empty frame.
    pub fn no_data() -> Self {
        Self {
            labels: vec!["No data to analyze.".to_string()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.labels.join(" | "))
    }
}

pub struct TrendAnalyzer {
    thresholds: TrendThresholds,
}

impl TrendAnalyzer {
    pub fn new(thresholds: TrendThresholds) -> Self {
        Self { thresholds }
    }

    /// Assess the frame's most recent bar.
    ///
    /// An empty frame yields exactly one label: "No data to analyze.".
    pub fn assess(&self, frame: &IndicatorFrame) -> Signal {
        let Some(last) = frame.last_snapshot() else {
            return Signal::no_data();
        };

        let mut labels = Vec::new();

        // ── 1. Trend: fast vs slow moving average ────────────────────────
        if let (Some(fast), Some(slow)) = (last.sma_fast, last.sma_slow) {
            labels.push(if fast > slow { "Bullish" } else { "Bearish" }.to_string());
        }

        // ── 2. Momentum: RSI against the cutoffs ─────────────────────────
        if let Some(rsi) = last.rsi {
            let label = if rsi > self.thresholds.rsi_overbought {
                format!("Overbought (RSI {rsi:.1})")
            } else if rsi < self.thresholds.rsi_oversold {
                format!("Oversold (RSI {rsi:.1})")
            } else {
                format!("Neutral (RSI {rsi:.1})")
            };
            labels.push(label);
        }

        // ── 3. Volatility: relative band width ───────────────────────────
        if let (Some(upper), Some(lower)) = (last.bb_upper, last.bb_lower) {
            if last.close != 0.0 {
                let relative_width = (upper - lower) / last.close;
                labels.push(
                    if relative_width > self.thresholds.band_width_high {
                        "High volatility"
                    } else {
                        "Low volatility"
                    }
                    .to_string(),
                );
            }
        }

        debug!(timestamp = %last.timestamp, labels = ?labels, "trend assessment");
        Signal { labels }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorParams;
    use crate::engine::IndicatorEngine;
    use crate::series::Series;
    use crate::types::Bar;
    use chrono::{TimeZone, Utc};

    fn frame_of(closes: &[f64]) -> IndicatorFrame {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::flat(Utc.timestamp_opt(i as i64 * 60, 0).unwrap(), c))
            .collect();
        IndicatorEngine::new(IndicatorParams::default()).compute(&Series::from_bars(bars))
    }

    fn analyzer() -> TrendAnalyzer {
        TrendAnalyzer::new(TrendThresholds::default())
    }

    #[test]
    fn empty_frame_yields_no_data_signal() {
        let signal = analyzer().assess(&IndicatorFrame::empty());
        assert_eq!(signal.labels, vec!["No data to analyze.".to_string()]);
    }

    #[test]
    fn rising_series_is_bullish_first() {
        let closes: Vec<f64> = (1..=60).map(|x| x as f64).collect();
        let signal = analyzer().assess(&frame_of(&closes));
        assert_eq!(signal.labels[0], "Bullish");
    }

    #[test]
    fn falling_series_is_bearish() {
        let closes: Vec<f64> = (1..=60).rev().map(|x| x as f64).collect();
        let signal = analyzer().assess(&frame_of(&closes));
        assert_eq!(signal.labels[0], "Bearish");
    }

    #[test]
    fn momentum_and_volatility_rules_skipped_during_warmup() {
        // Ten bars: SMAs defined (partial windows), RSI and bands are not,
        // so only the trend rule fires. Both expanding means cover the whole
        // series here and coincide — not strictly above means "Bearish".
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let signal = analyzer().assess(&frame_of(&closes));
        assert_eq!(signal.labels.len(), 1);
        assert_eq!(signal.labels[0], "Bearish");
    }

    #[test]
    fn overbought_label_carries_one_decimal_rsi() {
        // Strictly rising — RSI is exactly 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let signal = analyzer().assess(&frame_of(&closes));
        assert!(signal.labels.contains(&"Overbought (RSI 100.0)".to_string()));
    }

    #[test]
    fn oversold_label_on_falling_series() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let signal = analyzer().assess(&frame_of(&closes));
        assert!(signal.labels.contains(&"Oversold (RSI 0.0)".to_string()));
    }

    #[test]
    fn volatility_label_depends_on_relative_band_width() {
        // Flat tail: bands collapse, relative width 0 — low volatility.
        let mut closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        closes.extend(std::iter::repeat(30.0).take(25));
        let signal = analyzer().assess(&frame_of(&closes));
        assert!(signal.labels.contains(&"Low volatility".to_string()));

        // Large swings inside the window — wide bands.
        let swings: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 100.0 } else { 120.0 })
            .collect();
        let signal = analyzer().assess(&frame_of(&swings));
        assert!(signal.labels.contains(&"High volatility".to_string()));
    }

    #[test]
    fn volatility_rule_skipped_on_zero_close() {
        // A tail of zero closes: bands are defined, but the relative width
        // has no denominator.
        let mut closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        closes.extend(std::iter::repeat(0.0).take(25));
        let signal = analyzer().assess(&frame_of(&closes));
        assert!(!signal
            .labels
            .iter()
            .any(|l| l.contains("volatility")));
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let analyzer = TrendAnalyzer::new(TrendThresholds {
            rsi_overbought: 101.0, // unreachable
            rsi_oversold: 30.0,
            band_width_high: 0.04,
        });
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let signal = analyzer.assess(&frame_of(&closes));
        assert!(signal.labels.contains(&"Neutral (RSI 100.0)".to_string()));
    }

    #[test]
    fn signal_display_joins_labels() {
        let signal = Signal {
            labels: vec!["Bullish".into(), "Low volatility".into()],
        };
        assert_eq!(signal.to_string(), "Bullish | Low volatility");
    }
}
