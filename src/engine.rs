// =============================================================================
// Indicator Engine — enriches a bar series with derived columns
// =============================================================================
//
// Computes the fixed indicator set over a series' closes and returns an
// `IndicatorFrame`: the input bars plus one aligned column per indicator.
// Warm-up entries are `None`, the defined absence state — downstream
// consumers must not conflate it with zero.
//
// The engine is pure: the input series is not mutated and the frame is a
// new value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::IndicatorParams;
use crate::indicators::{bollinger, ema, rsi, sma};
use crate::series::Series;
use crate::types::Bar;

// =============================================================================
// IndicatorFrame
// =============================================================================

/// A bar series extended with per-bar derived columns, all of the same
/// length as the bar vector. Undefined entries serialise as JSON `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorFrame {
    bars: Vec<Bar>,
    pub sma_fast: Vec<Option<f64>>,
    pub sma_slow: Vec<Option<f64>>,
    pub ema_fast: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub bb_mid: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
}

/// The most recent enriched bar, flattened for the trend rules and for
/// dashboard-style consumers.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub ema_fast: Option<f64>,
    pub rsi: Option<f64>,
    pub bb_mid: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl IndicatorFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Flatten the last bar and its derived values, if any.
    pub fn last_snapshot(&self) -> Option<IndicatorSnapshot> {
        let index = self.bars.len().checked_sub(1)?;
        let bar = self.bars[index];
        Some(IndicatorSnapshot {
            timestamp: bar.timestamp,
            close: bar.close,
            sma_fast: self.sma_fast[index],
            sma_slow: self.sma_slow[index],
            ema_fast: self.ema_fast[index],
            rsi: self.rsi[index],
            bb_mid: self.bb_mid[index],
            bb_upper: self.bb_upper[index],
            bb_lower: self.bb_lower[index],
        })
    }
}

// =============================================================================
// IndicatorEngine
// =============================================================================

pub struct IndicatorEngine {
    params: IndicatorParams,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    /// Compute every indicator column over `series`.
    ///
    /// The frame has the same length and timestamps as the input. An empty
    /// series yields an empty frame — absence of data is a normal state.
    pub fn compute(&self, series: &Series) -> IndicatorFrame {
        if series.is_empty() {
            return IndicatorFrame::empty();
        }

        let closes = series.closes();
        let len = closes.len();
        let params = &self.params;

        let bands = bollinger::calculate(&closes, params.bb_period, params.bb_std_mult);

        let frame = IndicatorFrame {
            bars: series.bars().to_vec(),
            sma_fast: defined_column(sma::expanding_mean(&closes, params.sma_fast_period), len),
            sma_slow: defined_column(sma::expanding_mean(&closes, params.sma_slow_period), len),
            ema_fast: defined_column(ema::exponential_mean(&closes, params.ema_span), len),
            rsi: rsi::relative_strength(&closes, params.rsi_period),
            bb_mid: bands.mid,
            bb_upper: bands.upper,
            bb_lower: bands.lower,
        };

        debug!(
            bars = frame.len(),
            rsi_defined = frame.rsi.iter().flatten().count(),
            bands_defined = frame.bb_mid.iter().flatten().count(),
            "indicator frame computed"
        );
        frame
    }
}

/// Lift a kernel output into an `Option` column of the frame's length.
///
/// Kernels return an empty vector for degenerate parameters (period 0); that
/// collapses to an all-`None` column here so the frame stays aligned.
fn defined_column(values: Vec<f64>, len: usize) -> Vec<Option<f64>> {
    if values.len() == len {
        values.into_iter().map(Some).collect()
    } else {
        vec![None; len]
    }
}
