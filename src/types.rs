// =============================================================================
// Shared types used across the Prism analysis pipeline
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped scalar price observation from a tick-level source.
///
/// Tick sources carry no intrinsic open/high/low; the resampler derives
/// those per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// A usable tick has a finite, non-negative price.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}

/// Open/high/low/close summary of price activity over one time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// A bar where all four fields equal the same price (forward-filled
    /// bucket or single-observation bucket).
    pub fn flat(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self::new(timestamp, price, price, price, price)
    }

    /// OHLC ordering invariant plus finiteness:
    /// `low <= min(open, close)`, `max(open, close) <= high`, every field
    /// finite and non-negative. Bars failing this are dropped at series
    /// construction rather than propagated.
    pub fn is_valid(&self) -> bool {
        let fields = [self.open, self.high, self.low, self.close];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return false;
        }
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }

    /// All four fields multiplied by `rate`. Preserves the ordering
    /// invariant for any positive finite rate.
    pub fn scaled(&self, rate: f64) -> Self {
        Self {
            timestamp: self.timestamp,
            open: self.open * rate,
            high: self.high * rate,
            low: self.low * rate,
            close: self.close * rate,
        }
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} o={} h={} l={} c={}",
            self.timestamp.to_rfc3339(),
            self.open,
            self.high,
            self.low,
            self.close
        )
    }
}

/// The two input shapes a raw-series provider may supply.
///
/// Bar-level feeds arrive already bucketed at a fixed interval; tick-level
/// feeds are irregular and go through the resampler first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawSeries {
    Bars(Vec<Bar>),
    Ticks(Vec<PricePoint>),
}

impl RawSeries {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bars(bars) => bars.is_empty(),
            Self::Ticks(ticks) => ticks.is_empty(),
        }
    }
}
