// =============================================================================
// Analysis Pipeline — raw observations in, frame + signal out
// =============================================================================
//
// One invocation runs the full chain:
//   1. Normalise the raw source — validate bars, or resample ticks.
//   2. Optionally reprice through a cross-rate series.
//   3. Compute the indicator frame.
//   4. Assess the trend.
//
// Every stage is a pure transformation over owned values; the pipeline holds
// only configuration and is safe to share across threads. Fetching,
// scheduling, and rendering belong to the caller.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::cross_rate;
use crate::engine::{IndicatorEngine, IndicatorFrame};
use crate::resampler;
use crate::series::Series;
use crate::trend::{Signal, TrendAnalyzer};
use crate::types::RawSeries;

// =============================================================================
// Provider seam
// =============================================================================

/// Source of raw observations. Implementations own all I/O concerns —
/// networking, authentication, rate limiting, response caching. The pipeline
/// only ever sees the materialised result, and declares through `RawSeries`
/// which shape it was given.
pub trait RawSeriesProvider {
    fn raw_series(&self) -> Result<RawSeries>;
}

// =============================================================================
// Request / result types
// =============================================================================

/// One analysis invocation.
///
/// `rate` carries an optional exchange-rate series for instruments quoted in
/// a foreign currency; `span_days` is the requested history span, which
/// drives the resampler's bucket width for tick-level sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub source: RawSeries,
    #[serde(default)]
    pub rate: Option<RawSeries>,
    pub span_days: u32,
}

/// Everything the rendering layer needs: the enriched series for charting
/// and the label list for the textual summary.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub frame: IndicatorFrame,
    pub signal: Signal,
}

// =============================================================================
// AnalysisPipeline
// =============================================================================

pub struct AnalysisPipeline {
    engine: IndicatorEngine,
    analyzer: TrendAnalyzer,
}

impl AnalysisPipeline {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            engine: IndicatorEngine::new(config.indicators),
            analyzer: TrendAnalyzer::new(config.trend),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Empty input at any stage flows through as an empty series and ends in
    /// the "No data to analyze." signal — never an error.
    pub fn analyze(&self, request: AnalysisRequest) -> Analysis {
        // ── 1. Normalise the source ──────────────────────────────────────
        let mut series = normalize(request.source, request.span_days);
        debug!(bars = series.len(), "source normalised");

        // ── 2. Optional cross-rate conversion ────────────────────────────
        if let Some(raw_rate) = request.rate {
            let rate = normalize(raw_rate, request.span_days);
            series = cross_rate::convert(&series, &rate);
            debug!(bars = series.len(), "cross-rate applied");
        }

        // ── 3. Indicators ────────────────────────────────────────────────
        let frame = self.engine.compute(&series);

        // ── 4. Trend assessment ──────────────────────────────────────────
        let signal = self.analyzer.assess(&frame);

        info!(
            bars = frame.len(),
            signal = %signal,
            "analysis complete"
        );
        Analysis { frame, signal }
    }

    /// Convenience wrapper: pull the raw series from a provider, then
    /// analyze it. Provider failures surface to the caller unchanged.
    pub fn analyze_provider(
        &self,
        provider: &dyn RawSeriesProvider,
        span_days: u32,
    ) -> Result<Analysis> {
        let source = provider.raw_series()?;
        Ok(self.analyze(AnalysisRequest {
            source,
            rate: None,
            span_days,
        }))
    }
}

/// Bring a raw source onto the uniform bar grid.
fn normalize(raw: RawSeries, span_days: u32) -> Series {
    match raw {
        RawSeries::Bars(bars) => Series::from_bars(bars),
        RawSeries::Ticks(ticks) => resampler::resample(ticks, span_days),
    }
}
