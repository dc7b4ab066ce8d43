// =============================================================================
// Analyzer Configuration — Tunable periods and thresholds
// =============================================================================
//
// Central configuration for the analysis pipeline. The indicator periods and
// the trend thresholds are heuristic constants with no principled
// derivation, so they live here as tunables with the conventional defaults
// rather than as magic numbers in the engine.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma_fast_period() -> usize {
    50
}

fn default_sma_slow_period() -> usize {
    200
}

fn default_ema_span() -> usize {
    20
}

fn default_rsi_period() -> usize {
    14
}

fn default_bb_period() -> usize {
    20
}

fn default_bb_std_mult() -> f64 {
    2.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_band_width_high() -> f64 {
    0.04
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Look-back windows for the indicator engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Fast simple moving average window (partial windows allowed).
    #[serde(default = "default_sma_fast_period")]
    pub sma_fast_period: usize,

    /// Slow simple moving average window (partial windows allowed).
    #[serde(default = "default_sma_slow_period")]
    pub sma_slow_period: usize,

    /// Exponential moving average smoothing span.
    #[serde(default = "default_ema_span")]
    pub ema_span: usize,

    /// RSI look-back; also the number of warm-up differences required.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Bollinger window (strict — no partial-window substitute).
    #[serde(default = "default_bb_period")]
    pub bb_period: usize,

    /// Bollinger envelope width in standard deviations.
    #[serde(default = "default_bb_std_mult")]
    pub bb_std_mult: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_fast_period: default_sma_fast_period(),
            sma_slow_period: default_sma_slow_period(),
            ema_span: default_ema_span(),
            rsi_period: default_rsi_period(),
            bb_period: default_bb_period(),
            bb_std_mult: default_bb_std_mult(),
        }
    }
}

// =============================================================================
// TrendThresholds
// =============================================================================

/// Cutoffs for the rule-based trend assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendThresholds {
    /// RSI above this is labelled overbought.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// RSI below this is labelled oversold.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    /// Relative Bollinger band width above this is labelled high volatility.
    #[serde(default = "default_band_width_high")]
    pub band_width_high: f64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            band_width_high: default_band_width_high(),
        }
    }
}

// =============================================================================
// AnalyzerConfig
// =============================================================================

/// Top-level configuration for the Prism analysis pipeline.
///
/// Every field has a serde default so that older JSON files missing new
/// fields still deserialise correctly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub indicators: IndicatorParams,

    #[serde(default)]
    pub trend: TrendThresholds,
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist or fails to parse, returns an error so the
    /// caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analyzer config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analyzer config from {}", path.display()))?;

        info!(path = %path.display(), "analyzer config loaded");
        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise analyzer config")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analyzer config saved (atomic)");
        Ok(())
    }
}
