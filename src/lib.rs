// =============================================================================
// Prism Market Analyzer — normalization and indicator pipeline
// =============================================================================

//! Turns raw price observations for heterogeneous instruments into uniform
//! OHLC bars, technical indicator columns, and a short rule-based trend
//! assessment.
//!
//! The pipeline is pure and synchronous: fetchers feed it materialised
//! observations through [`pipeline::RawSeriesProvider`], and presentation
//! surfaces consume the resulting [`engine::IndicatorFrame`] and
//! [`trend::Signal`]. Nothing here performs I/O of its own.

pub mod config;
pub mod cross_rate;
pub mod engine;
pub mod indicators;
pub mod pipeline;
pub mod resampler;
pub mod series;
pub mod trend;
pub mod types;

pub use config::AnalyzerConfig;
pub use engine::{IndicatorEngine, IndicatorFrame};
pub use pipeline::{Analysis, AnalysisPipeline, AnalysisRequest, RawSeriesProvider};
pub use resampler::BucketWidth;
pub use series::Series;
pub use trend::{Signal, TrendAnalyzer};
pub use types::{Bar, PricePoint, RawSeries};
