// =============================================================================
// Prism Market Analyzer — Snapshot Entry Point
// =============================================================================
//
// One thin presentation surface over the library pipeline: read a snapshot
// file containing raw observations (written by an external fetcher), run
// the analysis, and print the result as JSON for a rendering layer.
// =============================================================================

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use prism_analyzer::{AnalysisPipeline, AnalysisRequest, AnalyzerConfig};

const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";
const CONFIG_PATH: &str = "analyzer_config.json";

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Prism Market Analyzer starting");

    // ── 2. Config (fall back to defaults when missing) ───────────────────
    let config = AnalyzerConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        AnalyzerConfig::default()
    });

    // ── 3. Snapshot ──────────────────────────────────────────────────────
    let snapshot_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string());
    let request = read_snapshot(&snapshot_path)?;

    // ── 4. Analyze & emit ────────────────────────────────────────────────
    let pipeline = AnalysisPipeline::new(config);
    let analysis = pipeline.analyze(request);

    let rendered =
        serde_json::to_string_pretty(&analysis).context("failed to serialise analysis")?;
    println!("{rendered}");

    Ok(())
}

/// Parse an `AnalysisRequest` from a snapshot JSON file.
fn read_snapshot(path: &str) -> Result<AnalysisRequest> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read snapshot {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse snapshot {path}"))
}
