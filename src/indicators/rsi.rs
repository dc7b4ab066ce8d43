// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — Compute per-bar close differences; split each into
//          gain = max(diff, 0) and loss = max(-diff, 0).
// Step 2 — Seed average gain / average loss with the simple mean of the
//          first `period` gains / losses.
// Step 3 — Smooth exponentially with alpha = 1/period:
//            avg = (prev_avg * (period - 1) + current) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// At least `period` differences are consumed before the first value exists,
// so bars at index < period carry `None` — absence, not zero. When the
// average loss is exactly zero the RSI is 100 by definition; the division
// is never attempted.

/// Compute the RSI column for `closes` with look-back `period`.
///
/// Returns one entry per close: `None` through index `period - 1`, a value
/// in `[0, 100]` from index `period` onward. Inputs shorter than
/// `period + 1` (or `period == 0`) yield an all-`None` column.
pub fn relative_strength(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return result;
    }

    // deltas[i] is the change into bar i + 1.
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(gain, loss), &delta| {
            (gain + delta.max(0.0), loss + (-delta).max(0.0))
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;
    result[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    for (i, &delta) in deltas.iter().enumerate().skip(period) {
        avg_gain = (avg_gain * (period_f - 1.0) + delta.max(0.0)) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + (-delta).max(0.0)) / period_f;
        result[i + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// Zero average loss (no down moves in the smoothed window) is defined as
/// 100 — this also covers the completely flat window.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
