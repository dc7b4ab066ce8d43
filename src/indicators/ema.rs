// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA weights recent closes more heavily than the simple moving average.
//
// Formula:
//   alpha = 2 / (span + 1)
//   ema_0 = close_0
//   ema_t = close_t * alpha + ema_{t-1} * (1 - alpha)
//
// Seeding with the first close means the column is defined from index 0 —
// there is no warm-up gap, only a bias toward the seed that decays with the
// smoothing factor.

/// Compute the EMA column for `values` with smoothing span `span`.
///
/// Returns one value per input element. `span == 0` or empty input yields an
/// empty vector.
pub fn exponential_mean(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        let ema = value * alpha + prev * (1.0 - alpha);
        result.push(ema);
        prev = ema;
    }
    result
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn ema_empty_input() {
        assert!(exponential_mean(&[], 20).is_empty());
    }

    #[test]
    fn ema_span_zero() {
        assert!(exponential_mean(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn ema_seeded_with_first_value() {
        let ema = exponential_mean(&[5.0, 6.0, 7.0], 20);
        assert_eq!(ema.len(), 3);
        assert!((ema[0] - 5.0).abs() < EPS);
    }

    #[test]
    fn ema_known_recurrence() {
        // span 4 => alpha = 0.4
        let values = [10.0, 20.0, 15.0];
        let ema = exponential_mean(&values, 4);
        let e1 = 20.0 * 0.4 + 10.0 * 0.6; // 14.0
        let e2 = 15.0 * 0.4 + e1 * 0.6; // 14.4
        assert!((ema[1] - e1).abs() < EPS);
        assert!((ema[2] - e2).abs() < EPS);
    }

    #[test]
    fn ema_constant_series_stays_constant() {
        let ema = exponential_mean(&[42.0; 50], 20);
        for &v in &ema {
            assert!((v - 42.0).abs() < EPS);
        }
    }

    #[test]
    fn ema_tracks_rising_series_from_below() {
        let values: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let ema = exponential_mean(&values, 20);
        // EMA lags a rising series but must increase monotonically here.
        for pair in ema.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!(ema[99] < 100.0);
    }
}
