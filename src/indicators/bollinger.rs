// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A middle band (strict-window SMA) and an envelope at ± `num_std` rolling
// standard deviations. The deviation is the sample standard deviation
// (n - 1 denominator). All three columns are undefined until a full window
// of history exists — no partial-window substitute.

use crate::indicators::sma;

/// The three band columns, each aligned to the input closes.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub mid: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger Bands for `closes` over a strict `period` window with
/// an envelope of `num_std` standard deviations.
///
/// Entries before a full window are `None`. A `period` below 2 leaves the
/// envelope undefined everywhere (the sample deviation needs at least two
/// observations); the mid band follows the strict-mean policy on its own.
pub fn calculate(closes: &[f64], period: usize, num_std: f64) -> BollingerBands {
    let mid = sma::strict_mean(closes, period);
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    if period >= 2 {
        for i in (period - 1)..closes.len() {
            let Some(mean) = mid[i] else {
                continue;
            };
            let window = &closes[i + 1 - period..=i];
            let variance =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (period as f64 - 1.0);
            let deviation = variance.sqrt();
            upper[i] = Some(mean + num_std * deviation);
            lower[i] = Some(mean - num_std * deviation);
        }
    }

    BollingerBands { mid, upper, lower }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn bands_undefined_before_full_window() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let bands = calculate(&closes, 20, 2.0);

        for i in 0..19 {
            assert!(bands.mid[i].is_none());
            assert!(bands.upper[i].is_none());
            assert!(bands.lower[i].is_none());
        }
        for i in 19..25 {
            assert!(bands.mid[i].is_some());
            assert!(bands.upper[i].is_some());
            assert!(bands.lower[i].is_some());
        }
    }

    #[test]
    fn bands_bracket_the_mid() {
        let closes: Vec<f64> = (1..=40).map(|x| (x as f64 * 0.7).sin() * 5.0 + 100.0).collect();
        let bands = calculate(&closes, 20, 2.0);

        for i in 19..closes.len() {
            let mid = bands.mid[i].unwrap();
            assert!(bands.upper[i].unwrap() >= mid);
            assert!(bands.lower[i].unwrap() <= mid);
        }
    }

    #[test]
    fn sample_deviation_known_value() {
        // Window [2, 4, 6]: mean 4, sample variance ((4+0+4)/2) = 4, sd = 2.
        let bands = calculate(&[2.0, 4.0, 6.0], 3, 2.0);
        assert!((bands.mid[2].unwrap() - 4.0).abs() < EPS);
        assert!((bands.upper[2].unwrap() - 8.0).abs() < EPS);
        assert!((bands.lower[2].unwrap() - 0.0).abs() < EPS);
    }

    #[test]
    fn flat_window_collapses_bands_onto_mid() {
        let bands = calculate(&[100.0; 25], 20, 2.0);
        for i in 19..25 {
            assert!((bands.upper[i].unwrap() - 100.0).abs() < EPS);
            assert!((bands.lower[i].unwrap() - 100.0).abs() < EPS);
        }
    }

    #[test]
    fn insufficient_data_all_none() {
        let bands = calculate(&[1.0, 2.0, 3.0], 20, 2.0);
        assert!(bands.mid.iter().all(Option::is_none));
        assert!(bands.upper.iter().all(Option::is_none));
        assert!(bands.lower.iter().all(Option::is_none));
    }

    #[test]
    fn degenerate_period_leaves_envelope_undefined() {
        let bands = calculate(&[1.0, 2.0, 3.0], 1, 2.0);
        // Mid follows the strict mean; the envelope needs two observations.
        assert!(bands.mid.iter().all(Option::is_some));
        assert!(bands.upper.iter().all(Option::is_none));
        assert!(bands.lower.iter().all(Option::is_none));
    }
}
