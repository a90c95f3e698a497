//! Time-domain level metrics.

/// Floor returned by the dB conversions for silence.
pub const SILENCE_DB: f64 = -200.0;

/// Convert a linear amplitude ratio to decibels.
///
/// Values at or below `1e-10` map to [`SILENCE_DB`].
pub fn linear_to_db(linear: f64) -> f64 {
    if linear > 1e-10 {
        20.0 * linear.log10()
    } else {
        SILENCE_DB
    }
}

/// Compute RMS (Root Mean Square) level of a signal
///
/// Returns RMS value in linear scale (not dB)
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = signal.iter().map(|&x| x * x).sum();
    (sum_sq / signal.len() as f64).sqrt()
}

/// RMS relative to `full_scale`, in dB.
pub fn rms_db(signal: &[f64], full_scale: f64) -> f64 {
    linear_to_db(rms(signal) / full_scale)
}

/// Compute peak level (maximum absolute value)
pub fn peak(signal: &[f64]) -> f64 {
    signal.iter().map(|x| x.abs()).fold(0.0, f64::max)
}

/// Peak relative to `full_scale`, in dB.
pub fn peak_db(signal: &[f64], full_scale: f64) -> f64 {
    linear_to_db(peak(signal) / full_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn sine_rms_is_amplitude_over_sqrt2() {
        let signal: Vec<f64> = (0..1000)
            .map(|i| (2.0 * PI * 10.0 * f64::from(i) / 1000.0).sin())
            .collect();
        assert!((rms(&signal) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!((peak(&signal) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn db_conversions() {
        assert!((linear_to_db(1.0)).abs() < 1e-12);
        assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
        assert_eq!(linear_to_db(0.0), SILENCE_DB);
        assert!((peak_db(&[-16384.0, 100.0], 32768.0) + 6.0206).abs() < 1e-3);
    }

    #[test]
    fn empty_signal_levels() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(rms_db(&[], 1.0), SILENCE_DB);
    }
}
