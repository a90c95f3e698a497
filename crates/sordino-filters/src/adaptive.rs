//! Noise gate whose threshold is derived from the signal's own spectrum.

use crate::noise_gate::gate_spectrum;
use crate::spectral::filter_spectrum;
use sordino_analysis::transform::forward_normalized;
use sordino_core::{AudioSignal, Denoiser, Result};

/// Fraction of the mean bin magnitude used as the gate threshold.
pub const ADAPTIVE_THRESHOLD_RATIO: f64 = 0.5;

/// Gate at half the mean spectral magnitude of the input.
///
/// Bins quieter than the typical bin are treated as noise. There are no
/// parameters; the result depends only on the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdaptiveNoiseReducer;

impl AdaptiveNoiseReducer {
    /// Create the reducer.
    pub fn new() -> Self {
        Self
    }
}

/// The threshold [`AdaptiveNoiseReducer`] would use for `signal`.
///
/// Reported in the signal's own magnitude units, so it may be infinite for
/// samples near `f64::MAX`; the reducer itself gates on the peak-scaled
/// spectrum and never sees that overflow.
pub fn dynamic_threshold(signal: &AudioSignal) -> f64 {
    let (spectrum, scale) = forward_normalized(signal);
    ADAPTIVE_THRESHOLD_RATIO * spectrum.mean_magnitude() * scale
}

impl Denoiser for AdaptiveNoiseReducer {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn apply(&self, signal: &AudioSignal) -> Result<AudioSignal> {
        filter_spectrum(signal, |spectrum, scale| {
            // Already in scaled-spectrum units
            let threshold = ADAPTIVE_THRESHOLD_RATIO * spectrum.mean_magnitude();
            let zeroed = gate_spectrum(spectrum, threshold);

            tracing::debug!(
                threshold = threshold * scale,
                zeroed,
                bins = spectrum.len(),
                "adaptive noise reduction"
            );
        })
    }
}

/// Apply an [`AdaptiveNoiseReducer`].
pub fn adaptive_noise_reduction(signal: &AudioSignal) -> Result<AudioSignal> {
    AdaptiveNoiseReducer.apply(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_gate::noise_gate_filter;

    #[test]
    fn constant_signal_keeps_dc() {
        // Only the DC bin is non-zero, so the mean is DC / n and DC survives
        let signal = AudioSignal::new(100, vec![2.0; 100]).unwrap();
        let out = adaptive_noise_reduction(&signal).unwrap();
        for s in out.samples() {
            assert!((s - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn huge_constant_signal_is_preserved() {
        let signal = AudioSignal::new(8000, vec![1e306; 1000]).unwrap();
        let out = adaptive_noise_reduction(&signal).unwrap();
        for s in out.samples() {
            assert!(((s - 1e306) / 1e306).abs() < 1e-9);
        }
    }

    #[test]
    fn near_overflow_tone_is_finite() {
        let n = 2048;
        let amplitude = f64::MAX / n as f64;
        let samples: Vec<f64> = (0..n)
            .map(|i| amplitude * (i as f64 * 0.3).sin())
            .collect();
        let signal = AudioSignal::new(8000, samples).unwrap();
        let out = adaptive_noise_reduction(&signal).unwrap();
        assert_eq!(out.len(), n);
        assert!(out.samples().iter().all(|s| s.is_finite()));
    }

    #[test]
    fn silence_stays_silent() {
        let signal = AudioSignal::new(100, vec![0.0; 100]).unwrap();
        assert_eq!(dynamic_threshold(&signal), 0.0);
        let out = adaptive_noise_reduction(&signal).unwrap();
        assert!(out.samples().iter().all(|s| *s == 0.0));
    }

    #[test]
    fn matches_noise_gate_at_dynamic_threshold() {
        let samples: Vec<f64> = (0..257).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
        let signal = AudioSignal::new(1000, samples).unwrap();
        let threshold = dynamic_threshold(&signal);
        let adaptive = adaptive_noise_reduction(&signal).unwrap();
        let gated = noise_gate_filter(&signal, threshold).unwrap();
        assert_eq!(adaptive, gated);
    }

    #[test]
    fn deterministic() {
        let samples: Vec<f64> = (0..500).map(|i| (f64::from(i) * 0.37).sin()).collect();
        let signal = AudioSignal::new(8000, samples).unwrap();
        assert_eq!(
            adaptive_noise_reduction(&signal).unwrap(),
            AdaptiveNoiseReducer::new().apply(&signal).unwrap()
        );
    }
}
