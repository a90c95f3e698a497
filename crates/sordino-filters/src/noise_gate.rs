//! Spectral noise gate with a fixed magnitude threshold.

use crate::spectral::filter_spectrum;
use sordino_analysis::FrequencySpectrum;
use sordino_core::{AudioSignal, Denoiser, Error, Result};

/// Zero every bin whose magnitude is strictly below `threshold`.
///
/// Returns the number of bins zeroed. Shared by [`NoiseGateFilter`] and
/// [`AdaptiveNoiseReducer`](crate::AdaptiveNoiseReducer).
pub fn gate_spectrum(spectrum: &mut FrequencySpectrum, threshold: f64) -> usize {
    spectrum.zero_where(|_, bin| bin.norm() < threshold)
}

/// Noise gate on spectral magnitude.
///
/// A threshold of zero passes everything. There is no upper bound: a
/// threshold above every bin magnitude silences the signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseGateFilter {
    magnitude_threshold: f64,
}

impl NoiseGateFilter {
    /// Create a noise gate.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the threshold is negative or not finite.
    pub fn new(magnitude_threshold: f64) -> Result<Self> {
        if !(magnitude_threshold.is_finite() && magnitude_threshold >= 0.0) {
            return Err(Error::invalid(format!(
                "magnitude threshold must be non-negative, got {magnitude_threshold}"
            )));
        }
        Ok(Self {
            magnitude_threshold,
        })
    }

    /// Gate threshold in spectral magnitude units.
    pub fn magnitude_threshold(&self) -> f64 {
        self.magnitude_threshold
    }
}

impl Denoiser for NoiseGateFilter {
    fn name(&self) -> &'static str {
        "noise_gate"
    }

    fn apply(&self, signal: &AudioSignal) -> Result<AudioSignal> {
        filter_spectrum(signal, |spectrum, scale| {
            let zeroed = gate_spectrum(spectrum, self.magnitude_threshold / scale);

            tracing::debug!(
                threshold = self.magnitude_threshold,
                zeroed,
                bins = spectrum.len(),
                "noise gate"
            );
        })
    }
}

/// Apply a [`NoiseGateFilter`] with the given threshold.
pub fn noise_gate_filter(signal: &AudioSignal, magnitude_threshold: f64) -> Result<AudioSignal> {
    NoiseGateFilter::new(magnitude_threshold)?.apply(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sordino_analysis::transform::forward;
    use std::f64::consts::PI;

    fn tone_with_hiss() -> AudioSignal {
        let mut state = 0x2468_ace1_u32;
        let samples = (0..1024)
            .map(|i| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let hiss = f64::from(state as i32) / f64::from(i32::MAX) * 0.01;
                (2.0 * PI * 64.0 * f64::from(i) / 1024.0).sin() + hiss
            })
            .collect();
        AudioSignal::new(1024, samples).unwrap()
    }

    #[test]
    fn zero_threshold_is_identity() {
        let signal = tone_with_hiss();
        let out = noise_gate_filter(&signal, 0.0).unwrap();
        for (a, b) in signal.samples().iter().zip(out.samples()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_threshold_is_identity_near_overflow() {
        let samples = vec![1e308, 1e308, -1e308, 5e307];
        let signal = AudioSignal::new(8000, samples).unwrap();
        let out = noise_gate_filter(&signal, 0.0).unwrap();
        for (a, b) in signal.samples().iter().zip(out.samples()) {
            assert!(((a - b) / a).abs() < 1e-12, "{a} vs {b}");
        }
    }

    #[test]
    fn threshold_is_in_signal_units_at_any_scale() {
        // Same relative gate at two scales keeps the same bins
        let signal = tone_with_hiss();
        let big = signal
            .with_samples(signal.samples().iter().map(|x| x * 1e300).collect())
            .unwrap();
        let small = noise_gate_filter(&signal, 100.0).unwrap();
        let large = noise_gate_filter(&big, 100.0 * 1e300).unwrap();
        for (a, b) in small.samples().iter().zip(large.samples()) {
            assert!((a - b / 1e300).abs() < 1e-9);
        }
    }

    #[test]
    fn huge_threshold_silences() {
        let out = noise_gate_filter(&tone_with_hiss(), 1e12).unwrap();
        assert!(out.samples().iter().all(|s| *s == 0.0));
    }

    #[test]
    fn gate_keeps_only_the_tone() {
        let signal = tone_with_hiss();
        // Tone bins have magnitude ~512; hiss bins are well under 10
        let out = noise_gate_filter(&signal, 100.0).unwrap();
        let spectrum = forward(&out);
        let nonzero: Vec<f64> = spectrum
            .iter()
            .filter(|(_, bin)| bin.norm() > 1e-6)
            .map(|(freq, _)| freq)
            .collect();
        assert_eq!(nonzero, vec![64.0, -64.0]);
    }

    #[test]
    fn rejects_negative_threshold() {
        assert!(matches!(
            NoiseGateFilter::new(-0.1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(NoiseGateFilter::new(f64::NAN).is_err());
    }

    #[test]
    fn gate_spectrum_is_strict() {
        let signal = AudioSignal::new(4, vec![1.0, 0.0, 0.0, 0.0]).unwrap();
        // Impulse: every bin has magnitude exactly 1
        let mut spectrum = forward(&signal);
        assert_eq!(gate_spectrum(&mut spectrum, 1.0), 0);
        assert_eq!(gate_spectrum(&mut spectrum, 1.0 + 1e-9), 4);
    }
}
