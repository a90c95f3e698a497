//! Original-vs-processed comparison.
//!
//! Time-domain error metrics work on the overlapping length of the two
//! signals; [`CompareReport`] bundles them with level and spectral
//! statistics for a before/after summary.

use crate::dynamics;
use crate::spectrum::mean_spectral_magnitude;
use sordino_core::{AudioSignal, Error, Result};

/// Compute Mean Squared Error between two signals
pub fn mse(reference: &[f64], processed: &[f64]) -> f64 {
    let len = reference.len().min(processed.len());
    if len == 0 {
        return 0.0;
    }

    let sum: f64 = reference[..len]
        .iter()
        .zip(&processed[..len])
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    sum / len as f64
}

/// Compute Root Mean Squared Error
pub fn rmse(reference: &[f64], processed: &[f64]) -> f64 {
    mse(reference, processed).sqrt()
}

/// Signal-to-noise ratio in dB, treating `processed - reference` as noise.
///
/// Returns `f64::INFINITY` for identical signals.
pub fn snr_db(reference: &[f64], processed: &[f64]) -> f64 {
    let len = reference.len().min(processed.len());

    let signal_power: f64 = reference[..len].iter().map(|x| x * x).sum();
    let noise_power: f64 = reference[..len]
        .iter()
        .zip(&processed[..len])
        .map(|(a, b)| (a - b) * (a - b))
        .sum();

    if noise_power < 1e-20 {
        f64::INFINITY
    } else if signal_power < 1e-20 {
        f64::NEG_INFINITY
    } else {
        10.0 * (signal_power / noise_power).log10()
    }
}

/// Before/after summary of a denoising run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareReport {
    /// Shared sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples compared (the shorter of the two signals).
    pub compared_samples: usize,
    /// RMS level of the original.
    pub original_rms: f64,
    /// RMS level of the processed signal.
    pub processed_rms: f64,
    /// Peak level of the original.
    pub original_peak: f64,
    /// Peak level of the processed signal.
    pub processed_peak: f64,
    /// Mean spectral magnitude of the original.
    pub original_mean_magnitude: f64,
    /// Mean spectral magnitude of the processed signal.
    pub processed_mean_magnitude: f64,
    /// Mean squared error over the compared samples.
    pub mse: f64,
    /// SNR of processed against original, in dB.
    pub snr_db: f64,
}

impl CompareReport {
    /// Compare an original signal with its processed version.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the sample rates differ.
    pub fn new(original: &AudioSignal, processed: &AudioSignal) -> Result<Self> {
        if original.sample_rate() != processed.sample_rate() {
            return Err(Error::invalid(format!(
                "sample rate mismatch: {} vs {}",
                original.sample_rate(),
                processed.sample_rate()
            )));
        }

        let a = original.samples();
        let b = processed.samples();

        Ok(Self {
            sample_rate: original.sample_rate(),
            compared_samples: a.len().min(b.len()),
            original_rms: dynamics::rms(a),
            processed_rms: dynamics::rms(b),
            original_peak: dynamics::peak(a),
            processed_peak: dynamics::peak(b),
            original_mean_magnitude: mean_spectral_magnitude(original),
            processed_mean_magnitude: mean_spectral_magnitude(processed),
            mse: mse(a, b),
            snr_db: snr_db(a, b),
        })
    }

    /// Ratio of processed to original mean spectral magnitude.
    ///
    /// Below 1.0 means the processed signal carries less spectral content.
    pub fn magnitude_ratio(&self) -> f64 {
        if self.original_mean_magnitude > 0.0 {
            self.processed_mean_magnitude / self.original_mean_magnitude
        } else {
            1.0
        }
    }
}
