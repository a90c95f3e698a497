//! Spectral statistics over a [`FrequencySpectrum`].

use crate::transform::{FrequencySpectrum, forward, forward_normalized};
use sordino_core::AudioSignal;

/// `(frequency, magnitude)` of every bin with a non-negative frequency label.
///
/// This is the half of the spectrum that gets plotted.
pub fn positive_half(spectrum: &FrequencySpectrum) -> Vec<(f64, f64)> {
    spectrum
        .iter()
        .filter(|(freq, _)| *freq >= 0.0)
        .map(|(freq, bin)| (freq, bin.norm()))
        .collect()
}

/// `(frequency, magnitude)` for the positive half of `signal`'s spectrum.
pub fn magnitude_spectrum(signal: &AudioSignal) -> Vec<(f64, f64)> {
    positive_half(&forward(signal))
}

/// Mean bin magnitude over the full spectrum of `signal`.
pub fn mean_spectral_magnitude(signal: &AudioSignal) -> f64 {
    let (spectrum, scale) = forward_normalized(signal);
    spectrum.mean_magnitude() * scale
}

/// Frequency of the strongest non-DC bin in the positive half.
///
/// Returns 0.0 when the spectrum has no positive-frequency bins.
pub fn dominant_frequency(spectrum: &FrequencySpectrum) -> f64 {
    positive_half(spectrum)
        .into_iter()
        .filter(|(freq, _)| *freq > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(freq, _)| freq)
        .unwrap_or(0.0)
}

/// Total energy (sum of squared magnitudes) in bins with `|frequency| > cutoff_hz`.
pub fn energy_above(spectrum: &FrequencySpectrum, cutoff_hz: f64) -> f64 {
    spectrum
        .iter()
        .filter(|(freq, _)| freq.abs() > cutoff_hz)
        .map(|(_, bin)| bin.norm_sqr())
        .sum()
}

/// Total energy in bins with `|frequency| < cutoff_hz`.
pub fn energy_below(spectrum: &FrequencySpectrum, cutoff_hz: f64) -> f64 {
    spectrum
        .iter()
        .filter(|(freq, _)| freq.abs() < cutoff_hz)
        .map(|(_, bin)| bin.norm_sqr())
        .sum()
}

/// Compute spectral centroid (center of mass of the positive half)
///
/// Returns frequency in Hz
pub fn spectral_centroid(spectrum: &FrequencySpectrum) -> f64 {
    let mut weighted_sum = 0.0;
    let mut magnitude_sum = 0.0;

    for (freq, mag) in positive_half(spectrum) {
        weighted_sum += freq * mag;
        magnitude_sum += mag;
    }

    if magnitude_sum > 1e-12 {
        weighted_sum / magnitude_sum
    } else {
        0.0
    }
}

/// Find the `count` strongest local maxima in the positive half.
///
/// Returns `(frequency, magnitude)` pairs sorted by magnitude, strongest first.
pub fn top_peaks(spectrum: &FrequencySpectrum, count: usize) -> Vec<(f64, f64)> {
    let half = positive_half(spectrum);
    let mut peaks: Vec<(f64, f64)> = half
        .windows(3)
        .filter(|w| w[1].1 > w[0].1 && w[1].1 >= w[2].1)
        .map(|w| w[1])
        .collect();

    peaks.sort_by(|a, b| b.1.total_cmp(&a.1));
    peaks.truncate(count);
    peaks
}
