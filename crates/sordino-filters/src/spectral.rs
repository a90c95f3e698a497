//! Spectral round trip shared by the FFT-domain filters.

use sordino_analysis::FrequencySpectrum;
use sordino_analysis::transform::{forward_normalized, inverse};
use sordino_core::{AudioSignal, Result};

/// Edit the spectrum of `signal` in place, then transform back.
///
/// `edit` receives the spectrum of the signal divided by its peak, and that
/// peak. Magnitudes in signal units have to be divided by the peak before
/// they are compared with bins.
pub(crate) fn filter_spectrum(
    signal: &AudioSignal,
    edit: impl FnOnce(&mut FrequencySpectrum, f64),
) -> Result<AudioSignal> {
    let (mut spectrum, scale) = forward_normalized(signal);
    edit(&mut spectrum, scale);
    signal.with_samples(inverse(&spectrum).into_iter().map(|x| x * scale).collect())
}
