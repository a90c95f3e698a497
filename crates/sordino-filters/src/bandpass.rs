//! Zero-phase Butterworth band-pass.

use crate::butterworth::{MAX_ORDER, bandpass_sections};
use sordino_core::{AudioSignal, Denoiser, Error, Result, SosCascade};

/// Default prototype order (the cascade has twice as many poles).
pub const DEFAULT_ORDER: usize = 4;

/// Butterworth band-pass applied forward and backward in the time domain.
///
/// Band edges are checked against the signal's Nyquist frequency when the
/// filter runs, since the sample rate is only known then. Everything that
/// does not depend on the rate is checked at construction.
///
/// # Example
///
/// ```rust
/// use sordino_core::{AudioSignal, Denoiser};
/// use sordino_filters::BandpassFilter;
///
/// let filter = BandpassFilter::with_default_order(300.0, 3000.0).unwrap();
/// let signal = AudioSignal::new(8000, vec![0.0; 1000]).unwrap();
/// assert_eq!(filter.apply(&signal).unwrap().len(), 1000);
///
/// // 5 kHz is above Nyquist at 8 kHz
/// let too_wide = BandpassFilter::with_default_order(300.0, 5000.0).unwrap();
/// assert!(too_wide.apply(&signal).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandpassFilter {
    low_cut_hz: f64,
    high_cut_hz: f64,
    order: usize,
}

impl BandpassFilter {
    /// Create a band-pass filter.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `0 < low_cut_hz < high_cut_hz`,
    /// both finite, and `1 <= order <= 16`.
    pub fn new(low_cut_hz: f64, high_cut_hz: f64, order: usize) -> Result<Self> {
        if !(1..=MAX_ORDER).contains(&order) {
            return Err(Error::invalid(format!(
                "order must be in 1..={MAX_ORDER}, got {order}"
            )));
        }
        if !(low_cut_hz > 0.0 && low_cut_hz < high_cut_hz && high_cut_hz.is_finite()) {
            return Err(Error::invalid(format!(
                "band edges must satisfy 0 < low < high, got {low_cut_hz}..{high_cut_hz}"
            )));
        }
        Ok(Self {
            low_cut_hz,
            high_cut_hz,
            order,
        })
    }

    /// Create a band-pass filter of [`DEFAULT_ORDER`].
    pub fn with_default_order(low_cut_hz: f64, high_cut_hz: f64) -> Result<Self> {
        Self::new(low_cut_hz, high_cut_hz, DEFAULT_ORDER)
    }

    /// Lower band edge in Hz.
    pub fn low_cut_hz(&self) -> f64 {
        self.low_cut_hz
    }

    /// Upper band edge in Hz.
    pub fn high_cut_hz(&self) -> f64 {
        self.high_cut_hz
    }

    /// Prototype order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Second-order sections for `sample_rate`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `high_cut_hz` is at or above Nyquist.
    pub fn design(&self, sample_rate: u32) -> Result<SosCascade> {
        bandpass_sections(
            self.order,
            self.low_cut_hz,
            self.high_cut_hz,
            f64::from(sample_rate),
        )
    }
}

impl Denoiser for BandpassFilter {
    fn name(&self) -> &'static str {
        "bandpass"
    }

    fn apply(&self, signal: &AudioSignal) -> Result<AudioSignal> {
        let cascade = self.design(signal.sample_rate())?;

        tracing::debug!(
            low_hz = self.low_cut_hz,
            high_hz = self.high_cut_hz,
            order = self.order,
            pad = cascade.pad_len(signal.len()),
            "bandpass filter"
        );

        signal.with_samples(cascade.filtfilt(signal.samples()))
    }
}

/// Apply a [`BandpassFilter`] with the given edges and order.
pub fn bandpass_filter(
    signal: &AudioSignal,
    low_cut_hz: f64,
    high_cut_hz: f64,
    order: usize,
) -> Result<AudioSignal> {
    BandpassFilter::new(low_cut_hz, high_cut_hz, order)?.apply(signal)
}
