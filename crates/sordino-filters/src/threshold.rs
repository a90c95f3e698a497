//! Hard spectral low-pass / high-pass at a cutoff frequency.
//!
//! The filter zeroes whole DFT bins on one side of the cutoff. There is no
//! transition band, so the result can ring; for a smooth response use
//! [`BandpassFilter`](crate::BandpassFilter).

use crate::spectral::filter_spectrum;
use sordino_core::{AudioSignal, Denoiser, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which side of the cutoff survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdMode {
    /// Keep frequencies at or below the cutoff.
    Low,
    /// Keep frequencies at or above the cutoff.
    High,
}

impl FromStr for ThresholdMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(ThresholdMode::Low),
            "high" => Ok(ThresholdMode::High),
            other => Err(Error::invalid(format!(
                "threshold mode must be 'low' or 'high', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThresholdMode::Low => "low",
            ThresholdMode::High => "high",
        })
    }
}

/// Spectral gate on bin frequency.
///
/// # Example
///
/// ```rust
/// use sordino_core::{AudioSignal, Denoiser};
/// use sordino_filters::{ThresholdFilter, ThresholdMode};
///
/// let signal = AudioSignal::new(8000, vec![1.0, -1.0, 1.0, -1.0]).unwrap();
/// let lowpass = ThresholdFilter::new(1000.0, ThresholdMode::Low).unwrap();
///
/// // The alternating signal sits entirely at Nyquist, so nothing survives.
/// let out = lowpass.apply(&signal).unwrap();
/// assert!(out.samples().iter().all(|s| s.abs() < 1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdFilter {
    threshold_hz: f64,
    mode: ThresholdMode,
}

impl ThresholdFilter {
    /// Create a threshold filter.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `threshold_hz` is negative or not finite.
    pub fn new(threshold_hz: f64, mode: ThresholdMode) -> Result<Self> {
        if !(threshold_hz.is_finite() && threshold_hz >= 0.0) {
            return Err(Error::invalid(format!(
                "threshold must be a non-negative frequency, got {threshold_hz}"
            )));
        }
        Ok(Self { threshold_hz, mode })
    }

    /// Cutoff frequency in Hz.
    pub fn threshold_hz(&self) -> f64 {
        self.threshold_hz
    }

    /// Which side of the cutoff survives.
    pub fn mode(&self) -> ThresholdMode {
        self.mode
    }
}

impl Denoiser for ThresholdFilter {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn apply(&self, signal: &AudioSignal) -> Result<AudioSignal> {
        let cutoff = self.threshold_hz;

        filter_spectrum(signal, |spectrum, _| {
            let zeroed = match self.mode {
                ThresholdMode::Low => spectrum.zero_where(|freq, _| freq.abs() > cutoff),
                ThresholdMode::High => spectrum.zero_where(|freq, _| freq.abs() < cutoff),
            };

            tracing::debug!(
                mode = %self.mode,
                cutoff_hz = cutoff,
                zeroed,
                bins = spectrum.len(),
                "threshold filter"
            );
        })
    }
}

/// Apply a [`ThresholdFilter`] with a mode given by name (`"low"` or `"high"`).
///
/// The mode is validated before any transform runs.
pub fn threshold_filter(signal: &AudioSignal, threshold_hz: f64, mode: &str) -> Result<AudioSignal> {
    let mode = mode.parse()?;
    ThresholdFilter::new(threshold_hz, mode)?.apply(signal)
}
