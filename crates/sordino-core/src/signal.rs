//! Validated mono audio signal.

use crate::error::{Error, Result};

/// A mono audio signal: a sample rate and a non-empty run of finite samples.
///
/// Signals are values. Filters read them and hand back a new signal; nothing
/// mutates a signal in place, so the same input can be shared between
/// threads running different filters.
///
/// # Example
///
/// ```rust
/// use sordino_core::AudioSignal;
///
/// let signal = AudioSignal::new(8000, vec![0.0; 8000]).unwrap();
/// assert_eq!(signal.duration_secs(), 1.0);
/// assert_eq!(signal.nyquist(), 4000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    sample_rate: u32,
    samples: Vec<f64>,
}

impl AudioSignal {
    /// Create a signal, validating the rate and every sample.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `sample_rate` is zero
    /// - [`Error::EmptySignal`] if `samples` is empty
    /// - [`Error::NonFiniteSample`] if any sample is NaN or infinite
    pub fn new(sample_rate: u32, samples: Vec<f64>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid("sample rate must be positive"));
        }
        validate_samples(&samples)?;
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Build a new signal at this signal's sample rate.
    ///
    /// Used by filters to wrap their output; the samples are validated the
    /// same way [`AudioSignal::new`] does.
    pub fn with_samples(&self, samples: Vec<f64>) -> Result<Self> {
        Self::new(self.sample_rate, samples)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the signal, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Number of samples. Never zero.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Nyquist frequency (half the sample rate) in Hz.
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }
}

/// Check that a sample run is non-empty and entirely finite.
fn validate_samples(samples: &[f64]) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptySignal);
    }
    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(Error::NonFiniteSample { index });
    }
    Ok(())
}
