//! Sordino Analysis - spectrum transform and spectral statistics
//!
//! - [`transform`] - Forward/inverse DFT with frequency-labelled bins
//! - [`spectrum`] - Statistics over a [`FrequencySpectrum`] (mean magnitude, peaks, band energy)
//! - [`dynamics`] - Time-domain level metrics (RMS, peak, dB)
//! - [`compare`] - Original-vs-processed comparison
//! - [`export`] - CSV data for spectrum and waveform plots
//!
//! ## Example
//!
//! ```rust
//! use sordino_analysis::{transform, spectrum};
//! use sordino_core::AudioSignal;
//! use std::f64::consts::PI;
//!
//! let samples: Vec<f64> = (0..8000)
//!     .map(|i| (2.0 * PI * 440.0 * i as f64 / 8000.0).sin())
//!     .collect();
//! let signal = AudioSignal::new(8000, samples).unwrap();
//!
//! let spec = transform::forward(&signal);
//! assert_eq!(spectrum::dominant_frequency(&spec), 440.0);
//! ```

pub mod compare;
pub mod dynamics;
pub mod export;
pub mod spectrum;
pub mod transform;

pub use compare::{CompareReport, mse, rmse, snr_db};
pub use dynamics::{linear_to_db, peak, peak_db, rms, rms_db};
pub use spectrum::{
    dominant_frequency, energy_above, magnitude_spectrum, mean_spectral_magnitude,
    spectral_centroid, top_peaks,
};
pub use transform::{FrequencySpectrum, SpectrumTransform, fft_frequencies, forward_normalized};

/// Complex number type used for spectral bins.
pub use rustfft::num_complex::Complex;
