//! Sordino Core - signal types and IIR primitives for spectral denoising
//!
//! This crate holds the pieces every other sordino crate builds on:
//!
//! ## Signals
//!
//! - [`AudioSignal`] - Validated mono signal (non-empty, finite samples, positive rate)
//!
//! ## Filters
//!
//! - [`Denoiser`] - Object-safe trait implemented by every denoising filter
//! - [`Sos`] - Second-order IIR section (transposed Direct Form II)
//! - [`SosCascade`] - Cascade of sections with single-pass and zero-phase
//!   (forward-backward) filtering
//!
//! ## Errors
//!
//! - [`Error`] / [`Result`] - Shared error type for every filter and transform
//!
//! # Example
//!
//! ```rust
//! use sordino_core::{AudioSignal, Sos, SosCascade};
//!
//! let signal = AudioSignal::new(8000, vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0]).unwrap();
//! let cascade = SosCascade::new(vec![Sos::new([0.5, 0.5, 0.0], [1.0, 0.0, 0.0])]);
//! let smoothed = cascade.filtfilt(signal.samples());
//! assert_eq!(smoothed.len(), signal.len());
//! ```

mod denoiser;
mod error;
mod signal;
pub mod sos;

pub use denoiser::Denoiser;
pub use error::{Error, Result};
pub use signal::AudioSignal;
pub use sos::{Sos, SosCascade};
