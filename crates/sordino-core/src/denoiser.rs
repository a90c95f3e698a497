//! The [`Denoiser`] trait shared by every filter.
//!
//! ## Design Decisions
//!
//! - **Pure**: `apply` takes `&self` and a borrowed signal and returns a new
//!   signal. Filters keep no state between calls.
//!
//! - **Object-safe**: pipelines hold `Box<dyn Denoiser>` so stages can be
//!   chosen at runtime from configuration.
//!
//! - **Thread-safe**: `Send + Sync` is a supertrait; a filter value can be
//!   shared by worker threads processing distinct signals.

use crate::{AudioSignal, Result};

/// A filter mapping a signal to a denoised signal.
///
/// # Example
///
/// ```rust
/// use sordino_core::{AudioSignal, Denoiser, Result};
///
/// struct Attenuate(f64);
///
/// impl Denoiser for Attenuate {
///     fn name(&self) -> &'static str {
///         "attenuate"
///     }
///
///     fn apply(&self, signal: &AudioSignal) -> Result<AudioSignal> {
///         signal.with_samples(signal.samples().iter().map(|s| s * self.0).collect())
///     }
/// }
///
/// let signal = AudioSignal::new(8000, vec![2.0, -4.0]).unwrap();
/// let out = Attenuate(0.5).apply(&signal).unwrap();
/// assert_eq!(out.samples(), &[1.0, -2.0]);
/// ```
pub trait Denoiser: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Filter `signal`, returning a new signal of the same length and rate.
    fn apply(&self, signal: &AudioSignal) -> Result<AudioSignal>;
}
