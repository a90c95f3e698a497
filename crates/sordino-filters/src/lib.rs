//! Sordino Filters - interchangeable denoising strategies
//!
//! Every filter implements [`Denoiser`]: a pure function from a signal to a
//! new signal of the same length and sample rate.
//!
//! - [`ThresholdFilter`] - Hard spectral low-pass / high-pass at a cutoff frequency
//! - [`BandpassFilter`] - Zero-phase Butterworth band-pass in the time domain
//! - [`NoiseGateFilter`] - Zero spectral bins below a fixed magnitude
//! - [`AdaptiveNoiseReducer`] - Noise gate with a threshold derived from the signal itself
//! - [`DenoisingPipeline`] - Ordered stages built from [`FilterSpec`]s
//!
//! ## Example
//!
//! ```rust
//! use sordino_core::AudioSignal;
//! use sordino_filters::{DenoisingPipeline, FilterSpec, ThresholdMode};
//!
//! let signal = AudioSignal::new(8000, vec![0.5; 800]).unwrap();
//!
//! let pipeline = DenoisingPipeline::new()
//!     .with_stage(FilterSpec::Threshold { threshold_hz: 1000.0, mode: ThresholdMode::Low })
//!     .unwrap()
//!     .with_stage(FilterSpec::Adaptive)
//!     .unwrap();
//!
//! let denoised = pipeline.run(&signal).unwrap();
//! assert_eq!(denoised.len(), signal.len());
//! ```

pub mod adaptive;
pub mod bandpass;
pub mod butterworth;
pub mod noise_gate;
pub mod pipeline;
mod spectral;
pub mod threshold;

// Re-export main types at crate root
pub use adaptive::{
    ADAPTIVE_THRESHOLD_RATIO, AdaptiveNoiseReducer, adaptive_noise_reduction, dynamic_threshold,
};
pub use bandpass::{BandpassFilter, DEFAULT_ORDER, bandpass_filter};
pub use noise_gate::{NoiseGateFilter, gate_spectrum, noise_gate_filter};
pub use pipeline::{DenoisingPipeline, FilterSpec};
pub use threshold::{ThresholdFilter, ThresholdMode, threshold_filter};

pub use sordino_core::Denoiser;
