//! Filter selection and ordered multi-stage denoising.

use crate::{
    AdaptiveNoiseReducer, BandpassFilter, DEFAULT_ORDER, NoiseGateFilter, ThresholdFilter,
    ThresholdMode,
};
use sordino_core::{AudioSignal, Denoiser, Error, Result};
use std::fmt;

/// Parameters selecting one filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterSpec {
    /// Hard spectral cutoff.
    Threshold {
        /// Cutoff in Hz.
        threshold_hz: f64,
        /// Side of the cutoff that survives.
        mode: ThresholdMode,
    },
    /// Zero-phase Butterworth band-pass.
    Bandpass {
        /// Lower edge in Hz.
        low_cut_hz: f64,
        /// Upper edge in Hz.
        high_cut_hz: f64,
        /// Prototype order.
        order: usize,
    },
    /// Fixed-threshold spectral gate.
    NoiseGate {
        /// Bins with a smaller magnitude are zeroed.
        magnitude_threshold: f64,
    },
    /// Spectral gate at half the mean bin magnitude.
    Adaptive,
}

impl FilterSpec {
    /// Band-pass spec with [`DEFAULT_ORDER`].
    pub fn bandpass(low_cut_hz: f64, high_cut_hz: f64) -> Self {
        FilterSpec::Bandpass {
            low_cut_hz,
            high_cut_hz,
            order: DEFAULT_ORDER,
        }
    }

    /// Validate the parameters and construct the filter.
    ///
    /// Band-pass edges are checked against Nyquist only when the filter
    /// runs.
    pub fn build(&self) -> Result<Box<dyn Denoiser>> {
        Ok(match *self {
            FilterSpec::Threshold { threshold_hz, mode } => {
                Box::new(ThresholdFilter::new(threshold_hz, mode)?)
            }
            FilterSpec::Bandpass {
                low_cut_hz,
                high_cut_hz,
                order,
            } => Box::new(BandpassFilter::new(low_cut_hz, high_cut_hz, order)?),
            FilterSpec::NoiseGate {
                magnitude_threshold,
            } => Box::new(NoiseGateFilter::new(magnitude_threshold)?),
            FilterSpec::Adaptive => Box::new(AdaptiveNoiseReducer),
        })
    }

    /// Short human-readable description, e.g. `threshold(low, 1000 Hz)`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Threshold { threshold_hz, mode } => {
                write!(f, "threshold({mode}, {threshold_hz} Hz)")
            }
            FilterSpec::Bandpass {
                low_cut_hz,
                high_cut_hz,
                order,
            } => write!(f, "bandpass({low_cut_hz}-{high_cut_hz} Hz, order {order})"),
            FilterSpec::NoiseGate {
                magnitude_threshold,
            } => write!(f, "noise_gate({magnitude_threshold})"),
            FilterSpec::Adaptive => f.write_str("adaptive"),
        }
    }
}

struct Stage {
    label: String,
    filter: Box<dyn Denoiser>,
}

/// An ordered list of denoising stages.
///
/// [`run`](DenoisingPipeline::run) feeds each stage the previous stage's
/// output; [`run_each`](DenoisingPipeline::run_each) feeds every stage the
/// same input.
///
/// # Example
///
/// ```rust
/// use sordino_core::AudioSignal;
/// use sordino_filters::{DenoisingPipeline, FilterSpec};
///
/// let mut pipeline = DenoisingPipeline::new();
/// pipeline.add(FilterSpec::NoiseGate { magnitude_threshold: 0.0 }).unwrap();
/// pipeline.add(FilterSpec::Adaptive).unwrap();
/// assert_eq!(pipeline.len(), 2);
///
/// // A negative gate threshold is rejected before anything runs
/// assert!(pipeline.add(FilterSpec::NoiseGate { magnitude_threshold: -1.0 }).is_err());
/// assert_eq!(pipeline.len(), 2);
/// ```
#[derive(Default)]
pub struct DenoisingPipeline {
    stages: Vec<Stage>,
}

impl fmt::Debug for DenoisingPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenoisingPipeline")
            .field("stages", &self.stages())
            .finish()
    }
}

impl DenoisingPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and append it as the last stage.
    pub fn add(&mut self, spec: FilterSpec) -> Result<()> {
        let filter = spec.build()?;
        self.stages.push(Stage {
            label: spec.label(),
            filter,
        });
        Ok(())
    }

    /// Builder form of [`add`](DenoisingPipeline::add).
    pub fn with_stage(mut self, spec: FilterSpec) -> Result<Self> {
        self.add(spec)?;
        Ok(self)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage labels in execution order.
    pub fn stages(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.label.as_str()).collect()
    }

    /// Run every stage in order, each on the previous stage's output.
    ///
    /// Stops at the first failing stage and returns its error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty pipeline, otherwise whatever
    /// the failing stage reports.
    pub fn run(&self, signal: &AudioSignal) -> Result<AudioSignal> {
        let (first, rest) = self
            .stages
            .split_first()
            .ok_or_else(|| Error::invalid("pipeline has no stages"))?;

        let mut current = Self::run_stage(0, first, signal)?;
        for (index, stage) in rest.iter().enumerate() {
            current = Self::run_stage(index + 1, stage, &current)?;
        }
        Ok(current)
    }

    /// Run every stage independently on the same input.
    ///
    /// Returns `(label, result)` for each stage in order. A failing stage
    /// does not stop the others.
    pub fn run_each(&self, signal: &AudioSignal) -> Vec<(String, Result<AudioSignal>)> {
        self.stages
            .iter()
            .enumerate()
            .map(|(index, stage)| (stage.label.clone(), Self::run_stage(index, stage, signal)))
            .collect()
    }

    fn run_stage(index: usize, stage: &Stage, input: &AudioSignal) -> Result<AudioSignal> {
        tracing::debug!(
            stage = index,
            filter = stage.filter.name(),
            label = %stage.label,
            samples = input.len(),
            "running stage"
        );
        let result = stage.filter.apply(input);
        if let Err(ref e) = result {
            tracing::warn!(stage = index, label = %stage.label, error = %e, "stage failed");
        }
        result
    }
}
