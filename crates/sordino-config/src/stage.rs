//! One stage of a pipeline file.

use serde::{Deserialize, Serialize};
use sordino_core::Result;
use sordino_filters::{DEFAULT_ORDER, FilterSpec, ThresholdMode};

/// Serialized form of a [`FilterSpec`], tagged by `type`.
///
/// ```toml
/// [[stages]]
/// type = "threshold"
/// threshold_hz = 1000.0
/// mode = "low"
///
/// [[stages]]
/// type = "adaptive"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageConfig {
    /// Hard spectral cutoff.
    Threshold {
        /// Cutoff in Hz.
        threshold_hz: f64,
        /// `"low"` or `"high"`.
        #[serde(default = "default_mode")]
        mode: String,
    },
    /// Zero-phase Butterworth band-pass.
    Bandpass {
        /// Lower edge in Hz.
        low_cut_hz: f64,
        /// Upper edge in Hz.
        high_cut_hz: f64,
        /// Prototype order.
        #[serde(default = "default_order")]
        order: usize,
    },
    /// Fixed-threshold spectral gate.
    NoiseGate {
        /// Gate threshold in spectral magnitude units.
        magnitude_threshold: f64,
    },
    /// Gate at half the mean spectral magnitude.
    Adaptive,
}

fn default_mode() -> String {
    "low".to_string()
}

fn default_order() -> usize {
    DEFAULT_ORDER
}

impl StageConfig {
    /// The `type` tag as written in TOML.
    pub fn kind(&self) -> &'static str {
        match self {
            StageConfig::Threshold { .. } => "threshold",
            StageConfig::Bandpass { .. } => "bandpass",
            StageConfig::NoiseGate { .. } => "noise_gate",
            StageConfig::Adaptive => "adaptive",
        }
    }

    /// Convert to a [`FilterSpec`], parsing the threshold mode.
    ///
    /// Parameter ranges are left to [`FilterSpec::build`].
    pub fn to_filter_spec(&self) -> Result<FilterSpec> {
        Ok(match self {
            StageConfig::Threshold { threshold_hz, mode } => FilterSpec::Threshold {
                threshold_hz: *threshold_hz,
                mode: mode.parse::<ThresholdMode>()?,
            },
            StageConfig::Bandpass {
                low_cut_hz,
                high_cut_hz,
                order,
            } => FilterSpec::Bandpass {
                low_cut_hz: *low_cut_hz,
                high_cut_hz: *high_cut_hz,
                order: *order,
            },
            StageConfig::NoiseGate {
                magnitude_threshold,
            } => FilterSpec::NoiseGate {
                magnitude_threshold: *magnitude_threshold,
            },
            StageConfig::Adaptive => FilterSpec::Adaptive,
        })
    }
}

impl From<FilterSpec> for StageConfig {
    fn from(spec: FilterSpec) -> Self {
        match spec {
            FilterSpec::Threshold { threshold_hz, mode } => StageConfig::Threshold {
                threshold_hz,
                mode: mode.to_string(),
            },
            FilterSpec::Bandpass {
                low_cut_hz,
                high_cut_hz,
                order,
            } => StageConfig::Bandpass {
                low_cut_hz,
                high_cut_hz,
                order,
            },
            FilterSpec::NoiseGate {
                magnitude_threshold,
            } => StageConfig::NoiseGate {
                magnitude_threshold,
            },
            FilterSpec::Adaptive => StageConfig::Adaptive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        stages: Vec<StageConfig>,
    }

    #[test]
    fn parses_every_stage_type() {
        let text = r#"
            [[stages]]
            type = "threshold"
            threshold_hz = 1000.0
            mode = "high"

            [[stages]]
            type = "bandpass"
            low_cut_hz = 300.0
            high_cut_hz = 3000.0

            [[stages]]
            type = "noise_gate"
            magnitude_threshold = 0.02

            [[stages]]
            type = "adaptive"
        "#;
        let parsed: Wrapper = toml::from_str(text).unwrap();
        let kinds: Vec<_> = parsed.stages.iter().map(StageConfig::kind).collect();
        assert_eq!(kinds, ["threshold", "bandpass", "noise_gate", "adaptive"]);

        // Omitted order falls back to the default
        assert_eq!(
            parsed.stages[1],
            StageConfig::Bandpass {
                low_cut_hz: 300.0,
                high_cut_hz: 3000.0,
                order: DEFAULT_ORDER
            }
        );
    }

    #[test]
    fn threshold_mode_defaults_to_low() {
        let parsed: Wrapper =
            toml::from_str("[[stages]]\ntype = \"threshold\"\nthreshold_hz = 500.0\n").unwrap();
        assert_eq!(
            parsed.stages[0].to_filter_spec().unwrap(),
            FilterSpec::Threshold {
                threshold_hz: 500.0,
                mode: ThresholdMode::Low
            }
        );
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let result: std::result::Result<Wrapper, _> =
            toml::from_str("[[stages]]\ntype = \"wiener\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn bad_mode_fails_conversion() {
        let stage = StageConfig::Threshold {
            threshold_hz: 100.0,
            mode: "middle".into(),
        };
        assert!(stage.to_filter_spec().is_err());
    }

    #[test]
    fn converts_from_filter_spec() {
        let spec = FilterSpec::Threshold {
            threshold_hz: 1000.0,
            mode: ThresholdMode::High,
        };
        let stage = StageConfig::from(spec);
        assert_eq!(stage.to_filter_spec().unwrap(), spec);
    }
}
