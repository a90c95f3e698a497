//! Pipelines bundled with the library.
//!
//! The four single-stage pipelines reproduce the classic comparison run:
//! a 1 kHz spectral low-pass, a 300-3000 Hz band-pass, a fixed noise gate
//! and the adaptive reducer.

use crate::{ConfigError, PipelineConfig};
use std::path::Path;

/// Names of the factory pipelines, in comparison-run order.
pub static FACTORY_PIPELINE_NAMES: &[&str] = &["lowpass", "bandpass", "gate", "adaptive"];

static FACTORY_PIPELINES_TOML: &[(&str, &str)] = &[
    ("lowpass", LOWPASS),
    ("bandpass", BANDPASS),
    ("gate", GATE),
    ("adaptive", ADAPTIVE),
];

const LOWPASS: &str = r#"
name = "lowpass"
description = "Zero everything above 1 kHz"

[[stages]]
type = "threshold"
threshold_hz = 1000.0
mode = "low"
"#;

const BANDPASS: &str = r#"
name = "bandpass"
description = "Order-4 Butterworth band-pass over the speech band"

[[stages]]
type = "bandpass"
low_cut_hz = 300.0
high_cut_hz = 3000.0
order = 4
"#;

const GATE: &str = r#"
name = "gate"
description = "Zero spectral bins below magnitude 0.02"

[[stages]]
type = "noise_gate"
magnitude_threshold = 0.02
"#;

const ADAPTIVE: &str = r#"
name = "adaptive"
description = "Gate at half the mean spectral magnitude"

[[stages]]
type = "adaptive"
"#;

/// All factory pipelines, in [`FACTORY_PIPELINE_NAMES`] order.
pub fn factory_pipelines() -> Vec<PipelineConfig> {
    FACTORY_PIPELINES_TOML
        .iter()
        .filter_map(|(_, toml)| PipelineConfig::from_toml(toml).ok())
        .collect()
}

/// Look up a factory pipeline by name (case-insensitive).
///
/// ```rust
/// use sordino_config::get_factory_pipeline;
///
/// let gate = get_factory_pipeline("Gate").unwrap();
/// assert_eq!(gate.stage_types(), ["noise_gate"]);
/// assert!(get_factory_pipeline("wiener").is_none());
/// ```
pub fn get_factory_pipeline(name: &str) -> Option<PipelineConfig> {
    FACTORY_PIPELINES_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| PipelineConfig::from_toml(toml).ok())
}

/// Whether `name` names a factory pipeline.
pub fn is_factory_pipeline(name: &str) -> bool {
    FACTORY_PIPELINE_NAMES
        .iter()
        .any(|id| id.eq_ignore_ascii_case(name))
}

/// Resolve a factory pipeline name or a path to a pipeline file.
///
/// Factory names win over files of the same name.
pub fn resolve_pipeline(name_or_path: &str) -> Result<PipelineConfig, ConfigError> {
    if let Some(config) = get_factory_pipeline(name_or_path) {
        return Ok(config);
    }
    let path = Path::new(name_or_path);
    if path.is_file() {
        return PipelineConfig::load(path);
    }
    Err(ConfigError::UnknownPipeline(name_or_path.to_string()))
}
