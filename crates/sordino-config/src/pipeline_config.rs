//! Pipeline file format and operations.

use serde::{Deserialize, Serialize};
use sordino_filters::{DenoisingPipeline, FilterSpec};
use std::path::Path;

use crate::error::ConfigError;
use crate::stage::StageConfig;

/// A named, ordered list of denoising stages.
///
/// # TOML Format
///
/// ```toml
/// name = "voice"
/// description = "Keep the speech band"
///
/// [[stages]]
/// type = "bandpass"
/// low_cut_hz = 300.0
/// high_cut_hz = 3000.0
/// order = 4
///
/// [[stages]]
/// type = "adaptive"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    /// Name of the pipeline.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Stages in execution order.
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

impl PipelineConfig {
    /// Create a new empty pipeline config.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            stages: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a stage.
    pub fn with_stage(mut self, stage: impl Into<StageConfig>) -> Self {
        self.stages.push(stage.into());
        self
    }

    /// Load a pipeline from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a pipeline from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the pipeline to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage `type` tags in order.
    pub fn stage_types(&self) -> Vec<&'static str> {
        self.stages.iter().map(StageConfig::kind).collect()
    }

    /// Check every stage's parameters.
    ///
    /// Checks that need the sample rate (band edges against Nyquist) are
    /// left to the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter_specs().map(|_| ())
    }

    /// Validated filter specs in stage order.
    pub fn filter_specs(&self) -> Result<Vec<FilterSpec>, ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::EmptyPipeline(self.name.clone()));
        }
        self.stages
            .iter()
            .enumerate()
            .map(|(index, stage)| {
                let spec = stage
                    .to_filter_spec()
                    .map_err(|e| ConfigError::invalid_stage(index, &e))?;
                spec.build()
                    .map_err(|e| ConfigError::invalid_stage(index, &e))?;
                Ok(spec)
            })
            .collect()
    }

    /// Build a runnable [`DenoisingPipeline`].
    pub fn to_pipeline(&self) -> Result<DenoisingPipeline, ConfigError> {
        let mut pipeline = DenoisingPipeline::new();
        for (index, spec) in self.filter_specs()?.into_iter().enumerate() {
            pipeline
                .add(spec)
                .map_err(|e| ConfigError::invalid_stage(index, &e))?;
        }
        tracing::debug!(name = %self.name, stages = pipeline.len(), "built pipeline");
        Ok(pipeline)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
