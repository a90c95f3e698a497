//! Pipeline configuration for sordino.
//!
//! - **Pipeline files**: [`PipelineConfig`] loads and saves ordered
//!   denoising stages as TOML
//! - **Validation**: every stage is checked before any audio is touched
//! - **Factory pipelines**: built-in single-stage pipelines matching the
//!   standard comparison run
//!
//! # Example
//!
//! ```rust
//! use sordino_config::{PipelineConfig, StageConfig};
//!
//! let config = PipelineConfig::from_toml(r#"
//!     name = "voice"
//!
//!     [[stages]]
//!     type = "bandpass"
//!     low_cut_hz = 300.0
//!     high_cut_hz = 3000.0
//!
//!     [[stages]]
//!     type = "adaptive"
//! "#).unwrap();
//!
//! assert_eq!(config.stages[1], StageConfig::Adaptive);
//! let pipeline = config.to_pipeline().unwrap();
//! assert_eq!(pipeline.len(), 2);
//! ```

mod error;
mod pipeline_config;
mod stage;

/// Factory pipelines bundled with the library.
pub mod factory_pipelines;

pub use error::ConfigError;
pub use factory_pipelines::{
    FACTORY_PIPELINE_NAMES, factory_pipelines, get_factory_pipeline, is_factory_pipeline,
    resolve_pipeline,
};
pub use pipeline_config::PipelineConfig;
pub use stage::StageConfig;
