//! CLI command implementations.

pub mod all;
pub mod analyze;
pub mod common;
pub mod compare;
pub mod denoise;
pub mod generate;
pub mod pipelines;
