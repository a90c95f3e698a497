//! Single-file denoising command.

use super::common::{CliClamp, levels, load, save};
use clap::{Args, ValueEnum};
use sordino_config::resolve_pipeline;
use sordino_filters::{DenoisingPipeline, FilterSpec, ThresholdMode};
use std::path::PathBuf;

/// Filter selection for the CLI.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliFilter {
    /// Spectral low-pass at --threshold-hz
    Lowpass,
    /// Spectral high-pass at --threshold-hz
    Highpass,
    /// Butterworth band-pass between --low-cut and --high-cut
    Bandpass,
    /// Spectral gate at --magnitude
    Gate,
    /// Gate at half the mean spectral magnitude
    #[default]
    Adaptive,
}

#[derive(Args)]
pub struct DenoiseArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16-bit PCM)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Filter to apply
    #[arg(short, long, value_enum, default_value_t = CliFilter::Adaptive)]
    filter: CliFilter,

    /// Cutoff for lowpass/highpass, in Hz
    #[arg(long, default_value = "1000.0")]
    threshold_hz: f64,

    /// Lower band edge for bandpass, in Hz
    #[arg(long, default_value = "300.0")]
    low_cut: f64,

    /// Upper band edge for bandpass, in Hz
    #[arg(long, default_value = "3000.0")]
    high_cut: f64,

    /// Butterworth prototype order for bandpass
    #[arg(long, default_value = "4")]
    order: usize,

    /// Magnitude threshold for gate
    #[arg(long, default_value = "0.02")]
    magnitude: f64,

    /// Factory pipeline name or pipeline TOML file (overrides --filter)
    #[arg(short, long, value_name = "NAME|PATH")]
    pipeline: Option<String>,

    /// How to bring out-of-range samples into 16 bits
    #[arg(long, value_enum, default_value_t = CliClamp::Clip)]
    clamp: CliClamp,
}

impl DenoiseArgs {
    fn filter_spec(&self) -> FilterSpec {
        match self.filter {
            CliFilter::Lowpass => FilterSpec::Threshold {
                threshold_hz: self.threshold_hz,
                mode: ThresholdMode::Low,
            },
            CliFilter::Highpass => FilterSpec::Threshold {
                threshold_hz: self.threshold_hz,
                mode: ThresholdMode::High,
            },
            CliFilter::Bandpass => FilterSpec::Bandpass {
                low_cut_hz: self.low_cut,
                high_cut_hz: self.high_cut,
                order: self.order,
            },
            CliFilter::Gate => FilterSpec::NoiseGate {
                magnitude_threshold: self.magnitude,
            },
            CliFilter::Adaptive => FilterSpec::Adaptive,
        }
    }

    fn build_pipeline(&self) -> anyhow::Result<DenoisingPipeline> {
        if let Some(name) = &self.pipeline {
            let config = resolve_pipeline(name)?;
            println!("Using pipeline: {}", config.name);
            if let Some(description) = &config.description {
                println!("  {description}");
            }
            Ok(config.to_pipeline()?)
        } else {
            Ok(DenoisingPipeline::new().with_stage(self.filter_spec())?)
        }
    }
}

pub fn run(args: DenoiseArgs) -> anyhow::Result<()> {
    // Validate parameters before touching the input
    let pipeline = args.build_pipeline()?;
    let signal = load(&args.input)?;

    println!("Denoising with {}...", pipeline.stages().join(" -> "));
    let denoised = pipeline.run(&signal)?;

    println!("\nStats:");
    println!("  Input:  {}", levels(&signal));
    println!("  Output: {}", levels(&denoised));

    println!("\nWriting {}...", args.output.display());
    save(&args.output, &denoised, args.clamp)?;
    println!("Done!");

    Ok(())
}
