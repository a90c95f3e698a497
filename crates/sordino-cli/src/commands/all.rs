//! Run every factory pipeline over one file.

use super::common::{CliClamp, load, save};
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use sordino_config::{FACTORY_PIPELINE_NAMES, get_factory_pipeline};
use std::path::PathBuf;

#[derive(Args)]
pub struct AllArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory for the denoised files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// How to bring out-of-range samples into 16 bits
    #[arg(long, value_enum, default_value_t = CliClamp::Clip)]
    clamp: CliClamp,
}

/// Output file suffix for each factory pipeline.
fn file_suffix(pipeline: &str) -> &str {
    match pipeline {
        "lowpass" => "low",
        other => other,
    }
}

pub fn run(args: AllArgs) -> anyhow::Result<()> {
    let signal = load(&args.input)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let pb = ProgressBar::new(FACTORY_PIPELINE_NAMES.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut written = Vec::with_capacity(FACTORY_PIPELINE_NAMES.len());
    for &name in FACTORY_PIPELINE_NAMES {
        pb.set_message(name);

        let config = get_factory_pipeline(name)
            .with_context(|| format!("factory pipeline '{name}' is missing"))?;
        let denoised = config
            .to_pipeline()?
            .run(&signal)
            .with_context(|| format!("pipeline '{name}' failed"))?;

        let path = args
            .out_dir
            .join(format!("denoised_audio_{}.wav", file_suffix(name)));
        save(&path, &denoised, args.clamp)?;
        tracing::debug!(pipeline = name, path = %path.display(), "wrote result");

        written.push(path);
        pb.inc(1);
    }

    pb.finish_with_message("done");

    println!("\nWrote:");
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}
