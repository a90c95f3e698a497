//! Spectrum and waveform analysis commands.

use super::common::{levels, load};
use anyhow::Context;
use clap::{Args, Subcommand};
use sordino_analysis::export::{write_spectrum_csv, write_waveform_csv};
use sordino_analysis::spectrum::{dominant_frequency, spectral_centroid, top_peaks};
use sordino_analysis::transform::forward;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    command: AnalyzeCommand,
}

#[derive(Subcommand)]
enum AnalyzeCommand {
    /// Magnitude spectrum of the whole file
    Spectrum {
        /// Input WAV file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file (frequency_hz,magnitude)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N peaks
        #[arg(long, default_value = "5")]
        peaks: usize,
    },

    /// Time-domain levels and sample data
    Waveform {
        /// Input WAV file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file (time_s,amplitude)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    match args.command {
        AnalyzeCommand::Spectrum {
            input,
            output,
            peaks,
        } => {
            let signal = load(&input)?;
            let spectrum = forward(&signal);

            println!("\nSpectrum:");
            println!("  Bins:              {}", spectrum.len());
            println!(
                "  Resolution:        {:.3} Hz",
                f64::from(signal.sample_rate()) / spectrum.len() as f64
            );
            println!("  Dominant:          {:.1} Hz", dominant_frequency(&spectrum));
            println!("  Centroid:          {:.1} Hz", spectral_centroid(&spectrum));
            println!("  Mean magnitude:    {:.3}", spectrum.mean_magnitude());

            let top = top_peaks(&spectrum, peaks);
            if !top.is_empty() {
                println!("\nTop {} peaks:", top.len());
                for (freq, mag) in top {
                    println!("  {:>10.1} Hz  {:>14.1}", freq, mag);
                }
            }

            if let Some(path) = output {
                write_spectrum_csv(&signal, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nSpectrum data written to {}", path.display());
            }
        }

        AnalyzeCommand::Waveform { input, output } => {
            let signal = load(&input)?;

            println!("\nLevels:");
            println!("  {}", levels(&signal));

            if let Some(path) = output {
                write_waveform_csv(&signal, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nWaveform data written to {}", path.display());
            }
        }
    }

    Ok(())
}
