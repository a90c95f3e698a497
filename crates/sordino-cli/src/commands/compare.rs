//! Before/after comparison of a denoising run.

use super::common::load;
use clap::Args;
use serde::Serialize;
use sordino_analysis::{CompareReport, linear_to_db};
use sordino_io::PCM16_FULL_SCALE;
use std::path::PathBuf;

#[derive(Args)]
pub struct CompareArgs {
    /// Original (noisy) WAV file
    #[arg(value_name = "ORIGINAL")]
    original: PathBuf,

    /// Processed (denoised) WAV file
    #[arg(value_name = "PROCESSED")]
    processed: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport {
    sample_rate: u32,
    compared_samples: usize,
    original_rms_dbfs: f64,
    processed_rms_dbfs: f64,
    original_peak_dbfs: f64,
    processed_peak_dbfs: f64,
    original_mean_magnitude: f64,
    processed_mean_magnitude: f64,
    magnitude_ratio: f64,
    mse: f64,
    // Infinite for identical inputs, which JSON cannot carry
    snr_db: Option<f64>,
}

fn dbfs(linear: f64) -> f64 {
    linear_to_db(linear / PCM16_FULL_SCALE)
}

impl From<&CompareReport> for JsonReport {
    fn from(r: &CompareReport) -> Self {
        Self {
            sample_rate: r.sample_rate,
            compared_samples: r.compared_samples,
            original_rms_dbfs: dbfs(r.original_rms),
            processed_rms_dbfs: dbfs(r.processed_rms),
            original_peak_dbfs: dbfs(r.original_peak),
            processed_peak_dbfs: dbfs(r.processed_peak),
            original_mean_magnitude: r.original_mean_magnitude,
            processed_mean_magnitude: r.processed_mean_magnitude,
            magnitude_ratio: r.magnitude_ratio(),
            mse: r.mse,
            snr_db: r.snr_db.is_finite().then_some(r.snr_db),
        }
    }
}

pub fn run(args: CompareArgs) -> anyhow::Result<()> {
    if args.json {
        let original = sordino_io::read_wav(&args.original)?;
        let processed = sordino_io::read_wav(&args.processed)?;
        let report = CompareReport::new(&original, &processed)?;
        println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
        return Ok(());
    }

    let original = load(&args.original)?;
    let processed = load(&args.processed)?;
    let report = CompareReport::new(&original, &processed)?;

    println!("\nComparison");
    println!("==========");
    println!(
        "  Compared {} samples at {} Hz",
        report.compared_samples, report.sample_rate
    );
    println!();
    println!(
        "  Original  - RMS: {:.1} dBFS, Peak: {:.1} dBFS",
        dbfs(report.original_rms),
        dbfs(report.original_peak)
    );
    println!(
        "  Processed - RMS: {:.1} dBFS, Peak: {:.1} dBFS",
        dbfs(report.processed_rms),
        dbfs(report.processed_peak)
    );
    println!();
    println!(
        "  Mean spectral magnitude: {:.3} -> {:.3} ({:.1}%)",
        report.original_mean_magnitude,
        report.processed_mean_magnitude,
        report.magnitude_ratio() * 100.0
    );
    println!("  MSE:                     {:.3}", report.mse);
    println!("  SNR:                     {:.1} dB", report.snr_db);

    Ok(())
}
