//! Sordino CLI - spectral and IIR denoising of WAV files.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sordino")]
#[command(author, version, about = "Sordino audio denoiser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Denoise a WAV file with one filter or a pipeline
    Denoise(commands::denoise::DenoiseArgs),

    /// Run every factory pipeline on one file and write each result
    All(commands::all::AllArgs),

    /// Analyze a WAV file and export plot data
    Analyze(commands::analyze::AnalyzeArgs),

    /// Compare an original file with its processed version
    Compare(commands::compare::CompareArgs),

    /// Generate a noisy test tone
    Generate(commands::generate::GenerateArgs),

    /// List factory pipelines
    Pipelines(commands::pipelines::PipelinesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Denoise(args) => commands::denoise::run(args),
        Commands::All(args) => commands::all::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Pipelines(args) => commands::pipelines::run(args),
    }
}
