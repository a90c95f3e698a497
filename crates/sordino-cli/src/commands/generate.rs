//! Test signal generation command.

use super::common::{CliClamp, save};
use clap::Args;
use sordino_core::AudioSignal;
use sordino_io::PCM16_FULL_SCALE;
use std::f64::consts::PI;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Tone frequency in Hz
    #[arg(long, default_value = "440.0")]
    freq: f64,

    /// Tone amplitude (0-1 of full scale)
    #[arg(long, default_value = "0.5")]
    amplitude: f64,

    /// White noise amplitude (0-1 of full scale)
    #[arg(long, default_value = "0.05")]
    noise: f64,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Sample rate
    #[arg(long, default_value = "8000")]
    sample_rate: u32,

    /// Noise seed
    #[arg(long, default_value = "12345")]
    seed: u32,
}

/// xorshift32 white noise in [-1, 1].
struct WhiteNoise(u32);

impl WhiteNoise {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    fn next_sample(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        f64::from(self.0) / f64::from(u32::MAX) * 2.0 - 1.0
    }
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if !(args.duration > 0.0 && args.duration.is_finite()) {
        anyhow::bail!("duration must be positive, got {}", args.duration);
    }

    let len = (args.duration * f64::from(args.sample_rate)).round() as usize;
    let rate = f64::from(args.sample_rate);
    let tone_peak = args.amplitude * PCM16_FULL_SCALE;
    let noise_peak = args.noise * PCM16_FULL_SCALE;

    let mut noise = WhiteNoise::new(args.seed);
    let samples: Vec<f64> = (0..len)
        .map(|i| {
            let t = i as f64 / rate;
            tone_peak * (2.0 * PI * args.freq * t).sin() + noise_peak * noise.next_sample()
        })
        .collect();

    let signal = AudioSignal::new(args.sample_rate, samples)?;

    println!(
        "Generating {:.2}s {} Hz tone + noise at {} Hz...",
        args.duration, args.freq, args.sample_rate
    );
    save(&args.output, &signal, CliClamp::Clip)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
