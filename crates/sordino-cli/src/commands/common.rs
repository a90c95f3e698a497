//! Helpers shared by the file-processing commands.

use anyhow::Context;
use clap::ValueEnum;
use sordino_analysis::{peak_db, rms_db};
use sordino_core::AudioSignal;
use sordino_io::{ClampPolicy, PCM16_FULL_SCALE, read_wav, write_wav_with};
use std::path::Path;

/// Out-of-range handling for 16-bit output.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliClamp {
    /// Saturate each sample
    #[default]
    Clip,
    /// Scale the whole signal down to fit
    Rescale,
}

impl From<CliClamp> for ClampPolicy {
    fn from(c: CliClamp) -> Self {
        match c {
            CliClamp::Clip => ClampPolicy::Clip,
            CliClamp::Rescale => ClampPolicy::Rescale,
        }
    }
}

/// Read a WAV file and print a one-line summary.
pub fn load(path: &Path) -> anyhow::Result<AudioSignal> {
    println!("Reading {}...", path.display());
    let signal = read_wav(path).with_context(|| format!("reading {}", path.display()))?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        signal.len(),
        signal.sample_rate(),
        signal.duration_secs()
    );
    Ok(signal)
}

/// Write a signal as 16-bit PCM.
pub fn save(path: &Path, signal: &AudioSignal, clamp: CliClamp) -> anyhow::Result<()> {
    write_wav_with(path, signal, clamp.into())
        .with_context(|| format!("writing {}", path.display()))
}

/// `RMS x dBFS, Peak y dBFS` for a signal in 16-bit units.
pub fn levels(signal: &AudioSignal) -> String {
    format!(
        "RMS {:.1} dBFS, Peak {:.1} dBFS",
        rms_db(signal.samples(), PCM16_FULL_SCALE),
        peak_db(signal.samples(), PCM16_FULL_SCALE)
    )
}
