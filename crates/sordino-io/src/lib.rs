//! Audio file I/O for sordino.
//!
//! - **Source**: [`read_wav`] loads the first channel of any PCM or float
//!   WAV file as an [`AudioSignal`](sordino_core::AudioSignal) in 16-bit
//!   PCM units.
//! - **Sink**: [`write_wav`] / [`write_wav_with`] store a signal as mono
//!   16-bit PCM, with an explicit [`ClampPolicy`] for out-of-range samples.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sordino_core::Denoiser;
//! use sordino_filters::AdaptiveNoiseReducer;
//! use sordino_io::{read_wav, write_wav};
//!
//! let signal = read_wav("noisy.wav")?;
//! let denoised = AdaptiveNoiseReducer.apply(&signal)?;
//! write_wav("denoised.wav", &denoised)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod wav;

use std::path::PathBuf;

pub use wav::{
    ClampPolicy, PCM16_FULL_SCALE, WavFormat, WavInfo, read_wav, read_wav_info, to_pcm16,
    write_wav, write_wav_with,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file does not exist.
    #[error("Audio source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoded samples do not form a valid signal.
    #[error("Invalid signal: {0}")]
    Signal(#[from] sordino_core::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
