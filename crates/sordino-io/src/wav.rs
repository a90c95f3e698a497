//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use sordino_core::AudioSignal;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Magnitude of the most negative 16-bit sample; one unit of input is one LSB.
pub const PCM16_FULL_SCALE: f64 = 32768.0;

const PCM16_MAX: f64 = 32767.0;
const PCM16_MIN: f64 = -32768.0;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// How samples outside the 16-bit range are brought into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClampPolicy {
    /// Round, then saturate each sample to `[-32768, 32767]`.
    #[default]
    Clip,
    /// If the peak exceeds full scale, scale the whole signal so the peak
    /// lands on 32767, then round. In-range signals are only rounded.
    Rescale,
}

impl FromStr for ClampPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clip" => Ok(ClampPolicy::Clip),
            "rescale" => Ok(ClampPolicy::Rescale),
            other => Err(format!("unknown clamp policy '{other}' (expected clip or rescale)")),
        }
    }
}

impl fmt::Display for ClampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClampPolicy::Clip => "clip",
            ClampPolicy::Rescale => "rescale",
        })
    }
}

fn open_reader(path: &Path) -> Result<WavReader<std::io::BufReader<std::fs::File>>> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    Ok(WavReader::open(path)?)
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = open_reader(path.as_ref())?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Read the first channel of a WAV file as a signal in 16-bit PCM units.
///
/// Integer files of any depth are rescaled so that full scale maps to
/// ±32768; float files are multiplied by 32768. Further channels are
/// discarded.
///
/// # Errors
///
/// - [`Error::SourceNotFound`] if `path` does not exist
/// - [`Error::Wav`] for unreadable or malformed files
/// - [`Error::Signal`] if the file holds no frames
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioSignal> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| f64::from(v) * PCM16_FULL_SCALE))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = PCM16_FULL_SCALE / f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) * scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    // First channel only
    let samples: Vec<f64> = interleaved.iter().step_by(channels).copied().collect();

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "read wav"
    );
    if spec.channels > 1 {
        tracing::info!(
            channels = spec.channels,
            "multi-channel input, using the first channel"
        );
    }

    Ok(AudioSignal::new(spec.sample_rate, samples)?)
}

/// Convert samples to 16-bit integers under `policy`.
pub fn to_pcm16(samples: &[f64], policy: ClampPolicy) -> Vec<i16> {
    let gain = match policy {
        ClampPolicy::Clip => 1.0,
        ClampPolicy::Rescale => {
            let peak = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
            if peak > PCM16_MAX { PCM16_MAX / peak } else { 1.0 }
        }
    };

    samples
        .iter()
        .map(|&s| (s * gain).round().clamp(PCM16_MIN, PCM16_MAX) as i16)
        .collect()
}

/// Write `signal` as mono 16-bit PCM, clipping out-of-range samples.
pub fn write_wav<P: AsRef<Path>>(path: P, signal: &AudioSignal) -> Result<()> {
    write_wav_with(path, signal, ClampPolicy::Clip)
}

/// Write `signal` as mono 16-bit PCM using `policy` for out-of-range samples.
pub fn write_wav_with<P: AsRef<Path>>(
    path: P,
    signal: &AudioSignal,
    policy: ClampPolicy,
) -> Result<()> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let pcm = to_pcm16(signal.samples(), policy);
    let clipped = signal
        .samples()
        .iter()
        .filter(|s| s.round() > PCM16_MAX || s.round() < PCM16_MIN)
        .count();
    if clipped > 0 {
        tracing::warn!(clipped, policy = %policy, "samples outside 16-bit range");
    }

    let mut writer = WavWriter::create(path, spec)?;
    for sample in pcm {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    tracing::debug!(path = %path.display(), samples = signal.len(), "wrote wav");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn clip_saturates_and_rounds() {
        let pcm = to_pcm16(&[0.4, 0.6, -0.6, 40000.0, -40000.0, 32767.4], ClampPolicy::Clip);
        assert_eq!(pcm, vec![0, 1, -1, 32767, -32768, 32767]);
    }

    #[test]
    fn rescale_maps_peak_to_full_scale() {
        let pcm = to_pcm16(&[65534.0, -32767.0, 0.0], ClampPolicy::Rescale);
        assert_eq!(pcm, vec![32767, -16384, 0]);
    }

    #[test]
    fn rescale_leaves_in_range_signal_alone() {
        let samples = [100.2, -2000.7, 32767.0];
        assert_eq!(
            to_pcm16(&samples, ClampPolicy::Rescale),
            to_pcm16(&samples, ClampPolicy::Clip)
        );
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("Clip".parse::<ClampPolicy>().unwrap(), ClampPolicy::Clip);
        assert_eq!("rescale".parse::<ClampPolicy>().unwrap(), ClampPolicy::Rescale);
        assert!("wrap".parse::<ClampPolicy>().is_err());
        assert_eq!(ClampPolicy::default(), ClampPolicy::Clip);
    }

    #[test]
    fn roundtrip_i16_is_exact_for_integers() {
        let samples: Vec<f64> = (0..1000).map(|i| f64::from((i * 97) % 2001 - 1000)).collect();
        let signal = AudioSignal::new(8000, samples.clone()).unwrap();

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &signal).unwrap();

        let loaded = read_wav(file.path()).unwrap();
        assert_eq!(loaded.sample_rate(), 8000);
        assert_eq!(loaded.samples(), samples.as_slice());
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.wav");
        assert!(matches!(read_wav(&path), Err(Error::SourceNotFound(p)) if p == path));
        assert!(matches!(read_wav_info(&path), Err(Error::SourceNotFound(_))));
    }
}
