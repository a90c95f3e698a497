//! CSV data for spectrum and waveform plots.
//!
//! Rendering is left to whatever tool reads the CSV; these functions only
//! produce the two series the plots need.

use crate::spectrum::magnitude_spectrum;
use sordino_core::AudioSignal;
use std::path::Path;

/// `frequency_hz,magnitude` rows for the positive half of the spectrum.
pub fn spectrum_csv(signal: &AudioSignal) -> String {
    let mut csv = String::from("frequency_hz,magnitude\n");
    for (freq, mag) in magnitude_spectrum(signal) {
        csv.push_str(&format!("{:.3},{:.6}\n", freq, mag));
    }
    csv
}

/// `time_s,amplitude` rows, one per sample.
pub fn waveform_csv(signal: &AudioSignal) -> String {
    let rate = f64::from(signal.sample_rate());
    let mut csv = String::from("time_s,amplitude\n");
    for (i, sample) in signal.samples().iter().enumerate() {
        csv.push_str(&format!("{:.6},{:.6}\n", i as f64 / rate, sample));
    }
    csv
}

/// Write [`spectrum_csv`] to `path`.
pub fn write_spectrum_csv(signal: &AudioSignal, path: impl AsRef<Path>) -> std::io::Result<()> {
    std::fs::write(path, spectrum_csv(signal))
}

/// Write [`waveform_csv`] to `path`.
pub fn write_waveform_csv(signal: &AudioSignal, path: impl AsRef<Path>) -> std::io::Result<()> {
    std::fs::write(path, waveform_csv(signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_rows_match_samples() {
        let signal = AudioSignal::new(4, vec![0.0, 1.0, -1.0]).unwrap();
        let csv = waveform_csv(&signal);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "time_s,amplitude");
        assert_eq!(lines[1], "0.000000,0.000000");
        assert_eq!(lines[2], "0.250000,1.000000");
        assert_eq!(lines[3], "0.500000,-1.000000");
    }

    #[test]
    fn spectrum_rows_cover_positive_half() {
        let signal = AudioSignal::new(8, vec![1.0; 8]).unwrap();
        let csv = spectrum_csv(&signal);
        let lines: Vec<&str> = csv.lines().collect();
        // header + labels 0, 1, 2, 3 Hz
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("0.000,8.000000"));
    }

    #[test]
    fn writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let signal = AudioSignal::new(8, vec![0.5; 16]).unwrap();
        let spectrum_path = dir.path().join("spectrum.csv");
        let waveform_path = dir.path().join("waveform.csv");

        write_spectrum_csv(&signal, &spectrum_path).unwrap();
        write_waveform_csv(&signal, &waveform_path).unwrap();

        let waveform = std::fs::read_to_string(&waveform_path).unwrap();
        assert_eq!(waveform.lines().count(), 17);
        assert!(std::fs::read_to_string(&spectrum_path).unwrap().starts_with("frequency_hz"));
    }
}
