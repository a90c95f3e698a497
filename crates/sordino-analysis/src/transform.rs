//! Forward and inverse DFT between an [`AudioSignal`] and a [`FrequencySpectrum`].
//!
//! The transform is the full complex DFT of the samples (any length, not
//! just powers of two), with every bin labelled by its frequency in the
//! standard DFT ordering: DC, positive frequencies, then negative
//! frequencies counting up towards zero.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use sordino_core::{AudioSignal, Error, Result};
use std::sync::Arc;

/// Frequency of every DFT bin for an `n`-point transform at `sample_rate`.
///
/// Bin `k` is labelled `k * rate / n` for `k <= (n - 1) / 2` and
/// `(k - n) * rate / n` otherwise, so for even `n` the Nyquist bin carries
/// the negative label `-rate / 2`.
///
/// ```rust
/// use sordino_analysis::fft_frequencies;
///
/// assert_eq!(fft_frequencies(4, 8), vec![0.0, 2.0, -4.0, -2.0]);
/// assert_eq!(fft_frequencies(5, 10), vec![0.0, 2.0, 4.0, -4.0, -2.0]);
/// ```
pub fn fft_frequencies(n: usize, sample_rate: u32) -> Vec<f64> {
    let rate = f64::from(sample_rate);
    let len = n as f64;
    let positive = n.saturating_sub(1) / 2;
    (0..n)
        .map(|k| {
            let index = if k <= positive {
                k as f64
            } else {
                k as f64 - len
            };
            index * rate / len
        })
        .collect()
}

/// Complex DFT bins, each paired with its frequency in Hz.
///
/// A spectrum belongs to the filter call that computed it: filters gate the
/// bins of their own copy and drop it once they have inverted it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySpectrum {
    bins: Vec<Complex<f64>>,
    frequencies: Vec<f64>,
    sample_rate: u32,
}

impl FrequencySpectrum {
    /// Pair `bins` with `frequencies`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptySignal`] if there are no bins
    /// - [`Error::InvalidArgument`] if the two sequences differ in length
    pub fn new(bins: Vec<Complex<f64>>, frequencies: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if bins.is_empty() {
            return Err(Error::EmptySignal);
        }
        if bins.len() != frequencies.len() {
            return Err(Error::invalid(format!(
                "{} bins but {} frequency labels",
                bins.len(),
                frequencies.len()
            )));
        }
        Ok(Self {
            bins,
            frequencies,
            sample_rate,
        })
    }

    /// Complex bin values.
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Frequency label of each bin in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Sample rate of the signal this spectrum was computed from.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of bins (equal to the signal length).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always `false` for a spectrum built through [`FrequencySpectrum::new`].
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Magnitude of every bin.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Arithmetic mean of the bin magnitudes.
    pub fn mean_magnitude(&self) -> f64 {
        self.bins.iter().map(|c| c.norm()).sum::<f64>() / self.bins.len() as f64
    }

    /// Iterate `(frequency, bin)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, Complex<f64>)> + '_ {
        self.frequencies.iter().copied().zip(self.bins.iter().copied())
    }

    /// Set every bin for which `predicate(frequency, bin)` holds to zero.
    ///
    /// Returns the number of bins zeroed.
    pub fn zero_where(&mut self, mut predicate: impl FnMut(f64, Complex<f64>) -> bool) -> usize {
        let mut zeroed = 0;
        for (bin, &freq) in self.bins.iter_mut().zip(self.frequencies.iter()) {
            if predicate(freq, *bin) {
                *bin = Complex::new(0.0, 0.0);
                zeroed += 1;
            }
        }
        zeroed
    }
}

/// Planned forward/inverse DFT pair for one signal length.
///
/// Plans are cheap to share (`Arc` inside) but are never cached across
/// filter calls; each call plans for the length it is given.
#[derive(Clone)]
pub struct SpectrumTransform {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    len: usize,
}

impl std::fmt::Debug for SpectrumTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumTransform")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl SpectrumTransform {
    /// Plan a transform for signals of `len` samples.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySignal`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptySignal);
        }
        let mut planner = FftPlanner::new();
        Ok(Self {
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
            len,
        })
    }

    /// Transform length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a zero-length transform cannot be planned.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// DFT of the signal's samples, with frequency labels.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the signal length differs from the planned length.
    pub fn forward(&self, signal: &AudioSignal) -> Result<FrequencySpectrum> {
        self.check_len(signal.len())?;
        Ok(spectrum_of(self.forward.as_ref(), signal, 1.0))
    }

    /// Inverse DFT, keeping only the real part.
    ///
    /// The result is normalised by `1 / n`. The imaginary part of the
    /// inverse is discarded: for the spectrum of a real signal, and for any
    /// gating that zeroes bins symmetrically in `|frequency|`, it is pure
    /// round-off. Dropping it is an accepted approximation, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the spectrum length differs from the planned length.
    pub fn inverse(&self, spectrum: &FrequencySpectrum) -> Result<Vec<f64>> {
        self.check_len(spectrum.len())?;
        Ok(real_inverse(self.inverse.as_ref(), &spectrum.bins))
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len == self.len {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "transform planned for {} samples, got {}",
                self.len, len
            )))
        }
    }
}

/// Forward transform of `signal`, planning on the fly.
pub fn forward(signal: &AudioSignal) -> FrequencySpectrum {
    let fft = FftPlanner::new().plan_fft_forward(signal.len());
    spectrum_of(fft.as_ref(), signal, 1.0)
}

/// Forward transform of `signal` divided by its peak absolute sample.
///
/// Returns the spectrum together with the divisor (`1.0` for silence).
/// Every bin of the scaled spectrum is bounded by `n`, so it stays finite
/// even where [`forward`] would overflow, e.g. for samples near
/// `f64::MAX / n`. Multiply the [`inverse`] by the divisor to get back to
/// the signal's units.
pub fn forward_normalized(signal: &AudioSignal) -> (FrequencySpectrum, f64) {
    let peak = signal
        .samples()
        .iter()
        .fold(0.0_f64, |acc, &x| acc.max(x.abs()));
    let scale = if peak > 0.0 { peak } else { 1.0 };
    let fft = FftPlanner::new().plan_fft_forward(signal.len());
    (spectrum_of(fft.as_ref(), signal, scale), scale)
}

/// Inverse transform of `spectrum`, planning on the fly.
///
/// See [`SpectrumTransform::inverse`] for the real-part approximation.
pub fn inverse(spectrum: &FrequencySpectrum) -> Vec<f64> {
    let ifft = FftPlanner::new().plan_fft_inverse(spectrum.len());
    real_inverse(ifft.as_ref(), &spectrum.bins)
}

fn spectrum_of(fft: &dyn Fft<f64>, signal: &AudioSignal, scale: f64) -> FrequencySpectrum {
    let mut buffer: Vec<Complex<f64>> = signal
        .samples()
        .iter()
        .map(|&x| Complex::new(x / scale, 0.0))
        .collect();
    fft.process(&mut buffer);

    FrequencySpectrum {
        bins: buffer,
        frequencies: fft_frequencies(signal.len(), signal.sample_rate()),
        sample_rate: signal.sample_rate(),
    }
}

fn real_inverse(ifft: &dyn Fft<f64>, bins: &[Complex<f64>]) -> Vec<f64> {
    let mut buffer = bins.to_vec();
    ifft.process(&mut buffer);

    let scale = 1.0 / bins.len() as f64;
    buffer.iter().map(|c| c.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, rate: u32, len: usize) -> AudioSignal {
        let samples = (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / f64::from(rate)).sin())
            .collect();
        AudioSignal::new(rate, samples).unwrap()
    }

    #[test]
    fn frequencies_follow_dft_ordering() {
        assert_eq!(fft_frequencies(1, 44100), vec![0.0]);
        assert_eq!(fft_frequencies(2, 8), vec![0.0, -4.0]);
        assert_eq!(fft_frequencies(8, 8000), vec![
            0.0, 1000.0, 2000.0, 3000.0, -4000.0, -3000.0, -2000.0, -1000.0
        ]);
    }

    #[test]
    fn roundtrip_reconstructs_samples() {
        let signal = sine(10.0, 256, 256);
        let spectrum = forward(&signal);
        let reconstructed = inverse(&spectrum);

        for (a, b) in signal.samples().iter().zip(reconstructed.iter()) {
            assert!((a - b).abs() < 1e-9, "Mismatch: {} vs {}", a, b);
        }
    }

    #[test]
    fn planned_and_unplanned_agree() {
        let signal = sine(440.0, 8000, 1000);
        let planned = SpectrumTransform::new(1000).unwrap();
        let a = planned.forward(&signal).unwrap();
        let b = forward(&signal);
        assert_eq!(a, b);
        assert_eq!(planned.inverse(&a).unwrap(), inverse(&b));
    }

    #[test]
    fn length_mismatch_is_invalid() {
        let transform = SpectrumTransform::new(16).unwrap();
        let signal = sine(1.0, 8, 8);
        assert!(matches!(
            transform.forward(&signal),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_length_transform_is_empty_signal() {
        assert_eq!(SpectrumTransform::new(0).unwrap_err(), Error::EmptySignal);
    }

    #[test]
    fn spectrum_requires_matching_labels() {
        let bins = vec![Complex::new(1.0, 0.0); 3];
        assert!(matches!(
            FrequencySpectrum::new(bins, vec![0.0, 1.0], 8),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(
            FrequencySpectrum::new(vec![], vec![], 8).unwrap_err(),
            Error::EmptySignal
        );
    }

    #[test]
    fn dc_lands_in_bin_zero() {
        let signal = AudioSignal::new(256, vec![1.0; 256]).unwrap();
        let spectrum = forward(&signal);

        let dc_mag = spectrum.bins()[0].norm();
        let other_mag: f64 = spectrum.bins()[1..].iter().map(|c| c.norm()).sum();

        assert!((dc_mag - 256.0).abs() < 1e-9);
        assert!(other_mag < 1e-9);
    }

    #[test]
    fn normalized_forward_survives_huge_samples() {
        let n = 1000;
        let signal = AudioSignal::new(8000, vec![f64::MAX / 10.0; n]).unwrap();
        assert!(!forward(&signal).bins()[0].norm().is_finite());

        let (spectrum, scale) = forward_normalized(&signal);
        assert_eq!(scale, f64::MAX / 10.0);
        assert!((spectrum.bins()[0].norm() - n as f64).abs() < 1e-9);

        let restored: Vec<f64> = inverse(&spectrum).iter().map(|x| x * scale).collect();
        for (a, b) in signal.samples().iter().zip(&restored) {
            assert!(b.is_finite());
            assert!(((a - b) / a).abs() < 1e-12);
        }
    }

    #[test]
    fn normalized_forward_of_silence_uses_unit_scale() {
        let signal = AudioSignal::new(8, vec![0.0; 8]).unwrap();
        let (spectrum, scale) = forward_normalized(&signal);
        assert_eq!(scale, 1.0);
        assert_eq!(spectrum, forward(&signal));
    }

    #[test]
    fn zero_where_counts_and_clears() {
        let signal = sine(1000.0, 8000, 64);
        let mut spectrum = forward(&signal);
        let zeroed = spectrum.zero_where(|freq, _| freq.abs() > 2000.0);
        // 15 positive labels (2125..=3875) and 16 negative (-4000..=-2125)
        assert_eq!(zeroed, 31);
        for (freq, bin) in spectrum.iter() {
            if freq.abs() > 2000.0 {
                assert_eq!(bin, Complex::new(0.0, 0.0));
            }
        }
    }
}
