//! Second-order IIR sections and zero-phase cascade filtering.
//!
//! A [`Sos`] is one biquad in transposed Direct Form II:
//!
//! ```text
//! y[n]  = b0*x[n] + z1
//! z1'   = b1*x[n] - a1*y[n] + z2
//! z2'   = b2*x[n] - a2*y[n]
//! ```
//!
//! A [`SosCascade`] chains sections and offers [`SosCascade::filtfilt`],
//! which runs the cascade forward, then backward over the reversed output.
//! The magnitude response is squared and the phase cancels, so the output
//! is not time-shifted relative to the input.

use std::f64::consts::PI;

/// One second-order section with coefficients normalised so that `a0 == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sos {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Sos {
    /// Create a section from numerator `b` and denominator `a`.
    ///
    /// Coefficients are normalised by `a[0]` internally.
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0_inv = 1.0 / a[0];
        Self {
            b0: b[0] * a0_inv,
            b1: b[1] * a0_inv,
            b2: b[2] * a0_inv,
            a1: a[1] * a0_inv,
            a2: a[2] * a0_inv,
        }
    }

    /// Numerator coefficients `[b0, b1, b2]`.
    pub fn numerator(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Denominator coefficients `[1, a1, a2]`.
    pub fn denominator(&self) -> [f64; 3] {
        [1.0, self.a1, self.a2]
    }

    /// Scale the numerator (and so the section gain) by `gain`.
    pub fn scaled(self, gain: f64) -> Self {
        Self {
            b0: self.b0 * gain,
            b1: self.b1 * gain,
            b2: self.b2 * gain,
            ..self
        }
    }

    /// Gain at DC.
    pub fn dc_gain(&self) -> f64 {
        let den = 1.0 + self.a1 + self.a2;
        if den.abs() < f64::EPSILON {
            0.0
        } else {
            (self.b0 + self.b1 + self.b2) / den
        }
    }

    /// Magnitude response at normalised angular frequency `omega` (radians/sample).
    pub fn magnitude_at(&self, omega: f64) -> f64 {
        let (s1, c1) = omega.sin_cos();
        let (s2, c2) = (2.0 * omega).sin_cos();
        // e^{-jw} = cos w - j sin w
        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);
        (num_re.hypot(num_im)) / den_re.hypot(den_im)
    }

    /// Magnitude response at `freq_hz` for the given sample rate.
    pub fn magnitude_at_hz(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        self.magnitude_at(2.0 * PI * freq_hz / sample_rate)
    }

    /// Delay-line state reached after an infinitely long unit-step input.
    fn step_state(&self) -> [f64; 2] {
        let g = self.dc_gain();
        let z2 = self.b2 - self.a2 * g;
        let z1 = self.b1 - self.a1 * g + z2;
        [z1, z2]
    }

    #[inline]
    fn tick(&self, state: &mut [f64; 2], x: f64) -> f64 {
        let y = self.b0 * x + state[0];
        state[0] = self.b1 * x - self.a1 * y + state[1];
        state[1] = self.b2 * x - self.a2 * y;
        y
    }
}

/// A cascade of second-order sections.
///
/// The cascade is an immutable description; every call to
/// [`filter`](SosCascade::filter) or [`filtfilt`](SosCascade::filtfilt)
/// starts from its own delay state, so one cascade can serve several
/// threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct SosCascade {
    sections: Vec<Sos>,
}

impl SosCascade {
    /// Create a cascade from its sections, applied in order.
    pub fn new(sections: Vec<Sos>) -> Self {
        Self { sections }
    }

    /// The sections.
    pub fn sections(&self) -> &[Sos] {
        &self.sections
    }

    /// Combined magnitude response at `freq_hz`.
    pub fn magnitude_at_hz(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        self.sections
            .iter()
            .map(|s| s.magnitude_at_hz(freq_hz, sample_rate))
            .product()
    }

    /// Single forward pass from rest (zero initial state).
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        let mut states = vec![[0.0; 2]; self.sections.len()];
        self.run(input.iter().copied(), &mut states)
    }

    /// Edge padding used by [`filtfilt`](SosCascade::filtfilt) for a signal of `len` samples.
    ///
    /// Three times the cascade's overall filter length, capped so at least
    /// one original sample is left unreflected.
    pub fn pad_len(&self, len: usize) -> usize {
        let full = 3 * (2 * self.sections.len() + 1);
        full.min(len.saturating_sub(1))
    }

    /// Zero-phase forward-backward filtering.
    ///
    /// The input is extended at both ends by odd reflection, each pass
    /// starts from the steady state matching its first sample (which keeps
    /// start-up transients out of the result), and the padding is stripped
    /// again. Output length always equals input length.
    pub fn filtfilt(&self, input: &[f64]) -> Vec<f64> {
        if input.is_empty() || self.sections.is_empty() {
            return input.to_vec();
        }

        let edge = self.pad_len(input.len());
        let extended = odd_extend(input, edge);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            sections = self.sections.len(),
            pad = edge,
            len = input.len(),
            "filtfilt"
        );

        let zi = self.step_states();

        let x0 = extended[0];
        let mut states: Vec<[f64; 2]> = zi.iter().map(|z| [z[0] * x0, z[1] * x0]).collect();
        let forward = self.run(extended.iter().copied(), &mut states);

        let y0 = forward[forward.len() - 1];
        let mut states: Vec<[f64; 2]> = zi.iter().map(|z| [z[0] * y0, z[1] * y0]).collect();
        let mut backward = self.run(forward.iter().rev().copied(), &mut states);
        backward.reverse();

        backward[edge..edge + input.len()].to_vec()
    }

    /// Per-section step-response state, each scaled by the DC gain of the
    /// sections in front of it.
    fn step_states(&self) -> Vec<[f64; 2]> {
        let mut scale = 1.0;
        self.sections
            .iter()
            .map(|section| {
                let [z1, z2] = section.step_state();
                let state = [z1 * scale, z2 * scale];
                scale *= section.dc_gain();
                state
            })
            .collect()
    }

    fn run(&self, input: impl Iterator<Item = f64>, states: &mut [[f64; 2]]) -> Vec<f64> {
        input
            .map(|x| {
                self.sections
                    .iter()
                    .zip(states.iter_mut())
                    .fold(x, |sample, (section, state)| section.tick(state, sample))
            })
            .collect()
    }
}

/// Extend `x` by `edge` samples at each end using odd (point) reflection.
fn odd_extend(x: &[f64], edge: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut out = Vec::with_capacity(n + 2 * edge);
    out.extend((1..=edge).rev().map(|i| 2.0 * first - x[i]));
    out.extend_from_slice(x);
    out.extend((1..=edge).map(|i| 2.0 * last - x[n - 1 - i]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One-pole smoother written as a biquad: y = 0.1 x + 0.9 y[n-1]
    fn smoother() -> Sos {
        Sos::new([0.1, 0.0, 0.0], [1.0, -0.9, 0.0])
    }

    #[test]
    fn normalises_by_a0() {
        let s = Sos::new([2.0, 4.0, 6.0], [2.0, 1.0, 0.5]);
        assert_eq!(s.numerator(), [1.0, 2.0, 3.0]);
        assert_eq!(s.denominator(), [1.0, 0.5, 0.25]);
    }

    #[test]
    fn dc_gain_of_smoother_is_unity() {
        assert!((smoother().dc_gain() - 1.0).abs() < 1e-12);
        assert!((smoother().magnitude_at(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn step_state_gives_constant_output_for_constant_input() {
        let cascade = SosCascade::new(vec![smoother(), smoother()]);
        let zi = cascade.step_states();
        let mut states: Vec<[f64; 2]> = zi.iter().map(|z| [z[0] * 3.0, z[1] * 3.0]).collect();
        let out = cascade.run(std::iter::repeat_n(3.0, 50), &mut states);
        for y in out {
            assert!((y - 3.0).abs() < 1e-9, "expected steady 3.0, got {y}");
        }
    }

    #[test]
    fn filter_from_rest_has_transient() {
        let cascade = SosCascade::new(vec![smoother()]);
        let out = cascade.filter(&[1.0; 4]);
        assert!((out[0] - 0.1).abs() < 1e-12);
        assert!((out[1] - 0.19).abs() < 1e-12);
    }

    #[test]
    fn odd_extension_reflects_about_endpoints() {
        let ext = odd_extend(&[1.0, 2.0, 4.0, 7.0], 2);
        // left: 2*1 - x[2], 2*1 - x[1]; right: 2*7 - x[2], 2*7 - x[1]
        assert_eq!(ext, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }

    #[test]
    fn pad_len_is_capped_by_signal_length() {
        let cascade = SosCascade::new(vec![smoother(); 4]);
        assert_eq!(cascade.pad_len(1000), 27);
        assert_eq!(cascade.pad_len(10), 9);
        assert_eq!(cascade.pad_len(1), 0);
    }

    #[test]
    fn filtfilt_preserves_length_and_constants() {
        let cascade = SosCascade::new(vec![smoother(), smoother()]);
        for len in [1, 2, 5, 64, 1000] {
            let input = vec![0.25; len];
            let out = cascade.filtfilt(&input);
            assert_eq!(out.len(), len);
            for y in out {
                assert!((y - 0.25).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn filtfilt_has_no_lag() {
        // A slow ramp through a lagging low-pass must come out unshifted.
        let cascade = SosCascade::new(vec![smoother()]);
        let input: Vec<f64> = (0..400).map(|i| f64::from(i) * 0.01).collect();
        let out = cascade.filtfilt(&input);
        for i in 150..250 {
            assert!(
                (out[i] - input[i]).abs() < 1e-6,
                "sample {i}: {} vs {}",
                out[i],
                input[i]
            );
        }
    }

    #[test]
    fn empty_cascade_is_identity() {
        let cascade = SosCascade::new(vec![]);
        assert_eq!(cascade.filtfilt(&[1.0, -2.0, 3.0]), vec![1.0, -2.0, 3.0]);
    }
}
