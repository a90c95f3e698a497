//! Digital Butterworth band-pass design as cascaded second-order sections.
//!
//! The design follows the classic analog-prototype route:
//!
//! 1. Prototype low-pass poles of order N on the unit circle in the s-plane,
//!    at `-exp(j * pi * m / (2N))` for `m = -N+1, -N+3, ..., N-1`.
//! 2. Low-pass to band-pass transform around the pre-warped band edges,
//!    which doubles the pole count to 2N and puts N zeros at s = 0.
//! 3. Bilinear transform to the z-plane: the zeros at s = 0 land on z = 1
//!    and the N zeros at infinity land on z = -1.
//!
//! Every section therefore carries one zero at each of z = 1 and z = -1
//! (`b = [1, 0, -1]`) and one conjugate (or real) pole pair. Each section
//! is scaled to unity gain at the band centre, so the cascade has unity
//! gain there and -3 dB at both edges.

use rustfft::num_complex::Complex64;
use sordino_core::{Error, Result, Sos, SosCascade};
use std::f64::consts::PI;

/// Highest prototype order accepted by [`bandpass_sections`].
pub const MAX_ORDER: usize = 16;

/// Bilinear transform constant (`2 * fs` with `fs = 2`, i.e. frequencies
/// normalised to Nyquist).
const FS2: f64 = 4.0;

/// Design an order-`order` Butterworth band-pass.
///
/// Cutoffs are in Hz and are normalised against Nyquist internally. The
/// result has `order` sections (2 * `order` poles).
///
/// # Errors
///
/// [`Error::InvalidArgument`] unless `0 < low_hz < high_hz < sample_rate / 2`
/// and `1 <= order <= MAX_ORDER`.
pub fn bandpass_sections(
    order: usize,
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
) -> Result<SosCascade> {
    let nyquist = sample_rate / 2.0;
    if !(1..=MAX_ORDER).contains(&order) {
        return Err(Error::invalid(format!(
            "order must be in 1..={MAX_ORDER}, got {order}"
        )));
    }
    if !(low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist) {
        return Err(Error::invalid(format!(
            "band edges must satisfy 0 < low < high < {nyquist} Hz, got {low_hz}..{high_hz}"
        )));
    }

    // Pre-warp the normalised edges for the bilinear transform
    let warp = |hz: f64| FS2 * (PI * (hz / nyquist) / 2.0).tan();
    let wl = warp(low_hz);
    let wh = warp(high_hz);
    let bw = wh - wl;
    let w0 = (wl * wh).sqrt();

    let mut poles: Vec<(Complex64, Complex64)> = Vec::with_capacity(order);

    // Upper-half prototype poles (m <= 0); their conjugates give the mirror sections.
    let n = order as i64;
    for m in (-n + 1..=0).step_by(2) {
        let proto = -Complex64::from_polar(1.0, PI * m as f64 / (2.0 * order as f64));
        let lp = proto * (bw / 2.0);
        let disc = (lp * lp - w0 * w0).sqrt();
        let s1 = bilinear(lp + disc);
        let s2 = bilinear(lp - disc);

        if m == 0 {
            // Real prototype pole (odd order): its two band-pass poles form one section.
            poles.push((s1, s2));
        } else {
            poles.push((s1, s1.conj()));
            poles.push((s2, s2.conj()));
        }
    }

    let centre = 2.0 * (w0 / FS2).atan();
    let sections = poles
        .into_iter()
        .map(|(p1, p2)| {
            let a1 = -(p1 + p2).re;
            let a2 = (p1 * p2).re;
            let section = Sos::new([1.0, 0.0, -1.0], [1.0, a1, a2]);
            section.scaled(1.0 / section.magnitude_at(centre))
        })
        .collect();

    Ok(SosCascade::new(sections))
}

/// Map an s-plane point to the z-plane.
fn bilinear(s: Complex64) -> Complex64 {
    (FS2 + s) / (FS2 - s)
}
