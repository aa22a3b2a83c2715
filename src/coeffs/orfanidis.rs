//! Peaking EQ with matched gain at Nyquist.
//!
//! After S. J. Orfanidis, "Digital Parametric Equalizer Design with
//! Prescribed Nyquist-Frequency Gain", J. Audio Eng. Soc., vol. 45, p. 444,
//! June 1997. Unlike a plain bilinear-transform peak, the digital response
//! equals the analog prototype's at Nyquist (`G1`) as well as at DC (`G0`),
//! so boosts near the top of the band are not cramped.

use crate::coeffs::Coefficients;
use crate::sample::{db_to_gain, FloatSample};

/// Ratio between the center frequency and the bandwidth at a Q of 1.
pub const BANDWIDTH_SCALE: f64 = 1.588308819;

/// Musical parameters converted into the terms of the design equations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeakParameters<X>
where
    X: FloatSample,
{
    /// Reference gain at DC.
    pub g0: X,
    /// Boost/cut gain at the center frequency.
    pub g: X,
    /// Gain at which the bandwidth is measured.
    pub gb: X,
    /// Center frequency, in radians per sample.
    pub w0: X,
    /// Bandwidth, in radians per sample.
    pub dw: X,
}

impl<X> PeakParameters<X>
where
    X: FloatSample,
{
    /// Converts a gain in dB, a center frequency in radians per sample and
    /// a Q into design parameters.
    ///
    /// The bandwidth gain sits at `gain_db / √2` dB, and the bandwidth is
    /// `w0 / (1.588308819 * q)`.
    pub fn new(gain_db: X, w0: X, q: X) -> Self {
        Self {
            g0: X::one(),
            g: db_to_gain(gain_db),
            gb: db_to_gain(gain_db / X::SQRT_2()),
            w0,
            dw: w0 / (X::from_f64(BANDWIDTH_SCALE) * q),
        }
    }
}

/// Output of the matched-peak design.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeakDesign<X>
where
    X: FloatSample,
{
    pub coeffs: Coefficients<X>,

    /// The gain of the design at Nyquist, which matches the analog
    /// prototype's gain there.
    pub nyquist_gain: X,
}

/// Designs the matched peaking filter for `params`.
///
/// Settings too close to flat for the general formula (boost or cut within
/// a few ulps of unity), and any that make it blow up, come back as the
/// pass-through filter.
pub fn design<X>(params: &PeakParameters<X>) -> PeakDesign<X>
where
    X: FloatSample,
{
    let PeakParameters { g0, g, gb, w0, dw } = *params;

    let one = X::one();
    let two = X::from_f64(2.0);
    let pi = X::PI();
    let pi2 = pi * pi;
    let tiny = X::epsilon() * X::from_f64(4.0);

    let g2 = g * g;
    let gb2 = gb * gb;
    let g02 = g0 * g0;

    let f = (g2 - gb2).abs();
    let g00 = (g2 - g02).abs();
    let f00 = (gb2 - g02).abs();

    if f <= tiny * g2 || g00 <= tiny * g2.max(g02) {
        return flat();
    }

    let dist = (w0 * w0 - pi2).powi(2);
    let num = g02 * dist + g2 * f00 * pi2 * dw * dw / f;
    let den = dist + f00 * pi2 * dw * dw / f;

    let g1 = (num / den).sqrt();

    let g01 = (g2 - g0 * g1).abs();
    let g11 = (g2 - g1 * g1).abs();
    let f01 = (gb2 - g0 * g1).abs();
    let f11 = (gb2 - g1 * g1).abs();

    if f11 <= tiny * gb2.max(g02) {
        return flat();
    }

    let w2 = (g11 / g00).sqrt() * (w0 / two).tan().powi(2);
    let dw_warped = (one + (f00 / f11).sqrt() * w2) * (dw / two).tan();

    let c = f11 * dw_warped * dw_warped - two * w2 * (f01 - (f00 * f11).sqrt());
    let d = two * w2 * (g01 - (g00 * g11).sqrt());

    let a = ((c + d) / f).sqrt();
    let b = ((g2 * c + gb2 * d) / f).sqrt();

    let norm = one + w2 + a;

    let design = PeakDesign {
        coeffs: Coefficients::from_transfer(
            (g1 + g0 * w2 + b) / norm,
            -two * ((g1 - g0 * w2) / norm),
            (g1 - b + g0 * w2) / norm,
            one,
            -two * ((one - w2) / norm),
            (one + w2 - a) / norm,
        ),
        nyquist_gain: g1,
    };

    if design.coeffs.is_finite() && g1.is_finite() {
        design
    } else {
        flat()
    }
}

fn flat<X>() -> PeakDesign<X>
where
    X: FloatSample,
{
    PeakDesign {
        coeffs: Coefficients::identity(),
        nyquist_gain: X::one(),
    }
}
