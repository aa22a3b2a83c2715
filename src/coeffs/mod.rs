//! Biquad coefficient sets and the designers that produce them.
//!
//! Coefficients are stored in the form the processing loop consumes: `a0`
//! is normalized to 1.0 and the feedback coefficients `a1`/`a2` are
//! **pre-negated** relative to the textbook transfer function
//!
//! ```text
//!         b0 + b1 z^-1 + b2 z^-2
//! H(z) = ------------------------
//!         a0 + a1 z^-1 + a2 z^-2
//! ```
//!
//! so that every topology accumulates with additions only
//! (`y = b0 x + ... + a1 y[n-1] + a2 y[n-2]`).
//! [`Coefficients::from_transfer`] performs that conversion.

pub mod matched;
pub mod orfanidis;

use crate::sample::FloatSample;

/// Coefficients for a digital biquad filter, normalized to `a0 == 1.0` and
/// with pre-negated feedback terms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coefficients<X>
where
    X: FloatSample,
{
    // Transfer function numerator coefficients.
    pub b0: X,
    pub b1: X,
    pub b2: X,

    // Transfer function denominator coefficients.
    pub a0: X,
    pub a1: X,
    pub a2: X,
}

impl<X> Coefficients<X>
where
    X: FloatSample,
{
    /// The pass-through filter, `H(z) = 1`.
    pub fn identity() -> Self {
        Self {
            b0: X::one(),
            b1: X::zero(),
            b2: X::zero(),
            a0: X::one(),
            a1: X::zero(),
            a2: X::zero(),
        }
    }

    /// Builds a coefficient set from a textbook transfer function, dividing
    /// through by `a0` and negating the feedback terms.
    ///
    /// ```
    /// use peq_biquad::Coefficients;
    ///
    /// fn main() {
    ///     let c = Coefficients::from_transfer(2.0_f64, 1.0, 0.5, 2.0, -1.0, 0.5);
    ///     assert_eq!([c.b0, c.b1, c.b2], [1.0, 0.5, 0.25]);
    ///     assert_eq!([c.a0, c.a1, c.a2], [0.5, 0.5, -0.25]);
    /// }
    /// ```
    ///
    /// Note that `a0` holds the reciprocal of the incoming `a0` afterwards,
    /// which is 1.0 for every design in this crate.
    pub fn from_transfer(b0: X, b1: X, b2: X, a0: X, a1: X, a2: X) -> Self {
        let a0 = X::one() / a0;

        Self {
            b0: b0 * a0,
            b1: b1 * a0,
            b2: b2 * a0,
            a0,
            a1: -(a1 * a0),
            a2: -(a2 * a0),
        }
    }

    /// Returns the textbook `(b0, b1, b2, a0, a1, a2)` form of this set.
    pub fn to_transfer(&self) -> [X; 6] {
        [self.b0, self.b1, self.b2, X::one(), -self.a1, -self.a2]
    }

    /// Returns `true` if every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a0, self.a1, self.a2]
            .iter()
            .all(|c| c.is_finite())
    }

    /// Returns `true` if both poles lie strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        // Stability triangle on the textbook denominator 1 + d1 z^-1 + d2 z^-2.
        let d1 = -self.a1;
        let d2 = -self.a2;
        d2.abs() < X::one() && d1.abs() < X::one() + d2
    }

    /// Evaluates the frequency response at `w` radians per sample.
    ///
    /// Returns `(magnitude, phase)` where magnitude is linear (not dB) and
    /// phase is in radians.
    pub fn response(&self, w: X) -> (X, X) {
        let two = X::from_f64(2.0);
        let (sin_w, cos_w) = w.sin_cos();
        let (sin_2w, cos_2w) = (two * w).sin_cos();

        // Numerator: b0 + b1 e^(-jw) + b2 e^(-j2w)
        let num_re = self.b0 + self.b1 * cos_w + self.b2 * cos_2w;
        let num_im = -self.b1 * sin_w - self.b2 * sin_2w;

        // Denominator: 1 - a1 e^(-jw) - a2 e^(-j2w), with a1/a2 pre-negated.
        let den_re = X::one() - self.a1 * cos_w - self.a2 * cos_2w;
        let den_im = self.a1 * sin_w + self.a2 * sin_2w;

        let den_mag_sq = den_re * den_re + den_im * den_im;
        let h_re = (num_re * den_re + num_im * den_im) / den_mag_sq;
        let h_im = (num_im * den_re - num_re * den_im) / den_mag_sq;

        ((h_re * h_re + h_im * h_im).sqrt(), h_im.atan2(h_re))
    }

    /// Linear magnitude of the response at `hz` for the given sample rate.
    pub fn magnitude_at(&self, hz: X, sample_rate: X) -> X {
        self.response(crate::frequency::to_radians_per_sample(hz, sample_rate))
            .0
    }
}

impl<X> Default for Coefficients<X>
where
    X: FloatSample,
{
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn identity_response_is_flat() {
        let c = Coefficients::<f64>::identity();

        for w in [0.0, 0.3, 1.0, 2.5, core::f64::consts::PI] {
            let (mag, phase) = c.response(w);
            assert_relative_eq!(mag, 1.0);
            assert_relative_eq!(phase, 0.0);
        }

        assert!(c.is_finite());
        assert!(c.is_stable());
        assert_eq!(c.to_transfer(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn transfer_round_trip_signs() {
        let c = Coefficients::from_transfer(0.2_f64, 0.4, 0.2, 1.0, -0.5, 0.25);
        assert_eq!(c.a1, 0.5);
        assert_eq!(c.a2, -0.25);
        assert_eq!(c.to_transfer(), [0.2, 0.4, 0.2, 1.0, -0.5, 0.25]);
    }

    #[test]
    fn response_at_band_edges() {
        // One-pole-ish lowpass: H(1) = 0.8 / 0.5, H(-1) = 0 / 1.5.
        let c = Coefficients::from_transfer(0.2_f64, 0.4, 0.2, 1.0, -0.5, 0.0);

        assert_relative_eq!(c.response(0.0).0, 1.6, epsilon = 1e-12);
        assert_relative_eq!(c.response(core::f64::consts::PI).0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.magnitude_at(0.0, 48000.0), 1.6, epsilon = 1e-12);
    }

    #[test]
    fn stability() {
        assert!(Coefficients::from_transfer(1.0_f64, 0.0, 0.0, 1.0, -1.8, 0.81).is_stable());
        assert!(!Coefficients::from_transfer(1.0_f64, 0.0, 0.0, 1.0, -2.0, 1.0).is_stable());
        assert!(!Coefficients::from_transfer(1.0_f64, 0.0, 0.0, 1.0, 0.0, 1.5).is_stable());

        let mut c = Coefficients::<f32>::identity();
        c.b1 = f32::NAN;
        assert!(!c.is_finite());
    }
}
