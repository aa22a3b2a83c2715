use core::fmt::Debug;

use num_traits::{Float, FloatConst};

/// A trait for working generically across the floating-point sample types
/// that a filter stage can run at, i.e. [`f32`] and [`f64`].
///
/// All internal constants of a stage are produced at the precision of the
/// sample type itself via [`FloatSample::from_f64`], so that a stage running
/// at [`f32`] never silently widens to [`f64`] (or vice versa) mid-formula.
pub trait FloatSample:
    Copy
    + Clone
    + PartialOrd
    + PartialEq
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + Float
    + FloatConst
{
    /// The equilibrium value for the wave that this sample type represents.
    /// This is the "zero amplitude" value, and the reset value of all filter
    /// state.
    const EQUILIBRIUM: Self;

    /// State values whose magnitude does not exceed this threshold are
    /// flushed to [`Self::EQUILIBRIUM`] by [`FloatSample::snap_to_zero`].
    const SNAP_THRESHOLD: Self;

    /// Converts an [`f64`] constant or control value to this sample type.
    fn from_f64(value: f64) -> Self;

    /// Converts this sample to an [`f64`].
    fn into_f64(self) -> f64;

    /// Flushes this value to exact zero if it is small enough to be (or
    /// to soon become) a denormal.
    ///
    /// ```
    /// use peq_biquad::FloatSample;
    ///
    /// fn main() {
    ///     let mut s = 1.0e-20_f32;
    ///     s.snap_to_zero();
    ///     assert_eq!(s, 0.0);
    ///
    ///     let mut s = 0.5_f64;
    ///     s.snap_to_zero();
    ///     assert_eq!(s, 0.5);
    /// }
    /// ```
    #[inline]
    fn snap_to_zero(&mut self) {
        if !(*self < -Self::SNAP_THRESHOLD || *self > Self::SNAP_THRESHOLD) {
            *self = Self::EQUILIBRIUM;
        }
    }
}

/// A macro used to simplify the implementation of [`FloatSample`].
macro_rules! impl_float_sample {
    ($($T:ty: {
       EQUILIBRIUM: $EQUILIBRIUM:expr,
       SNAP_THRESHOLD: $SNAP_THRESHOLD:expr }),* $(,)?) =>
    {
        $(
            impl FloatSample for $T {
                const EQUILIBRIUM: Self = $EQUILIBRIUM;
                const SNAP_THRESHOLD: Self = $SNAP_THRESHOLD;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $T
                }

                #[inline]
                fn into_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    }
}

// Implements [`FloatSample`] for all of the following primitive types.
impl_float_sample! {
    f32: { EQUILIBRIUM: 0.0, SNAP_THRESHOLD: 1.0e-8 },
    f64: { EQUILIBRIUM: 0.0, SNAP_THRESHOLD: 1.0e-8 },
}

/// Decibel values at or below this level are treated as silence (a linear
/// gain of exactly zero) by [`db_to_gain`].
pub const MINUS_INFINITY_DB: f64 = -100.0;

/// Converts a level in decibels to a linear gain factor.
///
/// ```
/// use peq_biquad::sample::db_to_gain;
///
/// fn main() {
///     assert_eq!(db_to_gain(0.0_f64), 1.0);
///     assert!((db_to_gain(20.0_f64) - 10.0).abs() < 1e-12);
///     assert_eq!(db_to_gain(-120.0_f32), 0.0);
/// }
/// ```
#[inline]
pub fn db_to_gain<X: FloatSample>(db: X) -> X {
    if db > X::from_f64(MINUS_INFINITY_DB) {
        X::from_f64(10.0).powf(db / X::from_f64(20.0))
    } else {
        X::EQUILIBRIUM
    }
}
