//! Validation and unit conversion of center frequencies.
//!
//! The usable band of a stage is tied to its sample rate: the floor sits at
//! `sample_rate / 24576` and the ceiling at `sample_rate / 2.125`, just short
//! of Nyquist. Requests outside of the band are clamped, never rejected.

use crate::sample::FloatSample;

/// The lowest usable frequency is the sample rate divided by this value.
pub const MIN_FREQUENCY_DIVISOR: f64 = 24576.0;

/// The highest usable frequency is the sample rate divided by this value.
pub const MAX_FREQUENCY_DIVISOR: f64 = 2.125;

/// The sample rate a mapper assumes before it is prepared.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Clamps `hz` into the safe band for `sample_rate`.
///
/// ```
/// use peq_biquad::frequency::clamp_frequency;
///
/// fn main() {
///     assert_eq!(clamp_frequency(0.0_f64, 44100.0), 44100.0 / 24576.0);
///     assert_eq!(clamp_frequency(30000.0_f64, 44100.0), 44100.0 / 2.125);
///     assert_eq!(clamp_frequency(1000.0_f64, 44100.0), 1000.0);
/// }
/// ```
#[inline]
pub fn clamp_frequency<X: FloatSample>(hz: X, sample_rate: X) -> X {
    let (min, max) = bounds(sample_rate);
    clamp_into(hz, min, max)
}

/// Converts `hz` to an angular frequency in radians per sample.
#[inline]
pub fn to_radians_per_sample<X: FloatSample>(hz: X, sample_rate: X) -> X {
    hz * ((X::from_f64(2.0) * X::PI()) / sample_rate)
}

#[inline]
fn bounds<X: FloatSample>(sample_rate: X) -> (X, X) {
    (
        sample_rate / X::from_f64(MIN_FREQUENCY_DIVISOR),
        sample_rate / X::from_f64(MAX_FREQUENCY_DIVISOR),
    )
}

// `NaN` lands on the floor rather than propagating into the designers.
#[inline]
fn clamp_into<X: FloatSample>(hz: X, min: X, max: X) -> X {
    if hz.is_nan() || hz < min {
        min
    } else if hz > max {
        max
    } else {
        hz
    }
}

/// Caches the frequency band of a stage for its current sample rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrequencyMapper<X>
where
    X: FloatSample,
{
    sample_rate: X,
    min_hz: X,
    max_hz: X,
}

impl<X> FrequencyMapper<X>
where
    X: FloatSample,
{
    pub fn new(sample_rate: f64) -> Self {
        let mut mapper = Self {
            sample_rate: X::EQUILIBRIUM,
            min_hz: X::EQUILIBRIUM,
            max_hz: X::EQUILIBRIUM,
        };
        mapper.prepare(sample_rate);
        mapper
    }

    /// Recomputes the band for a new sample rate.
    pub fn prepare(&mut self, sample_rate: f64) {
        debug_assert!(sample_rate > 0.0, "sample rate must be positive");

        self.sample_rate = X::from_f64(sample_rate);
        let (min_hz, max_hz) = bounds(self.sample_rate);
        self.min_hz = min_hz;
        self.max_hz = max_hz;
    }

    pub fn sample_rate(&self) -> X {
        self.sample_rate
    }

    pub fn min_frequency(&self) -> X {
        self.min_hz
    }

    pub fn max_frequency(&self) -> X {
        self.max_hz
    }

    #[inline]
    pub fn clamp(&self, hz: X) -> X {
        clamp_into(hz, self.min_hz, self.max_hz)
    }

    #[inline]
    pub fn to_radians_per_sample(&self, hz: X) -> X {
        to_radians_per_sample(hz, self.sample_rate)
    }

    /// Clamps `hz` into the band, then converts it to radians per sample.
    #[inline]
    pub fn map(&self, hz: X) -> X {
        self.to_radians_per_sample(self.clamp(hz))
    }
}

impl<X> Default for FrequencyMapper<X>
where
    X: FloatSample,
{
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}
