//! Matched second-order designs after M. Vicanek, "Matched Second Order
//! Digital Filters" (2016).
//!
//! The poles are placed from the normalized center frequency and Q; the
//! zeros are chosen per [`FilterKind`].

use core::str::FromStr;

use crate::coeffs::Coefficients;
use crate::error::Error;
use crate::sample::{db_to_gain, FloatSample, MINUS_INFINITY_DB};

/// The response shape of a matched biquad.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Bell boost/cut around the center frequency.
    #[default]
    PeakEq,
    /// Second-order high-pass, unity gain at Nyquist.
    HighPass,
    /// Band-pass with unity gain at the center frequency.
    BandPass,
}

impl FilterKind {
    pub const ALL: [Self; 3] = [Self::PeakEq, Self::HighPass, Self::BandPass];

    /// Maps a host-side index to a kind; unknown indices fall back to
    /// [`FilterKind::PeakEq`].
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::HighPass,
            2 => Self::BandPass,
            _ => Self::PeakEq,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::PeakEq => 0,
            Self::HighPass => 1,
            Self::BandPass => 2,
        }
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "peak" | "peakeq" | "peak_eq" | "bell" => Ok(Self::PeakEq),
            "highpass" | "high_pass" | "hp" => Ok(Self::HighPass),
            "bandpass" | "band_pass" | "bp" => Ok(Self::BandPass),
            _ => Err(Error::UnknownFilterKind(s.to_owned())),
        }
    }
}

/// Designs a matched biquad.
///
/// `frequency_hz` is expected to already lie below Nyquist, `gain_db` is
/// only used by [`FilterKind::PeakEq`].
///
/// ```
/// use peq_biquad::coeffs::matched::{design, FilterKind};
///
/// fn main() {
///     let c = design(FilterKind::PeakEq, 1000.0_f64, 48000.0, 0.0, 0.7);
///     let [b0, b1, b2, _, a1, a2] = c.to_transfer();
///
///     // At 0 dB the zeros cancel the poles.
///     assert_eq!([b0, b1, b2], [1.0, a1, a2]);
/// }
/// ```
pub fn design<X>(
    kind: FilterKind,
    frequency_hz: X,
    sample_rate: X,
    gain_db: X,
    q: X,
) -> Coefficients<X>
where
    X: FloatSample,
{
    let one = X::one();
    let two = X::from_f64(2.0);
    let pi = X::PI();

    let f0 = frequency_hz / (sample_rate / two);
    let (sin_f0, cos_f0) = (f0 * pi).sin_cos();

    // Peak gain, linear. Only the peak shape uses it. The silence floor of
    // `db_to_gain` would put the poles on the unit circle, so cuts bottom
    // out at the floor level instead.
    let floor = X::from_f64(10.0_f64.powf(MINUS_INFINITY_DB / 20.0));
    let aa = db_to_gain(gain_db).max(floor);

    let alpha = match kind {
        FilterKind::PeakEq => sin_f0 / (two * aa.sqrt() * q),
        FilterKind::HighPass | FilterKind::BandPass => sin_f0 / (two * q),
    };

    // Poles
    let a1 = -two * cos_f0 / (one + alpha);
    let a2 = (one - alpha) / (one + alpha);

    // Zeros
    let (b0, b1, b2) = match kind {
        FilterKind::PeakEq => (
            (one + aa * alpha) / (one + alpha),
            a1,
            (one - aa * alpha) / (one + alpha),
        ),
        FilterKind::HighPass => {
            let b0 = (one - a1 + a2) / (two * two);
            (b0, -two * b0, b0)
        }
        FilterKind::BandPass => {
            let b0 = (one - a2) / two;
            (b0, X::zero(), -b0)
        }
    };

    Coefficients::from_transfer(b0, b1, b2, one, a1, a2)
}
