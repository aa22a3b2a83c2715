use core::str::FromStr;

use crate::biquad::state::ChannelState;
use crate::coeffs::Coefficients;
use crate::error::Error;
use crate::sample::FloatSample;

/// The difference-equation realization used by a [`Biquad`].
///
/// All four compute the same transfer function, but keep different state:
/// switching between them invalidates the delay registers.
///
/// [`Biquad`]: crate::biquad::Biquad
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Four registers: two past inputs, two past outputs.
    DirectFormI,
    /// Two registers on the shared loop node.
    DirectFormII,
    /// Four registers: the transposed Form I.
    DirectFormITransposed,
    /// Two registers; the numerically preferred realization.
    #[default]
    DirectFormIITransposed,
}

impl Topology {
    pub const ALL: [Self; 4] = [
        Self::DirectFormI,
        Self::DirectFormII,
        Self::DirectFormITransposed,
        Self::DirectFormIITransposed,
    ];

    /// Maps a host-side index to a topology. Anything unrecognized falls back
    /// to [`Topology::DirectFormIITransposed`].
    ///
    /// ```
    /// use peq_biquad::Topology;
    ///
    /// fn main() {
    ///     assert_eq!(Topology::from_index(0), Topology::DirectFormI);
    ///     assert_eq!(Topology::from_index(2), Topology::DirectFormITransposed);
    ///     assert_eq!(Topology::from_index(42), Topology::DirectFormIITransposed);
    /// }
    /// ```
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::DirectFormI,
            1 => Self::DirectFormII,
            2 => Self::DirectFormITransposed,
            _ => Self::DirectFormIITransposed,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::DirectFormI => 0,
            Self::DirectFormII => 1,
            Self::DirectFormITransposed => 2,
            Self::DirectFormIITransposed => 3,
        }
    }

    /// Runs one sample through the recurrence of this topology, updating the
    /// channel's registers.
    #[inline]
    pub(crate) fn tick<X>(self, c: &Coefficients<X>, s: &mut ChannelState<X>, x: X) -> X
    where
        X: FloatSample,
    {
        match self {
            Self::DirectFormI => {
                let y = x * c.b0 + s.x1 * c.b1 + s.x2 * c.b2 + s.y1 * c.a1 + s.y2 * c.a2;

                s.x2 = s.x1;
                s.y2 = s.y1;
                s.x1 = x;
                s.y1 = y;

                y
            }
            Self::DirectFormII => {
                let w = x + (s.w1 * c.a1 + s.w2 * c.a2);
                let y = w * c.b0 + s.w1 * c.b1 + s.w2 * c.b2;

                s.w2 = s.w1;
                s.w1 = w;

                y
            }
            Self::DirectFormITransposed => {
                let w = x + s.w2;
                let y = w * c.b0 + s.x2;

                s.x2 = w * c.b1 + s.x1;
                s.w2 = w * c.a1 + s.w1;
                s.x1 = w * c.b2;
                s.w1 = w * c.a2;

                y
            }
            Self::DirectFormIITransposed => {
                let y = x * c.b0 + s.x2;

                s.x2 = x * c.b1 + s.x1 + y * c.a1;
                s.x1 = x * c.b2 + y * c.a2;

                y
            }
        }
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "df1" | "directformi" => Ok(Self::DirectFormI),
            "df2" | "directformii" => Ok(Self::DirectFormII),
            "df1t" | "directformitransposed" => Ok(Self::DirectFormITransposed),
            "df2t" | "directformiitransposed" => Ok(Self::DirectFormIITransposed),
            _ => Err(Error::UnknownTopology(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_response(topology: Topology, c: &Coefficients<f64>, len: usize) -> Vec<f64> {
        let mut s = ChannelState::default();
        (0..len)
            .map(|n| topology.tick(c, &mut s, if n == 0 { 1.0 } else { 0.0 }))
            .collect()
    }

    #[test]
    fn first_impulse_samples() {
        let c = Coefficients::from_transfer(0.5_f64, 0.25, 0.125, 1.0, -0.5, 0.25);

        let y0 = c.b0;
        let y1 = c.b1 + c.a1 * y0;
        let y2 = c.b2 + c.a1 * y1 + c.a2 * y0;

        for topology in Topology::ALL {
            let ir = impulse_response(topology, &c, 3);
            assert_eq!(ir, vec![y0, y1, y2], "{:?}", topology);
        }
    }

    #[test]
    fn register_usage() {
        let c = Coefficients::from_transfer(0.5_f64, 0.25, 0.125, 1.0, -0.5, 0.25);

        let mut s = ChannelState::default();
        Topology::DirectFormII.tick(&c, &mut s, 1.0);
        assert_eq!((s.x1, s.x2, s.y1, s.y2), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(s.w1, 1.0);

        let mut s = ChannelState::default();
        Topology::DirectFormIITransposed.tick(&c, &mut s, 1.0);
        assert_eq!((s.w1, s.w2, s.y1, s.y2), (0.0, 0.0, 0.0, 0.0));

        let mut s = ChannelState::default();
        Topology::DirectFormI.tick(&c, &mut s, 1.0);
        assert_eq!((s.w1, s.w2), (0.0, 0.0));
        assert_eq!((s.x1, s.y1), (1.0, 0.5));
    }

    #[test]
    fn parse_and_index() {
        assert_eq!("DF2T".parse::<Topology>(), Ok(Topology::DirectFormIITransposed));
        assert_eq!("direct-form-i".parse::<Topology>(), Ok(Topology::DirectFormI));
        assert_eq!(
            "DirectFormITransposed".parse::<Topology>(),
            Ok(Topology::DirectFormITransposed)
        );
        assert_eq!(
            "lattice".parse::<Topology>(),
            Err(Error::UnknownTopology("lattice".to_owned()))
        );

        for topology in Topology::ALL {
            assert_eq!(Topology::from_index(topology.index()), topology);
        }
        assert_eq!(Topology::default(), Topology::DirectFormIITransposed);
    }
}
