use crate::biquad::Topology;
use crate::coeffs::matched::FilterKind;

pub const MIN_RESONANCE: f64 = 0.1;
pub const MAX_RESONANCE: f64 = 100.0;

/// The control values of a filter stage, as set by a host.
///
/// Out-of-range values are accepted here; stages clamp them when they are
/// applied (frequency into the sample-rate band, resonance into
/// [`MIN_RESONANCE`]`..=`[`MAX_RESONANCE`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Center (or cutoff) frequency in Hz.
    pub frequency_hz: f64,
    /// Boost/cut at the center frequency, in dB.
    pub gain_db: f64,
    /// Q of the section.
    pub resonance: f64,
    /// Response shape; only read by the matched biquad.
    pub kind: FilterKind,
    pub topology: Topology,
    /// Length of the parameter ramps. Zero applies changes immediately.
    pub ramp_seconds: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            frequency_hz: 1000.0,
            gain_db: 0.0,
            resonance: 0.5,
            kind: FilterKind::default(),
            topology: Topology::default(),
            ramp_seconds: 0.0,
        }
    }
}

impl Parameters {
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn with_gain(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    pub fn with_resonance(mut self, resonance: f64) -> Self {
        self.resonance = resonance;
        self
    }

    pub fn with_kind(mut self, kind: FilterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_ramp_seconds(mut self, ramp_seconds: f64) -> Self {
        self.ramp_seconds = ramp_seconds;
        self
    }
}
