//! Complete filter stages: parameter handling, coefficient design and the
//! [`Biquad`] engine wired together.
//!
//! Both stages follow the same contract. Setters clamp their input, and
//! re-derive the coefficients only when the (clamped) value actually
//! changes. Non-finite values are ignored. With a ramp duration set, the
//! values glide towards their targets and the coefficients are re-derived
//! once per processed block.

mod matched;
mod peak;

pub use self::matched::MatchedBiquad;
pub use self::peak::OrfanidisPeak;

use log::debug;

use crate::biquad::{Biquad, Topology};
use crate::coeffs::Coefficients;
use crate::frequency::{FrequencyMapper, DEFAULT_SAMPLE_RATE};
use crate::params::{Parameters, MAX_RESONANCE, MIN_RESONANCE};
use crate::process::ProcessSpec;
use crate::sample::FloatSample;
use crate::shared::ParameterReceiver;
use crate::smooth::{Ramp, SmoothedValue};

/// The operations a host drives a filter stage through.
pub trait FilterStage<X>
where
    X: FloatSample,
{
    /// Sizes the stage for `spec`, zeroes its state and re-derives the
    /// coefficients for the new sample rate.
    fn prepare(&mut self, spec: &ProcessSpec);

    fn engine(&self) -> &Biquad<X>;

    fn engine_mut(&mut self) -> &mut Biquad<X>;

    /// Moves any running parameter ramps forward by `num_samples`.
    fn advance(&mut self, num_samples: usize);

    /// Applies a full set of control values.
    fn set_parameters(&mut self, params: &Parameters);

    /// The control values currently targeted by the stage.
    fn parameters(&self) -> Parameters;

    fn coefficients(&self) -> Coefficients<X> {
        self.engine().coefficients()
    }

    fn topology(&self) -> Topology {
        self.engine().topology()
    }

    /// Switches the realization, zeroing the delay state if it changes.
    fn set_topology(&mut self, topology: Topology) {
        if self.engine().topology() != topology {
            debug!("switching topology to {:?}", topology);
            self.engine_mut().set_topology(topology);
        }
    }

    /// Fills the delay state with `initial`.
    fn reset(&mut self, initial: X) {
        self.engine_mut().reset(initial);
    }

    fn snap_to_zero(&mut self) {
        self.engine_mut().snap_to_zero();
    }

    #[inline]
    fn process_sample(&mut self, channel: usize, x: X) -> X {
        self.engine_mut().process_sample(channel, x)
    }

    /// Filters a block, see [`Biquad::process`]. Parameter ramps advance by
    /// the block length, bypassed or not.
    fn process<I, O>(&mut self, input: &[I], output: &mut [O], bypassed: bool)
    where
        I: AsRef<[X]>,
        O: AsMut<[X]>,
    {
        self.advance(input.first().map_or(0, |c| c.as_ref().len()));
        self.engine_mut().process(input, output, bypassed);
    }

    /// Filters a block in place, see [`Biquad::process_in_place`].
    fn process_in_place<B>(&mut self, block: &mut [B], bypassed: bool)
    where
        B: AsMut<[X]>,
    {
        self.advance(block.first_mut().map_or(0, |c| c.as_mut().len()));
        self.engine_mut().process_in_place(block, bypassed);
    }

    /// Applies any parameter change published since the last call. Meant to
    /// be called once per block, before processing it.
    fn pull(&mut self, receiver: &mut ParameterReceiver) -> bool {
        match receiver.poll() {
            Some(params) => {
                self.set_parameters(&params);
                true
            }
            None => false,
        }
    }
}

/// Clamped, smoothed control values shared by both stages.
#[derive(Clone, Debug)]
pub(crate) struct Controls<X>
where
    X: FloatSample,
{
    mapper: FrequencyMapper<X>,
    sample_rate: f64,
    ramp_seconds: f64,

    // The unclamped request, so that a new sample rate can widen the band.
    requested_hz: X,

    frequency: SmoothedValue<X>,
    resonance: SmoothedValue<X>,
    gain: SmoothedValue<X>,
}

impl<X> Controls<X>
where
    X: FloatSample,
{
    pub(crate) fn new(params: &Parameters) -> Self {
        let mapper = FrequencyMapper::new(DEFAULT_SAMPLE_RATE);

        let requested_hz = finite_or(params.frequency_hz, Parameters::default().frequency_hz);
        let resonance = finite_or(params.resonance, Parameters::default().resonance)
            .clamp(MIN_RESONANCE, MAX_RESONANCE);
        let gain_db = finite_or(params.gain_db, Parameters::default().gain_db);
        let requested_hz = X::from_f64(requested_hz);

        let mut controls = Self {
            mapper,
            sample_rate: DEFAULT_SAMPLE_RATE,
            ramp_seconds: valid_ramp(params.ramp_seconds).unwrap_or(0.0),
            requested_hz,
            frequency: SmoothedValue::new(Ramp::Multiplicative, mapper.clamp(requested_hz)),
            resonance: SmoothedValue::new(Ramp::Linear, X::from_f64(resonance)),
            gain: SmoothedValue::new(Ramp::Linear, X::from_f64(gain_db)),
        };
        controls.reset_ramps();
        controls
    }

    pub(crate) fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.mapper.prepare(sample_rate);
        self.frequency
            .set_current_and_target(self.mapper.clamp(self.requested_hz));
        self.reset_ramps();
    }

    fn reset_ramps(&mut self) {
        for v in [&mut self.frequency, &mut self.resonance, &mut self.gain] {
            v.reset(self.sample_rate, self.ramp_seconds);
        }
    }

    pub(crate) fn mapper(&self) -> &FrequencyMapper<X> {
        &self.mapper
    }

    pub(crate) fn set_frequency(&mut self, hz: X) -> bool {
        if !hz.is_finite() {
            return false;
        }

        self.requested_hz = hz;
        let hz = self.mapper.clamp(hz);
        if hz == self.frequency.target() {
            return false;
        }

        self.frequency.set_target(hz);
        true
    }

    pub(crate) fn set_resonance(&mut self, q: X) -> bool {
        if !q.is_finite() {
            return false;
        }

        let q = q
            .max(X::from_f64(MIN_RESONANCE))
            .min(X::from_f64(MAX_RESONANCE));
        if q == self.resonance.target() {
            return false;
        }

        self.resonance.set_target(q);
        true
    }

    pub(crate) fn set_gain(&mut self, gain_db: X) -> bool {
        if !gain_db.is_finite() || gain_db == self.gain.target() {
            return false;
        }

        self.gain.set_target(gain_db);
        true
    }

    /// Changes the ramp length; running ramps jump to their targets.
    pub(crate) fn set_ramp_seconds(&mut self, ramp_seconds: f64) -> bool {
        match valid_ramp(ramp_seconds) {
            Some(s) if s != self.ramp_seconds => {
                self.ramp_seconds = s;
                self.reset_ramps();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn ramp_seconds(&self) -> f64 {
        self.ramp_seconds
    }

    pub(crate) fn is_smoothing(&self) -> bool {
        self.frequency.is_smoothing() || self.resonance.is_smoothing() || self.gain.is_smoothing()
    }

    /// Advances the ramps; returns `true` if any value moved.
    pub(crate) fn skip(&mut self, num_samples: usize) -> bool {
        if num_samples == 0 || !self.is_smoothing() {
            return false;
        }

        self.frequency.skip(num_samples);
        self.resonance.skip(num_samples);
        self.gain.skip(num_samples);
        true
    }

    /// Current (possibly mid-ramp) frequency in Hz.
    pub(crate) fn frequency(&self) -> X {
        self.frequency.current()
    }

    pub(crate) fn resonance(&self) -> X {
        self.resonance.current()
    }

    pub(crate) fn gain(&self) -> X {
        self.gain.current()
    }

    /// Current frequency in radians per sample.
    pub(crate) fn w0(&self) -> X {
        self.mapper.to_radians_per_sample(self.frequency())
    }

    /// Targeted values, in the form a host set them.
    pub(crate) fn to_parameters(&self) -> Parameters {
        Parameters {
            frequency_hz: self.frequency.target().into_f64(),
            gain_db: self.gain.target().into_f64(),
            resonance: self.resonance.target().into_f64(),
            ramp_seconds: self.ramp_seconds,
            ..Parameters::default()
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn valid_ramp(ramp_seconds: f64) -> Option<f64> {
    (ramp_seconds.is_finite() && ramp_seconds >= 0.0).then_some(ramp_seconds)
}

/// Declares `<Stage>F32` and `<Stage>F64` aliases for each stage.
macro_rules! precision_aliases {
    ($($Stage:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "[`" $Stage "`] running at single precision."]
                pub type [<$Stage F32>] = $Stage<f32>;
                #[doc = "[`" $Stage "`] running at double precision."]
                pub type [<$Stage F64>] = $Stage<f64>;
            )*
        }
    };
}

precision_aliases!(OrfanidisPeak, MatchedBiquad);
