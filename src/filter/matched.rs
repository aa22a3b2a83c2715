use log::debug;

use crate::biquad::Biquad;
use crate::coeffs::matched::{self, FilterKind};
use crate::filter::{Controls, FilterStage};
use crate::params::Parameters;
use crate::process::ProcessSpec;
use crate::sample::FloatSample;

/// Matched second-order filter with a selectable [`FilterKind`].
#[derive(Clone, Debug)]
pub struct MatchedBiquad<X>
where
    X: FloatSample,
{
    controls: Controls<X>,
    engine: Biquad<X>,
    kind: FilterKind,
}

impl<X> MatchedBiquad<X>
where
    X: FloatSample,
{
    pub fn new() -> Self {
        Self::with_parameters(&Parameters::default())
    }

    pub fn with_parameters(params: &Parameters) -> Self {
        let mut stage = Self {
            controls: Controls::new(params),
            engine: Biquad::new(0),
            kind: params.kind,
        };
        stage.engine.set_topology(params.topology);
        stage.update();
        stage
    }

    pub fn filter_kind(&self) -> FilterKind {
        self.kind
    }

    /// Switches the response shape. The delay state is zeroed when the kind
    /// actually changes.
    pub fn set_filter_kind(&mut self, kind: FilterKind) {
        if self.kind == kind {
            return;
        }

        debug!("matched: switching kind to {:?}", kind);
        self.kind = kind;
        self.engine.reset(X::EQUILIBRIUM);
        self.update();
    }

    pub fn set_frequency(&mut self, hz: X) {
        if self.controls.set_frequency(hz) {
            self.update();
        }
    }

    /// Only audible with [`FilterKind::PeakEq`].
    pub fn set_gain(&mut self, gain_db: X) {
        if self.controls.set_gain(gain_db) {
            self.update();
        }
    }

    pub fn set_resonance(&mut self, q: X) {
        if self.controls.set_resonance(q) {
            self.update();
        }
    }

    pub fn set_ramp_duration_seconds(&mut self, ramp_seconds: f64) {
        if self.controls.set_ramp_seconds(ramp_seconds) {
            debug!("matched: ramp duration set to {} s", ramp_seconds);
            self.engine.reset(X::EQUILIBRIUM);
            self.update();
        }
    }

    pub fn ramp_duration_seconds(&self) -> f64 {
        self.controls.ramp_seconds()
    }

    pub fn is_smoothing(&self) -> bool {
        self.controls.is_smoothing()
    }

    pub fn frequency(&self) -> X {
        self.controls.frequency()
    }

    pub fn gain(&self) -> X {
        self.controls.gain()
    }

    pub fn resonance(&self) -> X {
        self.controls.resonance()
    }

    pub fn sample_rate(&self) -> X {
        self.controls.mapper().sample_rate()
    }

    fn update(&mut self) {
        let coeffs = matched::design(
            self.kind,
            self.controls.frequency(),
            self.controls.mapper().sample_rate(),
            self.controls.gain(),
            self.controls.resonance(),
        );

        if coeffs.is_finite() {
            self.engine.set_coefficients(coeffs);
        }
    }
}

impl<X> Default for MatchedBiquad<X>
where
    X: FloatSample,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X> FilterStage<X> for MatchedBiquad<X>
where
    X: FloatSample,
{
    fn prepare(&mut self, spec: &ProcessSpec) {
        debug!(
            "matched: preparing {:?} for {} Hz, {} channel(s)",
            self.kind,
            spec.sample_rate(),
            spec.num_channels()
        );

        self.engine.prepare(spec.num_channels());
        self.controls.prepare(spec.sample_rate());
        self.update();
    }

    fn engine(&self) -> &Biquad<X> {
        &self.engine
    }

    fn engine_mut(&mut self) -> &mut Biquad<X> {
        &mut self.engine
    }

    fn advance(&mut self, num_samples: usize) {
        if self.controls.skip(num_samples) {
            self.update();
        }
    }

    fn set_parameters(&mut self, params: &Parameters) {
        self.set_ramp_duration_seconds(params.ramp_seconds);
        self.set_topology(params.topology);
        self.set_filter_kind(params.kind);

        let mut changed = self.controls.set_frequency(X::from_f64(params.frequency_hz));
        changed |= self.controls.set_gain(X::from_f64(params.gain_db));
        changed |= self.controls.set_resonance(X::from_f64(params.resonance));
        if changed {
            self.update();
        }
    }

    fn parameters(&self) -> Parameters {
        Parameters {
            kind: self.kind,
            topology: self.engine.topology(),
            ..self.controls.to_parameters()
        }
    }
}
