use log::debug;

use crate::biquad::Biquad;
use crate::coeffs::orfanidis::{self, PeakParameters};
use crate::filter::{Controls, FilterStage};
use crate::params::Parameters;
use crate::process::ProcessSpec;
use crate::sample::FloatSample;

/// Peaking EQ whose gain at Nyquist matches the analog prototype.
///
/// Call [`FilterStage::prepare`] before processing; until then the stage
/// has no channels.
///
/// ```
/// use peq_biquad::{FilterStage, OrfanidisPeak, ProcessSpec};
///
/// fn main() -> Result<(), peq_biquad::Error> {
///     let mut eq = OrfanidisPeak::<f32>::new();
///     eq.prepare(&ProcessSpec::new(48000.0, 2)?);
///     eq.set_frequency(2500.0);
///     eq.set_gain(6.0);
///     eq.set_resonance(1.4);
///
///     let mut block = vec![vec![0.0_f32; 64]; 2];
///     block[0][0] = 1.0;
///     eq.process_in_place(&mut block, false);
///
///     assert!(block[0][0] > 1.0);
///     assert_eq!(block[1], vec![0.0; 64]);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct OrfanidisPeak<X>
where
    X: FloatSample,
{
    controls: Controls<X>,
    engine: Biquad<X>,
    nyquist_gain: X,
}

impl<X> OrfanidisPeak<X>
where
    X: FloatSample,
{
    pub fn new() -> Self {
        Self::with_parameters(&Parameters::default())
    }

    /// Creates a stage from `params`. The filter kind is not used.
    pub fn with_parameters(params: &Parameters) -> Self {
        let mut stage = Self {
            controls: Controls::new(params),
            engine: Biquad::new(0),
            nyquist_gain: X::one(),
        };
        stage.engine.set_topology(params.topology);
        stage.update();
        stage
    }

    pub fn set_frequency(&mut self, hz: X) {
        if self.controls.set_frequency(hz) {
            self.update();
        }
    }

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

    /// Sets how long parameter changes take to glide to their new value.
    /// Changing it finishes any running ramp and zeroes the delay state.
    pub fn set_ramp_duration_seconds(&mut self, ramp_seconds: f64) {
        if self.controls.set_ramp_seconds(ramp_seconds) {
            debug!("peak: ramp duration set to {} s", ramp_seconds);
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

    /// Current center frequency in Hz, after clamping.
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

    pub fn min_frequency(&self) -> X {
        self.controls.mapper().min_frequency()
    }

    pub fn max_frequency(&self) -> X {
        self.controls.mapper().max_frequency()
    }

    /// Linear gain of the current design at Nyquist.
    pub fn nyquist_gain(&self) -> X {
        self.nyquist_gain
    }

    // Designs that come out non-finite are dropped, and the previous
    // coefficients stay in place.
    fn update(&mut self) {
        let params = PeakParameters::new(
            self.controls.gain(),
            self.controls.w0(),
            self.controls.resonance(),
        );
        let design = orfanidis::design(&params);

        if design.coeffs.is_finite() && design.nyquist_gain.is_finite() {
            self.engine.set_coefficients(design.coeffs);
            self.nyquist_gain = design.nyquist_gain;
        }
    }
}

impl<X> Default for OrfanidisPeak<X>
where
    X: FloatSample,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X> FilterStage<X> for OrfanidisPeak<X>
where
    X: FloatSample,
{
    fn prepare(&mut self, spec: &ProcessSpec) {
        debug!(
            "peak: preparing for {} Hz, {} channel(s)",
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

        let mut changed = self.controls.set_frequency(X::from_f64(params.frequency_hz));
        changed |= self.controls.set_gain(X::from_f64(params.gain_db));
        changed |= self.controls.set_resonance(X::from_f64(params.resonance));
        if changed {
            self.update();
        }
    }

    fn parameters(&self) -> Parameters {
        Parameters {
            topology: self.engine.topology(),
            ..self.controls.to_parameters()
        }
    }
}
