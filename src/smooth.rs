//! Control-value ramps.
//!
//! A [`SmoothedValue`] walks from its current value towards a target over a
//! fixed number of steps, either by equal increments ([`Ramp::Linear`]) or by
//! equal ratios ([`Ramp::Multiplicative`], suited to frequencies).

use crate::sample::FloatSample;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Ramp {
    #[default]
    Linear,
    /// Requires strictly positive values.
    Multiplicative,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothedValue<X>
where
    X: FloatSample,
{
    ramp: Ramp,
    current: X,
    target: X,
    step: X,
    steps_to_target: usize,
    countdown: usize,
}

impl<X> SmoothedValue<X>
where
    X: FloatSample,
{
    pub fn new(ramp: Ramp, initial: X) -> Self {
        Self {
            ramp,
            current: initial,
            target: initial,
            step: X::EQUILIBRIUM,
            steps_to_target: 0,
            countdown: 0,
        }
    }

    /// Sets the ramp length to `ramp_seconds` at `sample_rate`, and jumps to
    /// the target.
    pub fn reset(&mut self, sample_rate: f64, ramp_seconds: f64) {
        debug_assert!(sample_rate > 0.0 && ramp_seconds >= 0.0);

        let steps = (ramp_seconds * sample_rate).floor();
        self.steps_to_target = if steps.is_finite() && steps > 0.0 { steps as usize } else { 0 };
        self.set_current_and_target(self.target);
    }

    /// Jumps straight to `value`, abandoning any ramp in progress.
    pub fn set_current_and_target(&mut self, value: X) {
        self.current = value;
        self.target = value;
        self.countdown = 0;
    }

    /// Starts a ramp from the current value towards `target`.
    pub fn set_target(&mut self, target: X) {
        if target == self.target {
            return;
        }

        if self.steps_to_target == 0 {
            self.set_current_and_target(target);
            return;
        }

        self.target = target;
        self.countdown = self.steps_to_target;

        let n = X::from_f64(self.steps_to_target as f64);
        self.step = match self.ramp {
            Ramp::Linear => (self.target - self.current) / n,
            Ramp::Multiplicative => ((self.target.ln() - self.current.ln()) / n).exp(),
        };
    }

    /// Advances one step and returns the new current value.
    pub fn next_value(&mut self) -> X {
        if self.countdown == 0 {
            return self.target;
        }

        self.countdown -= 1;

        if self.countdown == 0 {
            self.current = self.target;
        } else {
            self.current = match self.ramp {
                Ramp::Linear => self.current + self.step,
                Ramp::Multiplicative => self.current * self.step,
            };
        }

        self.current
    }

    /// Advances `num_steps` steps at once and returns the new current value.
    pub fn skip(&mut self, num_steps: usize) -> X {
        if num_steps >= self.countdown {
            self.set_current_and_target(self.target);
            return self.target;
        }

        self.countdown -= num_steps;
        self.current = match self.ramp {
            Ramp::Linear => self.current + self.step * X::from_f64(num_steps as f64),
            Ramp::Multiplicative => self.current * self.step.powi(num_steps as i32),
        };

        self.current
    }

    pub fn current(&self) -> X {
        self.current
    }

    pub fn target(&self) -> X {
        self.target
    }

    pub fn is_smoothing(&self) -> bool {
        self.countdown > 0
    }
}
