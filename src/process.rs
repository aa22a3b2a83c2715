use crate::error::Error;

/// The processing environment a stage is prepared for.
///
/// A [`ProcessSpec`] can only be built through [`ProcessSpec::new`], so any
/// instance that exists holds a positive, finite sample rate and a non-zero
/// channel count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProcessSpec {
    sample_rate: f64,
    num_channels: usize,
}

impl ProcessSpec {
    /// ```
    /// use peq_biquad::{Error, ProcessSpec};
    ///
    /// fn main() {
    ///     let spec = ProcessSpec::new(48000.0, 2).unwrap();
    ///     assert_eq!(spec.sample_rate(), 48000.0);
    ///     assert_eq!(spec.num_channels(), 2);
    ///
    ///     assert_eq!(ProcessSpec::new(0.0, 2), Err(Error::InvalidSampleRate(0.0)));
    ///     assert_eq!(ProcessSpec::new(44100.0, 0), Err(Error::NoChannels));
    /// }
    /// ```
    pub fn new(sample_rate: f64, num_channels: usize) -> Result<Self, Error> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::InvalidSampleRate(sample_rate));
        }

        if num_channels == 0 {
            return Err(Error::NoChannels);
        }

        Ok(Self {
            sample_rate,
            num_channels,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }
}
