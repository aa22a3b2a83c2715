//! The stateful sample processor shared by every filter design.

mod state;
mod topology;

pub use self::state::{ChannelState, DelayState};
pub use self::topology::Topology;

use crate::coeffs::Coefficients;
use crate::sample::FloatSample;

/// A multichannel biquad section.
///
/// Holds the current [`Coefficients`], the [`Topology`] that realizes them
/// and one set of delay registers per channel. Sizing happens in
/// [`Biquad::prepare`]; the per-sample path neither allocates nor panics.
#[derive(Clone, Debug, Default)]
pub struct Biquad<X>
where
    X: FloatSample,
{
    coeffs: Coefficients<X>,
    topology: Topology,

    // Since biquad filters are second-order, each realization needs at most
    // two historical values per signal path. This state is updated each time
    // the filter is applied to a sample.
    state: DelayState<X>,
}

impl<X> Biquad<X>
where
    X: FloatSample,
{
    /// Creates a pass-through section with room for `num_channels` channels.
    pub fn new(num_channels: usize) -> Self {
        Self {
            coeffs: Coefficients::identity(),
            topology: Topology::default(),
            state: DelayState::new(num_channels),
        }
    }

    /// Sizes the delay state for `num_channels` and zeroes it.
    ///
    /// # Panics
    ///
    /// Panics if `num_channels` is zero.
    pub fn prepare(&mut self, num_channels: usize) {
        assert!(num_channels > 0, "a biquad needs at least one channel");
        self.state.resize(num_channels);
    }

    pub fn num_channels(&self) -> usize {
        self.state.len()
    }

    pub fn coefficients(&self) -> Coefficients<X> {
        self.coeffs
    }

    /// Installs a new coefficient set. The delay state is kept, so the
    /// change is continuous from the next sample on.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: Coefficients<X>) {
        self.coeffs = coeffs;
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Switches the realization. Registers of one topology mean nothing to
    /// another, so the delay state is zeroed whenever the topology actually
    /// changes.
    pub fn set_topology(&mut self, topology: Topology) {
        if self.topology != topology {
            self.topology = topology;
            self.reset(X::EQUILIBRIUM);
        }
    }

    /// Fills every delay register with `initial`.
    pub fn reset(&mut self, initial: X) {
        self.state.fill(initial);
    }

    pub fn state(&self) -> &DelayState<X> {
        &self.state
    }

    /// Flushes near-denormal register values to zero.
    pub fn snap_to_zero(&mut self) {
        self.state.snap_to_zero();
    }

    /// Filters one sample on `channel`.
    ///
    /// A channel index outside of the prepared range is a programming error:
    /// it trips a debug assertion, and in release builds the sample is
    /// passed through untouched.
    #[inline]
    pub fn process_sample(&mut self, channel: usize, x: X) -> X {
        debug_assert!(
            channel < self.state.len(),
            "channel {} out of range for {} prepared channel(s)",
            channel,
            self.state.len()
        );

        match self.state.get_mut(channel) {
            Some(s) => self.topology.tick(&self.coeffs, s, x),
            None => x,
        }
    }

    /// Filters a block of channels from `input` into `output`.
    ///
    /// When `bypassed` is set the input is copied verbatim and the delay
    /// state is left untouched, so that lifting the bypass later resumes
    /// from where the filter left off.
    pub fn process<I, O>(&mut self, input: &[I], output: &mut [O], bypassed: bool)
    where
        I: AsRef<[X]>,
        O: AsMut<[X]>,
    {
        debug_assert_eq!(input.len(), output.len(), "channel count mismatch");

        for (channel, (src, dst)) in input.iter().zip(output.iter_mut()).enumerate() {
            let (src, dst) = (src.as_ref(), dst.as_mut());
            debug_assert_eq!(src.len(), dst.len(), "block length mismatch");

            if bypassed {
                let n = src.len().min(dst.len());
                dst[..n].copy_from_slice(&src[..n]);
                continue;
            }

            let Some(s) = self.state.get_mut(channel) else {
                debug_assert!(false, "channel {} out of range", channel);
                let n = src.len().min(dst.len());
                dst[..n].copy_from_slice(&src[..n]);
                continue;
            };

            for (x, y) in src.iter().zip(dst.iter_mut()) {
                *y = self.topology.tick(&self.coeffs, s, *x);
            }
        }

        if !bypassed {
            self.finish_block();
        }
    }

    /// Like [`Biquad::process`], but filters each channel buffer in place.
    pub fn process_in_place<B>(&mut self, block: &mut [B], bypassed: bool)
    where
        B: AsMut<[X]>,
    {
        if bypassed {
            return;
        }

        for (channel, buf) in block.iter_mut().enumerate() {
            let Some(s) = self.state.get_mut(channel) else {
                debug_assert!(false, "channel {} out of range", channel);
                continue;
            };

            for v in buf.as_mut().iter_mut() {
                *v = self.topology.tick(&self.coeffs, s, *v);
            }
        }

        self.finish_block();
    }

    #[inline]
    fn finish_block(&mut self) {
        #[cfg(feature = "snap-to-zero")]
        self.snap_to_zero();
    }
}
