use crate::sample::FloatSample;

/// The delay registers of one channel.
///
/// Every [`Topology`] uses a subset of these: `w*` hold the loop node of the
/// Form II realizations, `x*`/`y*` the input/output history of Form I (the
/// transposed forms reuse `x*` as their partial sums).
///
/// [`Topology`]: crate::biquad::Topology
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ChannelState<X>
where
    X: FloatSample,
{
    pub w1: X,
    pub w2: X,
    pub x1: X,
    pub x2: X,
    pub y1: X,
    pub y2: X,
}

impl<X> ChannelState<X>
where
    X: FloatSample,
{
    pub fn filled(value: X) -> Self {
        Self {
            w1: value,
            w2: value,
            x1: value,
            x2: value,
            y1: value,
            y2: value,
        }
    }

    #[inline]
    pub fn snap_to_zero(&mut self) {
        for r in [
            &mut self.w1,
            &mut self.w2,
            &mut self.x1,
            &mut self.x2,
            &mut self.y1,
            &mut self.y2,
        ] {
            r.snap_to_zero();
        }
    }
}

/// Per-channel delay registers of a stage, sized once at prepare time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelayState<X>
where
    X: FloatSample,
{
    channels: Box<[ChannelState<X>]>,
}

impl<X> DelayState<X>
where
    X: FloatSample,
{
    pub fn new(num_channels: usize) -> Self {
        Self {
            channels: vec![ChannelState::default(); num_channels].into_boxed_slice(),
        }
    }

    /// Reallocates for `num_channels`, zeroing every register. Not real-time
    /// safe when the channel count changes.
    pub fn resize(&mut self, num_channels: usize) {
        if self.channels.len() != num_channels {
            *self = Self::new(num_channels);
        } else {
            self.fill(X::EQUILIBRIUM);
        }
    }

    pub fn fill(&mut self, value: X) {
        self.channels.fill(ChannelState::filled(value));
    }

    pub fn snap_to_zero(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.snap_to_zero();
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, channel: usize) -> Option<&ChannelState<X>> {
        self.channels.get(channel)
    }

    #[inline]
    pub fn get_mut(&mut self, channel: usize) -> Option<&mut ChannelState<X>> {
        self.channels.get_mut(channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelState<X>> {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_zeroes() {
        let mut state = DelayState::<f32>::new(2);
        state.fill(0.5);
        assert!(state.iter().all(|c| *c == ChannelState::filled(0.5)));

        state.resize(2);
        assert!(state.iter().all(|c| *c == ChannelState::default()));

        state.fill(0.5);
        state.resize(4);
        assert_eq!(state.len(), 4);
        assert!(state.iter().all(|c| *c == ChannelState::default()));
    }

    #[test]
    fn snap_flushes_small_values_only() {
        let mut state = DelayState::<f64>::new(1);
        state.fill(1.0e-30);
        if let Some(c) = state.get_mut(0) {
            c.y1 = 0.75;
        }

        state.snap_to_zero();

        let c = state.get(0).copied().unwrap_or_default();
        assert_eq!(c.y1, 0.75);
        assert_eq!((c.w1, c.w2, c.x1, c.x2, c.y2), (0.0, 0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn out_of_range_channels() {
        let mut state = DelayState::<f32>::new(1);
        assert!(state.get(1).is_none());
        assert!(state.get_mut(7).is_none());
        assert!(DelayState::<f32>::default().is_empty());
    }
}
