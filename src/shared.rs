//! Lock-free hand-off of [`Parameters`] from a control thread to the audio
//! thread.
//!
//! The control side writes through a [`SharedParameters`] behind an [`Arc`];
//! the audio side owns a [`ParameterReceiver`] and polls it once per block.
//! Every field is its own atomic, so a poll racing a write may see a mix of
//! old and new values. The write bumps a generation counter afterwards,
//! which guarantees the next poll picks up the complete set.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use atomic_float::AtomicF64;

use crate::biquad::Topology;
use crate::coeffs::matched::FilterKind;
use crate::params::Parameters;

#[derive(Debug)]
pub struct SharedParameters {
    frequency_hz: AtomicF64,
    gain_db: AtomicF64,
    resonance: AtomicF64,
    ramp_seconds: AtomicF64,
    kind: AtomicU8,
    topology: AtomicU8,

    generation: AtomicU64,
}

impl SharedParameters {
    pub fn new(initial: &Parameters) -> Self {
        Self {
            frequency_hz: AtomicF64::new(initial.frequency_hz),
            gain_db: AtomicF64::new(initial.gain_db),
            resonance: AtomicF64::new(initial.resonance),
            ramp_seconds: AtomicF64::new(initial.ramp_seconds),
            kind: AtomicU8::new(initial.kind.index()),
            topology: AtomicU8::new(initial.topology.index()),
            generation: AtomicU64::new(0),
        }
    }

    /// Wraps a fresh set in an [`Arc`] and returns it with a receiver.
    pub fn channel(initial: &Parameters) -> (Arc<Self>, ParameterReceiver) {
        let shared = Arc::new(Self::new(initial));
        let receiver = ParameterReceiver::new(Arc::clone(&shared));
        (shared, receiver)
    }

    pub fn set_frequency(&self, hz: f64) {
        self.frequency_hz.store(hz, Ordering::Relaxed);
        self.publish();
    }

    pub fn set_gain(&self, gain_db: f64) {
        self.gain_db.store(gain_db, Ordering::Relaxed);
        self.publish();
    }

    pub fn set_resonance(&self, q: f64) {
        self.resonance.store(q, Ordering::Relaxed);
        self.publish();
    }

    pub fn set_ramp_seconds(&self, ramp_seconds: f64) {
        self.ramp_seconds.store(ramp_seconds, Ordering::Relaxed);
        self.publish();
    }

    pub fn set_kind(&self, kind: FilterKind) {
        self.kind.store(kind.index(), Ordering::Relaxed);
        self.publish();
    }

    pub fn set_topology(&self, topology: Topology) {
        self.topology.store(topology.index(), Ordering::Relaxed);
        self.publish();
    }

    /// Replaces every value at once.
    pub fn set(&self, params: &Parameters) {
        self.frequency_hz.store(params.frequency_hz, Ordering::Relaxed);
        self.gain_db.store(params.gain_db, Ordering::Relaxed);
        self.resonance.store(params.resonance, Ordering::Relaxed);
        self.ramp_seconds.store(params.ramp_seconds, Ordering::Relaxed);
        self.kind.store(params.kind.index(), Ordering::Relaxed);
        self.topology.store(params.topology.index(), Ordering::Relaxed);
        self.publish();
    }

    pub fn load(&self) -> Parameters {
        Parameters {
            frequency_hz: self.frequency_hz.load(Ordering::Relaxed),
            gain_db: self.gain_db.load(Ordering::Relaxed),
            resonance: self.resonance.load(Ordering::Relaxed),
            ramp_seconds: self.ramp_seconds.load(Ordering::Relaxed),
            kind: FilterKind::from_index(self.kind.load(Ordering::Relaxed)),
            topology: Topology::from_index(self.topology.load(Ordering::Relaxed)),
        }
    }

    /// Number of writes so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn publish(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl Default for SharedParameters {
    fn default() -> Self {
        Self::new(&Parameters::default())
    }
}

/// The audio-thread end of a [`SharedParameters`].
///
/// Polling never blocks or allocates.
#[derive(Debug)]
pub struct ParameterReceiver {
    shared: Arc<SharedParameters>,
    seen: Option<u64>,
}

impl ParameterReceiver {
    pub fn new(shared: Arc<SharedParameters>) -> Self {
        Self { shared, seen: None }
    }

    /// Returns the current values if anything was written since the last
    /// poll. The first poll always returns them.
    pub fn poll(&mut self) -> Option<Parameters> {
        let generation = self.shared.generation();
        if self.seen == Some(generation) {
            return None;
        }

        self.seen = Some(generation);
        Some(self.shared.load())
    }

    pub fn shared(&self) -> &Arc<SharedParameters> {
        &self.shared
    }
}
