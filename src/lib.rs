//! Second-order equalizer stages for real-time audio.
//!
//! Two designs are provided on top of a shared multichannel [`Biquad`]
//! engine: [`OrfanidisPeak`], a peaking EQ whose gain at Nyquist matches its
//! analog prototype, and [`MatchedBiquad`], which places poles and zeros
//! after Vicanek for peak, high-pass and band-pass shapes. The engine can
//! run any of four direct-form [`Topology`] variants.

pub mod biquad;
pub mod coeffs;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod params;
pub mod process;
pub mod sample;
pub mod shared;
pub mod smooth;

pub use biquad::{Biquad, Topology};
pub use coeffs::matched::FilterKind;
pub use coeffs::Coefficients;
pub use error::Error;
pub use filter::{
    FilterStage, MatchedBiquad, MatchedBiquadF32, MatchedBiquadF64, OrfanidisPeak, OrfanidisPeakF32,
    OrfanidisPeakF64,
};
pub use frequency::FrequencyMapper;
pub use params::Parameters;
pub use process::ProcessSpec;
pub use sample::FloatSample;
pub use shared::{ParameterReceiver, SharedParameters};
