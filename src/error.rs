use thiserror::Error;

/// Errors raised at the configuration boundary of a filter stage.
///
/// Nothing on the audio path returns these: once a stage is prepared, bad
/// control values are clamped or ignored instead.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),
    #[error("a filter stage needs at least one channel")]
    NoChannels,
    #[error("unknown topology: {0:?}")]
    UnknownTopology(String),
    #[error("unknown filter kind: {0:?}")]
    UnknownFilterKind(String),
}
