// Copyright (c) 2024 Mike Tsao

//! The crate's error type.

use crate::types::ParamId;
use thiserror::Error;

/// Everything that can go wrong in this crate. Most of the audio path has no
/// recoverable failures; these come from the control surface and from the
/// bounded voice pool.
#[derive(Debug, Error)]
pub enum Error {
    /// The parameter id is outside `0..PARAM_COUNT`.
    #[error("unknown parameter id {0}")]
    UnknownParam(ParamId),

    /// Display text can't be turned back into a value.
    #[error("converting display text to a parameter value is not supported")]
    TextToValueUnsupported,

    /// A state blob ended before every parameter was read.
    #[error("state blob is incomplete: expected {expected} bytes, got {actual}")]
    IncompleteState {
        /// The fixed size of a state blob.
        expected: usize,
        /// How many bytes the stream produced.
        actual: usize,
    },

    /// Every voice slot is taken.
    #[error("all {0} voices are in use")]
    VoicePoolFull(usize),

    /// The underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A [Result](core::result::Result) with this crate's [Error].
pub type Result<T> = core::result::Result<T, Error>;
