// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Channel, Key, NoteId, NoteIdentity, NoteMatch, ParamId, ParameterType, SampleRate,
        SampleType, WILDCARD,
    };
}

pub use {
    note::{Channel, Key, NoteId, NoteIdentity, NoteMatch, WILDCARD},
    numbers::{ParamId, ParameterType, SampleType},
    time::SampleRate,
};

mod note;
mod numbers;
mod time;
