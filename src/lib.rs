// Copyright (c) 2024 Mike Tsao

#![warn(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Frailty is the real-time core of a polyphonic instrument plugin.
//!
//! A host drives an [Instrument] from two contexts.
//!
//! * The *audio context* calls [Instrument::process()] once per block with a
//! time-ordered list of [TimedEvent](events::TimedEvent)s. Notes start, stop,
//! and get modulated at the exact frame their events name, and the
//! instrument reports finished notes and confirmed parameter changes through a
//! callback. Nothing in this path allocates.
//! * The *control context* (automation outside the audio stream, a UI, project
//! save and load) holds a [ParameterStore](params::ParameterStore) obtained
//! from [Instrument::params()]. Edits made there reach the audio context at
//! the start of its next block, and edits the audio context makes become
//! visible there on request.
//!
//! Sound comes from a [RendersVoices](traits::RendersVoices) implementation.
//! The bundled [SineRenderer](render::SineRenderer) plays a quiet sine tone
//! per voice.

/// A collection of imports that are useful to users of this crate. `use
/// frailty::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        config::{InstrumentConfig, InstrumentConfigBuilder},
        events::prelude::*,
        export::PhraseRenderer,
        params::prelude::*,
        render::SineRenderer,
        traits::prelude::*,
        types::prelude::*,
        voices::prelude::*,
        Error, Instrument,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    error::{Error, Result},
    instrument::Instrument,
};

pub mod config;
pub mod events;
pub mod export;
pub mod params;
pub mod render;
pub mod traits;
pub mod types;
pub mod voices;

mod error;
mod instrument;
