// Copyright (c) 2024 Mike Tsao

//! Voices: one per sounding note, and the registry that owns them.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Voice, VoiceRegistry};
}

pub use {registry::VoiceRegistry, voice::Voice};

mod registry;
mod voice;
