// Copyright (c) 2024 Mike Tsao

use crate::{
    params::{Param, ParamValues, PARAM_COUNT},
    types::{Key, NoteIdentity, ParamId, ParameterType},
};

/// One sustaining note instance: its identity, whether it is still held, its
/// oscillator phase, and its per-note modulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Voice {
    identity: NoteIdentity,
    held: bool,
    /// Position within the current cycle, always in `0.0..1.0`.
    phase: f32,
    frequency: f32,
    param_offsets: ParamValues,
}
impl Voice {
    /// The key whose frequency is [Voice::REFERENCE_FREQUENCY].
    pub const REFERENCE_KEY: i16 = 57;
    /// Hertz at [Voice::REFERENCE_KEY].
    pub const REFERENCE_FREQUENCY: f32 = 440.0;

    /// A freshly struck, held voice at phase zero with no modulation.
    pub fn new_with(identity: NoteIdentity) -> Self {
        Self {
            identity,
            held: true,
            phase: 0.0,
            frequency: Self::key_to_frequency(identity.key),
            param_offsets: [0.0; PARAM_COUNT],
        }
    }

    /// Equal-tempered pitch of `key`.
    pub fn key_to_frequency(key: Key) -> f32 {
        let semitones = key.0 as f32 - Self::REFERENCE_KEY as f32;
        Self::REFERENCE_FREQUENCY * 2.0f32.powf(semitones / 12.0)
    }

    #[allow(missing_docs)]
    pub fn identity(&self) -> &NoteIdentity {
        &self.identity
    }

    /// True until a note-off releases the voice.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Marks the voice released. It stops sounding at once and is reaped at
    /// the end of the current block.
    pub fn release(&mut self) {
        self.held = false;
    }

    #[allow(missing_docs)]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Hertz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Moves the phase forward by `increment` cycles, wrapping into `0.0..1.0`.
    pub fn advance_phase(&mut self, increment: f32) {
        self.phase += increment;
        self.phase -= self.phase.floor();
        // floor() can leave exactly 1.0 when phase is a hair below an integer
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
    }

    /// This voice's modulation offset for `param`.
    pub fn param_offset(&self, param: Param) -> ParameterType {
        self.param_offsets[param.index()]
    }

    /// Sets the modulation offset for parameter `id`. Unknown ids are ignored;
    /// returns whether the id was known.
    pub fn set_param_offset(&mut self, id: ParamId, amount: ParameterType) -> bool {
        if let Some(offset) = self.param_offsets.get_mut(id.0) {
            *offset = amount;
            true
        } else {
            false
        }
    }
}
