// Copyright (c) 2024 Mike Tsao

//! The events that flow into and out of the instrument during a block.

use crate::types::{NoteIdentity, NoteMatch, ParamId, ParameterType};
use serde::{Deserialize, Serialize};

/// The most commonly used imports.
pub mod prelude {
    pub use super::{EventRouter, InputEvent, ModulationTarget, OutputEvent, TimedEvent};
}

pub use router::{EventRouter, ModulationTarget};

mod router;

/// Something the host asks the instrument to do.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputEvent {
    /// Starts a new voice with this identity.
    NoteOn {
        #[allow(missing_docs)]
        id: NoteIdentity,
    },
    /// Releases every matching voice.
    NoteOff(NoteMatch),
    /// Silences every matching voice at once, without an end-of-note report.
    Choke(NoteMatch),
    /// Sets a parameter's base value.
    ParamValue {
        #[allow(missing_docs)]
        param_id: ParamId,
        #[allow(missing_docs)]
        value: ParameterType,
    },
    /// Sets a per-note modulation offset on a matching voice.
    ParamMod {
        /// Which voice(s) to modulate.
        target: NoteMatch,
        #[allow(missing_docs)]
        param_id: ParamId,
        /// Added to the base value while rendering this voice.
        amount: ParameterType,
    },
}

/// An [InputEvent] scheduled at a frame offset within the current block.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Frames from the start of the block.
    pub time: u32,
    #[allow(missing_docs)]
    pub kind: InputEvent,
}
impl TimedEvent {
    #[allow(missing_docs)]
    pub fn new_with(time: u32, kind: InputEvent) -> Self {
        Self { time, kind }
    }
}

/// Something the instrument tells the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputEvent {
    /// A parameter value changed on the audio side. Sent when a control-side
    /// edit lands.
    ParamValue {
        #[allow(missing_docs)]
        param_id: ParamId,
        #[allow(missing_docs)]
        value: ParameterType,
    },
    /// This voice has stopped sounding and has been removed.
    NoteEnd(NoteIdentity),
}
