// Copyright (c) 2024 Mike Tsao

//! The instrument's parameters: what they are, where their values live, and
//! how those values move between the control context and the audio context.
//!
//! Each parameter has two values. The *audio-authoritative* value is the one
//! the renderer uses. The *control-visible* value is the one the host, a UI,
//! or a saved project sees. Edits flow in both directions, and each direction
//! has its own dirty flag, so at any moment there is at most one pending value
//! per parameter per direction. The [ParameterStore] owns the lock that
//! serializes both flows.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        AudioParams, Param, ParamFlags, ParamInfo, ParamValues, ParameterStore, PARAM_COUNT,
        STATE_SIZE,
    };
}

pub use {
    state::STATE_SIZE,
    store::{AudioParams, ParamValues, ParameterStore},
};

mod state;
mod store;

use crate::types::{ParamId, ParameterType};
use strum::EnumCount as UseEnumCount;
use strum_macros::{Display, EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// Every parameter the instrument exposes, in id order.
#[derive(
    Clone, Copy, Debug, Display, EnumCount, EnumIter, Eq, FromRepr, IntoStaticStr, PartialEq,
)]
pub enum Param {
    /// Output level of each voice, before per-note modulation.
    Volume,
}

/// How many parameters there are. Ids run from 0 to `PARAM_COUNT - 1`.
pub const PARAM_COUNT: usize = Param::COUNT;

impl Param {
    /// This parameter's dense id.
    pub fn id(&self) -> ParamId {
        ParamId(*self as usize)
    }

    /// This parameter's position in a [ParamValues] array.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Looks up a parameter by id. Returns [None] for ids outside the set.
    pub fn from_id(id: ParamId) -> Option<Self> {
        Self::from_repr(id.0)
    }

    /// The host-facing description of this parameter.
    pub fn info(&self) -> ParamInfo {
        match self {
            Param::Volume => ParamInfo {
                id: self.id(),
                name: (*self).into(),
                min: 0.0,
                max: 1.0,
                default: 0.5,
                flags: ParamFlags {
                    is_automatable: true,
                    is_modulatable: true,
                    is_modulatable_per_note: true,
                },
            },
        }
    }
}

/// What a host needs to know to show and automate one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamInfo {
    /// Dense id, equal to the parameter's position in the set.
    pub id: ParamId,
    /// Display name.
    pub name: &'static str,
    /// Lowest valid value.
    pub min: ParameterType,
    /// Highest valid value.
    pub max: ParameterType,
    /// Value on a freshly created instance.
    pub default: ParameterType,
    /// Capabilities advertised to the host.
    pub flags: ParamFlags,
}

/// Capabilities of a parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamFlags {
    /// The host may record and play back automation for it.
    pub is_automatable: bool,
    /// The host may apply a global modulation offset.
    pub is_modulatable: bool,
    /// The host may apply modulation to individual notes.
    pub is_modulatable_per_note: bool,
}
