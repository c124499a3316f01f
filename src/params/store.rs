// Copyright (c) 2024 Mike Tsao

use super::{Param, ParamInfo, PARAM_COUNT};
use crate::{
    error::{Error, Result},
    events::OutputEvent,
    traits::OutputEventsFn,
    types::{ParamId, ParameterType},
};
use log::trace;
use parking_lot::Mutex;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// One value per parameter, indexed by [ParamId].
pub type ParamValues = [ParameterType; PARAM_COUNT];

#[derive(Debug)]
struct Exchange {
    /// Mirror of the audio-authoritative values.
    audio: ParamValues,
    /// Audio-side writes not yet pulled into `main`.
    changed: [bool; PARAM_COUNT],
    /// Control-visible values.
    main: ParamValues,
    /// Control-side writes not yet pushed to the audio side.
    main_changed: [bool; PARAM_COUNT],
}
impl Default for Exchange {
    fn default() -> Self {
        let defaults = ParameterStore::defaults();
        Self {
            audio: defaults,
            changed: [false; PARAM_COUNT],
            main: defaults,
            main_changed: [false; PARAM_COUNT],
        }
    }
}

/// The shared half of the parameter surface. Cloning a [ParameterStore] yields
/// another handle to the same values, so the control context can keep one
/// while the audio context owns the [Instrument](crate::Instrument).
///
/// Every method takes the store's single lock for a bounded `O(PARAM_COUNT)`
/// critical section. Nothing here is ever called while audio is rendering.
#[derive(Debug, Default)]
pub struct ParameterStore(Arc<Mutex<Exchange>>);
impl Clone for ParameterStore {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
impl ParameterStore {
    /// Every parameter's default value, in id order.
    pub fn defaults() -> ParamValues {
        let mut values = [0.0; PARAM_COUNT];
        for param in Param::iter() {
            values[param.index()] = param.info().default;
        }
        values
    }

    /// The number of parameters.
    pub fn count(&self) -> usize {
        PARAM_COUNT
    }

    /// Describes the parameter with the given id.
    pub fn info(&self, id: ParamId) -> Result<ParamInfo> {
        Param::from_id(id)
            .map(|p| p.info())
            .ok_or(Error::UnknownParam(id))
    }

    /// The value the control context should display: a pending control-side
    /// edit if there is one, otherwise the audio-authoritative value.
    pub fn get_value(&self, id: ParamId) -> Result<ParameterType> {
        let index = Self::checked_index(id)?;
        let exchange = self.0.lock();
        Ok(if exchange.main_changed[index] {
            exchange.main[index]
        } else {
            exchange.audio[index]
        })
    }

    /// Records a control-side edit. The audio side picks it up at the start of
    /// its next block. A second edit before then replaces the first.
    pub fn set_value(&self, id: ParamId, value: ParameterType) -> Result<()> {
        let index = Self::checked_index(id)?;
        let mut exchange = self.0.lock();
        exchange.main[index] = value;
        exchange.main_changed[index] = true;
        Ok(())
    }

    /// A snapshot of the control-visible values.
    pub fn control_values(&self) -> ParamValues {
        self.0.lock().main
    }

    /// Copies every audio-side change into the control-visible values. Returns
    /// true if anything changed.
    pub fn pull_from_audio(&self) -> bool {
        let mut exchange = self.0.lock();
        let mut any_changed = false;
        for index in 0..PARAM_COUNT {
            if exchange.changed[index] {
                exchange.main[index] = exchange.audio[index];
                exchange.changed[index] = false;
                any_changed = true;
            }
        }
        if any_changed {
            trace!("pulled audio-side parameter changes to the control side");
        }
        any_changed
    }

    /// Formats a value for display. Succeeds for every known parameter.
    pub fn value_to_text(&self, id: ParamId, value: f64) -> Result<String> {
        Self::checked_index(id)?;
        Ok(format!("{value:.6}"))
    }

    /// Parsing display text isn't supported.
    pub fn text_to_value(&self, id: ParamId, _text: &str) -> Result<ParameterType> {
        Self::checked_index(id)?;
        Err(Error::TextToValueUnsupported)
    }

    /// Replaces every control-visible value and marks all of them for the
    /// audio side.
    pub(crate) fn commit_control_values(&self, values: ParamValues) {
        let mut exchange = self.0.lock();
        exchange.main = values;
        exchange.main_changed = [true; PARAM_COUNT];
    }

    fn checked_index(id: ParamId) -> Result<usize> {
        if id.0 < PARAM_COUNT {
            Ok(id.0)
        } else {
            Err(Error::UnknownParam(id))
        }
    }
}

/// The audio context's half of the parameter surface. It owns a private copy
/// of the audio-authoritative values so that rendering never touches the lock,
/// and it is the only writer of those values.
#[derive(Debug)]
pub struct AudioParams {
    values: ParamValues,
    store: ParameterStore,
}
impl Default for AudioParams {
    fn default() -> Self {
        Self::new_with(ParameterStore::default())
    }
}
impl AudioParams {
    /// Creates the audio side of `store`, starting from its current values.
    pub fn new_with(store: ParameterStore) -> Self {
        let values = store.0.lock().audio;
        Self { values, store }
    }

    /// A handle to the shared store, for the control context.
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// The audio-authoritative values, for rendering.
    pub fn values(&self) -> &ParamValues {
        &self.values
    }

    /// The audio-authoritative value of one parameter.
    pub fn value(&self, param: Param) -> ParameterType {
        self.values[param.index()]
    }

    /// Applies a parameter-value event and publishes it for a later
    /// [ParameterStore::pull_from_audio()]. Unknown ids are ignored; returns
    /// whether the id was known.
    pub fn set(&mut self, id: ParamId, value: ParameterType) -> bool {
        let Some(slot) = self.values.get_mut(id.0) else {
            return false;
        };
        *slot = value;

        let mut exchange = self.store.0.lock();
        exchange.audio[id.0] = value;
        exchange.changed[id.0] = true;
        true
    }

    /// Moves every pending control-side edit into the audio-authoritative
    /// values, then reports each one through `out` so that host observers see
    /// the value land. The callback runs after the lock is released.
    pub fn push_to_audio(&mut self, out: &mut OutputEventsFn) {
        let mut applied: [Option<ParameterType>; PARAM_COUNT] = [None; PARAM_COUNT];
        {
            let mut exchange = self.store.0.lock();
            for (index, slot) in applied.iter_mut().enumerate() {
                if exchange.main_changed[index] {
                    let value = exchange.main[index];
                    exchange.audio[index] = value;
                    exchange.main_changed[index] = false;
                    self.values[index] = value;
                    *slot = Some(value);
                }
            }
        }
        for (index, value) in applied.into_iter().enumerate() {
            if let Some(value) = value {
                trace!("control-side value {value} for parameter {index} reached the audio side");
                out(OutputEvent::ParamValue {
                    param_id: ParamId(index),
                    value,
                });
            }
        }
    }
}
