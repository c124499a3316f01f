// Copyright (c) 2024 Mike Tsao

use super::Voice;
use crate::{
    error::{Error, Result},
    types::NoteMatch,
};

/// The active voices, in the order they were struck.
///
/// Storage for every voice is reserved up front, so nothing here allocates
/// once the registry exists. When the pool is full, new voices are rejected
/// rather than growing the pool from the audio context. Removal preserves the
/// order of the remaining voices, which matters because per-note modulation
/// targets the first match.
#[derive(Debug)]
pub struct VoiceRegistry {
    voices: Vec<Voice>,
    capacity: usize,
}
impl Default for VoiceRegistry {
    fn default() -> Self {
        Self::new_with(Self::DEFAULT_CAPACITY)
    }
}
impl VoiceRegistry {
    /// How many voices a default registry can hold.
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Creates an empty registry with room for exactly `capacity` voices.
    pub fn new_with(capacity: usize) -> Self {
        Self {
            voices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a voice. Fails with [Error::VoicePoolFull] if there's no room.
    pub fn insert(&mut self, voice: Voice) -> Result<()> {
        if self.voices.len() >= self.capacity {
            return Err(Error::VoicePoolFull(self.capacity));
        }
        self.voices.push(voice);
        Ok(())
    }

    /// Calls `f` on every voice that `pattern` matches, in registry order.
    pub fn for_each_matching<F>(&mut self, pattern: &NoteMatch, mut f: F)
    where
        F: FnMut(&mut Voice),
    {
        self.voices
            .iter_mut()
            .filter(|v| pattern.matches(v.identity()))
            .for_each(|v| f(v));
    }

    /// The first voice, in registry order, that `pattern` matches.
    pub fn first_matching_mut(&mut self, pattern: &NoteMatch) -> Option<&mut Voice> {
        self.voices
            .iter_mut()
            .find(|v| pattern.matches(v.identity()))
    }

    /// Removes the voice at `index`, shifting later voices down by one.
    /// Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Voice> {
        (index < self.voices.len()).then(|| self.voices.remove(index))
    }

    /// Removes every voice that `pattern` matches, keeping the others in order.
    /// Returns how many were removed.
    pub fn remove_matching(&mut self, pattern: &NoteMatch) -> usize {
        let before = self.voices.len();
        self.voices.retain(|v| !pattern.matches(v.identity()));
        before - self.voices.len()
    }

    /// Calls `f` on every released voice in registry order, then removes them
    /// all, keeping the held voices in order.
    pub fn drain_released<F>(&mut self, mut f: F)
    where
        F: FnMut(&Voice),
    {
        self.voices.retain(|v| {
            if v.is_held() {
                true
            } else {
                f(v);
                false
            }
        });
    }

    /// Drops every voice.
    pub fn clear(&mut self) {
        self.voices.clear();
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// The most voices this registry will ever hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[allow(missing_docs)]
    pub fn get(&self, index: usize) -> Option<&Voice> {
        self.voices.get(index)
    }

    #[allow(missing_docs)]
    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    #[allow(missing_docs)]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Voice> {
        self.voices.iter_mut()
    }
}
