// Copyright (c) 2024 Mike Tsao

//! Identifies notes, and describes which notes an event applies to.

use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// The raw value hosts use in an event's identity field to mean "any".
pub const WILDCARD: i32 = -1;

/// A host-assigned identifier for one note instance.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteId(pub i32);

/// The note's channel within its note port.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Channel(pub i16);

/// The note's key, in MIDI numbering (60 is middle C).
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Key(pub i16);

/// The concrete identity triple of a sounding note. A voice always stores one
/// of these; it is never a pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteIdentity {
    /// The host's note id.
    pub note_id: NoteId,
    /// The note's channel.
    pub channel: Channel,
    /// The note's key.
    pub key: Key,
}
impl NoteIdentity {
    /// Creates a new [NoteIdentity].
    pub fn new(note_id: i32, channel: i16, key: i16) -> Self {
        Self {
            note_id: NoteId(note_id),
            channel: Channel(channel),
            key: Key(key),
        }
    }
}

/// Selects the voices an event applies to. A [None] field is a wildcard that
/// matches any stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub struct NoteMatch {
    pub note_id: Option<NoteId>,
    pub channel: Option<Channel>,
    pub key: Option<Key>,
}
impl NoteMatch {
    /// Matches every voice.
    pub const ANY: Self = Self {
        note_id: None,
        channel: None,
        key: None,
    };

    /// Builds a pattern from raw host fields, where [WILDCARD] means "any".
    pub fn from_raw(note_id: i32, channel: i16, key: i16) -> Self {
        Self {
            note_id: (note_id != WILDCARD).then_some(NoteId(note_id)),
            channel: (channel as i32 != WILDCARD).then_some(Channel(channel)),
            key: (key as i32 != WILDCARD).then_some(Key(key)),
        }
    }

    /// Matches only voices with this note id.
    pub fn note_id(note_id: i32) -> Self {
        Self {
            note_id: Some(NoteId(note_id)),
            ..Self::ANY
        }
    }

    /// Whether `identity` satisfies every non-wildcard field.
    pub fn matches(&self, identity: &NoteIdentity) -> bool {
        self.note_id.map_or(true, |v| v == identity.note_id)
            && self.channel.map_or(true, |v| v == identity.channel)
            && self.key.map_or(true, |v| v == identity.key)
    }
}
impl From<NoteIdentity> for NoteMatch {
    fn from(value: NoteIdentity) -> Self {
        Self {
            note_id: Some(value.note_id),
            channel: Some(value.channel),
            key: Some(value.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_wildcards_become_none() {
        let m = NoteMatch::from_raw(WILDCARD, 3, WILDCARD as i16);
        assert_eq!(m.note_id, None);
        assert_eq!(m.channel, Some(Channel(3)));
        assert_eq!(m.key, None);

        assert_eq!(NoteMatch::from_raw(-1, -1, -1), NoteMatch::ANY);
    }

    #[test]
    fn matching_honors_each_field() {
        let identity = NoteIdentity::new(7, 0, 60);

        assert!(NoteMatch::ANY.matches(&identity));
        assert!(NoteMatch::from(identity).matches(&identity));
        assert!(NoteMatch::note_id(7).matches(&identity));
        assert!(!NoteMatch::note_id(8).matches(&identity));
        assert!(NoteMatch::from_raw(7, 0, -1).matches(&identity));
        assert!(!NoteMatch::from_raw(7, 1, -1).matches(&identity));
        assert!(!NoteMatch::from_raw(-1, -1, 61).matches(&identity));
    }
}
