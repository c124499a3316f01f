// Copyright (c) 2024 Mike Tsao

use super::{InputEvent, OutputEvent};
use crate::{
    params::AudioParams,
    traits::OutputEventsFn,
    voices::{Voice, VoiceRegistry},
};
use log::warn;
use serde::{Deserialize, Serialize};

/// Which voices a per-note modulation event affects when its pattern matches
/// more than one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModulationTarget {
    /// Only the earliest-struck matching voice.
    #[default]
    FirstMatch,
    /// Every matching voice, like note-off and choke.
    AllMatches,
}

/// Applies one [InputEvent] to the voices and the audio-side parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventRouter {
    modulation_target: ModulationTarget,
}
impl EventRouter {
    #[allow(missing_docs)]
    pub fn new_with(modulation_target: ModulationTarget) -> Self {
        Self { modulation_target }
    }

    #[allow(missing_docs)]
    pub fn modulation_target(&self) -> ModulationTarget {
        self.modulation_target
    }

    /// Applies `event` immediately. The only output is a [OutputEvent::NoteEnd]
    /// for a note-on that couldn't get a voice.
    pub fn route(
        &self,
        event: &InputEvent,
        voices: &mut VoiceRegistry,
        params: &mut AudioParams,
        output_events_fn: &mut OutputEventsFn,
    ) {
        match *event {
            InputEvent::NoteOn { id } => {
                if let Err(e) = voices.insert(Voice::new_with(id)) {
                    warn!("dropping note {id:?}: {e}");
                    output_events_fn(OutputEvent::NoteEnd(id));
                }
            }
            InputEvent::NoteOff(pattern) => {
                voices.for_each_matching(&pattern, |v| v.release());
            }
            InputEvent::Choke(pattern) => {
                voices.remove_matching(&pattern);
            }
            InputEvent::ParamValue { param_id, value } => {
                params.set(param_id, value);
            }
            InputEvent::ParamMod {
                target,
                param_id,
                amount,
            } => match self.modulation_target {
                ModulationTarget::FirstMatch => {
                    if let Some(v) = voices.first_matching_mut(&target) {
                        v.set_param_offset(param_id, amount);
                    }
                }
                ModulationTarget::AllMatches => {
                    voices.for_each_matching(&target, |v| {
                        v.set_param_offset(param_id, amount);
                    });
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        params::{Param, ParameterStore},
        types::{NoteIdentity, NoteMatch, ParamId},
    };

    struct Fixture {
        router: EventRouter,
        voices: VoiceRegistry,
        params: AudioParams,
        output: Vec<OutputEvent>,
    }
    impl Fixture {
        fn new_with(modulation_target: ModulationTarget, capacity: usize) -> Self {
            Self {
                router: EventRouter::new_with(modulation_target),
                voices: VoiceRegistry::new_with(capacity),
                params: AudioParams::default(),
                output: Vec::default(),
            }
        }

        fn send(&mut self, event: InputEvent) {
            let output = &mut self.output;
            self.router
                .route(&event, &mut self.voices, &mut self.params, &mut |e| {
                    output.push(e)
                });
        }

        fn note_on(&mut self, note_id: i32, channel: i16, key: i16) {
            self.send(InputEvent::NoteOn {
                id: NoteIdentity::new(note_id, channel, key),
            });
        }
    }
    impl Default for Fixture {
        fn default() -> Self {
            Self::new_with(ModulationTarget::default(), VoiceRegistry::DEFAULT_CAPACITY)
        }
    }

    #[test]
    fn note_on_always_stacks() {
        let mut f = Fixture::default();
        f.note_on(1, 0, 60);
        f.note_on(1, 0, 60);
        assert_eq!(f.voices.len(), 2, "same identity twice is two voices");
        assert!(f.voices.iter().all(|v| v.is_held() && v.phase() == 0.0));
        assert!(f.output.is_empty());
    }

    #[test]
    fn note_on_into_full_pool_reports_note_end() {
        let mut f = Fixture::new_with(ModulationTarget::FirstMatch, 1);
        f.note_on(1, 0, 60);
        f.note_on(2, 0, 62);

        assert_eq!(f.voices.len(), 1);
        assert_eq!(
            f.output,
            vec![OutputEvent::NoteEnd(NoteIdentity::new(2, 0, 62))]
        );
    }

    #[test]
    fn note_off_with_wildcard_key_releases_every_key() {
        let mut f = Fixture::default();
        f.note_on(5, 0, 60);
        f.note_on(5, 0, 64);
        f.note_on(6, 0, 67);

        f.send(InputEvent::NoteOff(NoteMatch::from_raw(5, 0, -1)));
        let held: Vec<bool> = f.voices.iter().map(|v| v.is_held()).collect();
        assert_eq!(held, vec![false, false, true]);
        assert_eq!(f.voices.len(), 3, "note-off never removes");
    }

    #[test]
    fn choke_removes_without_output() {
        let mut f = Fixture::default();
        f.note_on(1, 0, 60);
        f.note_on(2, 0, 60);
        f.note_on(3, 0, 61);

        f.send(InputEvent::Choke(NoteMatch::from_raw(-1, -1, 60)));
        assert_eq!(f.voices.len(), 1);
        assert_eq!(f.voices.get(0).map(|v| v.identity().note_id.0), Some(3));
        assert!(f.output.is_empty());
    }

    #[test]
    fn param_value_is_published() {
        let mut f = Fixture::default();
        let store: ParameterStore = f.params.store().clone();

        f.send(InputEvent::ParamValue {
            param_id: Param::Volume.id(),
            value: 0.8,
        });
        assert_eq!(f.params.value(Param::Volume), 0.8);
        assert!(store.pull_from_audio());
        assert_eq!(store.control_values()[Param::Volume.index()], 0.8);

        f.send(InputEvent::ParamValue {
            param_id: ParamId(999),
            value: 0.1,
        });
        assert_eq!(f.params.value(Param::Volume), 0.8);
        assert!(!store.pull_from_audio());
    }

    #[test]
    fn param_mod_first_match_only() {
        let mut f = Fixture::default();
        f.note_on(1, 0, 60);
        f.note_on(1, 0, 64);

        f.send(InputEvent::ParamMod {
            target: NoteMatch::note_id(1),
            param_id: Param::Volume.id(),
            amount: -0.3,
        });
        let offsets: Vec<f32> = f
            .voices
            .iter()
            .map(|v| v.param_offset(Param::Volume))
            .collect();
        assert_eq!(offsets, vec![-0.3, 0.0]);

        f.send(InputEvent::ParamMod {
            target: NoteMatch::note_id(1),
            param_id: Param::Volume.id(),
            amount: 0.1,
        });
        assert_eq!(
            f.voices.get(0).map(|v| v.param_offset(Param::Volume)),
            Some(0.1),
            "the offset is replaced, not accumulated"
        );
    }

    #[test]
    fn param_mod_all_matches() {
        let mut f = Fixture::new_with(ModulationTarget::AllMatches, 8);
        f.note_on(1, 0, 60);
        f.note_on(1, 0, 64);
        f.note_on(2, 0, 67);

        f.send(InputEvent::ParamMod {
            target: NoteMatch::note_id(1),
            param_id: Param::Volume.id(),
            amount: 0.25,
        });
        let offsets: Vec<f32> = f
            .voices
            .iter()
            .map(|v| v.param_offset(Param::Volume))
            .collect();
        assert_eq!(offsets, vec![0.25, 0.25, 0.0]);
    }

    #[test]
    fn param_mod_without_match_is_ignored() {
        let mut f = Fixture::default();
        f.note_on(1, 0, 60);
        f.send(InputEvent::ParamMod {
            target: NoteMatch::note_id(9),
            param_id: Param::Volume.id(),
            amount: 0.5,
        });
        f.send(InputEvent::ParamMod {
            target: NoteMatch::note_id(1),
            param_id: ParamId(42),
            amount: 0.5,
        });
        assert_eq!(
            f.voices.get(0).map(|v| v.param_offset(Param::Volume)),
            Some(0.0)
        );
    }
}
