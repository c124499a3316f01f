// Copyright (c) 2024 Mike Tsao

//! The traits that define many characteristics and relationships among parts of
//! the system.

use crate::{
    events::{InputEvent, OutputEvent},
    params::ParamValues,
    types::{SampleRate, SampleType},
    voices::VoiceRegistry,
};

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{Configurable, Configurables, HandlesEvents, OutputEventsFn, RendersVoices};
}

/// A convenience struct for the fields implied by [Configurable]. Note that
/// this struct is not serde-compliant, because these fields typically aren't
/// meant to be serialized.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Configurables {
    sample_rate: SampleRate,
}
impl Configurable for Configurables {
    fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate
    }
}

/// Something that is [Configurable] is interested in staying in sync with
/// global configuration.
pub trait Configurable {
    /// Returns this item's sample rate.
    fn sample_rate(&self) -> SampleRate {
        SampleRate::DEFAULT
    }

    /// The sample rate changed. Hosts call this once before the first block,
    /// and again whenever they reactivate the instrument.
    #[allow(unused_variables)]
    fn update_sample_rate(&mut self, sample_rate: SampleRate) {}

    /// Sent to indicate that it's time to reset internal state. Oscillators
    /// should reset phase, etc.
    fn reset(&mut self) {}
}

/// Passes [OutputEvent]s to the caller. Keeping this a callback lets the audio
/// context hand events to the host's queue without allocating.
pub type OutputEventsFn<'a> = dyn FnMut(OutputEvent) + 'a;

/// Indicates that something responds to timed input events.
pub trait HandlesEvents {
    /// Applies one event immediately. Most events produce no output, but some
    /// (such as a note-on that can't be voiced) report back through
    /// `output_events_fn`.
    fn handle_event(&mut self, event: &InputEvent, output_events_fn: &mut OutputEventsFn);
}

/// Turns the set of active voices into audio. This is the seam where a real
/// sample-playback engine replaces the placeholder oscillator.
pub trait RendersVoices: Configurable + core::fmt::Debug + Send {
    /// Overwrites `left` and `right` (which have equal length) with the sum of
    /// every held voice, advancing each voice's state by one frame per sample.
    /// `params` holds the audio-authoritative parameter values.
    fn render(
        &mut self,
        voices: &mut VoiceRegistry,
        params: &ParamValues,
        left: &mut [SampleType],
        right: &mut [SampleType],
    );
}
