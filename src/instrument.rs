// Copyright (c) 2024 Mike Tsao

//! The host-facing instrument: everything the audio context calls.

use crate::{
    config::InstrumentConfig,
    events::{EventRouter, InputEvent, OutputEvent, TimedEvent},
    params::{AudioParams, ParameterStore},
    render::SineRenderer,
    traits::{Configurable, Configurables, HandlesEvents, OutputEventsFn, RendersVoices},
    types::{SampleRate, SampleType},
    voices::VoiceRegistry,
};
use delegate::delegate;
use log::{debug, warn};

/// A polyphonic instrument. It owns the voices, the audio side of the
/// parameters, and a renderer.
///
/// The audio context drives it with [Instrument::process()] once per block.
/// The control context talks to the shared [ParameterStore] obtained from
/// [Instrument::params()]; the two never need to share the [Instrument]
/// itself.
///
/// ```
/// use frailty::prelude::*;
///
/// let mut instrument = Instrument::default();
/// instrument.update_sample_rate(SampleRate(48000));
///
/// let events = [TimedEvent::new_with(
///     0,
///     InputEvent::NoteOn {
///         id: NoteIdentity::new(1, 0, 60),
///     },
/// )];
/// let mut left = [0.0; 64];
/// let mut right = [0.0; 64];
/// instrument.process(64, &events, &mut left, &mut right, &mut |_| {});
/// assert_eq!(instrument.voices().len(), 1);
/// ```
#[derive(Debug)]
pub struct Instrument<R: RendersVoices = SineRenderer> {
    config: InstrumentConfig,
    c: Configurables,
    voices: VoiceRegistry,
    params: AudioParams,
    router: EventRouter,
    renderer: R,
}
impl Default for Instrument {
    fn default() -> Self {
        Self::new_with(&InstrumentConfig::default())
    }
}
impl Instrument {
    /// Creates an instrument that renders with the [SineRenderer].
    pub fn new_with(config: &InstrumentConfig) -> Self {
        Self::new_with_renderer(config, SineRenderer::default())
    }
}
impl<R: RendersVoices> Instrument<R> {
    /// Creates an instrument around a custom renderer. Parameters start at
    /// their descriptor defaults, and the voice pool is allocated in full.
    pub fn new_with_renderer(config: &InstrumentConfig, renderer: R) -> Self {
        Self {
            config: config.clone(),
            c: Configurables::default(),
            voices: VoiceRegistry::new_with(config.max_voices),
            params: AudioParams::new_with(ParameterStore::default()),
            router: EventRouter::new_with(config.modulation_target),
            renderer,
        }
    }

    /// A handle to the shared parameter store, for the control context.
    pub fn params(&self) -> ParameterStore {
        self.params.store().clone()
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    /// The active voices, in the order they were struck.
    pub fn voices(&self) -> &VoiceRegistry {
        &self.voices
    }

    /// The audio side of the parameters.
    pub fn audio_params(&self) -> &AudioParams {
        &self.params
    }

    #[allow(missing_docs)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Applies pending control-side edits and then `events`, without
    /// rendering. Hosts call this to deliver parameter changes while the
    /// instrument isn't processing.
    pub fn flush(&mut self, events: &[TimedEvent], output_events_fn: &mut OutputEventsFn) {
        self.params.push_to_audio(output_events_fn);
        for event in events {
            self.handle_event(&event.kind, output_events_fn);
        }
    }

    /// Renders one block of `frame_count` frames into `left` and `right`,
    /// applying each event at its frame offset.
    ///
    /// Events must arrive in time order. An event stamped earlier than one
    /// already applied takes effect at the current position, and an event
    /// stamped at or past the end of the block takes effect after the last
    /// frame. Voices released during the block are reported with
    /// [OutputEvent::NoteEnd] and removed once the block is rendered.
    ///
    /// If either buffer is shorter than `frame_count`, only as many frames as
    /// both can hold are rendered.
    pub fn process(
        &mut self,
        frame_count: usize,
        events: &[TimedEvent],
        left: &mut [SampleType],
        right: &mut [SampleType],
        output_events_fn: &mut OutputEventsFn,
    ) {
        let frames = frame_count.min(left.len()).min(right.len());
        if frames < frame_count {
            warn!("asked for {frame_count} frames but buffers hold only {frames}");
        }

        self.params.push_to_audio(output_events_fn);

        let mut cursor = 0;
        let mut pending = events.iter().peekable();
        loop {
            while let Some(event) = pending.next_if(|e| e.time as usize <= cursor) {
                self.handle_event(&event.kind, output_events_fn);
            }

            let next = pending
                .peek()
                .map_or(frames, |e| (e.time as usize).min(frames));
            if next > cursor {
                self.renderer.render(
                    &mut self.voices,
                    self.params.values(),
                    &mut left[cursor..next],
                    &mut right[cursor..next],
                );
                cursor = next;
            }

            if cursor >= frames {
                for event in pending {
                    warn!(
                        "event at frame {} is past the end of a {frames}-frame block",
                        event.time
                    );
                    self.handle_event(&event.kind, output_events_fn);
                }
                break;
            }
        }

        self.voices
            .drain_released(|v| output_events_fn(OutputEvent::NoteEnd(*v.identity())));
    }
}
impl<R: RendersVoices> Configurable for Instrument<R> {
    delegate! {
        to self.c {
            fn sample_rate(&self) -> SampleRate;
        }
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        // Zero becomes the default rate.
        let sample_rate = SampleRate::new(sample_rate.0);
        debug!("sample rate is now {sample_rate}");
        self.c.update_sample_rate(sample_rate);
        self.renderer.update_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        debug!("reset: dropping {} voices", self.voices.len());
        self.voices.clear();
        self.renderer.reset();
    }
}
impl<R: RendersVoices> HandlesEvents for Instrument<R> {
    fn handle_event(&mut self, event: &InputEvent, output_events_fn: &mut OutputEventsFn) {
        self.router
            .route(event, &mut self.voices, &mut self.params, output_events_fn);
    }
}
