// Copyright (c) 2024 Mike Tsao

//! Offline rendering, for demos and tests that want more than one block.

use crate::{
    events::{OutputEvent, TimedEvent},
    instrument::Instrument,
    traits::RendersVoices,
    types::SampleType,
};

/// Renders whole phrases through an [Instrument] the way a host would, one
/// block at a time.
#[derive(Debug)]
pub struct PhraseRenderer {
    block_size: usize,
}
impl Default for PhraseRenderer {
    fn default() -> Self {
        Self::new_with(Self::DEFAULT_BLOCK_SIZE)
    }
}
impl PhraseRenderer {
    /// A typical host buffer size.
    pub const DEFAULT_BLOCK_SIZE: usize = 256;

    /// Uses blocks of `block_size` frames. Zero is treated as one.
    pub fn new_with(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    /// Renders `frame_count` frames. `events` are stamped with frame offsets
    /// from the start of the phrase and must be in time order; each is
    /// delivered in the block that contains it, rebased to that block. Events
    /// at or past `frame_count` go to the last block.
    ///
    /// Returns the left and right channels, and every event the instrument
    /// reported.
    pub fn render<R: RendersVoices>(
        &self,
        instrument: &mut Instrument<R>,
        events: &[TimedEvent],
        frame_count: usize,
    ) -> (Vec<SampleType>, Vec<SampleType>, Vec<OutputEvent>) {
        let mut left = vec![0.0; frame_count];
        let mut right = vec![0.0; frame_count];
        let mut output = Vec::default();
        let mut block_events = Vec::with_capacity(events.len());
        let mut next_event = 0;

        let mut start = 0;
        loop {
            let end = (start + self.block_size).min(frame_count);
            let is_last = end >= frame_count;

            block_events.clear();
            while let Some(event) = events.get(next_event) {
                let time = event.time as usize;
                if !is_last && time >= end {
                    break;
                }
                block_events.push(TimedEvent {
                    time: time.saturating_sub(start) as u32,
                    kind: event.kind,
                });
                next_event += 1;
            }

            instrument.process(
                end - start,
                &block_events,
                &mut left[start..end],
                &mut right[start..end],
                &mut |e| output.push(e),
            );

            if is_last {
                break;
            }
            start = end;
        }
        (left, right, output)
    }

    /// Renders a phrase as [PhraseRenderer::render()] does, then writes it as
    /// a 16-bit stereo WAV file. Returns the instrument's output events.
    #[cfg(feature = "hound")]
    pub fn export_to_wav<R: RendersVoices>(
        &self,
        instrument: &mut Instrument<R>,
        events: &[TimedEvent],
        frame_count: usize,
        path: std::path::PathBuf,
    ) -> anyhow::Result<Vec<OutputEvent>> {
        use crate::traits::Configurable;

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: instrument.sample_rate().into(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;

        let (left, right, output) = self.render(instrument, events, frame_count);
        for (l, r) in left.iter().zip(right.iter()) {
            writer.write_sample(to_i16(*l))?;
            writer.write_sample(to_i16(*r))?;
        }
        writer.finalize()?;
        Ok(output)
    }
}

#[cfg(feature = "hound")]
fn to_i16(sample: SampleType) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as SampleType) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        events::InputEvent,
        types::{NoteIdentity, NoteMatch},
    };
    use more_asserts::assert_gt;

    #[test]
    fn matches_a_single_block() {
        let events = [
            TimedEvent::new_with(
                3,
                InputEvent::NoteOn {
                    id: NoteIdentity::new(1, 0, 60),
                },
            ),
            TimedEvent::new_with(70, InputEvent::NoteOff(NoteMatch::note_id(1))),
        ];

        let mut one_block = Instrument::default();
        let (expected, _, expected_output) =
            PhraseRenderer::new_with(128).render(&mut one_block, &events, 100);

        let mut many_blocks = Instrument::default();
        let (left, right, output) =
            PhraseRenderer::new_with(16).render(&mut many_blocks, &events, 100);

        assert_eq!(left, expected, "block size shouldn't change the audio");
        assert_eq!(left, right);
        assert_eq!(output, expected_output);
        assert_eq!(
            output,
            vec![OutputEvent::NoteEnd(NoteIdentity::new(1, 0, 60))]
        );
        assert_gt!(left.iter().filter(|s| **s != 0.0).count(), 60);
        assert!(left[70..].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn late_events_reach_the_last_block() {
        let events = [TimedEvent::new_with(
            1000,
            InputEvent::NoteOn {
                id: NoteIdentity::new(1, 0, 60),
            },
        )];
        let mut instrument = Instrument::default();
        let (left, _, _) = PhraseRenderer::new_with(8).render(&mut instrument, &events, 20);
        assert_eq!(left.len(), 20);
        assert!(left.iter().all(|s| *s == 0.0));
        assert_eq!(instrument.voices().len(), 1);
    }

    #[test]
    fn zero_block_size_is_usable() {
        let mut instrument = Instrument::default();
        let (left, _, _) = PhraseRenderer::new_with(0).render(&mut instrument, &[], 3);
        assert_eq!(left.len(), 3);
    }
}
