// Copyright (c) 2024 Mike Tsao

//! Turns voices into samples.

use crate::{
    params::{Param, ParamValues},
    traits::{Configurable, Configurables, RendersVoices},
    types::{SampleRate, SampleType},
    voices::VoiceRegistry,
};
use core::f32::consts::TAU;
use delegate::delegate;

/// A placeholder tone: one sine oscillator per held voice, scaled by the
/// voice's effective volume and summed without normalization.
#[derive(Debug, Default)]
pub struct SineRenderer {
    c: Configurables,
}
impl Configurable for SineRenderer {
    delegate! {
        to self.c {
            fn sample_rate(&self) -> SampleRate;
            fn update_sample_rate(&mut self, sample_rate: SampleRate);
        }
    }
}
impl RendersVoices for SineRenderer {
    fn render(
        &mut self,
        voices: &mut VoiceRegistry,
        params: &ParamValues,
        left: &mut [SampleType],
        right: &mut [SampleType],
    ) {
        let base_volume = params[Param::Volume.index()];
        let sample_rate = f32::from(self.sample_rate());

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let mut sum = 0.0;
            for voice in voices.iter_mut().filter(|v| v.is_held()) {
                let volume = (base_volume + voice.param_offset(Param::Volume)).clamp(0.0, 1.0);
                sum += (voice.phase() * TAU).sin() * Self::AMPLITUDE * volume;
                voice.advance_phase(voice.frequency() / sample_rate);
            }
            *l = sum;
            *r = sum;
        }
    }
}
impl SineRenderer {
    /// Peak level of one voice at full volume.
    pub const AMPLITUDE: SampleType = 0.2;
}
