// Copyright (c) 2024 Mike Tsao

//! The `render` demo plays an arpeggio through an [Instrument] and writes the
//! result to a WAV file.

use clap::Parser;
use frailty::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Name of the WAV file to write
    #[clap(default_value = "arpeggio.wav")]
    output: PathBuf,

    /// Sample rate in Hz
    #[clap(short = 'r', long, default_value_t = 44100)]
    sample_rate: usize,

    /// Frames per processing block
    #[clap(short = 'b', long, default_value_t = PhraseRenderer::DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Starting volume, 0.0 to 1.0
    #[clap(long, default_value_t = 0.5)]
    volume: f32,

    /// Load parameters from this state file before rendering
    #[clap(long)]
    load_state: Option<PathBuf>,

    /// Save parameters to this state file after rendering
    #[clap(long)]
    save_state: Option<PathBuf>,

    /// Enable debug mode
    #[clap(short = 'd', long, value_parser)]
    debug: bool,
}

/// A rising C major arpeggio, one note every quarter second, each note held
/// for a fifth of a second. The last note fades out by per-note modulation.
fn arpeggio(sample_rate: usize) -> (Vec<TimedEvent>, usize) {
    let step = sample_rate / 4;
    let length = sample_rate / 5;
    let keys = [60, 64, 67, 72];

    let mut events = Vec::default();
    for (i, key) in keys.iter().enumerate() {
        let start = (i * step) as u32;
        let note_id = i as i32;
        events.push(TimedEvent::new_with(
            start,
            InputEvent::NoteOn {
                id: NoteIdentity::new(note_id, 0, *key),
            },
        ));
        events.push(TimedEvent::new_with(
            start + length as u32,
            InputEvent::NoteOff(NoteMatch::note_id(note_id)),
        ));
    }
    let last_start = (keys.len() - 1) * step;
    let last_id = keys.len() as i32 - 1;
    for fade in 1..=4 {
        events.push(TimedEvent::new_with(
            (last_start + fade * length / 5) as u32,
            InputEvent::ParamMod {
                target: NoteMatch::note_id(last_id),
                param_id: Param::Volume.id(),
                amount: -0.1 * fade as f32,
            },
        ));
    }
    events.sort_by_key(|e| e.time);

    (events, keys.len() * step)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let mut instrument = Instrument::new_with(&InstrumentConfig::default());
    instrument.update_sample_rate(SampleRate::new(args.sample_rate));

    let params = instrument.params();
    if let Some(path) = args.load_state.as_ref() {
        params.load_state(&mut std::fs::File::open(path)?)?;
    } else {
        params.set_value(Param::Volume.id(), args.volume)?;
    }

    let (events, frame_count) = arpeggio(args.sample_rate);
    let output = PhraseRenderer::new_with(args.block_size).export_to_wav(
        &mut instrument,
        &events,
        frame_count,
        args.output.clone(),
    )?;

    let note_ends = output
        .iter()
        .filter(|e| matches!(e, OutputEvent::NoteEnd(_)))
        .count();
    eprintln!(
        "Wrote {frame_count} frames to {} ({note_ends} notes ended)",
        args.output.display()
    );

    if let Some(path) = args.save_state.as_ref() {
        params.save_state(&mut std::fs::File::create(path)?)?;
        eprintln!("Saved parameters to {}", path.display());
    }
    Ok(())
}
