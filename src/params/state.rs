// Copyright (c) 2024 Mike Tsao

//! Saving and restoring parameter values.
//!
//! A state blob is exactly [PARAM_COUNT] little-endian `f32`s in ascending id
//! order. There is no header, version, or length prefix, so adding a parameter
//! changes the blob size and older blobs will no longer load.

use super::{ParamValues, ParameterStore, PARAM_COUNT};
use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::debug;
use std::io::{ErrorKind, Read, Write};

/// The size in bytes of a state blob.
pub const STATE_SIZE: usize = PARAM_COUNT * core::mem::size_of::<f32>();

impl ParameterStore {
    /// Writes the control-visible values to `writer`, after first pulling in
    /// any audio-side changes so that the saved state matches what is heard.
    pub fn save_state<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.pull_from_audio();
        for value in self.control_values() {
            writer.write_f32::<LittleEndian>(value)?;
        }
        Ok(())
    }

    /// Reads a state blob from `reader`. Values become control-visible at once
    /// and reach the audio side at the start of its next block.
    ///
    /// The blob is read completely before anything is committed; if the stream
    /// ends early, this returns [Error::IncompleteState] and no parameter
    /// changes.
    pub fn load_state<R: Read>(&self, reader: &mut R) -> Result<()> {
        let mut bytes = [0u8; STATE_SIZE];
        let actual = read_up_to(reader, &mut bytes)?;
        if actual < STATE_SIZE {
            return Err(Error::IncompleteState {
                expected: STATE_SIZE,
                actual,
            });
        }

        let mut staged: ParamValues = [0.0; PARAM_COUNT];
        LittleEndian::read_f32_into(&bytes, &mut staged);
        self.commit_control_values(staged);
        debug!("loaded state for {PARAM_COUNT} parameters");
        Ok(())
    }
}

/// Fills as much of `buf` as the stream allows. Returns the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AudioParams, Param};

    #[test]
    fn blob_is_raw_little_endian_floats() {
        let store = ParameterStore::default();
        let mut blob: Vec<u8> = Vec::default();
        store.save_state(&mut blob).unwrap();

        assert_eq!(blob.len(), STATE_SIZE);
        assert_eq!(blob, 0.5f32.to_le_bytes().to_vec());
    }

    #[test]
    fn save_pulls_audio_side_changes_first() {
        let store = ParameterStore::default();
        let mut audio = AudioParams::new_with(store.clone());
        audio.set(Param::Volume.id(), 0.25);

        let mut blob: Vec<u8> = Vec::default();
        store.save_state(&mut blob).unwrap();
        assert_eq!(blob, 0.25f32.to_le_bytes().to_vec());
    }

    #[test]
    fn load_round_trips_into_a_fresh_store() {
        let original = ParameterStore::default();
        original.set_value(Param::Volume.id(), 0.8).unwrap();
        let mut audio = AudioParams::new_with(original.clone());
        audio.push_to_audio(&mut |_| {});

        let mut blob: Vec<u8> = Vec::default();
        original.save_state(&mut blob).unwrap();

        let fresh = ParameterStore::default();
        fresh.load_state(&mut blob.as_slice()).unwrap();
        for param in 0..PARAM_COUNT {
            let id = crate::types::ParamId(param);
            assert_eq!(
                fresh.get_value(id).unwrap(),
                original.get_value(id).unwrap()
            );
        }

        let mut fresh_audio = AudioParams::new_with(fresh.clone());
        let mut confirmations = 0;
        fresh_audio.push_to_audio(&mut |_| confirmations += 1);
        assert_eq!(confirmations, PARAM_COUNT, "every loaded value is pushed");
        assert_eq!(fresh_audio.value(Param::Volume), 0.8);
    }

    #[test]
    fn short_blob_changes_nothing() {
        let store = ParameterStore::default();
        let short = [0u8; STATE_SIZE - 1];

        let r = store.load_state(&mut short.as_slice());
        assert!(matches!(
            r,
            Err(Error::IncompleteState {
                expected: STATE_SIZE,
                actual
            }) if actual == STATE_SIZE - 1
        ));
        assert_eq!(store.control_values(), ParameterStore::defaults());

        let mut audio = AudioParams::new_with(store);
        let mut confirmations = 0;
        audio.push_to_audio(&mut |_| confirmations += 1);
        assert_eq!(confirmations, 0, "a failed load marks nothing dirty");
    }

    #[test]
    fn trailing_bytes_are_left_in_the_stream() {
        let store = ParameterStore::default();
        let mut blob = 0.125f32.to_le_bytes().to_vec();
        blob.extend_from_slice(&[1, 2, 3]);

        let mut reader = blob.as_slice();
        store.load_state(&mut reader).unwrap();
        assert_eq!(reader, &[1u8, 2, 3][..]);
        assert_eq!(store.get_value(Param::Volume.id()).unwrap(), 0.125);
    }
}
