// Copyright (c) 2024 Mike Tsao

//! Numeric types used throughout the system.

use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// The primitive Rust type of a single audio sample. Host buffers are 32-bit.
pub type SampleType = f32;

/// The primitive Rust type of a parameter value. Parameters are stored at the
/// precision of the persisted state so that a save/load cycle is lossless.
pub type ParameterType = f32;

/// A dense, zero-based parameter identifier.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParamId(pub usize);
