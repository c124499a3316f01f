// Copyright (c) 2024 Mike Tsao

//! Settings fixed when an [Instrument](crate::Instrument) is created.

use crate::{events::ModulationTarget, voices::VoiceRegistry};
use derivative::Derivative;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Construction-time settings for an [Instrument](crate::Instrument).
#[derive(Clone, Builder, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[builder(default)]
#[serde(default, rename_all = "kebab-case")]
pub struct InstrumentConfig {
    /// The most voices that can sound at once. Note-ons beyond this are
    /// rejected.
    #[derivative(Default(value = "VoiceRegistry::DEFAULT_CAPACITY"))]
    pub max_voices: usize,

    /// Which voices a per-note modulation event affects.
    pub modulation_target: ModulationTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InstrumentConfig::default();
        assert_eq!(config.max_voices, 128);
        assert_eq!(config.modulation_target, ModulationTarget::FirstMatch);
        assert_eq!(InstrumentConfigBuilder::default().build().unwrap(), config);
    }

    #[test]
    fn builder_overrides() {
        let config = InstrumentConfigBuilder::default()
            .max_voices(4)
            .modulation_target(ModulationTarget::AllMatches)
            .build()
            .unwrap();
        assert_eq!(config.max_voices, 4);
        assert_eq!(config.modulation_target, ModulationTarget::AllMatches);
    }

    #[test]
    fn serde_uses_kebab_case_and_fills_defaults() {
        let config: InstrumentConfig =
            serde_json::from_str(r#"{"modulation-target": "all-matches"}"#).unwrap();
        assert_eq!(config.max_voices, 128);
        assert_eq!(config.modulation_target, ModulationTarget::AllMatches);

        let json = serde_json::to_string(&InstrumentConfig::default()).unwrap();
        assert!(json.contains("\"max-voices\":128"));
        assert!(json.contains("\"first-match\""));
    }
}
