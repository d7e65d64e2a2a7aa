//! Typed configuration mirroring the UPPERCASE_NAME mapping of spec §6.
//!
//! Grounded on `original_source/source/configuration.py`'s `Configuration`
//! singleton, which held an untyped dict loaded once from a simulation
//! module. Here it is a plain `struct` deserialized from JSON, following the
//! teacher's `TrainerConfig` (`vibrato/src/trainer/config.rs`): no defaults,
//! every field must be present in the document (spec §6, "a missing option
//! used at runtime is a configuration error").
use serde::Deserialize;

use crate::errors::{PhoMdlError, Result};

/// A bound that may be finite or `+∞`, e.g. `STEPS_LIMITATION` or
/// `MAX_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET`. JSON spells infinity as
/// the string `"inf"`; anything else must be a non-negative number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound(f64);

impl Bound {
    pub const INFINITE: Bound = Bound(f64::INFINITY);

    pub fn finite(value: u64) -> Self {
        Bound(value as f64)
    }

    /// `true` iff this bound is `+∞`.
    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }

    /// The bound as `f64`, for direct comparison against a running count.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// The bound as a `usize`, saturating at `usize::MAX` if infinite.
    pub fn as_usize(self) -> usize {
        if self.0.is_infinite() {
            usize::MAX
        } else {
            self.0 as usize
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Bound(n)),
            Raw::Text(s) if s.eq_ignore_ascii_case("inf") || s.eq_ignore_ascii_case("infinity") => {
                Ok(Bound::INFINITE)
            }
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"inf\", got \"{s}\""
            ))),
        }
    }
}

/// The full set of mutation-operator weights, one field per UPPERCASE key
/// of spec §6. A weight of `0` disables that operator entirely (matches
/// `get_weighted_list` in `original_source/source/utils.py`, which repeats
/// each entry `weight` times before choosing uniformly).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MutationWeights {
    pub mutate_lexicon: u32,
    pub mutate_constraint_set: u32,

    pub advance_emission: u32,
    pub clone_state: u32,
    pub clone_emission: u32,
    pub add_state: u32,
    pub remove_state: u32,
    pub add_transition: u32,
    pub remove_transition: u32,
    pub add_segment_to_emission: u32,
    pub remove_segment_from_emission: u32,
    pub change_segment_in_emission: u32,
    pub add_emission_to_state: u32,
    pub remove_emission_from_state: u32,

    pub insert_constraint: u32,
    pub remove_constraint: u32,
    pub demote_constraint: u32,
    pub insert_feature_bundle_phonotactic_constraint: u32,
    pub remove_feature_bundle_phonotactic_constraint: u32,
    pub augment_feature_bundle: u32,

    pub dep_for_insert: u32,
    pub max_for_insert: u32,
    pub ident_for_insert: u32,
    pub phonotactic_for_insert: u32,
}

/// Process-wide configuration for one simulation run.
///
/// Grounded on `original_source/source/configuration.py` plus the per-
/// simulation dicts in `original_source/source/simulations/*.py`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    #[serde(flatten)]
    pub mutation_weights: MutationWeights,

    pub min_num_of_inner_states: usize,
    pub max_num_of_inner_states: usize,

    pub min_number_of_constraints_in_constraint_set: usize,
    pub max_number_of_constraints_in_constraint_set: Bound,

    pub min_feature_bundles_in_phonotactic_constraint: usize,
    pub max_feature_bundles_in_phonotactic_constraint: usize,
    pub max_features_in_bundle: Bound,
    pub initial_number_of_features: usize,
    pub initial_number_of_bundles_in_phonotactic_constraint: usize,

    pub initial_temperature: f64,
    pub cooling_parameter: f64,
    pub threshold: f64,
    pub steps_limitation: Bound,
    pub debug_logging_interval: u64,
    pub clear_modules_caching_interval: u64,
    pub slack_notification_interval: u64,

    pub data_encoding_length_multiplier: f64,
    pub grammar_encoding_length_multiplier: f64,

    pub allow_candidates_with_changed_segments: bool,
    pub corpus_duplication_factor: f64,
    pub random_seed: bool,
    pub seed: u64,
}

impl Config {
    /// Parses a configuration document, validating the bounds spec §6
    /// requires to be mutually consistent.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.min_num_of_inner_states > self.max_num_of_inner_states {
            return Err(PhoMdlError::configuration(
                "MIN_NUM_OF_INNER_STATES exceeds MAX_NUM_OF_INNER_STATES",
            ));
        }
        if (self.min_number_of_constraints_in_constraint_set as f64)
            > self.max_number_of_constraints_in_constraint_set.as_f64()
        {
            return Err(PhoMdlError::configuration(
                "MIN_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET exceeds the max",
            ));
        }
        if self.min_feature_bundles_in_phonotactic_constraint
            > self.max_feature_bundles_in_phonotactic_constraint
        {
            return Err(PhoMdlError::configuration(
                "MIN_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT exceeds the max",
            ));
        }
        if !(0.0..1.0).contains(&self.cooling_parameter) {
            return Err(PhoMdlError::configuration(
                "COOLING_PARAMETER must be in (0, 1)",
            ));
        }
        if self.corpus_duplication_factor < 0.0 {
            return Err(PhoMdlError::configuration(
                "CORPUS_DUPLICATION_FACTOR must be non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "MUTATE_LEXICON": 1, "MUTATE_CONSTRAINT_SET": 1,
            "ADVANCE_EMISSION": 1, "CLONE_STATE": 1, "CLONE_EMISSION": 1,
            "ADD_STATE": 1, "REMOVE_STATE": 1, "ADD_TRANSITION": 1, "REMOVE_TRANSITION": 1,
            "ADD_SEGMENT_TO_EMISSION": 1, "REMOVE_SEGMENT_FROM_EMISSION": 1,
            "CHANGE_SEGMENT_IN_EMISSION": 1, "ADD_EMISSION_TO_STATE": 1, "REMOVE_EMISSION_FROM_STATE": 1,
            "INSERT_CONSTRAINT": 1, "REMOVE_CONSTRAINT": 1, "DEMOTE_CONSTRAINT": 1,
            "INSERT_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT": 1,
            "REMOVE_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT": 1, "AUGMENT_FEATURE_BUNDLE": 0,
            "DEP_FOR_INSERT": 1, "MAX_FOR_INSERT": 1, "IDENT_FOR_INSERT": 0, "PHONOTACTIC_FOR_INSERT": 1,
            "MIN_NUM_OF_INNER_STATES": 1, "MAX_NUM_OF_INNER_STATES": 2,
            "MIN_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET": 1,
            "MAX_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET": "inf",
            "MIN_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT": 1,
            "MAX_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT": 3,
            "MAX_FEATURES_IN_BUNDLE": "inf",
            "INITIAL_NUMBER_OF_FEATURES": 1,
            "INITIAL_NUMBER_OF_BUNDLES_IN_PHONOTACTIC_CONSTRAINT": 1,
            "INITIAL_TEMPERATURE": 50.0, "COOLING_PARAMETER": 0.99995, "THRESHOLD": 0.1,
            "STEPS_LIMITATION": "inf", "DEBUG_LOGGING_INTERVAL": 50,
            "CLEAR_MODULES_CACHING_INTERVAL": 1000, "SLACK_NOTIFICATION_INTERVAL": 1000,
            "DATA_ENCODING_LENGTH_MULTIPLIER": 25.0, "GRAMMAR_ENCODING_LENGTH_MULTIPLIER": 1.0,
            "ALLOW_CANDIDATES_WITH_CHANGED_SEGMENTS": false, "CORPUS_DUPLICATION_FACTOR": 1.0,
            "RANDOM_SEED": false, "SEED": 3
        }"#
        .to_string()
    }

    #[test]
    fn loads_a_complete_simulation_config() {
        let config = Config::from_json(&sample_json()).unwrap();
        assert_eq!(config.seed, 3);
        assert!(config.steps_limitation.is_infinite());
        assert_eq!(
            config
                .max_number_of_constraints_in_constraint_set
                .as_usize(),
            usize::MAX
        );
    }

    #[test]
    fn rejects_inconsistent_bounds() {
        let mut bad = serde_json::from_str::<serde_json::Value>(&sample_json()).unwrap();
        bad["MIN_NUM_OF_INNER_STATES"] = serde_json::json!(5);
        let err = Config::from_json(&bad.to_string());
        assert!(err.is_err());
    }
}
