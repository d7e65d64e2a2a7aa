//! Expands a seed word list by a fractional duplication factor, matching
//! the original's crude way of weighting a run's data term without
//! reshaping the lexicon derivation itself.
//!
//! Grounded on `original_source/source/corpus.py`.
use crate::config::Config;

/// The training data for one run: a surface-form list, possibly containing
/// repeats produced by `CORPUS_DUPLICATION_FACTOR`.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Repeats `seed_words` `floor(factor)` times, then appends a further
    /// `floor(n * fract(factor))` words taken from the front of the list,
    /// where `n = seed_words.len()`.
    ///
    /// Grounded on `corpus.py::Corpus.__init__`.
    pub fn new(seed_words: &[String], config: &Config) -> Self {
        let factor = config.corpus_duplication_factor;
        let whole = factor.trunc() as usize;
        let fraction = factor.fract();
        let n = seed_words.len();

        let mut words = Vec::with_capacity(n * (whole + 1));
        for _ in 0..whole {
            words.extend(seed_words.iter().cloned());
        }
        let partial_count = (n as f64 * fraction) as usize;
        words.extend(seed_words.iter().take(partial_count).cloned());

        Self { words }
    }

    /// The expanded word list, including duplicates.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words after duplication.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` iff duplication produced no words at all (an empty seed list,
    /// or a duplication factor of `0`).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl std::fmt::Display for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Corpus with {} words", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_factor(factor: f64) -> Config {
        let json = format!(
            r#"{{
                "MUTATE_LEXICON": 1, "MUTATE_CONSTRAINT_SET": 1,
                "ADVANCE_EMISSION": 1, "CLONE_STATE": 1, "CLONE_EMISSION": 1,
                "ADD_STATE": 1, "REMOVE_STATE": 1, "ADD_TRANSITION": 1, "REMOVE_TRANSITION": 1,
                "ADD_SEGMENT_TO_EMISSION": 1, "REMOVE_SEGMENT_FROM_EMISSION": 1,
                "CHANGE_SEGMENT_IN_EMISSION": 1, "ADD_EMISSION_TO_STATE": 1, "REMOVE_EMISSION_FROM_STATE": 1,
                "INSERT_CONSTRAINT": 1, "REMOVE_CONSTRAINT": 1, "DEMOTE_CONSTRAINT": 1,
                "INSERT_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT": 1,
                "REMOVE_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT": 1, "AUGMENT_FEATURE_BUNDLE": 1,
                "DEP_FOR_INSERT": 1, "MAX_FOR_INSERT": 1, "IDENT_FOR_INSERT": 1, "PHONOTACTIC_FOR_INSERT": 1,
                "MIN_NUM_OF_INNER_STATES": 1, "MAX_NUM_OF_INNER_STATES": 5,
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
                "ALLOW_CANDIDATES_WITH_CHANGED_SEGMENTS": false, "CORPUS_DUPLICATION_FACTOR": {factor},
                "RANDOM_SEED": false, "SEED": 3
            }}"#
        );
        Config::from_json(&json).unwrap()
    }

    #[test]
    fn whole_factor_repeats_every_word() {
        let seed = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let corpus = Corpus::new(&seed, &config_with_factor(2.0));
        assert_eq!(corpus.len(), 6);
    }

    #[test]
    fn fractional_factor_appends_a_prefix() {
        let seed = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        let corpus = Corpus::new(&seed, &config_with_factor(1.5));
        // 4 words once, plus floor(4 * 0.5) = 2 more from the front.
        assert_eq!(corpus.words(), &["a", "b", "c", "d", "a", "b"]);
    }

    #[test]
    fn zero_factor_yields_an_empty_corpus() {
        let seed = vec!["a".to_string()];
        let corpus = Corpus::new(&seed, &config_with_factor(0.0));
        assert!(corpus.is_empty());
    }
}
