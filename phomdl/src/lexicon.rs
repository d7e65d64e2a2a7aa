//! The lexicon: a hidden emission model plus the underlying-form vocabulary
//! it currently derives.
//!
//! Grounded on `original_source/source/lexicon.py`. `max_word_length_in_data`
//! is not a config key in either the original or here (spec §6): it is
//! computed once from the observed corpus (the longest surface form) and
//! held fixed for the lifetime of a run, bounding how far the derived NFA is
//! enumerated.
use crate::config::Config;
use crate::feature::FeatureTable;
use crate::hmm::Hmm;
use crate::word::Word;

/// A hidden emission model together with the underlying forms it currently
/// generates, re-derived every time the model mutates.
#[derive(Debug, Clone)]
pub struct Lexicon {
    hmm: Hmm,
    max_word_length_in_data: usize,
    words: Vec<Word>,
}

impl Lexicon {
    /// One inner state restricted to `seed_words`'s vocabulary.
    ///
    /// Grounded on `Lexicon.__init__`'s `alphabet_or_words="words"` branch.
    pub fn from_word_list(seed_words: &[String], max_word_length_in_data: usize) -> Self {
        Self::from_hmm(Hmm::from_word_list(seed_words), max_word_length_in_data)
    }

    /// One self-looping inner state over every symbol of `table`.
    ///
    /// Grounded on `Lexicon.__init__`'s `alphabet_or_words="alphabet"` branch.
    pub fn from_alphabet(table: &FeatureTable, max_word_length_in_data: usize) -> Self {
        let alphabet: Vec<String> = table.symbols().map(str::to_string).collect();
        Self::from_hmm(Hmm::from_alphabet(&alphabet), max_word_length_in_data)
    }

    /// Wraps an already-built model, deriving its word list immediately.
    pub fn from_hmm(hmm: Hmm, max_word_length_in_data: usize) -> Self {
        let words = derive_words(&hmm, max_word_length_in_data);
        Self { hmm, max_word_length_in_data, words }
    }

    /// The underlying emission model.
    pub fn hmm(&self) -> &Hmm {
        &self.hmm
    }

    /// The longest surface form in the training corpus, bounding how far
    /// the derived NFA is enumerated for new underlying forms.
    pub fn max_word_length_in_data(&self) -> usize {
        self.max_word_length_in_data
    }

    /// The current underlying-form vocabulary, as derived from the model.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of underlying forms the model currently derives.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` iff the model currently derives no underlying forms.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every distinct segment appearing in any derived word.
    pub fn distinct_segments(&self) -> std::collections::HashSet<crate::segment::Segment> {
        self.words.iter().flat_map(Word::segments).collect()
    }

    /// Mutates the underlying model, re-deriving the word list on success.
    ///
    /// Grounded on `lexicon.py::make_mutation`.
    pub fn make_mutation(&mut self, table: &FeatureTable, config: &Config, rng: &mut impl rand::Rng) -> bool {
        let mutated = self.hmm.make_mutation(table, config, rng);
        if mutated {
            self.words = derive_words(&self.hmm, self.max_word_length_in_data);
        }
        mutated
    }

    /// The model's own description length; the lexicon contributes nothing
    /// beyond it (the word list is fully determined by the model).
    ///
    /// Grounded on `lexicon.py::get_encoding_length`.
    pub fn encoding_length(&self, table: &FeatureTable) -> u64 {
        self.hmm.encoding_length(table)
    }
}

fn derive_words(hmm: &Hmm, max_word_length_in_data: usize) -> Vec<Word> {
    hmm.get_string_words_up_to_length(max_word_length_in_data)
        .into_iter()
        .map(Word::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FeatureTable {
        FeatureTable::from_json(
            r#"{
                "feature": [{"label": "voice", "values": ["+", "-"]}],
                "feature_table": {"a": ["+"], "b": ["-"]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn from_word_list_derives_exactly_the_seed_words() {
        let lexicon = Lexicon::from_word_list(&["ab".to_string(), "ba".to_string()], 5);
        let mut texts: Vec<&str> = lexicon.words().iter().map(Word::text).collect();
        texts.sort();
        assert_eq!(texts, vec!["ab", "ba"]);
    }

    #[test]
    fn from_alphabet_derives_every_string_up_to_the_bound() {
        let table = sample_table();
        let lexicon = Lexicon::from_alphabet(&table, 2);
        assert_eq!(lexicon.len(), 6); // a, b, aa, ab, ba, bb
    }

    #[test]
    fn mutation_rederives_words_only_on_success() {
        let mut lexicon = Lexicon::from_word_list(&["a".to_string()], 3);
        let before = lexicon.len();
        // No weight is ever zero here because we drive the HMM mutation
        // directly rather than through make_mutation's weighted dispatch.
        assert!(lexicon.hmm.add_state(&sample_config()));
        // Word list is stale until the lexicon is told to re-derive.
        assert_eq!(lexicon.len(), before);
    }

    fn sample_config() -> Config {
        Config::from_json(
            r#"{
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
                "ALLOW_CANDIDATES_WITH_CHANGED_SEGMENTS": false, "CORPUS_DUPLICATION_FACTOR": 1.0,
                "RANDOM_SEED": false, "SEED": 3
            }"#,
        )
        .unwrap()
    }
}
