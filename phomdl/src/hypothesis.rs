//! Couples a [`Grammar`] with the observed surface data it is being fit to,
//! and computes the combined MDL energy the annealer minimizes.
//!
//! Grounded on `original_source/source/hypothesis.py`.
use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::Rng;

use crate::caches::EngineCaches;
use crate::common::ceiling_log2;
use crate::config::Config;
use crate::errors::Result;
use crate::feature::FeatureTable;
use crate::grammar::Grammar;
use crate::parser::ParsingNfa;
use crate::word::Word;

/// For one observed surface form, every underlying word the current lexicon
/// derives it from, paired with how many distinct surfaces that underlying
/// word generates in total (the `k_U` of spec §4.8's data term).
pub type DataParse = HashMap<String, Vec<(Word, usize)>>;

/// The three MDL energy scalars reported for a hypothesis, already weighted
/// by `DATA_ENCODING_LENGTH_MULTIPLIER` / `GRAMMAR_ENCODING_LENGTH_MULTIPLIER`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub grammar: f64,
    pub data: f64,
    pub combined: f64,
}

/// A grammar coupled with the corpus it is being fit to.
///
/// Grounded on `original_source/source/hypothesis.py::Hypothesis`.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    grammar: Grammar,
    data: Vec<String>,
}

impl Hypothesis {
    /// Pairs a grammar with the raw (possibly duplicate-containing) corpus
    /// it is evaluated against.
    pub fn new(grammar: Grammar, data: Vec<String>) -> Self {
        Self { grammar, data }
    }

    /// The current grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The raw corpus, including any repeated occurrences.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// For every underlying word the lexicon currently derives, generates
    /// its surface candidates and records, for each that lands on an
    /// observed surface form, the pair `(underlying word, candidate count)`.
    ///
    /// Iterates the lexicon's distinct word list (not `data`, which may
    /// repeat a surface form many times over): a surface form's candidate
    /// set is the same no matter how many times it was observed.
    ///
    /// Grounded on `hypothesis.py::parse_data`.
    pub fn parse_data(&self, table: &FeatureTable, config: &Config, caches: &mut EngineCaches) -> Result<DataParse> {
        let observed: HashSet<&str> = self.data.iter().map(String::as_str).collect();
        let mut parse: DataParse = observed.iter().map(|&w| (w.to_string(), Vec::new())).collect();
        for word in self.grammar.lexicon().words() {
            let outputs = self.grammar.generate(word, table, config, caches)?;
            let candidate_count = outputs.len();
            for output in outputs.iter() {
                if let Some(entries) = parse.get_mut(output.as_str()) {
                    entries.push((word.clone(), candidate_count));
                }
            }
        }
        Ok(parse)
    }

    /// The sum, over every occurrence in `data` (duplicates counted
    /// separately), of the minimal `underlying_bits + ceil(log2(k_U))`
    /// across that surface form's candidate pairs. `+∞` if any observed
    /// surface form has no candidate pair at all.
    ///
    /// The parsing automaton is rebuilt fresh from the current lexicon's
    /// derived NFA on every call rather than cached: the lexicon's HMM
    /// changes on (almost) every accepted annealing step, so a cached
    /// automaton would silently go stale.
    ///
    /// Grounded on `hypothesis.py::get_data_length_given_grammar`.
    pub fn data_length(&self, table: &FeatureTable, config: &Config, caches: &mut EngineCaches) -> Result<f64> {
        let parse = self.parse_data(table, config, caches)?;
        if self
            .data
            .iter()
            .any(|surface| parse.get(surface).map_or(true, |pairs| pairs.is_empty()))
        {
            return Ok(f64::INFINITY);
        }

        let parsing_nfa = ParsingNfa::from_nfa(&self.grammar.lexicon().hmm().to_nfa());
        let mut total: u64 = 0;
        for surface in &self.data {
            let pairs = &parse[surface];
            let minimal = pairs
                .iter()
                .map(|(underlying, candidate_count)| {
                    let underlying_bits = parsing_nfa
                        .get_observation_encoding_length(underlying.text())
                        .unwrap_or(0);
                    underlying_bits + ceiling_log2(*candidate_count as u64) as u64
                })
                .min()
                .expect("checked above: every observed surface has at least one candidate pair");
            total += minimal;
        }
        Ok(total as f64)
    }

    /// The full energy breakdown: `α·data_length + β·grammar_length`.
    ///
    /// Grounded on `hypothesis.py::get_energy`.
    pub fn energy(&self, table: &FeatureTable, config: &Config, caches: &mut EngineCaches) -> Result<Energy> {
        let data_length = self.data_length(table, config, caches)?;
        let grammar_length = self.grammar.encoding_length(table) as f64;
        let data = data_length * config.data_encoding_length_multiplier;
        let grammar = grammar_length * config.grammar_encoding_length_multiplier;
        Ok(Energy { grammar, data, combined: grammar + data })
    }

    /// Clones this hypothesis and applies one grammar mutation to the
    /// clone, reporting whether the chosen half actually changed.
    ///
    /// The original deep-copied the hypothesis via `pickle` before mutating
    /// it in place; `Grammar`/`Lexicon`/`ConstraintSet` are plain
    /// `Clone`-able value types here (no transducer is ever stored on a
    /// grammar, only rebuilt into `caches` on demand), so a structural
    /// `Clone` serves the same purpose.
    ///
    /// Grounded on `hypothesis.py::get_neighbor`.
    pub fn get_neighbor(
        &self,
        table: &FeatureTable,
        config: &Config,
        rng: &mut impl Rng,
        caches: &mut EngineCaches,
    ) -> Result<(bool, Hypothesis)> {
        let mut neighbor = self.clone();
        let mutated = neighbor.grammar.make_mutation(table, config, rng, caches)?;
        Ok((mutated, neighbor))
    }
}

/// A human-readable summary of every nontrivial underlying-to-surface
/// mapping in a [`DataParse`], surface forms shortest first.
///
/// Grounded on `hypothesis.py::get_recent_data_parse`.
pub fn format_data_parse(parse: &DataParse) -> String {
    let mut surfaces: Vec<&String> = parse.keys().collect();
    surfaces.sort_by_key(|s| (s.chars().count(), (*s).clone()));

    let mut entries = Vec::new();
    for surface in surfaces {
        for (underlying, candidate_count) in &parse[surface] {
            if underlying.text() != surface.as_str() {
                entries.push(format!("{underlying} --> {surface} ({candidate_count})"));
            }
        }
    }
    entries.join(" # ")
}

impl fmt::Display for Energy {
    /// Grounded on `hypothesis.py::get_recent_energy_signature`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Energy: {:.2} bits (Grammar = {:.2}) + (Data = {:.2})",
            self.combined, self.grammar, self.data
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::constraint_set::ConstraintSet;
    use crate::lexicon::Lexicon;

    fn sample_table() -> FeatureTable {
        FeatureTable::from_json(
            r#"{
                "feature": [{"label": "voice", "values": ["+", "-"]}],
                "feature_table": {"a": ["+"], "b": ["-"]}
            }"#,
        )
        .unwrap()
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

    fn faithful_hypothesis(data: Vec<String>) -> Hypothesis {
        let words: Vec<String> = data.clone();
        let constraint_set = ConstraintSet::new(vec![Constraint::faith()]);
        let lexicon = Lexicon::from_word_list(&words, words.iter().map(|w| w.chars().count()).max().unwrap_or(0));
        Hypothesis::new(Grammar::new(constraint_set, lexicon), data)
    }

    #[test]
    fn faithful_grammar_over_its_own_data_has_finite_energy() {
        let table = sample_table();
        let config = sample_config();
        let hypothesis = faithful_hypothesis(vec!["ab".to_string(), "ba".to_string()]);
        let mut caches = EngineCaches::new();
        let energy = hypothesis.energy(&table, &config, &mut caches).unwrap();
        assert!(energy.combined.is_finite());
    }

    #[test]
    fn unparseable_surface_form_makes_data_length_infinite() {
        let table = sample_table();
        let config = sample_config();
        let mut hypothesis = faithful_hypothesis(vec!["ab".to_string()]);
        hypothesis.data.push("zzz".to_string());
        let mut caches = EngineCaches::new();
        let length = hypothesis.data_length(&table, &config, &mut caches).unwrap();
        assert!(length.is_infinite());
    }

    #[test]
    fn duplicate_occurrences_each_contribute_to_data_length() {
        let table = sample_table();
        let config = sample_config();
        let once = faithful_hypothesis(vec!["ab".to_string()]);
        let twice = faithful_hypothesis(vec!["ab".to_string(), "ab".to_string()]);
        let mut caches = EngineCaches::new();
        let once_length = once.data_length(&table, &config, &mut caches).unwrap();
        let twice_length = twice.data_length(&table, &config, &mut caches).unwrap();
        assert_eq!(twice_length, once_length * 2.0);
    }

    #[test]
    fn format_data_parse_omits_identity_mappings() {
        let table = sample_table();
        let config = sample_config();
        let hypothesis = faithful_hypothesis(vec!["ab".to_string()]);
        let mut caches = EngineCaches::new();
        let parse = hypothesis.parse_data(&table, &config, &mut caches).unwrap();
        assert_eq!(format_data_parse(&parse), "");
    }
}
