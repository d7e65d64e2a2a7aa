//! Couples a ranked constraint set with a lexicon into one generative model:
//! given an underlying word, which surface forms does this grammar produce.
//!
//! Grounded on `original_source/source/grammar.py`. The original built one
//! shared constraint transducer over the full alphabet and intersected it
//! with a per-word identity-plus-insertion transducer (spec §4.6). Here GEN
//! is folded directly into [`crate::constraint::Constraint::build_transducer`]
//! on a per-word basis instead (see that module's doc comment): each
//! constraint already produces a transducer specific to one word's
//! candidates, so [`Grammar::generate`] only needs to build and intersect
//! those, in rank order, then read off the winners. This is a deliberate
//! continuation of that redesign rather than a literal transcription of
//! `grammar.py::get_transducer`.
use std::rc::Rc;

use rand::Rng;

use crate::caches::{cache_key, EngineCaches};
use crate::common::weighted_choice;
use crate::config::Config;
use crate::constraint_set::ConstraintSet;
use crate::errors::Result;
use crate::feature::FeatureTable;
use crate::lexicon::Lexicon;
use crate::transducer::Transducer;
use crate::word::Word;

/// Which half of a hypothesis a mutation step touches, weighted by
/// `MUTATE_LEXICON` / `MUTATE_CONSTRAINT_SET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrammarMutation {
    Lexicon,
    ConstraintSet,
}

/// A ranked constraint set paired with the lexicon it evaluates candidates
/// for.
#[derive(Debug, Clone)]
pub struct Grammar {
    constraint_set: ConstraintSet,
    lexicon: Lexicon,
}

impl Grammar {
    /// Pairs a constraint set with a lexicon.
    pub fn new(constraint_set: ConstraintSet, lexicon: Lexicon) -> Self {
        Self { constraint_set, lexicon }
    }

    /// The ranked constraints.
    pub fn constraint_set(&self) -> &ConstraintSet {
        &self.constraint_set
    }

    /// The underlying-form model.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Sum of the constraint set's and the lexicon's description lengths.
    ///
    /// Grounded on `grammar.py::get_encoding_length`.
    pub fn encoding_length(&self, table: &FeatureTable) -> u64 {
        self.constraint_set.encoding_length(table) + self.lexicon.encoding_length(table)
    }

    /// Mutates either the lexicon or the constraint set, weighted by
    /// `MUTATE_LEXICON` / `MUTATE_CONSTRAINT_SET`. Returns whether the
    /// chosen half actually changed.
    ///
    /// Grounded on `grammar.py::make_mutation`.
    pub fn make_mutation(
        &mut self,
        table: &FeatureTable,
        config: &Config,
        rng: &mut impl Rng,
        caches: &mut EngineCaches,
    ) -> Result<bool> {
        let weights = [
            (GrammarMutation::Lexicon, config.mutation_weights.mutate_lexicon),
            (GrammarMutation::ConstraintSet, config.mutation_weights.mutate_constraint_set),
        ];
        Ok(match weighted_choice(&weights, rng) {
            Some(GrammarMutation::Lexicon) => self.lexicon.make_mutation(table, config, rng),
            Some(GrammarMutation::ConstraintSet) => {
                self.constraint_set.make_mutation(table, config, rng, caches)?
            }
            None => false,
        })
    }

    /// Every surface form this grammar derives from `word`, tied for the
    /// lexicographically minimal cost vector under the ranked constraint
    /// set. Builds (or reuses, via `caches`) one product transducer per
    /// `(constraint set, word)` pair.
    ///
    /// The product transducer's candidates are read with
    /// [`Transducer::get_range`] and filtered down to every candidate tied
    /// at the lexicographically minimal cost vector, rather than collapsed
    /// to one arbitrary winner: OT optionality (several outputs genuinely
    /// tied at the bottom of the ranking) needs every tied winner, which
    /// `k_U` in the MDL data term (spec §4.8) counts.
    ///
    /// Grounded on `grammar.py::get_word_outputs`.
    pub fn generate(
        &self,
        word: &Word,
        table: &FeatureTable,
        config: &Config,
        caches: &mut EngineCaches,
    ) -> Result<Rc<Vec<String>>> {
        let set_key = cache_key(&self.constraint_set.to_string(), word.text());
        if let Some(cached) = caches.grammar_outputs.get(&set_key) {
            return Ok(Rc::clone(cached));
        }

        let product = self.product_transducer(word, table, config, caches)?;

        let max_length = word.len() * 2 + 2;
        let range = product.get_range(max_length);
        let winners = Rc::new(match range.get(word.text()) {
            None => Vec::new(),
            Some(candidates) => match candidates.iter().map(|(_, weight)| weight).min() {
                None => Vec::new(),
                Some(minimal) => {
                    let mut outputs: Vec<String> = candidates
                        .iter()
                        .filter(|(_, weight)| weight == minimal)
                        .map(|(output, _)| output.clone())
                        .collect();
                    outputs.sort();
                    outputs.dedup();
                    outputs
                }
            },
        });

        caches.grammar_outputs.insert(set_key, Rc::clone(&winners));
        Ok(winners)
    }

    /// Builds (or fetches, via `caches`) the per-word product transducer
    /// over every ranked constraint, in rank order so the combined cost
    /// vector's component order matches the ranking.
    fn product_transducer(
        &self,
        word: &Word,
        table: &FeatureTable,
        config: &Config,
        caches: &mut EngineCaches,
    ) -> Result<Rc<Transducer>> {
        let set_key = cache_key(&self.constraint_set.to_string(), word.text());
        if let Some(cached) = caches.constraint_set_transducers.get(&set_key) {
            return Ok(Rc::clone(cached));
        }

        let segments = word.segments();
        let mut per_constraint = Vec::with_capacity(self.constraint_set.len());
        for constraint in self.constraint_set.constraints() {
            let key = cache_key(&constraint.to_string(), word.text());
            let transducer = if let Some(cached) = caches.constraint_transducers.get(&key) {
                Rc::clone(cached)
            } else {
                let built = Rc::new(constraint.build_transducer(
                    &segments,
                    table,
                    config.allow_candidates_with_changed_segments,
                )?);
                caches.constraint_transducers.insert(key, Rc::clone(&built));
                built
            };
            per_constraint.push(transducer);
        }

        let refs: Vec<&Transducer> = per_constraint.iter().map(Rc::as_ref).collect();
        let product = Rc::new(Transducer::intersect(&refs)?);
        caches.constraint_set_transducers.insert(set_key, Rc::clone(&product));
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;

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

    #[test]
    fn faith_only_grammar_is_identity() {
        let table = sample_table();
        let config = sample_config();
        let constraint_set = ConstraintSet::new(vec![Constraint::faith()]);
        let lexicon = Lexicon::from_word_list(&["ab".to_string()], 2);
        let grammar = Grammar::new(constraint_set, lexicon);
        let mut caches = EngineCaches::new();

        let outputs = grammar
            .generate(&Word::new("ab"), &table, &config, &mut caches)
            .unwrap();
        assert_eq!(outputs.as_slice(), &["ab".to_string()]);
    }

    #[test]
    fn generate_is_cached_across_calls() {
        let table = sample_table();
        let config = sample_config();
        let constraint_set = ConstraintSet::new(vec![Constraint::faith()]);
        let lexicon = Lexicon::from_word_list(&["a".to_string()], 1);
        let grammar = Grammar::new(constraint_set, lexicon);
        let mut caches = EngineCaches::new();

        let word = Word::new("a");
        let first = grammar.generate(&word, &table, &config, &mut caches).unwrap();
        assert_eq!(caches.grammar_outputs.len(), 1);
        let second = grammar.generate(&word, &table, &config, &mut caches).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }
}
