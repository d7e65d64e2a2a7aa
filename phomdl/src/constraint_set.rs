//! A ranked list of constraints, the OT grammar's half of the joint
//! hypothesis space.
//!
//! Grounded on `original_source/source/constraint_set.py`.
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::caches::{cache_key, EngineCaches};
use crate::common::{ceiling_log2, weighted_choice, CONSTRAINT_SET_DELIMITER};
use crate::config::Config;
use crate::constraint::{Constraint, ConstraintKind};
use crate::errors::{PhoMdlError, Result};
use crate::feature::{FeatureBundle, FeatureTable};

/// A strict ranking of constraints, most-dominant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    ranked: Vec<Constraint>,
}

/// The mutation operators a [`ConstraintSet`] can undergo during a single
/// annealing step. Exactly one is chosen per neighbor proposal by
/// [`ConstraintSet::make_mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintMutation {
    /// Swaps two adjacent constraints in the ranking.
    DemoteConstraint,
    /// Inserts a freshly generated constraint at a random rank
    /// (`INSERT_CONSTRAINT`).
    InsertConstraint,
    /// Removes a random non-`Faith` constraint (`REMOVE_CONSTRAINT`).
    RemoveConstraint,
    /// Inserts a feature bundle into a random `Phonotactic` constraint
    /// (`INSERT_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT`).
    InsertFeatureBundlePhonotactic,
    /// Removes a feature bundle from a random `Phonotactic` constraint
    /// (`REMOVE_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT`).
    RemoveFeatureBundlePhonotactic,
    /// Adds a feature pair to a bundle-bearing constraint
    /// (`AUGMENT_FEATURE_BUNDLE`, spec §9 Open Question 2).
    AugmentFeatureBundle,
    /// Removes a feature pair from a bundle-bearing constraint. Has no
    /// corresponding config weight; kept as an auxiliary method, not wired
    /// into [`ConstraintSet::make_mutation`]'s dispatcher.
    ShrinkFeatureBundle,
}

/// The four constraint families `INSERT_CONSTRAINT` can generate, weighted
/// by `DEP_FOR_INSERT` / `MAX_FOR_INSERT` / `IDENT_FOR_INSERT` /
/// `PHONOTACTIC_FOR_INSERT`.
#[derive(Debug, Clone, Copy)]
enum InsertableFamily {
    Dep,
    Max,
    Ident,
    Phonotactic,
}

/// Builds a random feature bundle of up to `num_features` distinct labels,
/// each given one of its legal values.
fn random_bundle(table: &FeatureTable, num_features: usize, rng: &mut impl Rng) -> FeatureBundle {
    let mut labels: Vec<String> = table.labels().to_vec();
    labels.shuffle(rng);
    let mut pairs = BTreeMap::new();
    for label in labels.into_iter().take(num_features) {
        let Some(legal) = table.legal_values(&label) else {
            continue;
        };
        if legal.is_empty() {
            continue;
        }
        let value = legal[rng.gen_range(0..legal.len())].clone();
        pairs.insert(label, value);
    }
    FeatureBundle::new(pairs)
}

impl ConstraintSet {
    /// Builds a set from an explicit ranking (most-dominant first).
    pub fn new(ranked: Vec<Constraint>) -> Self {
        Self { ranked }
    }

    /// Parses the printed `Name[...] >> Name[...]` form.
    pub fn parse(text: &str) -> Result<Self> {
        let ranked = text
            .split(CONSTRAINT_SET_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Constraint::parse)
            .collect::<Result<Vec<_>>>()?;
        if ranked.is_empty() {
            return Err(PhoMdlError::constraint_format(
                "a constraint set must rank at least one constraint",
            ));
        }
        Ok(Self::new(ranked))
    }

    /// Parses the alternative on-disk JSON form: a list of constraint
    /// objects, most-dominant first, each shaped per
    /// [`Constraint::from_json_value`].
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let entries = value
            .as_array()
            .ok_or_else(|| PhoMdlError::constraint_format("constraint set JSON must be a list"))?;
        let ranked = entries
            .iter()
            .map(Constraint::from_json_value)
            .collect::<Result<Vec<_>>>()?;
        if ranked.is_empty() {
            return Err(PhoMdlError::constraint_format(
                "a constraint set must rank at least one constraint",
            ));
        }
        Ok(Self::new(ranked))
    }

    /// The inverse of [`ConstraintSet::from_json`].
    pub fn to_json(&self) -> String {
        let values: Vec<serde_json::Value> = self.ranked.iter().map(Constraint::to_json_value).collect();
        serde_json::Value::Array(values).to_string()
    }

    /// Loads a constraint set from `path`, dispatching on its extension: a
    /// `.json` file is parsed with [`ConstraintSet::from_json`], anything
    /// else with the printed [`ConstraintSet::parse`] form.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(std::ffi::OsStr::to_str) {
            Some("json") => Self::from_json(&text),
            _ => Self::parse(&text),
        }
    }

    /// The ranked constraints, most-dominant first.
    pub fn constraints(&self) -> &[Constraint] {
        &self.ranked
    }

    /// Number of ranked constraints.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// `true` iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// The constraint currently holding `rank` (0 = most dominant).
    pub fn at(&self, rank: usize) -> Option<&Constraint> {
        self.ranked.get(rank)
    }

    /// Total encoding length: one term per constraint's own parameters,
    /// plus the cost of specifying their relative order.
    ///
    /// Grounded on `original_source/source/constraint_set.py::get_encoding_length`.
    pub fn encoding_length(&self, table: &FeatureTable) -> u64 {
        let per_constraint: u64 = self.ranked.iter().map(|c| c.encoding_length(table)).sum();
        let ranking_cost: u64 = (1..=self.ranked.len() as u64).map(ceiling_log2).sum();
        per_constraint + ranking_cost
    }

    /// Swaps the constraints at ranks `rank` and `rank + 1`. Returns
    /// `false` (no-op) if `rank + 1` is out of bounds.
    ///
    /// Every cached product transducer built over the pre-swap ranking is
    /// patched in place via [`crate::transducer::Transducer::swap_weights_on_arcs`]
    /// and re-inserted under the post-swap printed form, rather than left to
    /// be rebuilt from a full re-intersection on the next lookup. Cached
    /// grammar outputs for the pre-swap ranking are dropped, since swapping
    /// two cost-vector components can change which candidates are tied for
    /// minimal cost.
    ///
    /// Grounded on `original_source/source/constraint_set.py::_demote_constraint`,
    /// which deep-copied its single cached transducer, swapped the two
    /// constraints, called `swap_weights_on_arcs`, and re-cached the result
    /// under the new canonical string.
    pub fn demote(&mut self, rank: usize, caches: &mut EngineCaches) -> bool {
        if rank + 1 >= self.ranked.len() {
            return false;
        }
        let old_printed = self.to_string();
        self.ranked.swap(rank, rank + 1);
        let new_printed = self.to_string();

        let prefix = format!("{old_printed}\u{0}");
        let stale_keys: Vec<String> = caches
            .constraint_set_transducers
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect();
        for key in stale_keys {
            let Some(transducer) = caches.constraint_set_transducers.remove(&key) else {
                continue;
            };
            let mut transducer = Rc::try_unwrap(transducer).unwrap_or_else(|rc| (*rc).clone());
            transducer.swap_weights_on_arcs(rank, rank + 1);
            let word_text = &key[prefix.len()..];
            caches
                .constraint_set_transducers
                .insert(cache_key(&new_printed, word_text), Rc::new(transducer));
        }
        caches.grammar_outputs.retain(|key, _| !key.starts_with(&prefix));
        true
    }

    /// Adds a feature pair to the bundle at `rank`, if that constraint
    /// carries one. Returns `false` if the rank is out of bounds, the
    /// constraint has no bundle, or `label` already has a value the bundle
    /// (trying a different value still counts as a mutation).
    pub fn augment_feature_bundle(
        &mut self,
        rank: usize,
        table: &FeatureTable,
        rng: &mut impl Rng,
    ) -> Result<bool> {
        let Some(constraint) = self.ranked.get(rank) else {
            return Ok(false);
        };
        let Some(mutated) = with_bundle(constraint, |bundle| {
            let labels = table.labels();
            if labels.is_empty() {
                return None;
            }
            let label = &labels[rng.gen_range(0..labels.len())];
            let legal = table.legal_values(label)?;
            if legal.is_empty() {
                return None;
            }
            let value = legal[rng.gen_range(0..legal.len())].clone();
            Some(bundle.with(label.clone(), value))
        }) else {
            return Ok(false);
        };
        self.ranked[rank] = mutated;
        Ok(true)
    }

    /// Inserts a freshly generated constraint at a random rank, weighted
    /// among the insertable families by `config`'s `*_FOR_INSERT` weights.
    /// Returns `false` if the set is already at
    /// `MAX_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET` or every weight is zero.
    ///
    /// Grounded on `original_source/source/constraint_set.py::_insert_constraint`.
    pub fn insert_constraint(
        &mut self,
        table: &FeatureTable,
        config: &Config,
        rng: &mut impl Rng,
    ) -> bool {
        if self.ranked.len() as f64 >= config.max_number_of_constraints_in_constraint_set.as_f64()
        {
            return false;
        }
        let weights = [
            (InsertableFamily::Dep, config.mutation_weights.dep_for_insert),
            (InsertableFamily::Max, config.mutation_weights.max_for_insert),
            (InsertableFamily::Ident, config.mutation_weights.ident_for_insert),
            (
                InsertableFamily::Phonotactic,
                config.mutation_weights.phonotactic_for_insert,
            ),
        ];
        let Some(family) = weighted_choice(&weights, rng) else {
            return false;
        };
        let new_constraint = match family {
            InsertableFamily::Dep => {
                Constraint::dep(random_bundle(table, config.initial_number_of_features, rng))
            }
            InsertableFamily::Max => {
                Constraint::max(random_bundle(table, config.initial_number_of_features, rng))
            }
            InsertableFamily::Ident => {
                Constraint::ident(random_bundle(table, config.initial_number_of_features, rng))
            }
            InsertableFamily::Phonotactic => {
                let num_bundles = config
                    .initial_number_of_bundles_in_phonotactic_constraint
                    .max(1);
                let bundles = (0..num_bundles)
                    .map(|_| random_bundle(table, config.initial_number_of_features, rng))
                    .collect();
                Constraint::new(ConstraintKind::Phonotactic(bundles))
            }
        };
        if self.ranked.contains(&new_constraint) {
            return false;
        }
        let position = rng.gen_range(0..=self.ranked.len());
        self.ranked.insert(position, new_constraint);
        true
    }

    /// Removes a random non-`Faith` constraint. Returns `false` if doing so
    /// would drop below `MIN_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET` or
    /// there is no removable constraint.
    ///
    /// Grounded on `original_source/source/constraint_set.py::_remove_constraint`.
    pub fn remove_constraint(&mut self, config: &Config, rng: &mut impl Rng) -> bool {
        if self.ranked.len() <= config.min_number_of_constraints_in_constraint_set {
            return false;
        }
        let removable: Vec<usize> = self
            .ranked
            .iter()
            .enumerate()
            .filter(|(_, constraint)| !matches!(constraint.kind(), ConstraintKind::Faith))
            .map(|(index, _)| index)
            .collect();
        let Some(&index) = removable.get(rng.gen_range(0..removable.len().max(1))) else {
            return false;
        };
        self.ranked.remove(index);
        true
    }

    /// Inserts a fresh feature bundle into a randomly chosen `Phonotactic`
    /// constraint, if one is under `MAX_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT`.
    ///
    /// Grounded on
    /// `original_source/source/constraint_set.py::_insert_feature_bundle_phonotactic_constraint`.
    pub fn insert_feature_bundle_phonotactic(
        &mut self,
        table: &FeatureTable,
        config: &Config,
        rng: &mut impl Rng,
    ) -> bool {
        let candidates: Vec<usize> = self
            .ranked
            .iter()
            .enumerate()
            .filter(|(_, constraint)| match constraint.kind() {
                ConstraintKind::Phonotactic(bundles) => {
                    bundles.len() < config.max_feature_bundles_in_phonotactic_constraint
                }
                _ => false,
            })
            .map(|(index, _)| index)
            .collect();
        if candidates.is_empty() {
            return false;
        }
        let index = candidates[rng.gen_range(0..candidates.len())];
        let ConstraintKind::Phonotactic(bundles) = self.ranked[index].kind() else {
            return false;
        };
        let mut bundles = bundles.clone();
        let position = rng.gen_range(0..=bundles.len());
        bundles.insert(position, random_bundle(table, config.initial_number_of_features, rng));
        self.ranked[index] = Constraint::new(ConstraintKind::Phonotactic(bundles));
        true
    }

    /// Removes a random feature bundle from a randomly chosen `Phonotactic`
    /// constraint, if one is above `MIN_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT`.
    ///
    /// Grounded on
    /// `original_source/source/constraint_set.py::_remove_feature_bundle_phonotactic_constraint`.
    pub fn remove_feature_bundle_phonotactic(
        &mut self,
        config: &Config,
        rng: &mut impl Rng,
    ) -> bool {
        let candidates: Vec<usize> = self
            .ranked
            .iter()
            .enumerate()
            .filter(|(_, constraint)| match constraint.kind() {
                ConstraintKind::Phonotactic(bundles) => {
                    bundles.len() > config.min_feature_bundles_in_phonotactic_constraint
                }
                _ => false,
            })
            .map(|(index, _)| index)
            .collect();
        if candidates.is_empty() {
            return false;
        }
        let index = candidates[rng.gen_range(0..candidates.len())];
        let ConstraintKind::Phonotactic(bundles) = self.ranked[index].kind() else {
            return false;
        };
        let mut bundles = bundles.clone();
        let drop_index = rng.gen_range(0..bundles.len());
        bundles.remove(drop_index);
        self.ranked[index] = Constraint::new(ConstraintKind::Phonotactic(bundles));
        true
    }

    /// Chooses and applies one mutation operator, weighted by `config`'s
    /// operator weights. Returns `Ok(false)` if every weight is zero or the
    /// chosen operator could not apply (e.g. the set is already minimal).
    ///
    /// Grounded on `original_source/source/constraint_set.py::make_mutation`.
    pub fn make_mutation(
        &mut self,
        table: &FeatureTable,
        config: &Config,
        rng: &mut impl Rng,
        caches: &mut EngineCaches,
    ) -> Result<bool> {
        let weights = [
            (
                ConstraintMutation::InsertConstraint,
                config.mutation_weights.insert_constraint,
            ),
            (
                ConstraintMutation::RemoveConstraint,
                config.mutation_weights.remove_constraint,
            ),
            (
                ConstraintMutation::DemoteConstraint,
                config.mutation_weights.demote_constraint,
            ),
            (
                ConstraintMutation::InsertFeatureBundlePhonotactic,
                config
                    .mutation_weights
                    .insert_feature_bundle_phonotactic_constraint,
            ),
            (
                ConstraintMutation::RemoveFeatureBundlePhonotactic,
                config
                    .mutation_weights
                    .remove_feature_bundle_phonotactic_constraint,
            ),
            (
                ConstraintMutation::AugmentFeatureBundle,
                config.mutation_weights.augment_feature_bundle,
            ),
        ];
        let Some(operator) = weighted_choice(&weights, rng) else {
            return Ok(false);
        };
        Ok(match operator {
            ConstraintMutation::InsertConstraint => self.insert_constraint(table, config, rng),
            ConstraintMutation::RemoveConstraint => self.remove_constraint(config, rng),
            ConstraintMutation::DemoteConstraint => {
                if self.ranked.len() < 2 {
                    false
                } else {
                    let rank = rng.gen_range(0..self.ranked.len() - 1);
                    self.demote(rank, caches)
                }
            }
            ConstraintMutation::InsertFeatureBundlePhonotactic => {
                self.insert_feature_bundle_phonotactic(table, config, rng)
            }
            ConstraintMutation::RemoveFeatureBundlePhonotactic => {
                self.remove_feature_bundle_phonotactic(config, rng)
            }
            ConstraintMutation::AugmentFeatureBundle => {
                if self.ranked.is_empty() {
                    false
                } else {
                    let rank = rng.gen_range(0..self.ranked.len());
                    self.augment_feature_bundle(rank, table, rng)?
                }
            }
            ConstraintMutation::ShrinkFeatureBundle => unreachable!("not a dispatched operator"),
        })
    }

    /// Removes one feature pair from the bundle at `rank`, chosen at
    /// random among those present. Returns `false` if unavailable.
    pub fn shrink_feature_bundle(&mut self, rank: usize, rng: &mut impl Rng) -> bool {
        let Some(constraint) = self.ranked.get(rank) else {
            return false;
        };
        let Some(mutated) = with_bundle(constraint, |bundle| {
            if bundle.is_empty() {
                return None;
            }
            let pairs: Vec<(&str, &str)> = bundle.pairs().collect();
            let drop_index = rng.gen_range(0..pairs.len());
            let mut remaining = std::collections::BTreeMap::new();
            for (i, (label, value)) in pairs.into_iter().enumerate() {
                if i != drop_index {
                    remaining.insert(label.to_string(), value.to_string());
                }
            }
            Some(FeatureBundle::new(remaining))
        }) else {
            return false;
        };
        self.ranked[rank] = mutated;
        true
    }
}

/// Applies `f` to the bundle carried by `constraint`, if any, rebuilding a
/// constraint of the same family with the new bundle.
fn with_bundle(
    constraint: &Constraint,
    f: impl FnOnce(&FeatureBundle) -> Option<FeatureBundle>,
) -> Option<Constraint> {
    match constraint.kind() {
        ConstraintKind::Ident(bundle) => f(bundle).map(|b| Constraint::new(ConstraintKind::Ident(b))),
        ConstraintKind::Phonotactic(bundles) => {
            if bundles.is_empty() {
                return None;
            }
            let first = f(&bundles[0])?;
            let mut rest = bundles.clone();
            rest[0] = first;
            Some(Constraint::new(ConstraintKind::Phonotactic(rest)))
        }
        ConstraintKind::Max(_)
        | ConstraintKind::Dep(_)
        | ConstraintKind::Faith
        | ConstraintKind::VowelHarmony(_) => None,
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranked.iter().map(Constraint::to_string).collect();
        write!(f, "{}", parts.join(CONSTRAINT_SET_DELIMITER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(label: &str, value: &str) -> FeatureBundle {
        FeatureBundle::new([(label.to_string(), value.to_string())].into_iter().collect())
    }

    #[test]
    fn parse_and_display_round_trip() {
        let text = "Max[voice:+] >> Dep[voice:+] >> Ident[voice:+]";
        let set = ConstraintSet::parse(text).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), text);
    }

    #[test]
    fn demote_swaps_adjacent_ranks() {
        let mut set = ConstraintSet::parse("Max[voice:+] >> Dep[voice:+]").unwrap();
        let mut caches = EngineCaches::new();
        assert!(set.demote(0, &mut caches));
        assert_eq!(set.to_string(), "Dep[voice:+] >> Max[voice:+]");
        assert!(!set.demote(1, &mut caches));
    }

    #[test]
    fn demote_swaps_weights_on_cached_product_transducer() {
        let old_printed = "Max[voice:+] >> Dep[voice:+]";
        let mut set = ConstraintSet::parse(old_printed).unwrap();
        let mut caches = EngineCaches::new();

        let mut cached = crate::transducer::Transducer::new(2);
        let s0 = cached.add_state();
        let s1 = cached.add_state();
        cached.set_initial(s0);
        cached.set_final(s1, true);
        cached
            .add_arc(
                s0,
                crate::segment::Segment::new("a"),
                crate::segment::Segment::new("a"),
                crate::transducer::CostVector::from_components(vec![1, 2]),
                s1,
            )
            .unwrap();
        caches
            .constraint_set_transducers
            .insert(cache_key(old_printed, "a"), Rc::new(cached));

        assert!(set.demote(0, &mut caches));
        let new_key = cache_key(&set.to_string(), "a");
        let patched = caches.constraint_set_transducers.get(&new_key).unwrap();
        let arc = &patched.arcs_from(s0)[0];
        assert_eq!(arc.weight.components(), &[2, 1]);
    }

    #[test]
    fn json_round_trip_matches_printed_ranking() {
        let set = ConstraintSet::parse("Max[voice:+] >> Dep[voice:+] >> Ident[voice:+]").unwrap();
        let json = set.to_json();
        let reloaded = ConstraintSet::from_json(&json).unwrap();
        assert_eq!(set, reloaded);
    }

    #[test]
    fn json_list_rejects_empty() {
        assert!(ConstraintSet::from_json("[]").is_err());
    }

    fn sample_table() -> FeatureTable {
        FeatureTable::from_json(
            r#"{
                "feature": [
                    {"label": "voice", "values": ["+", "-"]},
                    {"label": "place", "values": ["lab", "cor"]}
                ],
                "feature_table": {
                    "p": ["-", "lab"],
                    "b": ["+", "lab"],
                    "t": ["-", "cor"]
                }
            }"#,
        )
        .unwrap()
    }

    fn sample_config(json: &str) -> Config {
        Config::from_json(json).unwrap()
    }

    fn zero_weights_json(overrides: &[(&str, &str)]) -> String {
        let mut fields: BTreeMap<&str, String> = [
            ("MUTATE_LEXICON", "0".to_string()),
            ("MUTATE_CONSTRAINT_SET", "1".to_string()),
            ("ADVANCE_EMISSION", "0".to_string()),
            ("CLONE_STATE", "0".to_string()),
            ("CLONE_EMISSION", "0".to_string()),
            ("ADD_STATE", "0".to_string()),
            ("REMOVE_STATE", "0".to_string()),
            ("ADD_TRANSITION", "0".to_string()),
            ("REMOVE_TRANSITION", "0".to_string()),
            ("ADD_SEGMENT_TO_EMISSION", "0".to_string()),
            ("REMOVE_SEGMENT_FROM_EMISSION", "0".to_string()),
            ("CHANGE_SEGMENT_IN_EMISSION", "0".to_string()),
            ("ADD_EMISSION_TO_STATE", "0".to_string()),
            ("REMOVE_EMISSION_FROM_STATE", "0".to_string()),
            ("INSERT_CONSTRAINT", "0".to_string()),
            ("REMOVE_CONSTRAINT", "0".to_string()),
            ("DEMOTE_CONSTRAINT", "0".to_string()),
            ("INSERT_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT", "0".to_string()),
            ("REMOVE_FEATURE_BUNDLE_PHONOTACTIC_CONSTRAINT", "0".to_string()),
            ("AUGMENT_FEATURE_BUNDLE", "0".to_string()),
            ("DEP_FOR_INSERT", "1".to_string()),
            ("MAX_FOR_INSERT", "1".to_string()),
            ("IDENT_FOR_INSERT", "1".to_string()),
            ("PHONOTACTIC_FOR_INSERT", "1".to_string()),
            ("MIN_NUM_OF_INNER_STATES", "1".to_string()),
            ("MAX_NUM_OF_INNER_STATES", "2".to_string()),
            ("MIN_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET", "1".to_string()),
            ("MAX_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET", "\"inf\"".to_string()),
            ("MIN_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT", "1".to_string()),
            ("MAX_FEATURE_BUNDLES_IN_PHONOTACTIC_CONSTRAINT", "3".to_string()),
            ("MAX_FEATURES_IN_BUNDLE", "\"inf\"".to_string()),
            ("INITIAL_NUMBER_OF_FEATURES", "1".to_string()),
            ("INITIAL_NUMBER_OF_BUNDLES_IN_PHONOTACTIC_CONSTRAINT", "1".to_string()),
            ("INITIAL_TEMPERATURE", "50.0".to_string()),
            ("COOLING_PARAMETER", "0.99995".to_string()),
            ("THRESHOLD", "0.1".to_string()),
            ("STEPS_LIMITATION", "\"inf\"".to_string()),
            ("DEBUG_LOGGING_INTERVAL", "50".to_string()),
            ("CLEAR_MODULES_CACHING_INTERVAL", "1000".to_string()),
            ("SLACK_NOTIFICATION_INTERVAL", "1000".to_string()),
            ("DATA_ENCODING_LENGTH_MULTIPLIER", "25.0".to_string()),
            ("GRAMMAR_ENCODING_LENGTH_MULTIPLIER", "1.0".to_string()),
            ("ALLOW_CANDIDATES_WITH_CHANGED_SEGMENTS", "false".to_string()),
            ("CORPUS_DUPLICATION_FACTOR", "1.0".to_string()),
            ("RANDOM_SEED", "false".to_string()),
            ("SEED", "3".to_string()),
        ]
        .into_iter()
        .collect();
        for (key, value) in overrides {
            fields.insert(key, value.to_string());
        }
        let body: Vec<String> = fields
            .into_iter()
            .map(|(key, value)| format!("\"{key}\": {value}"))
            .collect();
        format!("{{{}}}", body.join(", "))
    }

    #[test]
    fn insert_constraint_adds_one_when_weighted() {
        let table = sample_table();
        let config = sample_config(&zero_weights_json(&[("INSERT_CONSTRAINT", "1")]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::parse("Max[voice:+]").unwrap();
        assert!(set.insert_constraint(&table, &config, &mut rng));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_constraint_refuses_past_the_max() {
        let table = sample_table();
        let config = sample_config(&zero_weights_json(&[
            ("INSERT_CONSTRAINT", "1"),
            ("MAX_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET", "1"),
        ]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::parse("Max[voice:+]").unwrap();
        assert!(!set.insert_constraint(&table, &config, &mut rng));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_constraint_never_removes_faith() {
        let config = sample_config(&zero_weights_json(&[("REMOVE_CONSTRAINT", "1")]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::new(vec![Constraint::faith(), Constraint::max(bundle("voice", "+"))]);
        assert!(set.remove_constraint(&config, &mut rng));
        assert_eq!(set.len(), 1);
        assert!(matches!(set.at(0).unwrap().kind(), ConstraintKind::Faith));
    }

    #[test]
    fn remove_constraint_respects_the_floor() {
        let config = sample_config(&zero_weights_json(&[
            ("REMOVE_CONSTRAINT", "1"),
            ("MIN_NUMBER_OF_CONSTRAINTS_IN_CONSTRAINT_SET", "2"),
        ]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::parse("Max[voice:+] >> Dep[voice:+]").unwrap();
        assert!(!set.remove_constraint(&config, &mut rng));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_and_remove_feature_bundle_phonotactic_round_trip() {
        let table = sample_table();
        let config = sample_config(&zero_weights_json(&[]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::new(vec![Constraint::new(ConstraintKind::Phonotactic(
            vec![FeatureBundle::empty()],
        ))]);
        assert!(set.insert_feature_bundle_phonotactic(&table, &config, &mut rng));
        if let ConstraintKind::Phonotactic(bundles) = set.at(0).unwrap().kind() {
            assert_eq!(bundles.len(), 2);
        } else {
            panic!("expected Phonotactic");
        }
        assert!(set.remove_feature_bundle_phonotactic(&config, &mut rng));
        if let ConstraintKind::Phonotactic(bundles) = set.at(0).unwrap().kind() {
            assert_eq!(bundles.len(), 1);
        } else {
            panic!("expected Phonotactic");
        }
    }

    #[test]
    fn make_mutation_dispatches_the_only_weighted_operator() {
        let table = sample_table();
        let config = sample_config(&zero_weights_json(&[("DEMOTE_CONSTRAINT", "1")]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::parse("Max[voice:+] >> Dep[voice:+]").unwrap();
        let mut caches = EngineCaches::new();
        assert!(set.make_mutation(&table, &config, &mut rng, &mut caches).unwrap());
        assert_eq!(set.to_string(), "Dep[voice:+] >> Max[voice:+]");
    }

    #[test]
    fn make_mutation_returns_false_when_every_weight_is_zero() {
        let table = sample_table();
        let config = sample_config(&zero_weights_json(&[]));
        let mut rng = rand::thread_rng();
        let mut set = ConstraintSet::parse("Max[voice:+] >> Dep[voice:+]").unwrap();
        let mut caches = EngineCaches::new();
        assert!(!set.make_mutation(&table, &config, &mut rng, &mut caches).unwrap());
    }

    #[test]
    fn shrink_feature_bundle_removes_a_pair() {
        let mut rng = rand::thread_rng();
        let bundle = FeatureBundle::new(
            [
                ("voice".to_string(), "+".to_string()),
                ("place".to_string(), "lab".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        let mut set = ConstraintSet::new(vec![Constraint::ident(bundle)]);
        assert!(set.shrink_feature_bundle(0, &mut rng));
        if let ConstraintKind::Ident(bundle) = set.at(0).unwrap().kind() {
            assert_eq!(bundle.len(), 1);
        } else {
            panic!("expected Ident");
        }
    }
}
