//! A minimum-description-length phonological grammar learner: a weighted
//! finite-state transducer algebra, an Optimality-Theoretic constraint
//! layer built on top of it, a hidden-Markov-model lexicon with a derived
//! parsing automaton, and a simulated-annealing search driver that fits a
//! grammar to an observed corpus by minimizing combined grammar-plus-data
//! encoding length.
//!
//! Module layout mirrors `original_source/source/`'s one-class-per-file
//! organization, translated into Rust value types with the algorithm
//! boundaries the teacher crate (`daac-tools-vibrato`) draws between its
//! dictionary, tokenizer and trainer layers: immutable typed data at the
//! bottom (`segment`, `feature`, `word`), the automaton algebra in the
//! middle (`nfa`, `transducer`, `parser`), the grammar/learning layer built
//! on it (`constraint`, `constraint_set`, `hmm`, `lexicon`, `grammar`,
//! `hypothesis`, `corpus`), and the search driver on top (`annealer`).
#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod annealer;
pub mod caches;
pub mod common;
pub mod config;
pub mod constraint;
pub mod constraint_set;
pub mod corpus;
pub mod errors;
pub mod feature;
pub mod grammar;
pub mod hmm;
pub mod hypothesis;
pub mod lexicon;
pub mod nfa;
pub mod parser;
pub mod segment;
pub mod transducer;
pub mod word;

pub use annealer::{Annealer, Notifier};
pub use config::Config;
pub use corpus::Corpus;
pub use errors::{PhoMdlError, Result};
pub use feature::FeatureTable;
pub use grammar::Grammar;
pub use hypothesis::Hypothesis;
