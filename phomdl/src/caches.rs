//! Per-run memoization for the expensive grammar-evaluation path.
//!
//! Grounded on `original_source/source/utils.py`'s module-level `lru_cache`
//! decorators on the transducer-construction and candidate-generation
//! functions, and on `simulated_annealing.py`'s periodic
//! `CLEAR_MODULES_CACHING_INTERVAL` calls to clear them. Here the caches are
//! explicit, owned state threaded through [`crate::grammar::Grammar`] rather
//! than hidden behind a decorator, so a run can hold several independent
//! hypotheses without their caches colliding.
use std::collections::HashMap;
use std::rc::Rc;

use crate::transducer::Transducer;

/// Caches keyed by a constraint's printed form plus the word it is being
/// evaluated against, and by a constraint set's printed form plus a word.
/// Grammar output is cached one layer up, keyed the same way, since it is
/// the one callers look up directly.
#[derive(Debug, Default, Clone)]
pub struct EngineCaches {
    /// One constraint's per-word candidate transducer, keyed by
    /// `"{constraint}\0{word}"`.
    pub constraint_transducers: HashMap<String, Rc<Transducer>>,

    /// A whole ranked constraint set's per-word product transducer, keyed
    /// by `"{constraint_set}\0{word}"`.
    pub constraint_set_transducers: HashMap<String, Rc<Transducer>>,

    /// The winning output strings for a constraint set evaluated against a
    /// word, keyed by `"{constraint_set}\0{word}"`.
    pub grammar_outputs: HashMap<String, Rc<Vec<String>>>,
}

impl EngineCaches {
    /// An empty set of caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached entry, matching `CLEAR_MODULES_CACHING_INTERVAL`'s
    /// periodic reset of the original's `lru_cache`s: without it, a long run
    /// would retain a transducer for every grammar ever visited.
    pub fn clear(&mut self) {
        self.constraint_transducers.clear();
        self.constraint_set_transducers.clear();
        self.grammar_outputs.clear();
    }
}

/// Joins a grammar fragment's printed form with a word's text into one
/// cache key, with an embedded NUL so no legitimate printed form (which
/// never contains one) can collide across the join.
pub fn cache_key(printed: &str, word_text: &str) -> String {
    format!("{printed}\u{0}{word_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_empties_every_map() {
        let mut caches = EngineCaches::new();
        caches
            .grammar_outputs
            .insert(cache_key("Faith", "aba"), Rc::new(vec!["aba".to_string()]));
        assert_eq!(caches.grammar_outputs.len(), 1);
        caches.clear();
        assert!(caches.grammar_outputs.is_empty());
    }
}
