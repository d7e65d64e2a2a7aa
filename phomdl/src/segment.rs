//! A symbol with its feature vector, and the two distinguished singletons.
use std::fmt;
use std::rc::Rc;

use crate::common::{JOKER_SYMBOL, NULL_SYMBOL};
use crate::feature::{FeatureBundle, FeatureTable};

/// A segment is a symbol drawn from the alphabet, or one of the two
/// distinguished singletons [`Segment::null`] and [`Segment::joker`].
///
/// Equality and hashing are by symbol only, matching
/// `original_source/source/segment.py`.
#[derive(Clone, Eq)]
pub struct Segment {
    symbol: Rc<str>,
}

impl Segment {
    /// Creates a segment for an ordinary alphabet symbol.
    pub fn new<S: AsRef<str>>(symbol: S) -> Self {
        Self {
            symbol: Rc::from(symbol.as_ref()),
        }
    }

    /// The empty segment `-`, used for insertions (on the input side) and
    /// deletions (on the output side).
    pub fn null() -> Self {
        Self::new(NULL_SYMBOL)
    }

    /// The wildcard segment `*`, matching any real segment.
    pub fn joker() -> Self {
        Self::new(JOKER_SYMBOL)
    }

    /// `true` iff this is the [`Segment::null`] singleton.
    pub fn is_null(&self) -> bool {
        &*self.symbol == NULL_SYMBOL
    }

    /// `true` iff this is the [`Segment::joker`] singleton.
    pub fn is_joker(&self) -> bool {
        &*self.symbol == JOKER_SYMBOL
    }

    /// The printed symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// A segment satisfies a bundle iff every (label, value) pair in the
    /// bundle appears in this segment's feature vector. [`Segment::joker`]
    /// satisfies every bundle; [`Segment::null`] satisfies none but the
    /// empty bundle.
    pub fn satisfies(&self, table: &FeatureTable, bundle: &FeatureBundle) -> bool {
        if self.is_joker() {
            return true;
        }
        if self.is_null() {
            return bundle.is_empty();
        }
        table.satisfies(self.symbol(), bundle)
    }

    /// Number of features carried by this segment (its encoding length
    /// contribution), per `original_source/source/segment.py::get_encoding_length`.
    pub fn encoding_length(&self, table: &FeatureTable) -> u64 {
        if self.is_null() || self.is_joker() {
            0
        } else {
            table.num_features() as u64
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl std::hash::Hash for Segment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({})", self.symbol)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tiny_table() -> FeatureTable {
        let mut syms = HashMap::new();
        syms.insert("a".to_string(), vec!["+".to_string()]);
        syms.insert("b".to_string(), vec!["-".to_string()]);
        FeatureTable::new(
            vec!["voice".to_string()],
            vec![vec!["+".to_string(), "-".to_string()]],
            syms,
        )
        .unwrap()
    }

    #[test]
    fn null_and_joker_are_distinguished() {
        assert!(Segment::null().is_null());
        assert!(Segment::joker().is_joker());
        assert_ne!(Segment::null(), Segment::joker());
        assert_eq!(Segment::null(), Segment::null());
    }

    #[test]
    fn equality_is_symbol_only() {
        let a1 = Segment::new("a");
        let a2 = Segment::new("a");
        assert_eq!(a1, a2);
    }

    #[test]
    fn joker_satisfies_everything() {
        let table = tiny_table();
        let bundle = FeatureBundle::new(
            [("voice".to_string(), "+".to_string())]
                .into_iter()
                .collect(),
        );
        assert!(Segment::joker().satisfies(&table, &bundle));
        assert!(!Segment::null().satisfies(&table, &bundle));
        assert!(Segment::new("a").satisfies(&table, &bundle));
        assert!(!Segment::new("b").satisfies(&table, &bundle));
    }
}
