//! Feature tables and feature bundles.
//!
//! A [`FeatureTable`] is the alphabet: every symbol the system can emit or
//! parse, together with its feature vector. A [`FeatureBundle`] is a partial
//! assignment of values to a subset of the table's feature labels, the unit
//! that markedness constraints test segments against.
use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::errors::{PhoMdlError, Result};

/// The full alphabet of segments available to a grammar, each with a vector
/// of feature values aligned to a shared list of feature labels.
///
/// Grounded on `original_source/source/feature_table.py`; loaded from JSON
/// per spec §6 rather than the original's ad hoc text format.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    labels: Vec<String>,
    legal_values: Vec<Vec<String>>,
    symbols: BTreeMap<String, Vec<String>>,
}

/// One entry of the on-disk JSON `"feature"` list: a label and its legal
/// values, in the order every `"feature_table"` value vector must follow.
#[derive(Debug, Deserialize)]
struct FeatureSpecEntry {
    label: String,
    values: Vec<String>,
}

/// On-disk JSON shape for a feature table, deserialized then validated into
/// a [`FeatureTable`]. Matches spec §6's external feature-table format
/// exactly: an ordered `"feature"` list of `{label, values}` and a
/// `"feature_table"` map of symbol -> value vector aligned to that order.
#[derive(Debug, Deserialize)]
pub struct FeatureTableSpec {
    feature: Vec<FeatureSpecEntry>,
    feature_table: BTreeMap<String, Vec<String>>,
}

impl FeatureTable {
    /// Builds a table from already-parsed parts, validating consistency.
    pub fn new(
        labels: Vec<String>,
        legal_values: Vec<Vec<String>>,
        symbols: HashMap<String, Vec<String>>,
    ) -> Result<Self> {
        if labels.len() != legal_values.len() {
            return Err(PhoMdlError::feature_table(format!(
                "{} labels but {} legal-value rows",
                labels.len(),
                legal_values.len()
            )));
        }
        let mut ordered: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (symbol, values) in symbols {
            if values.len() != labels.len() {
                return Err(PhoMdlError::feature_table(format!(
                    "symbol '{symbol}' has {} feature values, expected {}",
                    values.len(),
                    labels.len()
                )));
            }
            for (value, legal) in values.iter().zip(legal_values.iter()) {
                if !legal.contains(value) {
                    return Err(PhoMdlError::feature_table(format!(
                        "symbol '{symbol}' has illegal value '{value}'"
                    )));
                }
            }
            ordered.insert(symbol, values);
        }
        Ok(Self {
            labels,
            legal_values,
            symbols: ordered,
        })
    }

    /// Loads and validates a feature table from a JSON document shaped
    /// `{ "feature": [{"label": str, "values": [str,...]},...],
    /// "feature_table": {symbol: [value,...]} }` (spec §6), each symbol's
    /// value vector ordered to match the `"feature"` list.
    pub fn from_json(text: &str) -> Result<Self> {
        let spec: FeatureTableSpec = serde_json::from_str(text)?;
        let labels: Vec<String> = spec.feature.iter().map(|entry| entry.label.clone()).collect();
        let legal_values: Vec<Vec<String>> = spec.feature.into_iter().map(|entry| entry.values).collect();
        Self::new(labels, legal_values, spec.feature_table.into_iter().collect())
    }

    /// Loads and validates a feature table from a CSV document whose header
    /// row is `,label1,label2,…` and whose subsequent rows are
    /// `symbol,val1,val2,…`. Every feature is assumed binary, `+`/`-`.
    ///
    /// Grounded on `original_source/source/feature_table.py::_get_feature_table_dict_form_csv`.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| PhoMdlError::feature_table("CSV feature table is empty"))??;
        let labels: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
        let legal_values: Vec<Vec<String>> =
            labels.iter().map(|_| vec!["-".to_string(), "+".to_string()]).collect();

        let mut symbols = HashMap::new();
        for record in records {
            let record = record?;
            let mut fields = record.iter();
            let symbol = fields
                .next()
                .ok_or_else(|| PhoMdlError::feature_table("CSV row missing a symbol column"))?
                .to_string();
            symbols.insert(symbol, fields.map(str::to_string).collect());
        }

        Self::new(labels, legal_values, symbols)
    }

    /// Loads a feature table from `path`, dispatching on its extension: a
    /// `.json` (or anything else) file is parsed as JSON, a `.csv` file as
    /// the table's native CSV format.
    ///
    /// Grounded on `original_source/source/feature_table.py::load`.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(std::ffi::OsStr::to_str) {
            Some("csv") => Self::from_csv(&text),
            _ => Self::from_json(&text),
        }
    }

    /// The feature labels, in table order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of feature labels in the table.
    pub fn num_features(&self) -> usize {
        self.labels.len()
    }

    /// All symbols in the alphabet, in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// Number of distinct legal values across all feature labels; used by
    /// [`crate::constraint::Constraint::encoding_length`] to bound the
    /// per-feature choice space.
    pub fn num_legal_values(&self, label: &str) -> Option<usize> {
        let index = self.labels.iter().position(|l| l == label)?;
        Some(self.legal_values[index].len())
    }

    /// The legal values for `label`, in table order.
    pub fn legal_values(&self, label: &str) -> Option<&[String]> {
        let index = self.labels.iter().position(|l| l == label)?;
        Some(&self.legal_values[index])
    }

    /// Feature value of `symbol` for `label`, or `None` if either is unknown.
    pub fn value(&self, symbol: &str, label: &str) -> Option<&str> {
        let index = self.labels.iter().position(|l| l == label)?;
        self.symbols.get(symbol)?.get(index).map(String::as_str)
    }

    /// `true` iff `symbol`'s feature vector matches every (label, value)
    /// pair in `bundle`.
    pub fn satisfies(&self, symbol: &str, bundle: &FeatureBundle) -> bool {
        bundle
            .pairs()
            .all(|(label, value)| self.value(symbol, label) == Some(value))
    }
}

/// A partial feature specification: a set of (label, value) pairs that a
/// segment either does or does not satisfy in full.
///
/// Grounded on `original_source/source/feature_bundle.py`. Stored as a
/// `BTreeMap` so two bundles with the same pairs compare and hash equal
/// regardless of insertion order, matching the original's set semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeatureBundle {
    pairs: BTreeMap<String, String>,
}

impl FeatureBundle {
    /// Builds a bundle from a map of label -> value.
    pub fn new(pairs: BTreeMap<String, String>) -> Self {
        Self { pairs }
    }

    /// The empty bundle, satisfied by every segment except [`crate::segment::Segment::null`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` iff this bundle constrains no features.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of (label, value) pairs in the bundle.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterates the (label, value) pairs in label order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Returns a copy of this bundle with `label` set to `value`, replacing
    /// any prior value for that label. Used by `AUGMENT_FEATURE_BUNDLE`
    /// mutations (spec §9 Open Question 2).
    pub fn with(&self, label: impl Into<String>, value: impl Into<String>) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.insert(label.into(), value.into());
        Self { pairs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureTable {
        FeatureTable::from_json(
            r#"{
                "feature": [
                    {"label": "voice", "values": ["+", "-"]},
                    {"label": "place", "values": ["lab", "cor"]}
                ],
                "feature_table": {
                    "b": ["+", "lab"],
                    "p": ["-", "lab"],
                    "d": ["+", "cor"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn loads_and_validates() {
        let table = sample();
        assert_eq!(table.num_features(), 2);
        assert_eq!(table.value("b", "voice"), Some("+"));
        assert_eq!(table.value("z", "voice"), None);
    }

    #[test]
    fn rejects_illegal_value() {
        let err = FeatureTable::from_json(
            r#"{
                "feature": [{"label": "voice", "values": ["+", "-"]}],
                "feature_table": {"x": ["0"]}
            }"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn bundle_satisfaction() {
        let table = sample();
        let voiced_labial = FeatureBundle::new(
            [
                ("voice".to_string(), "+".to_string()),
                ("place".to_string(), "lab".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        assert!(table.satisfies("b", &voiced_labial));
        assert!(!table.satisfies("p", &voiced_labial));
        assert!(!table.satisfies("d", &voiced_labial));
    }

    #[test]
    fn loads_from_csv() {
        let csv = ",voice,place\nb,+,lab\np,-,lab\nd,+,cor\n";
        let table = FeatureTable::from_csv(csv).unwrap();
        assert_eq!(table.labels(), &["voice".to_string(), "place".to_string()]);
        assert_eq!(table.value("b", "voice"), Some("+"));
        assert_eq!(table.legal_values("voice"), Some(&["-".to_string(), "+".to_string()][..]));
    }

    #[test]
    fn with_replaces_value() {
        let bundle = FeatureBundle::empty().with("voice", "+");
        let bundle = bundle.with("voice", "-");
        assert_eq!(bundle.pairs().collect::<Vec<_>>(), vec![("voice", "-")]);
    }
}
