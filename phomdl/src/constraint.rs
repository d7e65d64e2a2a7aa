//! OT constraints and the registry that looks them up by name.
//!
//! Grounded on `original_source/source/constraint.py`, whose Python
//! metaclass registered each constraint subclass into a process-wide dict.
//! Here the registry is an explicit `HashMap` behind a `OnceLock`, built
//! once and never mutated at runtime (spec §9 REDESIGN FLAGS).
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::common::ceiling_log2;
use crate::errors::{PhoMdlError, Result};
use crate::feature::{FeatureBundle, FeatureTable};
use crate::segment::Segment;
use crate::transducer::{CostVector, StateId, Transducer};

/// The concrete families of constraint this system knows how to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Penalizes deletion of an input segment satisfying `bundle`.
    Max(FeatureBundle),
    /// Penalizes insertion of an output segment satisfying `bundle`.
    Dep(FeatureBundle),
    /// Penalizes an input segment satisfying `bundle` whose output
    /// correspondent does not.
    Ident(FeatureBundle),
    /// Markedness: penalizes any window of consecutive output segments
    /// that satisfies the aligned sequence of bundles.
    Phonotactic(Vec<FeatureBundle>),
    /// Markedness: penalizes a window of consecutive output segments that
    /// satisfies the aligned bundle sequence, the same way `Phonotactic`
    /// does, except a segment that has already satisfied the bundle
    /// currently being matched may repeat freely within that "harmony
    /// zone" without advancing or being penalized.
    VowelHarmony(Vec<FeatureBundle>),
    /// Undirected faithfulness: penalizes any insertion, deletion, or (if
    /// `ALLOW_CANDIDATES_WITH_CHANGED_SEGMENTS`) substitution, regardless
    /// of features. Carries no bundle.
    Faith,
}

/// The names under which constraint kinds are registered and printed.
pub const MAX_NAME: &str = "Max";
pub const DEP_NAME: &str = "Dep";
pub const IDENT_NAME: &str = "Ident";
pub const PHONOTACTIC_NAME: &str = "Phonotactic";
pub const VOWEL_HARMONY_NAME: &str = "VowelHarmony";
pub const FAITH_NAME: &str = "Faith";

const ALL_NAMES: &[&str] = &[
    MAX_NAME,
    DEP_NAME,
    IDENT_NAME,
    PHONOTACTIC_NAME,
    VOWEL_HARMONY_NAME,
    FAITH_NAME,
];

type Parser = fn(&str) -> Result<ConstraintKind>;

fn registry() -> &'static HashMap<&'static str, Parser> {
    static REGISTRY: OnceLock<HashMap<&'static str, Parser>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: HashMap<&'static str, Parser> = HashMap::new();
        map.insert(MAX_NAME, |args| Ok(ConstraintKind::Max(parse_bundle(args)?)));
        map.insert(DEP_NAME, |args| Ok(ConstraintKind::Dep(parse_bundle(args)?)));
        map.insert(IDENT_NAME, |args| {
            Ok(ConstraintKind::Ident(parse_bundle(args)?))
        });
        map.insert(PHONOTACTIC_NAME, |args| {
            let bundles = args
                .split(';')
                .map(parse_bundle)
                .collect::<Result<Vec<_>>>()?;
            if bundles.is_empty() {
                return Err(PhoMdlError::constraint_format(
                    "Phonotactic requires at least one bundle",
                ));
            }
            Ok(ConstraintKind::Phonotactic(bundles))
        });
        map.insert(VOWEL_HARMONY_NAME, |args| {
            Ok(ConstraintKind::VowelHarmony(parse_vowel_harmony_bundles(args)?))
        });
        map.insert(FAITH_NAME, |args| {
            require_no_args(FAITH_NAME, args)?;
            Ok(ConstraintKind::Faith)
        });
        map
    })
}

fn require_no_args(name: &str, args: &str) -> Result<()> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(PhoMdlError::constraint_format(format!(
            "{name} takes no arguments, got '{args}'"
        )))
    }
}

fn parse_bundle(args: &str) -> Result<FeatureBundle> {
    let mut pairs = std::collections::BTreeMap::new();
    for pair in args.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (label, value) = pair.split_once(':').ok_or_else(|| {
            PhoMdlError::constraint_format(format!("malformed feature pair '{pair}'"))
        })?;
        pairs.insert(label.trim().to_string(), value.trim().to_string());
    }
    if pairs.is_empty() {
        return Err(PhoMdlError::constraint_format(
            "feature bundle must name at least one feature",
        ));
    }
    Ok(FeatureBundle::new(pairs))
}

/// Parses `VowelHarmony`'s args: either a semicolon-delimited bundle
/// sequence, same syntax as `Phonotactic`, or (kept for the shipped presets,
/// which predate the bundle-sequence representation) a bare feature label
/// with no `:`, expanded into the two-bundle `label:+ ; label:-` sequence.
fn parse_vowel_harmony_bundles(args: &str) -> Result<Vec<FeatureBundle>> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(PhoMdlError::constraint_format(
            "VowelHarmony requires at least one feature bundle",
        ));
    }
    if !trimmed.contains(':') {
        return Ok(vec![
            FeatureBundle::new([(trimmed.to_string(), "+".to_string())].into_iter().collect()),
            FeatureBundle::new([(trimmed.to_string(), "-".to_string())].into_iter().collect()),
        ]);
    }
    trimmed.split(';').map(parse_bundle).collect()
}

fn format_bundle(bundle: &FeatureBundle) -> String {
    bundle
        .pairs()
        .map(|(l, v)| format!("{l}:{v}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// A single named, typed OT constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
}

impl Constraint {
    /// Wraps a constraint kind.
    pub fn new(kind: ConstraintKind) -> Self {
        Self { kind }
    }

    /// A `Max[bundle]` constraint, penalizing deletion of an input segment
    /// satisfying `bundle`.
    pub fn max(bundle: FeatureBundle) -> Self {
        Self::new(ConstraintKind::Max(bundle))
    }

    /// A `Dep[bundle]` constraint, penalizing insertion of an output
    /// segment satisfying `bundle`.
    pub fn dep(bundle: FeatureBundle) -> Self {
        Self::new(ConstraintKind::Dep(bundle))
    }

    /// An `Ident[bundle]` constraint.
    pub fn ident(bundle: FeatureBundle) -> Self {
        Self::new(ConstraintKind::Ident(bundle))
    }

    /// The `Faith` constraint.
    pub fn faith() -> Self {
        Self::new(ConstraintKind::Faith)
    }

    /// Parses a constraint from its printed `Name[args]` form, consulting
    /// the registry for a parser keyed by `Name`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (name, args) = match text.find('[') {
            Some(open) => {
                let close = text.rfind(']').ok_or_else(|| {
                    PhoMdlError::constraint_format(format!("unterminated '[' in '{text}'"))
                })?;
                (&text[..open], &text[open + 1..close])
            }
            None => (text, ""),
        };
        let parser = registry().get(name).ok_or_else(|| {
            PhoMdlError::constraint_format(format!(
                "unknown constraint '{name}', expected one of {ALL_NAMES:?}"
            ))
        })?;
        Ok(Self::new(parser(args)?))
    }

    /// The constraint family name, as registered.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            ConstraintKind::Max(_) => MAX_NAME,
            ConstraintKind::Dep(_) => DEP_NAME,
            ConstraintKind::Ident(_) => IDENT_NAME,
            ConstraintKind::Phonotactic(_) => PHONOTACTIC_NAME,
            ConstraintKind::VowelHarmony(_) => VOWEL_HARMONY_NAME,
            ConstraintKind::Faith => FAITH_NAME,
        }
    }

    /// The constraint's kind and parameters.
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Builds a constraint from its JSON object form: `{"type": "Max", ...}`,
    /// with `"bundles"` (a list of label->value maps) holding exactly one
    /// bundle for `Max`/`Dep`/`Ident`, and one or more for `Phonotactic`/
    /// `VowelHarmony`. This is the alternative to the printed `Name[args]`
    /// form a constraint-set file may use (spec §6).
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        let name = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| PhoMdlError::constraint_format("constraint object missing 'type'"))?;

        let bundle_from_map = |map: &serde_json::Map<String, serde_json::Value>| -> Result<FeatureBundle> {
            let mut pairs = std::collections::BTreeMap::new();
            for (label, value) in map {
                let value = value.as_str().ok_or_else(|| {
                    PhoMdlError::constraint_format(format!("feature value for '{label}' is not a string"))
                })?;
                pairs.insert(label.clone(), value.to_string());
            }
            Ok(FeatureBundle::new(pairs))
        };

        let bundles = || -> Result<Vec<FeatureBundle>> {
            value
                .get("bundles")
                .and_then(serde_json::Value::as_array)
                .ok_or_else(|| PhoMdlError::constraint_format(format!("{name} requires a 'bundles' array")))?
                .iter()
                .map(|bundle| {
                    bundle
                        .as_object()
                        .ok_or_else(|| PhoMdlError::constraint_format("bundle entry must be an object"))
                        .and_then(bundle_from_map)
                })
                .collect()
        };

        let kind = match name {
            FAITH_NAME => ConstraintKind::Faith,
            MAX_NAME => {
                let mut bundles = bundles()?;
                let bundle = bundles.pop().ok_or_else(|| {
                    PhoMdlError::constraint_format("Max requires exactly one bundle")
                })?;
                ConstraintKind::Max(bundle)
            }
            DEP_NAME => {
                let mut bundles = bundles()?;
                let bundle = bundles.pop().ok_or_else(|| {
                    PhoMdlError::constraint_format("Dep requires exactly one bundle")
                })?;
                ConstraintKind::Dep(bundle)
            }
            IDENT_NAME => {
                let mut bundles = bundles()?;
                let bundle = bundles.pop().ok_or_else(|| {
                    PhoMdlError::constraint_format("Ident requires exactly one bundle")
                })?;
                ConstraintKind::Ident(bundle)
            }
            PHONOTACTIC_NAME => {
                let bundles = bundles()?;
                if bundles.is_empty() {
                    return Err(PhoMdlError::constraint_format(
                        "Phonotactic requires at least one bundle",
                    ));
                }
                ConstraintKind::Phonotactic(bundles)
            }
            VOWEL_HARMONY_NAME => {
                let bundles = bundles()?;
                if bundles.is_empty() {
                    return Err(PhoMdlError::constraint_format(
                        "VowelHarmony requires at least one bundle",
                    ));
                }
                ConstraintKind::VowelHarmony(bundles)
            }
            other => {
                return Err(PhoMdlError::constraint_format(format!(
                    "unknown constraint type '{other}', expected one of {ALL_NAMES:?}"
                )))
            }
        };
        Ok(Self::new(kind))
    }

    /// The inverse of [`Constraint::from_json_value`].
    pub fn to_json_value(&self) -> serde_json::Value {
        let bundle_to_value = |bundle: &FeatureBundle| {
            serde_json::Value::Object(
                bundle
                    .pairs()
                    .map(|(l, v)| (l.to_string(), serde_json::Value::String(v.to_string())))
                    .collect(),
            )
        };
        match &self.kind {
            ConstraintKind::Faith => serde_json::json!({"type": FAITH_NAME}),
            ConstraintKind::Max(bundle) => serde_json::json!({
                "type": MAX_NAME,
                "bundles": [bundle_to_value(bundle)],
            }),
            ConstraintKind::Dep(bundle) => serde_json::json!({
                "type": DEP_NAME,
                "bundles": [bundle_to_value(bundle)],
            }),
            ConstraintKind::Ident(bundle) => serde_json::json!({
                "type": IDENT_NAME,
                "bundles": [bundle_to_value(bundle)],
            }),
            ConstraintKind::Phonotactic(bundles) => serde_json::json!({
                "type": PHONOTACTIC_NAME,
                "bundles": bundles.iter().map(bundle_to_value).collect::<Vec<_>>(),
            }),
            ConstraintKind::VowelHarmony(bundles) => serde_json::json!({
                "type": VOWEL_HARMONY_NAME,
                "bundles": bundles.iter().map(bundle_to_value).collect::<Vec<_>>(),
            }),
        }
    }

    /// The encoding length contributed by this constraint to the grammar's
    /// description length: a fixed cost for choosing the constraint type
    /// plus a type-specific cost for its parameters.
    ///
    /// Grounded on `original_source/source/constraint.py::get_encoding_length`.
    pub fn encoding_length(&self, table: &FeatureTable) -> u64 {
        let type_choice = ceiling_log2(ALL_NAMES.len() as u64);
        let feature_choice = ceiling_log2(table.num_features() as u64);
        let bundle_cost = |bundle: &FeatureBundle| -> u64 {
            bundle
                .pairs()
                .map(|(label, _value)| {
                    feature_choice as u64
                        + ceiling_log2(table.num_legal_values(label).unwrap_or(1) as u64) as u64
                })
                .sum()
        };
        let extra = match &self.kind {
            ConstraintKind::Faith => 0,
            ConstraintKind::Max(bundle) | ConstraintKind::Dep(bundle) | ConstraintKind::Ident(bundle) => {
                bundle_cost(bundle)
            }
            ConstraintKind::Phonotactic(bundles) | ConstraintKind::VowelHarmony(bundles) => {
                ceiling_log2(bundles.len() as u64) as u64
                    + bundles.iter().map(bundle_cost).sum::<u64>()
            }
        };
        type_choice as u64 + extra
    }

    /// Builds a transducer mapping `word` to every candidate output
    /// (substitution, deletion, and bounded insertion), each arc weighted
    /// by this constraint's violation count for that step.
    ///
    /// `allow_changed_segments` mirrors `ALLOW_CANDIDATES_WITH_CHANGED_SEGMENTS`
    /// (spec §4.2): when false, the faithfulness families (`Max`, `Dep`,
    /// `Faith`) emit no direct substitution arc for a changed segment, so a
    /// featural change can only arise as a delete step followed by a
    /// separate insert step elsewhere in the intersected product. `Ident`
    /// and the markedness families always offer substitution, since
    /// spec §9 Open Question 1 only exempts Phonotactic/VowelHarmony from
    /// reading the flag (they never look at it, and always behave as if it
    /// were irrelevant since their violation ignores input/output identity).
    pub fn build_transducer(
        &self,
        word: &[Segment],
        table: &FeatureTable,
        allow_changed_segments: bool,
    ) -> Result<Transducer> {
        match &self.kind {
            ConstraintKind::Max(bundle) => generate_candidates(
                word,
                table,
                0,
                allow_changed_segments,
                None,
                |_window, input, output| {
                    (!input.is_null() && output.is_null() && input.satisfies(table, bundle)) as u32
                },
            ),
            ConstraintKind::Dep(bundle) => generate_candidates(
                word,
                table,
                0,
                allow_changed_segments,
                None,
                |_window, input, output| {
                    (input.is_null() && !output.is_null() && output.satisfies(table, bundle)) as u32
                },
            ),
            ConstraintKind::Faith => generate_candidates(
                word,
                table,
                0,
                allow_changed_segments,
                None,
                |_window, input, output| (input.is_null() != output.is_null()) as u32,
            ),
            ConstraintKind::Ident(bundle) => {
                generate_candidates(word, table, 0, true, None, |_window, input, output| {
                    if input.is_null() || output.is_null() {
                        0
                    } else {
                        (input.satisfies(table, bundle) && !output.satisfies(table, bundle)) as u32
                    }
                })
            }
            ConstraintKind::Phonotactic(bundles) => {
                build_bundle_sequence_transducer(word, table, bundles, false)
            }
            ConstraintKind::VowelHarmony(bundles) => {
                build_bundle_sequence_transducer(word, table, bundles, true)
            }
        }
    }
}

/// Shared builder for `Phonotactic` and `VowelHarmony`: penalizes a window
/// of consecutive output segments that satisfies `bundles` in sequence.
///
/// When `harmony_zone` is set, an output segment that satisfies the same
/// bundle already occupying the last window slot is free to repeat without
/// advancing the window or being penalized, as long as that slot is not the
/// sequence's final bundle. This is the one rule `VowelHarmony` adds on top
/// of `Phonotactic`'s construction.
///
/// Grounded on `original_source/source/constraint.py`'s `PhonotacticConstraint`
/// and `VowelHarmonyConstraint`, whose `_make_transducer` methods are
/// identical except for one extra self-loop arc `VowelHarmonyConstraint`
/// adds at each non-final matched state, for the segment that triggered it.
fn build_bundle_sequence_transducer(
    word: &[Segment],
    table: &FeatureTable,
    bundles: &[FeatureBundle],
    harmony_zone: bool,
) -> Result<Transducer> {
    let window_size = bundles.len().saturating_sub(1);
    let bundles = bundles.to_vec();

    let violation_bundles = bundles.clone();
    let violation = move |window: &[Segment], _input: &Segment, output: &Segment| -> u32 {
        if output.is_null() {
            return 0;
        }
        let mut full: Vec<Segment> = window.to_vec();
        full.push(output.clone());
        if full.len() != violation_bundles.len() {
            return 0;
        }
        full.iter()
            .zip(violation_bundles.iter())
            .all(|(segment, bundle)| segment.satisfies(table, bundle)) as u32
    };

    let freeze: Option<Box<dyn Fn(&[Segment], &Segment) -> bool>> = if harmony_zone {
        let zone_bundles = bundles;
        Some(Box::new(move |window: &[Segment], output: &Segment| {
            let Some(idx) = window.len().checked_sub(1) else {
                return false;
            };
            if idx + 1 >= zone_bundles.len() {
                return false;
            }
            window[idx].satisfies(table, &zone_bundles[idx]) && output.satisfies(table, &zone_bundles[idx])
        }))
    } else {
        None
    };

    generate_candidates(word, table, window_size, true, freeze.as_deref(), violation)
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstraintKind::Max(bundle) => write!(f, "{MAX_NAME}[{}]", format_bundle(bundle)),
            ConstraintKind::Dep(bundle) => write!(f, "{DEP_NAME}[{}]", format_bundle(bundle)),
            ConstraintKind::Ident(bundle) => write!(f, "{IDENT_NAME}[{}]", format_bundle(bundle)),
            ConstraintKind::Phonotactic(bundles) => {
                let joined = bundles
                    .iter()
                    .map(format_bundle)
                    .collect::<Vec<_>>()
                    .join(";");
                write!(f, "{PHONOTACTIC_NAME}[{joined}]")
            }
            ConstraintKind::VowelHarmony(bundles) => {
                let joined = bundles
                    .iter()
                    .map(format_bundle)
                    .collect::<Vec<_>>()
                    .join(";");
                write!(f, "{VOWEL_HARMONY_NAME}[{joined}]")
            }
            ConstraintKind::Faith => write!(f, "{FAITH_NAME}"),
        }
    }
}

/// Slides a window of the last `window_size` non-null output segments
/// while walking `word` left to right, offering substitution, deletion,
/// and insertion at every position; `violation` scores each emitted arc.
///
/// `freeze_repeat`, when given, is consulted before an output segment is
/// pushed onto the window: if it returns `true` for the current window and
/// that segment, the window is left unchanged and the arc is zero-cost,
/// instead of sliding and scoring normally (the `VowelHarmony` harmony-zone
/// self-loop; see [`build_bundle_sequence_transducer`]).
///
/// Grounded on the GEN-as-transducer construction implied by spec §4.1:
/// full candidate generation intersected against each constraint in turn.
/// The window is bounded so the (position, window) state space stays
/// finite even though insertion self-loops are otherwise unbounded.
fn generate_candidates<F>(
    word: &[Segment],
    table: &FeatureTable,
    window_size: usize,
    allow_substitution: bool,
    freeze_repeat: Option<&dyn Fn(&[Segment], &Segment) -> bool>,
    violation: F,
) -> Result<Transducer>
where
    F: Fn(&[Segment], &Segment, &Segment) -> u32,
{
    let mut transducer = Transducer::new(1);
    let mut ids: HashMap<(usize, Vec<Segment>), StateId> = HashMap::new();
    let start_key = (0usize, Vec::new());
    let start = transducer.add_state();
    ids.insert(start_key.clone(), start);
    transducer.set_initial(start);

    let alphabet: Vec<Segment> = table.symbols().map(Segment::new).collect();
    let mut queue = std::collections::VecDeque::from([start_key]);

    while let Some((pos, window)) = queue.pop_front() {
        let state = ids[&(pos, window.clone())];
        if pos == word.len() {
            transducer.set_final(state, true);
        }

        for output in &alphabet {
            let frozen = freeze_repeat.is_some_and(|f| f(&window, output));
            let (new_window, cost) = if frozen {
                (window.clone(), 0)
            } else {
                let mut new_window = window.clone();
                new_window.push(output.clone());
                if new_window.len() > window_size {
                    new_window.remove(0);
                }
                (new_window, violation(&window, &Segment::null(), output))
            };
            let destination_key = (pos, new_window);
            let destination = *ids.entry(destination_key.clone()).or_insert_with(|| {
                let id = transducer.add_state();
                queue.push_back(destination_key.clone());
                id
            });
            transducer.add_arc(
                state,
                Segment::null(),
                output.clone(),
                CostVector::from_components(vec![cost]),
                destination,
            )?;
        }

        if pos < word.len() {
            let input = &word[pos];

            let cost = violation(&window, input, &Segment::null());
            let destination_key = (pos + 1, window.clone());
            let destination = *ids.entry(destination_key.clone()).or_insert_with(|| {
                let id = transducer.add_state();
                queue.push_back(destination_key.clone());
                id
            });
            transducer.add_arc(
                state,
                input.clone(),
                Segment::null(),
                CostVector::from_components(vec![cost]),
                destination,
            )?;

            for output in &alphabet {
                if output != input && !allow_substitution {
                    continue;
                }
                let frozen = freeze_repeat.is_some_and(|f| f(&window, output));
                let (new_window, cost) = if frozen {
                    (window.clone(), 0)
                } else {
                    let mut new_window = window.clone();
                    new_window.push(output.clone());
                    if new_window.len() > window_size {
                        new_window.remove(0);
                    }
                    (new_window, violation(&window, input, output))
                };
                let destination_key = (pos + 1, new_window);
                let destination = *ids.entry(destination_key.clone()).or_insert_with(|| {
                    let id = transducer.add_state();
                    queue.push_back(destination_key.clone());
                    id
                });
                transducer.add_arc(
                    state,
                    input.clone(),
                    output.clone(),
                    CostVector::from_components(vec![cost]),
                    destination,
                )?;
            }
        }
    }

    Ok(transducer)
}
