//! A minimal nondeterministic finite automaton with epsilon arcs.
//!
//! The original Python system used the `FAdo` library's general-purpose
//! `NFA` for this; that dependency could not be carried over (spec §9
//! REDESIGN FLAGS), so this is a hand-rolled subset with exactly the
//! operations [`crate::hmm::Hmm`] and [`crate::parser::ParsingNfa`] need:
//! epsilon arcs, named-state expansion, and bounded-length enumeration.
use std::collections::{HashMap, HashSet, VecDeque};

/// A state identifier local to one [`Nfa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NfaState(u32);

impl std::fmt::Display for NfaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// An outgoing transition: `None` label is an epsilon arc.
#[derive(Debug, Clone)]
struct NfaArc {
    label: Option<String>,
    destination: NfaState,
}

/// An NFA over string labels, with epsilon arcs.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    num_states: u32,
    initial: Option<NfaState>,
    finals: HashSet<NfaState>,
    arcs: HashMap<NfaState, Vec<NfaArc>>,
}

impl Nfa {
    /// An empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fresh state.
    pub fn add_state(&mut self) -> NfaState {
        let id = NfaState(self.num_states);
        self.num_states += 1;
        id
    }

    /// Sets the initial state.
    pub fn set_initial(&mut self, state: NfaState) {
        self.initial = Some(state);
    }

    /// Marks `state` as accepting.
    pub fn set_final(&mut self, state: NfaState) {
        self.finals.insert(state);
    }

    /// Adds an epsilon transition.
    pub fn add_epsilon_arc(&mut self, origin: NfaState, destination: NfaState) {
        self.arcs.entry(origin).or_default().push(NfaArc {
            label: None,
            destination,
        });
    }

    /// Adds a labeled transition. `label` may be a multi-character string,
    /// matching a multi-segment HMM emission consumed in one arc.
    pub fn add_arc(&mut self, origin: NfaState, label: impl Into<String>, destination: NfaState) {
        self.arcs.entry(origin).or_default().push(NfaArc {
            label: Some(label.into()),
            destination,
        });
    }

    fn epsilon_closure(&self, states: &HashSet<NfaState>) -> HashSet<NfaState> {
        let mut closure = states.clone();
        let mut queue: VecDeque<NfaState> = states.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            if let Some(arcs) = self.arcs.get(&state) {
                for arc in arcs {
                    if arc.label.is_none() && closure.insert(arc.destination) {
                        queue.push_back(arc.destination);
                    }
                }
            }
        }
        closure
    }

    /// Enumerates every distinct non-empty string of length at most
    /// `max_length` accepted by this automaton.
    ///
    /// Grounded on `original_source/source/hmm.py::get_string_words_up_to_length`,
    /// which delegated to FAdo's `enumNFA` and dropped the empty string.
    pub fn enumerate_strings(&self, max_length: usize) -> Vec<String> {
        let Some(initial) = self.initial else {
            return Vec::new();
        };
        let mut results: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<(HashSet<NfaState>, String)> = VecDeque::new();
        frontier.push_back((self.epsilon_closure(&HashSet::from([initial])), String::new()));

        while let Some((states, accumulated)) = frontier.pop_front() {
            if !accumulated.is_empty() && states.iter().any(|s| self.finals.contains(s)) {
                results.insert(accumulated.clone());
            }
            if accumulated.chars().count() >= max_length {
                continue;
            }

            let mut by_label: HashMap<String, HashSet<NfaState>> = HashMap::new();
            for &state in &states {
                if let Some(arcs) = self.arcs.get(&state) {
                    for arc in arcs {
                        if let Some(label) = &arc.label {
                            by_label
                                .entry(label.clone())
                                .or_default()
                                .insert(arc.destination);
                        }
                    }
                }
            }

            for (label, destinations) in by_label {
                let mut next_accumulated = accumulated.clone();
                next_accumulated.push_str(&label);
                frontier.push_back((self.epsilon_closure(&destinations), next_accumulated));
            }
        }

        results.into_iter().collect()
    }

    /// Every state, in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = NfaState> + '_ {
        (0..self.num_states).map(NfaState)
    }

    /// The initial state.
    pub fn initial_state(&self) -> Option<NfaState> {
        self.initial
    }

    /// `true` iff `state` is accepting.
    pub fn is_final(&self, state: NfaState) -> bool {
        self.finals.contains(&state)
    }

    /// Outgoing arcs from `state`, as `(label, destination)` pairs;
    /// `label` is `None` for an epsilon arc.
    pub fn arcs_from(&self, state: NfaState) -> impl Iterator<Item = (Option<&str>, NfaState)> {
        self.arcs
            .get(&state)
            .into_iter()
            .flatten()
            .map(|arc| (arc.label.as_deref(), arc.destination))
    }

    /// Renders this automaton as a Graphviz `.dot` digraph: double-circled
    /// final states, an unlabeled arrow marking the initial state, a labeled
    /// edge per arc (`ε` for an epsilon arc).
    ///
    /// Grounded on `original_source/source/debug_tools.py::write_to_dot`.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph Nfa {\n    rankdir=LR;\n");
        for state in self.states() {
            let shape = if self.is_final(state) { "doublecircle" } else { "circle" };
            out.push_str(&format!("    {state} [shape={shape}];\n"));
        }
        if let Some(initial) = self.initial {
            out.push_str("    start [shape=point];\n");
            out.push_str(&format!("    start -> {initial};\n"));
        }
        for (&origin, arcs) in &self.arcs {
            for arc in arcs {
                let label = arc.label.as_deref().unwrap_or("\u{3b5}");
                out.push_str(&format!("    {origin} -> {} [label=\"{label}\"];\n", arc.destination));
            }
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_alphabet_with_epsilon_loop() {
        let mut nfa = Nfa::new();
        let q0 = nfa.add_state();
        let q1 = nfa.add_state();
        let qf = nfa.add_state();
        nfa.set_initial(q0);
        nfa.set_final(qf);
        nfa.add_epsilon_arc(q0, q1);
        nfa.add_arc(q1, "a", q1);
        nfa.add_arc(q1, "b", q1);
        nfa.add_epsilon_arc(q1, qf);

        let mut words = nfa.enumerate_strings(2);
        words.sort();
        assert_eq!(words, vec!["a", "aa", "ab", "b", "ba", "bb"]);
    }

    #[test]
    fn drops_empty_string() {
        let mut nfa = Nfa::new();
        let q0 = nfa.add_state();
        nfa.set_initial(q0);
        nfa.set_final(q0);
        assert!(nfa.enumerate_strings(3).is_empty());
    }

    #[test]
    fn multi_char_emission_is_one_label() {
        let mut nfa = Nfa::new();
        let q0 = nfa.add_state();
        let qf = nfa.add_state();
        nfa.set_initial(q0);
        nfa.set_final(qf);
        nfa.add_arc(q0, "ab", qf);
        assert_eq!(nfa.enumerate_strings(5), vec!["ab".to_string()]);
    }

    #[test]
    fn dot_output_marks_final_states_and_epsilon_arcs() {
        let mut nfa = Nfa::new();
        let q0 = nfa.add_state();
        let qf = nfa.add_state();
        nfa.set_initial(q0);
        nfa.set_final(qf);
        nfa.add_epsilon_arc(q0, qf);
        let dot = nfa.to_dot();
        assert!(dot.contains("doublecircle"));
        assert!(dot.contains("\u{3b5}"));
    }
}
