//! Hidden emission model over inner states: the lexicon's half of the joint
//! hypothesis space.
//!
//! A single initial and final state bracket a small graph of numbered inner
//! states; each inner state emits one of a set of candidate strings. The
//! model's derived NFA (built by [`Hmm::to_nfa`]) expands every emission
//! into a chain of single-character arcs through fresh intermediate states,
//! so that [`crate::parser::ParsingNfa`] can advance it one observed
//! character at a time.
//!
//! Grounded on `original_source/source/hmm.py`.
use std::collections::HashMap;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{ceiling_log2, weighted_choice};
use crate::config::Config;
use crate::feature::FeatureTable;
use crate::nfa::Nfa;

/// One of the three distinguished node kinds in an [`Hmm`]'s transition
/// graph: the single entry point, a numbered inner state, or the single
/// accepting exit point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HmmState {
    Initial,
    Inner(u32),
    Final,
}

impl fmt::Display for HmmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HmmState::Initial => write!(f, "q0"),
            HmmState::Inner(n) => write!(f, "q{n}"),
            HmmState::Final => write!(f, "qf"),
        }
    }
}

/// A hidden emission model: a graph of inner states threaded between a
/// single initial and final state, each inner state emitting one of a set
/// of candidate strings.
#[derive(Debug, Clone)]
pub struct Hmm {
    transitions: HashMap<HmmState, Vec<HmmState>>,
    emissions: HashMap<u32, Vec<String>>,
    inner_states: Vec<u32>,
}

impl Hmm {
    /// One inner state restricted to a fixed vocabulary: `q0 -> q1 -> qf`,
    /// `q1` emits every string in `words`.
    ///
    /// Grounded on `original_source/source/hmm.py::create_hmm_from_list`.
    pub fn from_word_list(words: &[String]) -> Self {
        let mut transitions = HashMap::new();
        transitions.insert(HmmState::Initial, vec![HmmState::Inner(1)]);
        transitions.insert(HmmState::Inner(1), vec![HmmState::Final]);
        let mut emissions = HashMap::new();
        emissions.insert(1, words.to_vec());
        Self {
            transitions,
            emissions,
            inner_states: vec![1],
        }
    }

    /// One self-looping inner state emitting every symbol of `alphabet`:
    /// `q0 -> q1 -> {q1, qf}`.
    ///
    /// Grounded on `original_source/source/hmm.py::create_hmm_alphabet`.
    pub fn from_alphabet(alphabet: &[String]) -> Self {
        let mut transitions = HashMap::new();
        transitions.insert(HmmState::Initial, vec![HmmState::Inner(1)]);
        transitions.insert(
            HmmState::Inner(1),
            vec![HmmState::Inner(1), HmmState::Final],
        );
        let mut emissions = HashMap::new();
        emissions.insert(1, alphabet.to_vec());
        Self {
            transitions,
            emissions,
            inner_states: vec![1],
        }
    }

    /// The numbered inner states, in insertion order.
    pub fn inner_states(&self) -> &[u32] {
        &self.inner_states
    }

    /// The outgoing targets of `state`, empty if it has none.
    pub fn transitions_from(&self, state: HmmState) -> &[HmmState] {
        self.transitions.get(&state).map_or(&[], Vec::as_slice)
    }

    /// The candidate emission strings of inner state `state`, empty if it
    /// has none (or is not an inner state at all).
    pub fn get_emissions(&self, state: u32) -> &[String] {
        self.emissions.get(&state).map_or(&[], Vec::as_slice)
    }

    /// Every distinct emission string used anywhere in the model.
    pub fn all_emissions(&self) -> Vec<String> {
        let mut set: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
        for emissions in self.emissions.values() {
            set.extend(emissions.iter().cloned());
        }
        set.into_iter().collect()
    }

    /// Smallest non-negative integer not already naming an inner state.
    fn next_state_number(&self) -> u32 {
        let mut numbers: Vec<u32> = self.inner_states.clone();
        numbers.push(0);
        numbers.sort_unstable();
        for window in numbers.windows(2) {
            if window[1] != window[0] + 1 {
                return window[0] + 1;
            }
        }
        numbers.len() as u32
    }

    /// Chooses one mutation operator weighted by `config`, applies it, and
    /// reports whether it succeeded. A successful mutation never changes
    /// the derived NFA in place; call [`Hmm::to_nfa`] again afterwards.
    ///
    /// Grounded on `original_source/source/hmm.py::make_mutation`.
    pub fn make_mutation(&mut self, table: &FeatureTable, config: &Config, rng: &mut impl Rng) -> bool {
        #[derive(Clone, Copy)]
        enum Op {
            AdvanceEmission,
            CloneState,
            CloneEmission,
            AddSegmentToEmission,
            RemoveSegmentFromEmission,
            ChangeSegmentInEmission,
            AddState,
            RemoveState,
            AddTransition,
            RemoveTransition,
            AddEmissionToState,
            RemoveEmissionFromState,
        }
        let weights = [
            (Op::AdvanceEmission, config.mutation_weights.advance_emission),
            (Op::CloneState, config.mutation_weights.clone_state),
            (Op::CloneEmission, config.mutation_weights.clone_emission),
            (
                Op::AddSegmentToEmission,
                config.mutation_weights.add_segment_to_emission,
            ),
            (
                Op::RemoveSegmentFromEmission,
                config.mutation_weights.remove_segment_from_emission,
            ),
            (
                Op::ChangeSegmentInEmission,
                config.mutation_weights.change_segment_in_emission,
            ),
            (Op::AddState, config.mutation_weights.add_state),
            (Op::RemoveState, config.mutation_weights.remove_state),
            (Op::AddTransition, config.mutation_weights.add_transition),
            (Op::RemoveTransition, config.mutation_weights.remove_transition),
            (
                Op::AddEmissionToState,
                config.mutation_weights.add_emission_to_state,
            ),
            (
                Op::RemoveEmissionFromState,
                config.mutation_weights.remove_emission_from_state,
            ),
        ];
        let Some(op) = weighted_choice(&weights, rng) else {
            return false;
        };
        match op {
            Op::AdvanceEmission => self.advance_emission(config, rng),
            Op::CloneState => self.clone_state(config, rng),
            Op::CloneEmission => self.clone_emission(rng),
            Op::AddSegmentToEmission => self.add_segment_to_emission(table, rng),
            Op::RemoveSegmentFromEmission => self.remove_segment_from_emission(rng),
            Op::ChangeSegmentInEmission => self.change_segment_in_emission(table, rng),
            Op::AddState => self.add_state(config),
            Op::RemoveState => self.remove_state(config, rng),
            Op::AddTransition => self.add_transition(rng),
            Op::RemoveTransition => self.remove_transition(rng),
            Op::AddEmissionToState => self.add_emission_to_state(table, rng),
            Op::RemoveEmissionFromState => self.remove_emission_from_state(rng),
        }
    }

    /// Splits one emission of a self-looping state off into a freshly
    /// spliced-in state, so the loop's iterations can diverge.
    pub fn advance_emission(&mut self, config: &Config, rng: &mut impl Rng) -> bool {
        let Some(&target) = self.inner_states.choose(rng) else {
            return false;
        };
        let target_state = HmmState::Inner(target);
        let target_emissions = self.get_emissions(target).to_vec();
        let target_transitions = self.transitions_from(target_state).to_vec();
        let has_self_loop = target_transitions.contains(&target_state);
        if !(has_self_loop
            && target_transitions.len() > 1
            && target_emissions.len() > 1
            && self.inner_states.len() < config.max_num_of_inner_states)
        {
            return false;
        }

        let outgoing: Vec<HmmState> = target_transitions
            .iter()
            .copied()
            .filter(|&s| s != target_state)
            .collect();
        let Some(&outgoing_state) = outgoing.choose(rng) else {
            return false;
        };
        let new_number = self.next_state_number();
        let new_state = HmmState::Inner(new_number);
        let emission = target_emissions.choose(rng).unwrap().clone();

        self.inner_states.push(new_number);
        self.transitions
            .insert(new_state, vec![outgoing_state, new_state, target_state]);
        self.emissions.insert(new_number, vec![emission.clone()]);

        self.transitions.get_mut(&target_state).unwrap().push(new_state);
        if let Some(pos) = self
            .emissions
            .get(&target)
            .and_then(|list| list.iter().position(|e| *e == emission))
        {
            self.emissions.get_mut(&target).unwrap().remove(pos);
        }
        true
    }

    /// Duplicates a state's emissions and transitions onto a fresh state.
    pub fn clone_state(&mut self, config: &Config, rng: &mut impl Rng) -> bool {
        if self.inner_states.len() >= config.max_num_of_inner_states {
            return false;
        }
        let Some(&original) = self.inner_states.choose(rng) else {
            return false;
        };
        let original_state = HmmState::Inner(original);
        let cloned_number = self.next_state_number();
        let cloned_state = HmmState::Inner(cloned_number);

        self.inner_states.push(cloned_number);
        self.emissions
            .insert(cloned_number, self.get_emissions(original).to_vec());

        let incoming: Vec<HmmState> = self.transitions.keys().copied().collect();
        for state in incoming {
            if self
                .transitions
                .get(&state)
                .is_some_and(|targets| targets.contains(&original_state))
            {
                self.transitions.get_mut(&state).unwrap().push(cloned_state);
            }
        }

        let outgoing = self
            .transitions
            .get(&original_state)
            .cloned()
            .unwrap_or_default();
        self.transitions.insert(cloned_state, outgoing);
        true
    }

    /// Adds an emission already used elsewhere to a random state.
    pub fn clone_emission(&mut self, rng: &mut impl Rng) -> bool {
        let all = self.all_emissions();
        let Some(emission) = all.choose(rng) else {
            return false;
        };
        let Some(&state) = self.inner_states.choose(rng) else {
            return false;
        };
        if self.get_emissions(state).contains(emission) {
            return false;
        }
        self.emissions.entry(state).or_default().push(emission.clone());
        true
    }

    /// Adds an empty, unconnected inner state.
    pub fn add_state(&mut self, config: &Config) -> bool {
        if self.inner_states.len() >= config.max_num_of_inner_states {
            return false;
        }
        let new_number = self.next_state_number();
        self.inner_states.push(new_number);
        self.emissions.insert(new_number, Vec::new());
        self.transitions.insert(HmmState::Inner(new_number), Vec::new());
        true
    }

    /// Removes a random inner state along with every arc touching it.
    pub fn remove_state(&mut self, config: &Config, rng: &mut impl Rng) -> bool {
        if self.inner_states.len() <= config.min_num_of_inner_states {
            return false;
        }
        let index = rng.gen_range(0..self.inner_states.len());
        let removed = self.inner_states.remove(index);
        self.emissions.remove(&removed);
        self.transitions.remove(&HmmState::Inner(removed));
        for targets in self.transitions.values_mut() {
            targets.retain(|&s| s != HmmState::Inner(removed));
        }
        true
    }

    /// Adds an arc from a random initial-or-inner state to a random inner
    /// state, unless it already exists.
    pub fn add_transition(&mut self, rng: &mut impl Rng) -> bool {
        let Some(state1) = self.sources().choose(rng).copied() else {
            return false;
        };
        let Some(&target) = self.inner_states.choose(rng) else {
            return false;
        };
        let state2 = HmmState::Inner(target);
        let existing = self.transitions.entry(state1).or_default();
        if existing.contains(&state2) {
            return false;
        }
        existing.push(state2);
        true
    }

    /// Removes a random arc out of a random initial-or-inner state.
    pub fn remove_transition(&mut self, rng: &mut impl Rng) -> bool {
        let Some(state1) = self.sources().choose(rng).copied() else {
            return false;
        };
        let targets = self.transitions.get(&state1).cloned().unwrap_or_default();
        if targets.is_empty() {
            return false;
        }
        let index = rng.gen_range(0..targets.len());
        self.transitions.get_mut(&state1).unwrap().remove(index);
        true
    }

    /// Adds a fresh single-segment emission to a random inner state.
    pub fn add_emission_to_state(&mut self, table: &FeatureTable, rng: &mut impl Rng) -> bool {
        let Some(&state) = self.inner_states.choose(rng) else {
            return false;
        };
        let Some(segment) = random_segment(table, rng) else {
            return false;
        };
        if self.get_emissions(state).contains(&segment) {
            return false;
        }
        self.emissions.entry(state).or_default().push(segment);
        true
    }

    /// Removes a random emission from a random inner state.
    pub fn remove_emission_from_state(&mut self, rng: &mut impl Rng) -> bool {
        let Some(&state) = self.inner_states.choose(rng) else {
            return false;
        };
        let emissions = self.get_emissions(state);
        if emissions.is_empty() {
            return false;
        }
        let index = rng.gen_range(0..emissions.len());
        self.emissions.get_mut(&state).unwrap().remove(index);
        true
    }

    /// Inserts a random segment at a random position inside a random
    /// emission of a random state, as a new sibling emission.
    pub fn add_segment_to_emission(&mut self, table: &FeatureTable, rng: &mut impl Rng) -> bool {
        let Some(&state) = self.inner_states.choose(rng) else {
            return false;
        };
        let emissions = self.get_emissions(state).to_vec();
        let Some(original) = emissions.choose(rng) else {
            return false;
        };
        let Some(segment) = random_segment(table, rng) else {
            return false;
        };
        let chars: Vec<char> = original.chars().collect();
        let insertion_index = rng.gen_range(0..=chars.len());
        let mut new_chars = chars[..insertion_index].to_vec();
        new_chars.extend(segment.chars());
        new_chars.extend(&chars[insertion_index..]);
        let new_emission: String = new_chars.into_iter().collect();
        if self.get_emissions(state).contains(&new_emission) {
            return false;
        }
        self.emissions.get_mut(&state).unwrap().push(new_emission);
        true
    }

    /// Removes a random segment from a random (non-monosegmental) emission
    /// of a random state, as a new sibling emission. Matches the original's
    /// quirk of reporting success whenever the chosen state had any
    /// emissions at all, even if the emission was monosegmental or the
    /// result duplicated an existing one.
    pub fn remove_segment_from_emission(&mut self, rng: &mut impl Rng) -> bool {
        let Some(&state) = self.inner_states.choose(rng) else {
            return false;
        };
        let emissions = self.get_emissions(state).to_vec();
        let Some(emission) = emissions.choose(rng) else {
            return false;
        };
        let chars: Vec<char> = emission.chars().collect();
        if chars.len() != 1 {
            let deletion_index = rng.gen_range(0..chars.len());
            let new_emission: String = chars
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != deletion_index)
                .map(|(_, c)| *c)
                .collect();
            if !self.get_emissions(state).contains(&new_emission) {
                self.emissions.get_mut(&state).unwrap().push(new_emission);
            }
        }
        true
    }

    /// Replaces one segment of a random emission with a different random
    /// segment, as a new sibling emission.
    pub fn change_segment_in_emission(&mut self, table: &FeatureTable, rng: &mut impl Rng) -> bool {
        let Some(&state) = self.inner_states.choose(rng) else {
            return false;
        };
        let emissions = self.get_emissions(state).to_vec();
        let Some(emission) = emissions.choose(rng) else {
            return false;
        };
        let mut chars: Vec<char> = emission.chars().collect();
        let index = rng.gen_range(0..chars.len());
        let old_segment = chars[index].to_string();
        let alternatives: Vec<&str> = table
            .symbols()
            .filter(|&symbol| symbol != old_segment)
            .collect();
        let Some(&new_segment) = alternatives.choose(rng) else {
            return false;
        };
        chars[index] = new_segment.chars().next().unwrap();
        let new_emission: String = chars.into_iter().collect();
        self.emissions.get_mut(&state).unwrap().push(new_emission);
        true
    }

    fn sources(&self) -> Vec<HmmState> {
        let mut sources: Vec<HmmState> = self.inner_states.iter().map(|&n| HmmState::Inner(n)).collect();
        sources.push(HmmState::Initial);
        sources
    }

    /// Total encoding length: symbol counts in the transition table plus
    /// the segments and delimiters of every emission.
    ///
    /// Grounded on `original_source/source/hmm.py::get_encoding_length`.
    pub fn encoding_length(&self, table: &FeatureTable) -> u64 {
        let states_list: Vec<HmmState> = std::iter::once(HmmState::Initial)
            .chain(self.inner_states.iter().map(|&n| HmmState::Inner(n)))
            .chain(std::iter::once(HmmState::Final))
            .collect();

        let mut state_symbols_in_transitions: u64 = 0;
        let mut total_num_of_emissions: u64 = 0;
        let mut segments_in_emissions: u64 = 0;

        for &state in &states_list {
            state_symbols_in_transitions += self.transitions_from(state).len() as u64 + 1;
            if let HmmState::Inner(n) = state {
                for emission in self.get_emissions(n) {
                    total_num_of_emissions += 1;
                    segments_in_emissions += emission.chars().count() as u64;
                }
            }
        }

        let segment_symbol_length = ceiling_log2(table.symbols().count() as u64 + 1) as u64;
        let states_symbol_length = ceiling_log2(states_list.len() as u64 + 1) as u64;

        let num_bits = states_symbol_length + 1;
        let content_usage = state_symbols_in_transitions * states_symbol_length
            + segments_in_emissions * segment_symbol_length;
        let delimiter_usage = (states_list.len() as u64) * segment_symbol_length
            + (states_list.len() as u64) * states_symbol_length
            + total_num_of_emissions * segment_symbol_length;

        num_bits + content_usage + delimiter_usage
    }

    /// Every simple path from the initial to the final state, as sequences
    /// of states.
    pub fn all_paths(&self) -> Vec<Vec<HmmState>> {
        let mut paths = Vec::new();
        let mut stack = vec![(HmmState::Initial, vec![HmmState::Initial])];
        while let Some((vertex, path)) = stack.pop() {
            let mut seen: std::collections::HashSet<HmmState> = path.iter().copied().collect();
            for &next in self.transitions_from(vertex) {
                if seen.contains(&next) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(next);
                if next == HmmState::Final {
                    paths.push(extended);
                } else {
                    seen.insert(next);
                    stack.push((next, extended));
                }
            }
        }
        paths
    }

    /// Human-readable log lines describing this model's transitions,
    /// emissions, and every simple initial-to-final path.
    pub fn log_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push("HMM:".to_string());
        let mut initial_targets: Vec<String> = self
            .transitions_from(HmmState::Initial)
            .iter()
            .map(HmmState::to_string)
            .collect();
        initial_targets.sort();
        lines.push(format!("q0: {initial_targets:?}"));

        let mut sorted_states = self.inner_states.clone();
        sorted_states.sort_unstable();
        for state in sorted_states {
            let mut transitions: Vec<String> = self
                .transitions_from(HmmState::Inner(state))
                .iter()
                .map(HmmState::to_string)
                .collect();
            transitions.sort();
            let mut emissions: Vec<String> = self.get_emissions(state).to_vec();
            emissions.sort();
            lines.push(format!("q{state}: {transitions:?}, {emissions:?}"));
        }

        for path in self.all_paths() {
            let rendered: Vec<String> = path.iter().map(HmmState::to_string).collect();
            lines.push(rendered.join("->"));
        }
        lines
    }

    /// Builds the derived NFA: one pair of boundary states per inner state
    /// connected by epsilon arcs along the transition graph, with every
    /// emission expanded into a chain of single-character arcs through
    /// fresh intermediate states.
    ///
    /// Grounded on `original_source/source/hmm.py::_get_nfa`.
    pub fn to_nfa(&self) -> Nfa {
        let mut nfa = Nfa::new();
        let initial = nfa.add_state();
        nfa.set_initial(initial);
        let final_state = nfa.add_state();
        nfa.set_final(final_state);

        let mut start = HashMap::new();
        let mut end = HashMap::new();
        let mut sorted_inner = self.inner_states.clone();
        sorted_inner.sort_unstable();
        for &state in &sorted_inner {
            start.insert(state, nfa.add_state());
            end.insert(state, nfa.add_state());
        }

        for (&from, targets) in &self.transitions {
            let from_end = match from {
                HmmState::Initial => initial,
                HmmState::Inner(n) => end[&n],
                HmmState::Final => continue,
            };
            for &to in targets {
                let to_start = match to {
                    HmmState::Initial => initial,
                    HmmState::Inner(n) => start[&n],
                    HmmState::Final => final_state,
                };
                nfa.add_epsilon_arc(from_end, to_start);
            }
        }

        for &state in &sorted_inner {
            let state_start = start[&state];
            let state_end = end[&state];
            for emission in self.get_emissions(state) {
                let chars: Vec<char> = emission.chars().collect();
                if chars.is_empty() {
                    continue;
                }
                let mut previous = state_start;
                for (index, ch) in chars.iter().enumerate() {
                    let next = if index + 1 == chars.len() {
                        state_end
                    } else {
                        nfa.add_state()
                    };
                    nfa.add_arc(previous, ch.to_string(), next);
                    previous = next;
                }
            }
        }

        nfa
    }

    /// Every distinct non-empty string the model's derived NFA accepts up
    /// to `max_length` characters.
    pub fn get_string_words_up_to_length(&self, max_length: usize) -> Vec<String> {
        self.to_nfa().enumerate_strings(max_length)
    }

    /// Renders the HMM's own state graph (not its derived NFA) as a
    /// Graphviz `.dot` digraph: one node per state, transitions as plain
    /// edges, and each inner state's emissions listed in its label.
    ///
    /// Grounded on `original_source/source/debug_tools.py::write_to_dot`.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph Hmm {\n    rankdir=LR;\n");
        out.push_str("    q0 [shape=point,label=\"q0\"];\n");
        out.push_str("    qf [shape=doublecircle];\n");
        for &state in &self.inner_states {
            let emissions = self.get_emissions(state).join(", ");
            out.push_str(&format!("    q{state} [shape=circle,label=\"q{state}\\n[{emissions}]\"];\n"));
        }
        let mut states: Vec<HmmState> = vec![HmmState::Initial, HmmState::Final];
        states.extend(self.inner_states.iter().map(|&n| HmmState::Inner(n)));
        for state in states {
            for &destination in self.transitions_from(state) {
                out.push_str(&format!("    {state} -> {destination};\n"));
            }
        }
        out.push_str("}\n");
        out
    }
}

/// Picks one symbol uniformly from the alphabet, `None` for an empty table.
fn random_segment(table: &FeatureTable, rng: &mut impl Rng) -> Option<String> {
    let alphabet: Vec<&str> = table.symbols().collect();
    alphabet.choose(rng).map(|s| s.to_string())
}
