//! DFA construction via subset construction
//!
//! Converts an NFA's transition table into a deterministic automaton.
//! Each DFA state is a *label*: the sorted set of NFA state numbers
//! reachable as one deterministic state. After the worklist exhausts,
//! labels are remapped to small integers and the table is rebuilt with
//! integer keys.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::minimizer;
use crate::nfa::Nfa;

/// A DFA state before integer remapping: the ascending NFA state numbers
/// it stands for
pub type StateLabel = Vec<usize>;

/// An integer-keyed DFA transition table
pub type DfaTransitionTable = BTreeMap<usize, BTreeMap<char, usize>>;

/// A deterministic finite automaton derived from an [`Nfa`]
///
/// The table and accepting set are derived once at construction.
/// [`minimize`](Self::minimize) replaces them in place; the
/// pre-minimization originals stay accessible.
#[derive(Debug)]
pub struct Dfa {
    nfa: Nfa,
    start_state: usize,
    transition_table: DfaTransitionTable,
    accepting_state_numbers: BTreeSet<usize>,
    labels: BTreeMap<usize, StateLabel>,
    original_start_state: usize,
    original_transition_table: DfaTransitionTable,
    original_accepting_state_numbers: BTreeSet<usize>,
}

impl Dfa {
    /// Run subset construction over the NFA's transition table
    pub fn new(nfa: Nfa) -> Self {
        let (labels_in_order, label_rows) = Self::explore(&nfa);
        let numbering = Self::number_labels(&labels_in_order);

        let nfa_accepting = nfa.accepting_state_numbers().clone();
        let mut transition_table = DfaTransitionTable::new();
        let mut accepting_state_numbers = BTreeSet::new();
        let mut labels = BTreeMap::new();
        for label in &labels_in_order {
            let number = numbering[label];
            let row = label_rows[label]
                .iter()
                .map(|(&symbol, target)| (symbol, numbering[target]))
                .collect();
            transition_table.insert(number, row);
            if label.iter().any(|state| nfa_accepting.contains(state)) {
                accepting_state_numbers.insert(number);
            }
            labels.insert(number, label.clone());
        }

        let start_state = numbering[&labels_in_order[0]];
        Dfa {
            nfa,
            start_state,
            original_start_state: start_state,
            original_transition_table: transition_table.clone(),
            original_accepting_state_numbers: accepting_state_numbers.clone(),
            transition_table,
            accepting_state_numbers,
            labels,
        }
    }

    /// Worklist pass: discover all reachable labels and their per-symbol
    /// destination labels
    ///
    /// The worklist is last-in-first-out: newly discovered labels are
    /// pushed to the front, and a label's row is recorded when popped.
    fn explore(nfa: &Nfa) -> (Vec<StateLabel>, HashMap<StateLabel, BTreeMap<char, StateLabel>>) {
        let table = nfa.transition_table();
        let alphabet = table.alphabet();

        let start_label: StateLabel = table.row(1).epsilon_closure().to_vec();
        let mut seen: HashSet<StateLabel> = HashSet::from([start_label.clone()]);
        let mut worklist: VecDeque<StateLabel> = VecDeque::from([start_label]);
        let mut labels_in_order = Vec::new();
        let mut label_rows = HashMap::new();

        while let Some(label) = worklist.pop_front() {
            let mut row = BTreeMap::new();
            for &symbol in alphabet {
                // Union of the epsilon closures of every direct
                // destination on this symbol, over all member states.
                let mut on_symbol = BTreeSet::new();
                for &state in &label {
                    for &dest in table.row(state).on_char(symbol) {
                        on_symbol.extend(table.row(dest).epsilon_closure().iter().copied());
                    }
                }
                if on_symbol.is_empty() {
                    continue;
                }
                let candidate: StateLabel = on_symbol.into_iter().collect();
                if seen.insert(candidate.clone()) {
                    worklist.push_front(candidate.clone());
                }
                row.insert(symbol, candidate);
            }
            labels_in_order.push(label.clone());
            label_rows.insert(label, row);
        }

        (labels_in_order, label_rows)
    }

    /// Assign sequential integers to labels
    ///
    /// Layout contract for the published tables: single-state labels get
    /// the lowest numbers in ascending order of their member state,
    /// compound labels follow in discovery order.
    fn number_labels(labels_in_order: &[StateLabel]) -> HashMap<StateLabel, usize> {
        let mut singles: Vec<&StateLabel> =
            labels_in_order.iter().filter(|label| label.len() == 1).collect();
        singles.sort_by_key(|label| label[0]);

        let mut numbering = HashMap::new();
        let mut next = 1;
        for label in singles {
            numbering.insert(label.clone(), next);
            next += 1;
        }
        for label in labels_in_order {
            if label.len() > 1 {
                numbering.insert(label.clone(), next);
                next += 1;
            }
        }
        numbering
    }

    /// The NFA this DFA was derived from
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// The DFA alphabet (same as the NFA's)
    pub fn alphabet(&self) -> &[char] {
        self.nfa.alphabet()
    }

    /// The current integer-keyed transition table
    pub fn transition_table(&self) -> &DfaTransitionTable {
        &self.transition_table
    }

    /// The current accepting state numbers
    pub fn accepting_state_numbers(&self) -> &BTreeSet<usize> {
        &self.accepting_state_numbers
    }

    /// The state the matcher starts in
    pub fn start_state(&self) -> usize {
        self.start_state
    }

    /// Which NFA states each (pre-minimization) DFA state stands for
    pub fn state_labels(&self) -> &BTreeMap<usize, StateLabel> {
        &self.labels
    }

    /// The transition table as derived by subset construction, before any
    /// minimization
    pub fn original_transition_table(&self) -> &DfaTransitionTable {
        &self.original_transition_table
    }

    /// The accepting set before any minimization
    pub fn original_accepting_state_numbers(&self) -> &BTreeSet<usize> {
        &self.original_accepting_state_numbers
    }

    /// The start state before any minimization
    pub fn original_start_state(&self) -> usize {
        self.original_start_state
    }

    /// Whether the DFA accepts `input`
    ///
    /// Follows table lookups per character; an undefined transition is an
    /// immediate rejection.
    pub fn matches(&self, input: &str) -> bool {
        let mut state = self.start_state;
        for c in input.chars() {
            match self
                .transition_table
                .get(&state)
                .and_then(|row| row.get(&c))
            {
                Some(&next) => state = next,
                None => return false,
            }
        }
        self.accepting_state_numbers.contains(&state)
    }

    /// Reduce the DFA to the minimal equivalent automaton, in place
    ///
    /// Replaces the transition table and accepting set; the
    /// pre-minimization originals remain available through
    /// [`original_transition_table`](Self::original_transition_table) and
    /// [`original_accepting_state_numbers`](Self::original_accepting_state_numbers).
    pub fn minimize(&mut self) -> &mut Self {
        let minimized = minimizer::minimize_table(
            &self.transition_table,
            &self.accepting_state_numbers,
            self.nfa.alphabet(),
            self.start_state,
        );
        self.transition_table = minimized.table;
        self.accepting_state_numbers = minimized.accepting;
        self.start_state = minimized.start;
        self
    }

    /// Render the current table as a Graphviz digraph
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph dfa {\n  rankdir=LR;\n");
        dot.push_str("  start [shape=plaintext label=\"\"];\n");
        for state in &self.accepting_state_numbers {
            dot.push_str(&format!("  s{state} [shape=doublecircle];\n"));
        }
        dot.push_str("  node [shape=circle];\n");
        dot.push_str(&format!("  start -> s{};\n", self.start_state));
        for (state, row) in &self.transition_table {
            for (symbol, target) in row {
                dot.push_str(&format!("  s{state} -> s{target} [label=\"{symbol}\"];\n"));
            }
        }
        dot.push('}');
        dot
    }
}
