//! NFA construction and simulation
//!
//! Thompson-style construction: the AST is mapped onto fragment-algebra
//! calls, and the resulting graph is wrapped in an [`Nfa`] that derives a
//! numbered transition table, the alphabet, and the accepting-state set.
//! The NFA also carries a recursive reference matcher used to validate
//! the DFA pipeline against; it favors clarity over speed.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::ast::{Ast, CharKind, Quantifier};
use crate::error::{Result, UnsupportedFeatureError};
use crate::fragment::{Fragment, StateGraph, StateId, Symbol};
use crate::parser;

/// A nondeterministic finite automaton
///
/// Owns its state graph. Derived data (transition table, alphabet,
/// accepting set) is computed on first access and cached; the graph is
/// never mutated afterwards.
#[derive(Debug)]
pub struct Nfa {
    graph: StateGraph,
    start: StateId,
    accept: StateId,
    table: OnceCell<TransitionTable>,
}

impl Nfa {
    /// Compile a pattern string (or `/pattern/flags` literal) into an NFA
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let ast = parser::parse(pattern)?;
        Self::from_ast(&ast)
    }

    /// Compile an AST into an NFA
    ///
    /// Rejects unsupported node shapes with [`UnsupportedFeatureError`];
    /// no partial automaton is returned.
    pub fn from_ast(ast: &Ast) -> Result<Self> {
        let mut graph = StateGraph::new();
        let fragment = compile_node(&mut graph, ast)?;
        Ok(Nfa {
            graph,
            start: fragment.in_state,
            accept: fragment.out_state,
            table: OnceCell::new(),
        })
    }

    /// The underlying state graph
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// The entry state
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The exit (accepting) state
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// The numbered transition table, derived on first access
    pub fn transition_table(&self) -> &TransitionTable {
        self.table
            .get_or_init(|| TransitionTable::build(&self.graph, self.start))
    }

    /// Non-epsilon symbols of the graph, in first-visit order
    pub fn alphabet(&self) -> &[char] {
        self.transition_table().alphabet()
    }

    /// Numbers of the accepting states
    pub fn accepting_state_numbers(&self) -> &BTreeSet<usize> {
        self.transition_table().accepting_state_numbers()
    }

    /// Whether the NFA accepts `input`
    ///
    /// Reference simulator: recursive, consuming one character at a time
    /// and exploring epsilon edges without consuming input. A visited set
    /// guards epsilon-only recursion against cycles and is reset whenever
    /// a character is consumed.
    pub fn matches(&self, input: &str) -> bool {
        self.state_matches(self.start, input, &mut HashSet::new())
    }

    fn state_matches(&self, state: StateId, input: &str, visited: &mut HashSet<StateId>) -> bool {
        if !visited.insert(state) {
            return false;
        }

        let current = self.graph.state(state);
        let mut chars = input.chars();
        match chars.next() {
            None => {
                if current.is_accepting() {
                    return true;
                }
                current
                    .transitions_on(Symbol::Epsilon)
                    .iter()
                    .any(|&next| self.state_matches(next, input, visited))
            }
            Some(c) => {
                let rest = chars.as_str();
                let consumed = current
                    .transitions_on(Symbol::Char(c))
                    .iter()
                    .any(|&next| self.state_matches(next, rest, &mut HashSet::new()));
                consumed
                    || current
                        .transitions_on(Symbol::Epsilon)
                        .iter()
                        .any(|&next| self.state_matches(next, input, visited))
            }
        }
    }
}

/// Map an AST node onto fragment-algebra calls
fn compile_node(
    graph: &mut StateGraph,
    node: &Ast,
) -> std::result::Result<Fragment, UnsupportedFeatureError> {
    match node {
        Ast::RegExp { body, flags } => {
            if !flags.is_empty() {
                return Err(UnsupportedFeatureError::Flags(flags.clone()));
            }
            compile_node(graph, body)
        }
        Ast::Alternative { expressions } => {
            let fragments = expressions
                .iter()
                .map(|expression| compile_node(graph, expression))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(graph.concat(fragments))
        }
        Ast::Disjunction { left, right } => {
            let left = compile_node(graph, left)?;
            let right = compile_node(graph, right)?;
            Ok(graph.union_pair(left, right))
        }
        Ast::Repetition {
            expression,
            quantifier,
        } => {
            let fragment = compile_node(graph, expression)?;
            match quantifier {
                Quantifier::ZeroOrMore => Ok(graph.star(fragment)),
                Quantifier::OneOrMore => Ok(graph.plus(fragment)),
                Quantifier::ZeroOrOne => Ok(graph.optional(fragment)),
                other @ Quantifier::Range { .. } => Err(
                    UnsupportedFeatureError::QuantifierKind(other.kind_str()),
                ),
            }
        }
        Ast::Char {
            kind: CharKind::Simple,
            value,
        } => Ok(graph.char_fragment(*value)),
        Ast::Char { kind, value } => Err(UnsupportedFeatureError::CharKind {
            kind: kind.name(),
            value: *value,
        }),
        Ast::Group { expression } => compile_node(graph, expression),
        other => Err(UnsupportedFeatureError::NodeType(other.node_type())),
    }
}

/// The numbered transition table of an NFA
///
/// States are numbered sequentially from 1 by a depth-first traversal
/// from the entry state, so identical graphs always number identically.
/// Each row records per-character destination numbers (epsilon excluded)
/// plus the state's epsilon closure as ascending numbers, self included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    rows: BTreeMap<usize, StateRow>,
    alphabet: Vec<char>,
    accepting: BTreeSet<usize>,
}

/// One row of a [`TransitionTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRow {
    transitions: BTreeMap<char, Vec<usize>>,
    epsilon_closure: Vec<usize>,
}

impl StateRow {
    /// Per-character destination numbers
    pub fn transitions(&self) -> &BTreeMap<char, Vec<usize>> {
        &self.transitions
    }

    /// Destination numbers on the given character, empty if none
    pub fn on_char(&self, c: char) -> &[usize] {
        self.transitions.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The state's epsilon closure, ascending, self included
    pub fn epsilon_closure(&self) -> &[usize] {
        &self.epsilon_closure
    }
}

impl TransitionTable {
    fn build(graph: &StateGraph, start: StateId) -> Self {
        let mut builder = TableBuilder {
            graph,
            numbers: HashMap::new(),
            rows: BTreeMap::new(),
            alphabet: Vec::new(),
            seen_chars: HashSet::new(),
        };
        builder.visit(start);

        let mut rows = BTreeMap::new();
        let mut accepting = BTreeSet::new();
        for (&id, &number) in &builder.numbers {
            let mut epsilon_closure: Vec<usize> = graph
                .epsilon_closure(id)
                .into_iter()
                .map(|member| builder.numbers[&member])
                .collect();
            epsilon_closure.sort_unstable();

            let transitions = builder.rows.remove(&number).unwrap_or_default();
            rows.insert(
                number,
                StateRow {
                    transitions,
                    epsilon_closure,
                },
            );
            if graph.state(id).is_accepting() {
                accepting.insert(number);
            }
        }

        TransitionTable {
            rows,
            alphabet: builder.alphabet,
            accepting,
        }
    }

    /// All rows, keyed by state number
    pub fn rows(&self) -> &BTreeMap<usize, StateRow> {
        &self.rows
    }

    /// Borrow one state's row
    pub fn row(&self, state: usize) -> &StateRow {
        &self.rows[&state]
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no states
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-epsilon symbols in first-visit order
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Numbers of the accepting states
    pub fn accepting_state_numbers(&self) -> &BTreeSet<usize> {
        &self.accepting
    }
}

/// Depth-first numbering pass over the state graph
struct TableBuilder<'a> {
    graph: &'a StateGraph,
    numbers: HashMap<StateId, usize>,
    rows: BTreeMap<usize, BTreeMap<char, Vec<usize>>>,
    alphabet: Vec<char>,
    seen_chars: HashSet<char>,
}

impl TableBuilder<'_> {
    fn visit(&mut self, id: StateId) -> usize {
        if let Some(&number) = self.numbers.get(&id) {
            return number;
        }
        let number = self.numbers.len() + 1;
        self.numbers.insert(id, number);

        let graph = self.graph;
        let mut row = BTreeMap::new();
        for (symbol, dests) in graph.state(id).transitions() {
            match *symbol {
                Symbol::Char(c) => {
                    if self.seen_chars.insert(c) {
                        self.alphabet.push(c);
                    }
                    let numbers: Vec<usize> = dests.iter().map(|&dest| self.visit(dest)).collect();
                    row.insert(c, numbers);
                }
                Symbol::Epsilon => {
                    for &dest in dests {
                        self.visit(dest);
                    }
                }
            }
        }
        self.rows.insert(number, row);

        number
    }
}
