//! refa — a regex finite-automaton toolkit
//!
//! Parses a pattern into an AST, compiles the AST into a Thompson-style
//! NFA, converts the NFA to a DFA via subset construction, and reduces
//! the DFA to a minimal equivalent via partition refinement.
//!
//! ```
//! let mut dfa = refa::to_dfa("(a|b)*c").unwrap();
//! dfa.minimize();
//! assert!(dfa.matches("abbac"));
//! assert!(!dfa.matches("abba"));
//! ```

pub mod ast;
pub mod dfa;
pub mod error;
pub mod fragment;
pub mod minimizer;
pub mod nfa;
pub mod parser;

pub use ast::{AssertionKind, Ast, CharKind, ClassItem, Quantifier};
pub use dfa::{Dfa, DfaTransitionTable, StateLabel};
pub use error::{Error, ParseError, Result, UnsupportedFeatureError};
pub use fragment::{Fragment, State, StateGraph, StateId, Symbol};
pub use minimizer::minimize;
pub use nfa::{Nfa, StateRow, TransitionTable};
pub use parser::{Parser, parse};

/// Compile a pattern string (or `/pattern/flags` literal) into an NFA
pub fn to_nfa(pattern: &str) -> Result<Nfa> {
    Nfa::from_pattern(pattern)
}

/// Compile a pattern string into a DFA
pub fn to_dfa(pattern: &str) -> Result<Dfa> {
    Ok(Dfa::new(to_nfa(pattern)?))
}

/// Whether `pattern` accepts `input`, via the DFA pipeline
pub fn matches(pattern: &str, input: &str) -> Result<bool> {
    Ok(to_dfa(pattern)?.matches(input))
}
