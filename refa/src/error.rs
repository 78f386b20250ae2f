//! Error types for the automaton toolkit
//!
//! Errors are categorized by their source: pattern parsing, or compilation
//! of an AST into a finite automaton. Matching, table derivation and
//! minimization are total over well-formed automata and cannot fail.

use thiserror::Error;

/// The main error type for the toolkit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Errors that occur while parsing a pattern string
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Errors raised by the automaton compiler for AST shapes it rejects
    #[error("unsupported feature: {0}")]
    Unsupported(#[from] UnsupportedFeatureError),
}

/// Errors that occur during pattern parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Encountered a character that cannot start an atom
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar {
        /// The offending character
        found: char,
        /// Byte offset in the pattern
        position: usize,
    },

    /// Unexpected end of pattern
    #[error("unexpected end of pattern")]
    UnexpectedEof,

    /// Unclosed group (e.g. `(ab` without `)`)
    #[error("unclosed group")]
    UnclosedGroup,

    /// Unclosed character class (e.g. `[abc` without `]`)
    #[error("unclosed character class")]
    UnclosedCharacterClass,

    /// A quantifier with nothing to repeat (e.g. `*a`)
    #[error("nothing to repeat at position {0}")]
    NothingToRepeat(usize),

    /// Malformed range quantifier (e.g. `a{2,1}` or `a{}`)
    #[error("invalid quantifier: {0}")]
    InvalidQuantifier(String),

    /// A `/pattern/flags` literal without the closing slash
    #[error("unterminated regex literal")]
    UnterminatedLiteral,

    /// Unknown flag character in a `/pattern/flags` literal
    #[error("invalid flag '{0}'")]
    InvalidFlag(char),
}

/// Errors raised by the AST-to-NFA compiler
///
/// Construction aborts synchronously on the first unsupported shape; no
/// partial automaton is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedFeatureError {
    /// The pattern carries flags (e.g. `/ab/i`)
    #[error("flags are not supported: '{0}'")]
    Flags(String),

    /// A `Char` node of any kind other than simple
    #[error("only simple characters are supported, found {kind} char '{value}'")]
    CharKind {
        /// The char kind name (e.g. "meta")
        kind: &'static str,
        /// The char value as written
        value: char,
    },

    /// A repetition quantifier other than `*`, `+` or `?`
    #[error("unknown quantifier kind: {0}")]
    QuantifierKind(String),

    /// An AST node type without a compiler rule
    #[error("{0} nodes are not supported")]
    NodeType(&'static str),
}

/// Result type alias for toolkit operations
pub type Result<T> = std::result::Result<T, Error>;
