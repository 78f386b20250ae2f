//! Abstract Syntax Tree (AST) for regex patterns
//!
//! The AST is a closed set of node kinds, as produced by the pattern
//! parser. The automaton compiler consumes a subset of these shapes;
//! the remaining kinds exist so that unsupported constructs are parsed,
//! carried, and rejected with a precise error instead of being silently
//! mishandled.

use std::fmt;

/// A node in the AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// The pattern root: a body expression plus flags (e.g. from `/ab/i`)
    RegExp {
        /// The pattern body
        body: Box<Ast>,
        /// Flags, empty for a bare pattern
        flags: String,
    },

    /// Binary alternation `left|right`; `a|b|c` nests left-associatively
    Disjunction {
        /// Left operand
        left: Box<Ast>,
        /// Right operand
        right: Box<Ast>,
    },

    /// A concatenation of expressions; an empty list matches `""`
    Alternative {
        /// The concatenated expressions, in order
        expressions: Vec<Ast>,
    },

    /// A quantified expression (e.g. `a*`, `a+`, `a?`, `a{2,3}`)
    Repetition {
        /// The repeated expression
        expression: Box<Ast>,
        /// The quantifier
        quantifier: Quantifier,
    },

    /// A single character
    Char {
        /// How the character was written
        kind: CharKind,
        /// The character value
        value: char,
    },

    /// A character class `[abc]`, `[^abc]`, `[a-z]`
    CharacterClass {
        /// Whether the class is negated
        negated: bool,
        /// The items in the class
        items: Vec<ClassItem>,
    },

    /// A group `(...)`; transparent to the automaton compiler
    Group {
        /// The grouped expression
        expression: Box<Ast>,
    },

    /// A zero-width assertion (`^`, `$`)
    Assertion {
        /// The assertion kind
        kind: AssertionKind,
    },

    /// A backreference `\1`..`\9`
    Backreference {
        /// The referenced group number
        number: u32,
    },
}

/// How a `Char` node was written in the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    /// A plain character, possibly escaped (`a`, `\*`)
    Simple,
    /// A metacharacter (`.`, `\d`, `\w`, `\s` and their negations)
    Meta,
}

impl CharKind {
    /// The kind name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            CharKind::Simple => "simple",
            CharKind::Meta => "meta",
        }
    }
}

/// An item in a character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
    /// A single character
    Char(char),
    /// A character range (e.g. `a-z`)
    Range(char, char),
}

/// A zero-width assertion kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    /// Start of input (`^`)
    Start,
    /// End of input (`$`)
    End,
}

/// A repetition quantifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Zero or more (`*`)
    ZeroOrMore,
    /// One or more (`+`)
    OneOrMore,
    /// Zero or one (`?`)
    ZeroOrOne,
    /// A counted range (`{n}`, `{n,}`, `{n,m}`)
    Range {
        /// Minimum repetitions
        from: u32,
        /// Maximum repetitions, `None` for open-ended
        to: Option<u32>,
    },
}

impl Quantifier {
    /// The quantifier as written in a pattern, used in diagnostics
    pub fn kind_str(&self) -> String {
        match self {
            Quantifier::ZeroOrMore => "*".to_string(),
            Quantifier::OneOrMore => "+".to_string(),
            Quantifier::ZeroOrOne => "?".to_string(),
            Quantifier::Range { from, to: None } => format!("{{{from},}}"),
            Quantifier::Range {
                from,
                to: Some(to),
            } => {
                if from == to {
                    format!("{{{from}}}")
                } else {
                    format!("{{{from},{to}}}")
                }
            }
        }
    }
}

impl Ast {
    /// Wrap a body expression into a pattern root
    pub fn regexp(body: Ast, flags: impl Into<String>) -> Self {
        Ast::RegExp {
            body: Box::new(body),
            flags: flags.into(),
        }
    }

    /// Create a binary disjunction
    pub fn disjunction(left: Ast, right: Ast) -> Self {
        Ast::Disjunction {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a concatenation; a single element collapses to itself
    pub fn alternative(expressions: Vec<Ast>) -> Self {
        match expressions.len() {
            1 => expressions.into_iter().next().unwrap(),
            _ => Ast::Alternative { expressions },
        }
    }

    /// Create a simple character
    pub fn simple_char(value: char) -> Self {
        Ast::Char {
            kind: CharKind::Simple,
            value,
        }
    }

    /// Create a metacharacter
    pub fn meta_char(value: char) -> Self {
        Ast::Char {
            kind: CharKind::Meta,
            value,
        }
    }

    /// Create a quantified expression
    pub fn repetition(expression: Ast, quantifier: Quantifier) -> Self {
        Ast::Repetition {
            expression: Box::new(expression),
            quantifier,
        }
    }

    /// Create a group
    pub fn group(expression: Ast) -> Self {
        Ast::Group {
            expression: Box::new(expression),
        }
    }

    /// Create a character class
    pub fn character_class(negated: bool, items: Vec<ClassItem>) -> Self {
        Ast::CharacterClass { negated, items }
    }

    /// The node type name, as used in diagnostics
    pub fn node_type(&self) -> &'static str {
        match self {
            Ast::RegExp { .. } => "RegExp",
            Ast::Disjunction { .. } => "Disjunction",
            Ast::Alternative { .. } => "Alternative",
            Ast::Repetition { .. } => "Repetition",
            Ast::Char { .. } => "Char",
            Ast::CharacterClass { .. } => "CharacterClass",
            Ast::Group { .. } => "Group",
            Ast::Assertion { .. } => "Assertion",
            Ast::Backreference { .. } => "Backreference",
        }
    }

    /// Render the node back to pattern text
    pub fn to_pattern_string(&self) -> String {
        match self {
            Ast::RegExp { body, flags } => {
                if flags.is_empty() {
                    body.to_pattern_string()
                } else {
                    format!("/{}/{}", body.to_pattern_string(), flags)
                }
            }
            Ast::Disjunction { left, right } => format!(
                "{}|{}",
                left.to_pattern_string(),
                right.to_pattern_string()
            ),
            Ast::Alternative { expressions } => expressions
                .iter()
                .map(|e| match e {
                    // A bare disjunction would swallow its siblings.
                    Ast::Disjunction { .. } => format!("({})", e.to_pattern_string()),
                    _ => e.to_pattern_string(),
                })
                .collect(),
            Ast::Repetition {
                expression,
                quantifier,
            } => {
                let needs_parens = matches!(
                    expression.as_ref(),
                    Ast::Disjunction { .. } | Ast::Alternative { .. }
                );
                let inner = expression.to_pattern_string();
                if needs_parens {
                    format!("({}){}", inner, quantifier.kind_str())
                } else {
                    format!("{}{}", inner, quantifier.kind_str())
                }
            }
            Ast::Char { kind, value } => match kind {
                CharKind::Simple if is_special(*value) => format!("\\{value}"),
                _ => value.to_string(),
            },
            Ast::CharacterClass { negated, items } => {
                let mut out = String::from("[");
                if *negated {
                    out.push('^');
                }
                for item in items {
                    match item {
                        ClassItem::Char(c) => out.push(*c),
                        ClassItem::Range(start, end) => {
                            out.push(*start);
                            out.push('-');
                            out.push(*end);
                        }
                    }
                }
                out.push(']');
                out
            }
            Ast::Group { expression } => format!("({})", expression.to_pattern_string()),
            Ast::Assertion { kind } => match kind {
                AssertionKind::Start => "^".to_string(),
                AssertionKind::End => "$".to_string(),
            },
            Ast::Backreference { number } => format!("\\{number}"),
        }
    }
}

/// Characters that must be escaped to read as themselves
fn is_special(c: char) -> bool {
    matches!(
        c,
        '|' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '.' | '\\' | '/'
    )
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pattern_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char() {
        let node = Ast::simple_char('a');
        assert_eq!(node.to_pattern_string(), "a");
    }

    #[test]
    fn test_escaped_char() {
        let node = Ast::simple_char('*');
        assert_eq!(node.to_pattern_string(), "\\*");
    }

    #[test]
    fn test_alternative() {
        let node = Ast::alternative(vec![
            Ast::simple_char('a'),
            Ast::simple_char('b'),
            Ast::simple_char('c'),
        ]);
        assert_eq!(node.to_pattern_string(), "abc");
    }

    #[test]
    fn test_alternative_collapses_single() {
        let node = Ast::alternative(vec![Ast::simple_char('a')]);
        assert_eq!(node, Ast::simple_char('a'));
    }

    #[test]
    fn test_disjunction() {
        let node = Ast::disjunction(Ast::simple_char('a'), Ast::simple_char('b'));
        assert_eq!(node.to_pattern_string(), "a|b");
    }

    #[test]
    fn test_repetition() {
        let node = Ast::repetition(Ast::simple_char('a'), Quantifier::ZeroOrMore);
        assert_eq!(node.to_pattern_string(), "a*");
    }

    #[test]
    fn test_repetition_parenthesizes_disjunction() {
        let node = Ast::repetition(
            Ast::disjunction(Ast::simple_char('a'), Ast::simple_char('b')),
            Quantifier::OneOrMore,
        );
        assert_eq!(node.to_pattern_string(), "(a|b)+");
    }

    #[test]
    fn test_range_quantifier_kind_str() {
        assert_eq!(
            Quantifier::Range { from: 2, to: None }.kind_str(),
            "{2,}"
        );
        assert_eq!(
            Quantifier::Range {
                from: 2,
                to: Some(3)
            }
            .kind_str(),
            "{2,3}"
        );
        assert_eq!(
            Quantifier::Range {
                from: 2,
                to: Some(2)
            }
            .kind_str(),
            "{2}"
        );
    }

    #[test]
    fn test_group() {
        let node = Ast::group(Ast::alternative(vec![
            Ast::simple_char('a'),
            Ast::simple_char('b'),
        ]));
        assert_eq!(node.to_pattern_string(), "(ab)");
    }

    #[test]
    fn test_character_class() {
        let node = Ast::character_class(
            false,
            vec![ClassItem::Char('a'), ClassItem::Range('0', '9')],
        );
        assert_eq!(node.to_pattern_string(), "[a0-9]");
        assert_eq!(node.node_type(), "CharacterClass");
    }

    #[test]
    fn test_regexp_with_flags() {
        let node = Ast::regexp(Ast::simple_char('a'), "i");
        assert_eq!(node.to_pattern_string(), "/a/i");
    }

    #[test]
    fn test_node_type_names() {
        assert_eq!(Ast::simple_char('a').node_type(), "Char");
        assert_eq!(
            Ast::Assertion {
                kind: AssertionKind::Start
            }
            .node_type(),
            "Assertion"
        );
        assert_eq!(Ast::Backreference { number: 1 }.node_type(), "Backreference");
    }
}
