//! Parser for regex patterns
//!
//! A recursive descent parser that converts a pattern string into an AST.
//! Accepts either a bare pattern (`a|b*`) or a regex literal with flags
//! (`/a|b*/i`); flags are carried on the `RegExp` root and rejected later
//! by the automaton compiler.
//!
//! Grammar (in order of precedence, lowest to highest):
//!   pattern     := '/' disjunction '/' flags | disjunction
//!   disjunction := alternative ( '|' alternative )*
//!   alternative := term*
//!   term        := atom quantifier*
//!   quantifier  := '*' | '+' | '?' | '{' number (',' number?)? '}'
//!   atom        := group | char_class | assertion | '.' | escape | literal
//!   group       := '(' disjunction ')'
//!   char_class  := '[' '^'? class_item+ ']'
//!   class_item  := char | char '-' char | '\' char
//!   assertion   := '^' | '$'
//!   escape      := '\' ( digit | meta | char )

use crate::ast::{AssertionKind, Ast, ClassItem, Quantifier};
use crate::error::ParseError;

/// Parse a pattern string or `/pattern/flags` literal into an AST
///
/// The returned node is always a `RegExp` root; a bare pattern gets empty
/// flags.
pub fn parse(pattern: &str) -> Result<Ast, ParseError> {
    if let Some(rest) = pattern.strip_prefix('/') {
        let end = rest.rfind('/').ok_or(ParseError::UnterminatedLiteral)?;
        let (body, flags) = (&rest[..end], &rest[end + 1..]);
        if let Some(bad) = flags.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(ParseError::InvalidFlag(bad));
        }
        let body = Parser::new(body).parse()?;
        Ok(Ast::regexp(body, flags))
    } else {
        let body = Parser::new(pattern).parse()?;
        Ok(Ast::regexp(body, ""))
    }
}

/// Parser for a pattern body
pub struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    /// Create a new parser for the given pattern body
    pub fn new(input: &str) -> Self {
        Parser {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Parse the entire input and return the body AST
    pub fn parse(&mut self) -> Result<Ast, ParseError> {
        let body = self.parse_disjunction()?;

        // Ensure we've consumed the whole pattern
        if let Some(c) = self.peek() {
            return Err(ParseError::UnexpectedChar {
                found: c,
                position: self.pos,
            });
        }

        Ok(body)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// disjunction := alternative ( '|' alternative )*
    ///
    /// Nests left-associatively: `a|b|c` parses as `(a|b)|c`.
    fn parse_disjunction(&mut self) -> Result<Ast, ParseError> {
        let mut node = self.parse_alternative()?;

        while self.eat('|') {
            let right = self.parse_alternative()?;
            node = Ast::disjunction(node, right);
        }

        Ok(node)
    }

    /// alternative := term*
    ///
    /// An empty alternative (as in `a|` or `()`) yields an `Alternative`
    /// with no expressions, which the compiler treats as epsilon.
    fn parse_alternative(&mut self) -> Result<Ast, ParseError> {
        let mut expressions = Vec::new();

        while !matches!(self.peek(), None | Some('|') | Some(')')) {
            expressions.push(self.parse_term()?);
        }

        Ok(Ast::alternative(expressions))
    }

    /// term := atom quantifier*
    fn parse_term(&mut self) -> Result<Ast, ParseError> {
        let mut node = self.parse_atom()?;

        loop {
            let quantifier = match self.peek() {
                Some('*') => {
                    self.bump();
                    Quantifier::ZeroOrMore
                }
                Some('+') => {
                    self.bump();
                    Quantifier::OneOrMore
                }
                Some('?') => {
                    self.bump();
                    Quantifier::ZeroOrOne
                }
                Some('{') => self.parse_range_quantifier()?,
                _ => break,
            };
            node = Ast::repetition(node, quantifier);
        }

        Ok(node)
    }

    /// quantifier := '{' number (',' number?)? '}'
    fn parse_range_quantifier(&mut self) -> Result<Quantifier, ParseError> {
        let start = self.pos;
        self.bump(); // consume '{'

        let from = self.parse_number(start)?;
        let to = if self.eat(',') {
            if self.peek() == Some('}') {
                None
            } else {
                Some(self.parse_number(start)?)
            }
        } else {
            Some(from)
        };

        if !self.eat('}') {
            return Err(ParseError::InvalidQuantifier(self.slice_from(start)));
        }

        if let Some(to) = to {
            if from > to {
                return Err(ParseError::InvalidQuantifier(self.slice_from(start)));
            }
        }

        Ok(Quantifier::Range { from, to })
    }

    fn parse_number(&mut self, context_start: usize) -> Result<u32, ParseError> {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.bump();
            } else {
                break;
            }
        }
        digits
            .parse()
            .map_err(|_| ParseError::InvalidQuantifier(self.slice_from(context_start)))
    }

    fn slice_from(&self, start: usize) -> String {
        self.chars[start..self.pos.min(self.chars.len())]
            .iter()
            .collect()
    }

    /// atom := group | char_class | assertion | '.' | escape | literal
    fn parse_atom(&mut self) -> Result<Ast, ParseError> {
        let position = self.pos;
        match self.bump() {
            Some('(') => {
                let inner = self.parse_disjunction()?;
                if !self.eat(')') {
                    return Err(ParseError::UnclosedGroup);
                }
                Ok(Ast::group(inner))
            }
            Some('[') => self.parse_character_class(),
            Some('^') => Ok(Ast::Assertion {
                kind: AssertionKind::Start,
            }),
            Some('$') => Ok(Ast::Assertion {
                kind: AssertionKind::End,
            }),
            Some('.') => Ok(Ast::meta_char('.')),
            Some('\\') => self.parse_escape(),
            Some('*' | '+' | '?') => Err(ParseError::NothingToRepeat(position)),
            Some(c) => Ok(Ast::simple_char(c)),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// escape := '\' ( digit | meta | char )
    ///
    /// `\1`..`\9` are backreferences, `\d` `\w` `\s` (and negations) are
    /// metacharacters, anything else is the escaped character itself.
    fn parse_escape(&mut self) -> Result<Ast, ParseError> {
        match self.bump() {
            Some(c @ '1'..='9') => Ok(Ast::Backreference {
                number: c.to_digit(10).unwrap(),
            }),
            Some(c @ ('d' | 'w' | 's' | 'D' | 'W' | 'S')) => Ok(Ast::meta_char(c)),
            Some(c) => Ok(Ast::simple_char(c)),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// char_class := '[' '^'? class_item+ ']'
    fn parse_character_class(&mut self) -> Result<Ast, ParseError> {
        let negated = self.eat('^');
        let mut items = Vec::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedCharacterClass),
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let start = self.class_char()?;
                    // A '-' forms a range unless it closes the class
                    if self.peek() == Some('-') && self.chars.get(self.pos + 1) != Some(&']') {
                        self.bump(); // consume '-'
                        let end = self.class_char()?;
                        items.push(ClassItem::Range(start, end));
                    } else {
                        items.push(ClassItem::Char(start));
                    }
                }
            }
        }

        Ok(Ast::character_class(negated, items))
    }

    fn class_char(&mut self) -> Result<char, ParseError> {
        match self.bump() {
            Some('\\') => self.bump().ok_or(ParseError::UnclosedCharacterClass),
            Some(c) => Ok(c),
            None => Err(ParseError::UnclosedCharacterClass),
        }
    }
}
