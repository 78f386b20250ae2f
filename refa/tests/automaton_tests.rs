//! End-to-end tests for the pattern -> NFA -> DFA -> minimized pipeline
//!
//! Deterministic fixtures cover the published transition tables; the
//! property tests drive randomly generated ASTs through the full pipeline
//! and check every stage against the reference NFA simulator.

use std::collections::BTreeSet;

use refa::{Ast, Dfa, DfaTransitionTable, Error, Nfa, Quantifier, UnsupportedFeatureError};

fn table(rows: &[(usize, &[(char, usize)])]) -> DfaTransitionTable {
    rows.iter()
        .map(|&(state, transitions)| (state, transitions.iter().copied().collect()))
        .collect()
}

mod languages {
    use super::*;

    #[test]
    fn test_char_language() {
        let nfa = refa::to_nfa("a").unwrap();
        assert!(nfa.matches("a"));
        assert!(!nfa.matches("b"));
        assert!(!nfa.matches(""));
    }

    #[test]
    fn test_union_is_pointwise_or() {
        let left = refa::to_nfa("ab").unwrap();
        let right = refa::to_nfa("a*").unwrap();
        let union = refa::to_nfa("ab|a*").unwrap();
        for input in ["", "a", "b", "ab", "aa", "aab", "ba"] {
            assert_eq!(
                union.matches(input),
                left.matches(input) || right.matches(input),
                "union disagreed on {input:?}"
            );
        }
    }

    #[test]
    fn test_concat_is_associative() {
        let left = refa::to_nfa("(ab)c").unwrap();
        let right = refa::to_nfa("a(bc)").unwrap();
        for input in ["", "a", "ab", "abc", "abcc", "bca"] {
            assert_eq!(left.matches(input), right.matches(input));
        }
    }

    #[test]
    fn test_star_always_accepts_empty() {
        for pattern in ["a*", "(ab)*", "(a|b)*"] {
            assert!(refa::to_nfa(pattern).unwrap().matches(""));
        }
    }

    #[test]
    fn test_plus_accepts_empty_only_if_inner_does() {
        assert!(!refa::to_nfa("a+").unwrap().matches(""));
        assert!(refa::to_nfa("(a?)+").unwrap().matches(""));
    }
}

mod dfa_tables {
    use super::*;

    #[test]
    fn test_disjunction_chain() {
        let mut dfa = refa::to_dfa("a|b|c|d").unwrap();
        assert_eq!(
            dfa.transition_table(),
            &table(&[
                (1, &[('a', 5), ('b', 4), ('c', 3), ('d', 2)]),
                (2, &[]),
                (3, &[]),
                (4, &[]),
                (5, &[]),
            ])
        );
        dfa.minimize();
        assert_eq!(
            dfa.transition_table(),
            &table(&[(1, &[('a', 2), ('b', 2), ('c', 2), ('d', 2)]), (2, &[])])
        );
        assert_eq!(dfa.accepting_state_numbers(), &BTreeSet::from([2]));
    }

    #[test]
    fn test_star() {
        let mut dfa = refa::to_dfa("a*").unwrap();
        assert_eq!(
            dfa.transition_table(),
            &table(&[(1, &[('a', 2)]), (2, &[('a', 2)])])
        );
        dfa.minimize();
        assert_eq!(dfa.transition_table(), &table(&[(1, &[('a', 1)])]));
        assert_eq!(dfa.accepting_state_numbers(), &BTreeSet::from([1]));
    }

    #[test]
    fn test_char_then_star_collapses() {
        let mut dfa = refa::to_dfa("aa*").unwrap();
        assert_eq!(dfa.transition_table().len(), 3);
        dfa.minimize();
        assert_eq!(
            dfa.transition_table(),
            &table(&[(1, &[('a', 2)]), (2, &[('a', 2)])])
        );
        assert_eq!(dfa.accepting_state_numbers(), &BTreeSet::from([2]));
    }

    #[test]
    fn test_concat_already_minimal() {
        let mut dfa = refa::to_dfa("ab").unwrap();
        let before = dfa.transition_table().clone();
        assert_eq!(
            before,
            table(&[(1, &[('a', 3)]), (2, &[]), (3, &[('b', 2)])])
        );
        dfa.minimize();
        assert_eq!(dfa.transition_table(), &before);
    }
}

mod unsupported {
    use super::*;

    #[test]
    fn test_character_class_named_in_error() {
        let err = refa::to_nfa("x[abc]").unwrap_err();
        assert_eq!(
            err,
            Error::Unsupported(UnsupportedFeatureError::NodeType("CharacterClass"))
        );
    }

    #[test]
    fn test_flags_rejected_through_literal_form() {
        let err = refa::to_nfa("/ab/i").unwrap_err();
        assert_eq!(
            err,
            Error::Unsupported(UnsupportedFeatureError::Flags("i".to_string()))
        );
    }

    #[test]
    fn test_range_quantifier_rejected() {
        assert!(refa::to_dfa("a{2,3}").is_err());
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// ASTs over the shapes the automaton compiler supports
    fn supported_ast() -> impl Strategy<Value = Ast> {
        let leaf = prop_oneof![
            prop::sample::select(vec!['a', 'b', 'c']).prop_map(Ast::simple_char),
            Just(Ast::Alternative {
                expressions: vec![]
            }),
        ];
        leaf.prop_recursive(3, 16, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(Ast::alternative),
                (inner.clone(), inner.clone())
                    .prop_map(|(left, right)| Ast::disjunction(left, right)),
                inner
                    .clone()
                    .prop_map(|e| Ast::repetition(e, Quantifier::ZeroOrMore)),
                inner
                    .clone()
                    .prop_map(|e| Ast::repetition(e, Quantifier::OneOrMore)),
                inner
                    .clone()
                    .prop_map(|e| Ast::repetition(e, Quantifier::ZeroOrOne)),
                inner.prop_map(Ast::group),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_dfa_agrees_with_nfa(ast in supported_ast(), input in "[abc]{0,5}") {
            let nfa = Nfa::from_ast(&ast).unwrap();
            let expected = nfa.matches(&input);
            let dfa = Dfa::new(nfa);
            prop_assert_eq!(dfa.matches(&input), expected);
        }

        #[test]
        fn prop_minimization_preserves_language(ast in supported_ast(), input in "[abc]{0,5}") {
            let mut dfa = Dfa::new(Nfa::from_ast(&ast).unwrap());
            let expected = dfa.matches(&input);
            let states_before = dfa.transition_table().len();
            dfa.minimize();
            prop_assert_eq!(dfa.matches(&input), expected);
            prop_assert!(dfa.transition_table().len() <= states_before);
        }

        #[test]
        fn prop_pattern_rendering_compiles_identically(ast in supported_ast(), input in "[abc]{0,4}") {
            let direct = Nfa::from_ast(&ast).unwrap();
            let reparsed = refa::to_nfa(&ast.to_pattern_string()).unwrap();
            prop_assert_eq!(direct.matches(&input), reparsed.matches(&input));
        }
    }
}
