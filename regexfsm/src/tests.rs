//! Cross-stage tests: properties that must hold across the whole pipeline rather than within
//! one module. Unit tests for individual stages live alongside their modules.

use crate::{compile, Compiled};
use proptest::prelude::*;

fn agree(compiled: &Compiled, w: &str) -> bool {
    compiled.simulate(w).is_consistent()
}

/// One row per scenario: a regex, a word, and the expected acceptance verdict all three
/// simulators must agree on.
#[test]
fn concrete_scenarios_agree_across_simulators() {
    let cases: &[(&str, &str, bool)] = &[
        ("a(b|c)*", "abbcbc", true),
        ("a(b|c)*", "a", true),
        ("a(b|c)*", "b", false),
        ("(a|b)*abb", "aabb", true),
        ("(a|b)*abb", "ab", false),
        ("a+", "", false),
        ("a+", "aaa", true),
        ("a?b", "b", true),
        ("a?b", "aab", false),
        ("ε", "", true),
        ("ε", "a", false),
        ("if", "if", true),
        ("if", "ifx", false),
    ];

    for &(regex, w, expected) in cases {
        let compiled = compile(regex, None).expect("compiles");
        let result = compiled.simulate(w);
        assert!(result.is_consistent(), "simulators disagree for {regex:?} / {w:?}: {result:?}");
        assert_eq!(result.accepted(), expected, "wrong verdict for {regex:?} / {w:?}");
    }
}

/// The fixed scenario table: each row must agree across all three simulators and match the
/// expected verdict.
#[test]
fn scenario_table_agrees_across_simulators() {
    let word_cases: &[(&str, &str, bool)] = &[
        ("a(b|c)*", "abbcbc", true),
        ("a(b|c)*", "ad", false),
        ("(a|b)*abb", "abababb", true),
        ("(a|b)*abb", "abab", false),
        ("[abc]+", "abcabc", true),
        ("ε", "", true),
    ];
    for &(regex, w, expected) in word_cases {
        let compiled = compile(regex, None).expect("compiles");
        let result = compiled.simulate(w);
        assert!(result.is_consistent(), "simulators disagree for {regex:?} / {w:?}: {result:?}");
        assert_eq!(result.accepted(), expected, "wrong verdict for {regex:?} / {w:?}");
    }

    // Row 6 supplies a pre-tokenized word directly rather than a string to re-tokenize, since
    // "if" and "a" must stay two distinct symbols rather than re-merging into "ifa".
    let compiled = compile("if(a|b)?", None).expect("compiles");
    let tokens: Vec<std::rc::Rc<str>> = vec![std::rc::Rc::from("if"), std::rc::Rc::from("a")];
    let accept_nfa = compiled.nfa.accepts(&tokens);
    let accept_dfa = compiled.dfa.accepts(&tokens);
    let accept_min = compiled.min_dfa.accepts(&tokens);
    assert_eq!(accept_nfa, accept_dfa);
    assert_eq!(accept_dfa, accept_min);
    assert!(accept_nfa);
}

#[test]
fn keyword_word_is_tokenized_as_one_symbol() {
    let compiled = compile("if", None).unwrap();
    assert_eq!(compiled.tokenize_word("if"), vec![std::rc::Rc::from("if")]);
}

#[test]
fn empty_regex_input_is_malformed_postfix() {
    let err = compile("", None).unwrap_err();
    assert!(matches!(err, crate::error::PipelineError::MalformedPostfix(_)));
}

#[test]
fn unmatched_open_paren_is_rejected() {
    let err = compile("(a", None).unwrap_err();
    assert!(matches!(err, crate::error::PipelineError::UnmatchedParen(_)));
}

#[test]
fn bare_operator_is_missing_operand() {
    let err = compile("*", None).unwrap_err();
    assert!(matches!(err, crate::error::PipelineError::MissingOperand { .. }));
}

#[test]
fn alphabet_restriction_rejects_unlisted_literal() {
    use std::collections::HashSet;
    let alphabet: HashSet<char> = ['a', 'b'].into_iter().collect();
    let err = compile("ac", Some(&alphabet)).unwrap_err();
    assert!(matches!(err, crate::error::PipelineError::UnrecognizedToken('c', _)));
}

#[test]
fn minimization_never_changes_the_accepted_language() {
    for regex in ["(a|b)*abb", "a(b|c)*", "a+b?", "(ab|ba)*"] {
        let compiled = compile(regex, None).unwrap();
        for w in ["", "a", "b", "ab", "ba", "abb", "aabb", "abab", "aaa"] {
            let tokens = compiled.tokenize_word(w);
            assert_eq!(
                compiled.dfa.accepts(&tokens),
                compiled.min_dfa.accepts(&tokens),
                "minimization changed acceptance for {regex:?} / {w:?}"
            );
        }
    }
}

#[test]
fn tree_round_trips_through_infix_string() {
    for regex in ["a(b|c)*", "(a|b)*abb", "a+b?c", "ab|cd"] {
        let compiled = compile(regex, None).unwrap();
        let printed = compiled.tree.to_infix_string();
        let reparsed = compile(&printed, None).unwrap();
        for w in ["", "a", "ab", "abc", "abb"] {
            assert_eq!(
                compiled.simulate(w).accepted(),
                reparsed.simulate(w).accepted(),
                "infix round trip changed acceptance for {regex:?} (printed {printed:?}) / {w:?}"
            );
        }
    }
}

proptest! {
    /// For any word built only from `a`/`b`, all three simulators for `(a|b)*` agree (always
    /// true) and for `a(a|b)*` agree with "starts with a".
    #[test]
    fn simulators_agree_on_random_ab_words(w in "[ab]{0,8}") {
        let star = compile("(a|b)*", None).unwrap();
        prop_assert!(agree(&star, &w));
        prop_assert!(star.simulate(&w).accepted());

        let starts_with_a = compile("a(a|b)*", None).unwrap();
        prop_assert!(agree(&starts_with_a, &w));
        prop_assert_eq!(starts_with_a.simulate(&w).accepted(), w.starts_with('a'));
    }

    /// Concatenation of two literals only accepts the exact joined word.
    #[test]
    fn concat_only_accepts_the_exact_word(w in "[ab]{2,6}") {
        let compiled = compile(&w, None).unwrap();
        prop_assert!(compiled.simulate(&w).accepted());
        prop_assert!(!compiled.simulate(&format!("{}x", w)).accepted(), "appending x should be rejected");
    }

    /// `a*` accepts every run of zero or more `a`s and nothing else.
    #[test]
    fn star_accepts_any_repetition(n in 0usize..12) {
        let compiled = compile("a*", None).unwrap();
        let w = "a".repeat(n);
        prop_assert!(compiled.simulate(&w).accepted());
        prop_assert!(!compiled.simulate(&format!("{}b", w)).accepted(), "appending b should be rejected");
    }

    /// `a+` behaves like `a*` minus the empty string.
    #[test]
    fn plus_excludes_only_the_empty_word(n in 0usize..12) {
        let plus = compile("a+", None).unwrap();
        let star = compile("a*", None).unwrap();
        let w = "a".repeat(n);
        prop_assert_eq!(plus.simulate(&w).accepted(), n > 0);
        prop_assert!(star.simulate(&w).accepted());
    }
}
