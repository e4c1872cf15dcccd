//! # regexfsm
//!
//! `regexfsm` compiles a small regular-expression language to a syntax tree, a Thompson NFA, a
//! subset-construction DFA, and a minimized DFA, and simulates acceptance of an input string
//! against all three. The three simulators always agree (see [`tests`] for the property that
//! checks this).
//!
//! ## Usage
//!
//! ```rust
//! use regexfsm::compile;
//!
//! let compiled = compile("a(b|c)*", None).unwrap();
//! let accept_nfa = compiled.nfa.accepts(&compiled.tokenize_word("abbcbc"));
//! let accept_dfa = compiled.dfa.accepts(&compiled.tokenize_word("abbcbc"));
//! let accept_min = compiled.min_dfa.accepts(&compiled.tokenize_word("abbcbc"));
//! assert!(accept_nfa && accept_dfa && accept_min);
//! ```
//!
//! The language supported is ASCII literals, a fixed set of reserved multi-letter keywords
//! (`if`, `else`, `while`, `for`), `ε`, character classes `[abc]`, and the operators `| · * + ?`
//! with implicit concatenation, parentheses, and `\`-escapes. It does not support capture
//! groups, anchors, backreferences, lookaround, lazy quantifiers, or longest-match scanning —
//! only whole-string acceptance.

pub mod batch;
pub mod concat;
pub mod dfa;
pub mod error;
pub mod graph;
pub mod nfa;
pub mod shunting_yard;
pub mod thompson;
pub mod token;
pub mod tokenizer;
pub mod tree;

#[cfg(test)]
mod tests;

use dfa::{Dfa, MinDfa};
use error::Result;
use nfa::Nfa;
use std::collections::HashSet;
use std::rc::Rc;
use tree::Tree;

/// Everything produced by compiling one regular expression: the postfix token list
/// (diagnostic), the syntax tree, and the three automata. Built by [`compile`].
#[derive(Debug, Clone)]
pub struct Compiled {
    pub postfix: Vec<token::Token>,
    pub tree: Tree,
    pub nfa: Nfa,
    pub dfa: Dfa,
    pub min_dfa: MinDfa,
}

impl Compiled {
    /// Splits an already-decoded input word into the token sequence the automata expect,
    /// consistently with how the regex itself was tokenized (see [`tokenizer::tokenize_word`]).
    pub fn tokenize_word(&self, w: &str) -> Vec<Rc<str>> {
        tokenizer::tokenize_word(w)
    }

    /// Runs all three simulators and returns their verdicts; per §8 they must always agree.
    pub fn simulate(&self, w: &str) -> SimulationResult {
        let tokens = self.tokenize_word(w);
        SimulationResult {
            accept_nfa: self.nfa.accepts(&tokens),
            accept_dfa: self.dfa.accepts(&tokens),
            accept_min_dfa: self.min_dfa.accepts(&tokens),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    pub accept_nfa: bool,
    pub accept_dfa: bool,
    pub accept_min_dfa: bool,
}

impl SimulationResult {
    /// True iff all three simulators agree with each other.
    pub fn is_consistent(&self) -> bool {
        self.accept_nfa == self.accept_dfa && self.accept_dfa == self.accept_min_dfa
    }

    pub fn accepted(&self) -> bool {
        self.accept_nfa
    }
}

/// Runs the full pipeline (tokenizer → concatenation insertion → Shunting-Yard → tree builder
/// → Thompson construction → subset construction → minimization) over `regex`. If `alphabet` is
/// given, every single-character literal in the regex must belong to it.
pub fn compile(regex: &str, alphabet: Option<&HashSet<char>>) -> Result<Compiled> {
    let tokens = tokenizer::tokenize(regex, alphabet)?;
    let tokens = concat::insert_concatenation(tokens);
    let postfix = shunting_yard::to_postfix(tokens)?;
    let tree = tree::build_tree(postfix.clone())?;
    let nfa = thompson::build(&tree);
    let dfa = nfa.to_dfa();
    let min_dfa = dfa.minimize();

    Ok(Compiled {
        postfix,
        tree,
        nfa,
        dfa,
        min_dfa,
    })
}
