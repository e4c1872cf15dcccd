//! Stage 5: syntax tree → NFA fragment, by Thompson's construction.
//!
//! The state-id counter is a field of [`Builder`], scoped to a single build, never a
//! process-global — see spec note on process-global counters: sharing a counter across
//! concurrent builds would make state ids (and thus diagnostic labels) depend on unrelated
//! work happening elsewhere.

use crate::nfa::{Nfa, NfaState};
use crate::tree::Tree;
use std::rc::Rc;

/// A not-yet-complete NFA piece: one start state and one pending accept state. Thompson's
/// construction guarantees a single accept for every operator implemented here.
struct Fragment {
    start: usize,
    accept: usize,
}

struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn new() -> Self {
        Self { states: Vec::new() }
    }

    fn fresh(&mut self) -> usize {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon_transitions.push(to);
    }

    fn add_transition(&mut self, from: usize, symbol: Rc<str>, to: usize) {
        self.states[from].transitions.entry(symbol).or_default().push(to);
    }

    fn build_node(&mut self, tree: &Tree) -> Fragment {
        match tree {
            Tree::Literal(s) => {
                let start = self.fresh();
                let accept = self.fresh();
                self.add_transition(start, s.clone(), accept);
                Fragment { start, accept }
            }
            Tree::Epsilon => {
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, accept);
                Fragment { start, accept }
            }
            Tree::Concat(a, b) => {
                let fa = self.build_node(a);
                let fb = self.build_node(b);
                self.add_epsilon(fa.accept, fb.start);
                Fragment {
                    start: fa.start,
                    accept: fb.accept,
                }
            }
            Tree::Union(a, b) => {
                let fa = self.build_node(a);
                let fb = self.build_node(b);
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, fa.start);
                self.add_epsilon(start, fb.start);
                self.add_epsilon(fa.accept, accept);
                self.add_epsilon(fb.accept, accept);
                Fragment { start, accept }
            }
            Tree::Star(a) => {
                let fa = self.build_node(a);
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, fa.start);
                self.add_epsilon(start, accept);
                self.add_epsilon(fa.accept, fa.start);
                self.add_epsilon(fa.accept, accept);
                Fragment { start, accept }
            }
            Tree::Plus(a) => {
                // A+ : one mandatory pass through A, then either loop back into A or exit.
                // Equivalent to A·A* without literally building A twice.
                let fa = self.build_node(a);
                let accept = self.fresh();
                self.add_epsilon(fa.accept, fa.start);
                self.add_epsilon(fa.accept, accept);
                Fragment {
                    start: fa.start,
                    accept,
                }
            }
            Tree::Question(a) => {
                // A? : either go through A, or bypass it directly.
                let fa = self.build_node(a);
                let start = self.fresh();
                let accept = self.fresh();
                self.add_epsilon(start, fa.start);
                self.add_epsilon(start, accept);
                self.add_epsilon(fa.accept, accept);
                Fragment { start, accept }
            }
        }
    }
}

/// Builds a fresh NFA from `tree`. Each call gets its own id counter starting from 0.
pub fn build(tree: &Tree) -> Nfa {
    let mut builder = Builder::new();
    let fragment = builder.build_node(tree);
    log::debug!("Thompson construction produced {} states", builder.states.len());
    Nfa {
        states: builder.states,
        start: fragment.start,
        accept: fragment.accept,
    }
}
