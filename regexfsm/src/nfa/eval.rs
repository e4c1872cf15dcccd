//! Incremental NFA simulation: step one token at a time rather than handing the whole string
//! to [`Nfa::accepts`] at once. Used by the three-way simulator to compare NFA/DFA/minimized-DFA
//! verdicts step by step.

use crate::nfa::Nfa;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    current: BTreeSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current.contains(&self.nfa.accept())
    }

    pub fn current_states(&self) -> &BTreeSet<usize> {
        &self.current
    }

    /// Advances past one token. Returns `false` (and leaves the evaluator stuck) if no state
    /// had a transition on `elem`.
    pub fn step(&mut self, elem: &str) -> bool {
        let moved = self.nfa.move_set(&self.current, elem);
        if moved.is_empty() {
            self.current = BTreeSet::new();
            return false;
        }
        self.current = self.nfa.epsilon_closure(&moved);
        true
    }

    pub fn step_multiple(&mut self, elems: &[&str]) -> bool {
        elems.iter().all(|e| self.step(e))
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        let current = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));
        Self { nfa, current }
    }
}
