//! Incremental DFA simulation: a literal deterministic state machine with a start state, a
//! transition function, and an accept set — no ε, no ambiguity.

use crate::dfa::Dfa;

#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current.is_some_and(|s| self.dfa.states()[s].is_accept)
    }

    pub fn current_state(&self) -> Option<usize> {
        self.current
    }

    /// Advances past one token. Once a missing transition is hit the evaluator is stuck
    /// (`current_state` becomes `None`) for the rest of the input, matching §4.8's "if missing,
    /// reject" rule.
    pub fn step(&mut self, elem: &str) {
        self.current = self
            .current
            .and_then(|s| self.dfa.states()[s].transitions.get(elem).copied());
    }

    pub fn step_multiple(&mut self, elems: &[&str]) {
        for e in elems {
            self.step(e);
        }
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current: Some(dfa.start()),
        }
    }
}
