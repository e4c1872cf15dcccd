//! The NFA data model: an arena of states indexed by integer id, with ε-transitions on a
//! separate channel from labeled transitions. See [`crate::thompson`] for how these are built
//! and [`crate::dfa`] for subset construction into a [`crate::dfa::Dfa`].

pub mod eval;

use crate::dfa::{Dfa, DfaState};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NfaState {
    pub epsilon_transitions: Vec<usize>,
    pub transitions: HashMap<Rc<str>, Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: usize,
    pub(crate) accept: usize,
}

impl Nfa {
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn accept(&self) -> usize {
        self.accept
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        state == self.accept
    }

    /// The alphabet actually used as edge labels, excluding ε. Derived, never supplied.
    pub fn alphabet(&self) -> BTreeSet<Rc<str>> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.keys().cloned())
            .collect()
    }

    /// The smallest superset of `states` closed under ε-transitions.
    pub fn epsilon_closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure: BTreeSet<usize> = states.clone();
        let mut worklist: VecDeque<usize> = states.iter().copied().collect();

        while let Some(s) = worklist.pop_front() {
            for &next in &self.states[s].epsilon_transitions {
                if closure.insert(next) {
                    worklist.push_back(next);
                }
            }
        }

        closure
    }

    /// The union of `symbol`-labeled destinations from every state in `states`.
    pub fn move_set(&self, states: &BTreeSet<usize>, symbol: &str) -> BTreeSet<usize> {
        states
            .iter()
            .filter_map(|&s| self.states[s].transitions.get(symbol))
            .flatten()
            .copied()
            .collect()
    }

    /// Accepts a token sequence if some path through the NFA consumes all of it and ends in an
    /// accepting configuration.
    pub fn accepts(&self, tokens: &[Rc<str>]) -> bool {
        let mut current = self.epsilon_closure(&BTreeSet::from([self.start]));
        for tok in tokens {
            if current.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&self.move_set(&current, tok));
        }
        current.contains(&self.accept)
    }

    /// Subset construction: builds the DFA whose states are ε-closed reachable subsets of NFA
    /// states, canonicalized by sorted membership so equal subsets share one DFA id.
    pub fn to_dfa(&self) -> Dfa {
        let alphabet: Vec<Rc<str>> = self.alphabet().into_iter().collect();

        let mut subset_ids: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut dfa_states: Vec<DfaState> = Vec::new();
        let mut worklist: VecDeque<usize> = VecDeque::new();

        let start_subset = self.epsilon_closure(&BTreeSet::from([self.start]));
        let start_key = canonical_key(&start_subset);
        subset_ids.insert(start_key, 0);
        dfa_states.push(DfaState {
            nfa_subset: start_subset.clone(),
            is_accept: start_subset.contains(&self.accept),
            transitions: BTreeMap::new(),
        });
        worklist.push_back(0);

        while let Some(id) = worklist.pop_front() {
            let subset = dfa_states[id].nfa_subset.clone();
            for symbol in &alphabet {
                let moved = self.move_set(&subset, symbol);
                if moved.is_empty() {
                    continue; // empty move: implicit dead state, no transition recorded
                }
                let closed = self.epsilon_closure(&moved);
                let key = canonical_key(&closed);
                let target = *subset_ids.entry(key).or_insert_with(|| {
                    let id = dfa_states.len();
                    dfa_states.push(DfaState {
                        is_accept: closed.contains(&self.accept),
                        nfa_subset: closed.clone(),
                        transitions: BTreeMap::new(),
                    });
                    worklist.push_back(id);
                    id
                });
                dfa_states[id].transitions.insert(symbol.clone(), target);
            }
        }

        log::debug!(
            "subset construction produced {} DFA states from {} NFA states",
            dfa_states.len(),
            self.states.len()
        );

        Dfa {
            alphabet,
            states: dfa_states,
            start: 0,
        }
    }
}

fn canonical_key(set: &BTreeSet<usize>) -> Vec<usize> {
    set.iter().copied().collect()
}
