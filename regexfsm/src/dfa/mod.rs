//! The DFA data model, produced by subset construction ([`crate::nfa::Nfa::to_dfa`]), and its
//! minimizer.
//!
//! Minimization substitutes true Hopcroft partition refinement for the simplified
//! (non-Hopcroft) signature-splitting sketched in the design notes — the spec explicitly
//! permits this "as long as outputs are equivalent up to state renaming". A missing transition
//! is treated as an edge into one shared sentinel sink state while refining partitions, so that
//! states which are only distinguishable by *having* a transition (versus lacking one) still
//! split correctly; the sink itself never survives into the output.

pub mod eval;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub nfa_subset: BTreeSet<usize>,
    pub is_accept: bool,
    pub transitions: BTreeMap<Rc<str>, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Vec<Rc<str>>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinDfaState {
    pub members: BTreeSet<usize>,
    pub is_accept: bool,
    pub transitions: BTreeMap<Rc<str>, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinDfa {
    pub(crate) alphabet: Vec<Rc<str>>,
    pub(crate) states: Vec<MinDfaState>,
    pub(crate) start: usize,
}

impl Dfa {
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn alphabet(&self) -> &[Rc<str>] {
        &self.alphabet
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Follows the labeled transition for each token; rejects on a missing transition.
    pub fn accepts(&self, tokens: &[Rc<str>]) -> bool {
        let mut current = self.start;
        for tok in tokens {
            match self.states[current].transitions.get(tok.as_ref()) {
                Some(&next) => current = next,
                None => return false,
            }
        }
        self.states[current].is_accept
    }

    /// Every state reachable from the start, by BFS over labeled transitions. Equal to the full
    /// state set for any DFA produced by subset construction.
    pub fn reachable_from_start(&self) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([self.start]);
        let mut stack = vec![self.start];
        while let Some(s) = stack.pop() {
            for &next in self.states[s].transitions.values() {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }

    /// Hopcroft partition refinement, producing a DFA with the minimal number of states.
    pub fn minimize(&self) -> MinDfa {
        let n = self.states.len();
        const DEAD: usize = usize::MAX;

        let delta = |state: usize, symbol: &str| -> usize {
            if state == DEAD {
                return DEAD;
            }
            self.states[state]
                .transitions
                .get(symbol)
                .copied()
                .unwrap_or(DEAD)
        };

        let accepting: BTreeSet<usize> = (0..n).filter(|&s| self.states[s].is_accept).collect();
        let non_accepting: BTreeSet<usize> =
            (0..n).filter(|&s| !self.states[s].is_accept).chain([DEAD]).collect();

        let mut partition: Vec<BTreeSet<usize>> = [accepting, non_accepting]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        let mut worklist: Vec<BTreeSet<usize>> = partition.clone();

        while let Some(a) = worklist.pop() {
            for symbol in &self.alphabet {
                let preimage: BTreeSet<usize> = (0..n)
                    .chain([DEAD])
                    .filter(|&s| a.contains(&delta(s, symbol)))
                    .collect();
                if preimage.is_empty() {
                    continue;
                }

                let block_count = partition.len();
                for idx in 0..block_count {
                    let block = partition[idx].clone();
                    let intersection: BTreeSet<usize> = block.intersection(&preimage).copied().collect();
                    if intersection.is_empty() || intersection.len() == block.len() {
                        continue;
                    }
                    let difference: BTreeSet<usize> = block.difference(&preimage).copied().collect();

                    partition[idx] = intersection.clone();
                    partition.push(difference.clone());

                    if let Some(pos) = worklist.iter().position(|s| *s == block) {
                        worklist[pos] = intersection;
                        worklist.push(difference);
                    } else if intersection.len() <= difference.len() {
                        worklist.push(intersection);
                    } else {
                        worklist.push(difference);
                    }
                }
            }
        }

        // Drop the block that contains only the synthetic sink (if the sink wasn't merged
        // with any reachable real state).
        let mut blocks: Vec<BTreeSet<usize>> = partition
            .into_iter()
            .map(|mut block| {
                block.remove(&DEAD);
                block
            })
            .filter(|block| !block.is_empty())
            .collect();

        // Stable, reproducible order: start's block first, then by minimum member id.
        blocks.sort_by_key(|b| *b.iter().min().unwrap());
        let start_pos = blocks.iter().position(|b| b.contains(&self.start)).unwrap();
        blocks.swap(0, start_pos);

        let block_of: BTreeMap<usize, usize> = blocks
            .iter()
            .enumerate()
            .flat_map(|(idx, block)| block.iter().map(move |&s| (s, idx)))
            .collect();

        let states = blocks
            .iter()
            .map(|block| {
                let representative = *block.iter().next().unwrap();
                let rep = &self.states[representative];
                let transitions = rep
                    .transitions
                    .iter()
                    .map(|(sym, &target)| (sym.clone(), block_of[&target]))
                    .collect();
                MinDfaState {
                    members: block.clone(),
                    is_accept: rep.is_accept,
                    transitions,
                }
            })
            .collect();

        log::debug!("minimization reduced {} DFA states to {} states", n, blocks.len());

        MinDfa {
            alphabet: self.alphabet.clone(),
            states,
            start: 0,
        }
    }
}

impl MinDfa {
    pub fn states(&self) -> &[MinDfaState] {
        &self.states
    }

    pub fn alphabet(&self) -> &[Rc<str>] {
        &self.alphabet
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn accepts(&self, tokens: &[Rc<str>]) -> bool {
        let mut current = self.start;
        for tok in tokens {
            match self.states[current].transitions.get(tok.as_ref()) {
                Some(&next) => current = next,
                None => return false,
            }
        }
        self.states[current].is_accept
    }

    /// True if every state has at most one outgoing edge per symbol — trivially true given
    /// [`BTreeMap`] storage, kept as an explicit check for the determinism testable property.
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().all(|s| {
            let keys: HashSet<&Rc<str>> = s.transitions.keys().collect();
            keys.len() == s.transitions.len()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use crate::{concat, shunting_yard, thompson, tree};

    fn build_dfa(regex: &str) -> Dfa {
        let tokens = tokenize(regex, None).unwrap();
        let tokens = concat::insert_concatenation(tokens);
        let postfix = shunting_yard::to_postfix(tokens).unwrap();
        let tree = tree::build_tree(postfix).unwrap();
        thompson::build(&tree).to_dfa()
    }

    #[test]
    fn dfa_is_deterministic_by_construction() {
        let dfa = build_dfa("a(b|c)*");
        for state in dfa.states() {
            let keys: HashSet<&Rc<str>> = state.transitions.keys().collect();
            assert_eq!(keys.len(), state.transitions.len());
        }
    }

    #[test]
    fn minimized_has_no_more_states_than_dfa() {
        let dfa = build_dfa("(a|b)*abb");
        let min = dfa.minimize();
        assert!(min.states().len() <= dfa.states().len());
    }

    #[test]
    fn minimized_equivalent_to_dfa() {
        let dfa = build_dfa("(a|b)*abb");
        let min = dfa.minimize();
        for w in ["abababb", "abab", "", "abb", "aabb"] {
            let tokens: Vec<Rc<str>> = w.chars().map(|c| Rc::from(c.to_string().as_str())).collect();
            assert_eq!(dfa.accepts(&tokens), min.accepts(&tokens), "mismatch for {w:?}");
        }
    }

    #[test]
    fn reachable_set_is_full_state_set() {
        let dfa = build_dfa("a(b|c)*");
        assert_eq!(dfa.reachable_from_start().len(), dfa.states().len());
    }
}
