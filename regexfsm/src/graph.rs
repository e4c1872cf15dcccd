//! Node/edge graph descriptions for the syntax tree, NFA, DFA, and minimized DFA.
//!
//! This is pure data — §1 places rendering out of scope as an external collaborator — but
//! producing the description itself is part of the core's per-job output (§6). The shape-hint
//! vocabulary (`circle`/`double-circle`/`point`) and the convention of a `Point` marker feeding
//! an edge into the start state mirror the DOT output of a graph-visualization back-end without
//! this crate drawing anything.

use crate::dfa::{Dfa, MinDfa};
use crate::nfa::Nfa;
use crate::token::display_label;
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Circle,
    DoubleCircle,
    Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: usize,
    pub shape: NodeShape,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphDescription {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Builds a node/edge description of a syntax tree: leaves are circles labeled with their
/// symbol, internal nodes are circles labeled with their operator.
pub fn from_tree(tree: &Tree) -> GraphDescription {
    let mut graph = GraphDescription::default();
    add_tree_node(tree, &mut graph);
    graph
}

fn add_tree_node(tree: &Tree, graph: &mut GraphDescription) -> usize {
    let id = graph.nodes.len();
    let label = match tree {
        Tree::Literal(s) => display_label(s),
        Tree::Epsilon => "ε".to_string(),
        Tree::Concat(_, _) => "·".to_string(),
        Tree::Union(_, _) => "|".to_string(),
        Tree::Star(_) => "*".to_string(),
        Tree::Plus(_) => "+".to_string(),
        Tree::Question(_) => "?".to_string(),
    };
    graph.nodes.push(Node {
        id,
        shape: NodeShape::Circle,
        label,
    });

    match tree {
        Tree::Literal(_) | Tree::Epsilon => {}
        Tree::Star(a) | Tree::Plus(a) | Tree::Question(a) => {
            let child = add_tree_node(a, graph);
            graph.edges.push(Edge {
                from: id,
                to: child,
                label: String::new(),
            });
        }
        Tree::Concat(a, b) | Tree::Union(a, b) => {
            let left = add_tree_node(a, graph);
            let right = add_tree_node(b, graph);
            graph.edges.push(Edge {
                from: id,
                to: left,
                label: String::new(),
            });
            graph.edges.push(Edge {
                from: id,
                to: right,
                label: String::new(),
            });
        }
    }

    id
}

/// Builds a node/edge description of an NFA: a `Point` marker feeds the start state, accept
/// states are `DoubleCircle`, everything else is `Circle`. ε-edges are labeled `ε`.
pub fn from_nfa(nfa: &Nfa) -> GraphDescription {
    let mut graph = GraphDescription::default();
    let marker_id = nfa.states().len();
    graph.nodes.push(Node {
        id: marker_id,
        shape: NodeShape::Point,
        label: String::new(),
    });
    graph.edges.push(Edge {
        from: marker_id,
        to: nfa.start(),
        label: String::new(),
    });

    for (id, state) in nfa.states().iter().enumerate() {
        graph.nodes.push(Node {
            id,
            shape: if nfa.is_accepting(id) {
                NodeShape::DoubleCircle
            } else {
                NodeShape::Circle
            },
            label: format!("s{id}"),
        });
        for &to in &state.epsilon_transitions {
            graph.edges.push(Edge {
                from: id,
                to,
                label: "ε".to_string(),
            });
        }
        for (symbol, targets) in &state.transitions {
            for &to in targets {
                graph.edges.push(Edge {
                    from: id,
                    to,
                    label: display_label(symbol),
                });
            }
        }
    }

    graph
}

/// Builds a node/edge description of a DFA.
pub fn from_dfa(dfa: &Dfa) -> GraphDescription {
    let mut graph = GraphDescription::default();
    let marker_id = dfa.states().len();
    graph.nodes.push(Node {
        id: marker_id,
        shape: NodeShape::Point,
        label: String::new(),
    });
    graph.edges.push(Edge {
        from: marker_id,
        to: dfa.start(),
        label: String::new(),
    });

    for (id, state) in dfa.states().iter().enumerate() {
        graph.nodes.push(Node {
            id,
            shape: if state.is_accept {
                NodeShape::DoubleCircle
            } else {
                NodeShape::Circle
            },
            label: format!("d{id}"),
        });
        for (symbol, &to) in &state.transitions {
            graph.edges.push(Edge {
                from: id,
                to,
                label: display_label(symbol),
            });
        }
    }

    graph
}

/// Builds a node/edge description of a minimized DFA.
pub fn from_min_dfa(min: &MinDfa) -> GraphDescription {
    let mut graph = GraphDescription::default();
    let marker_id = min.states().len();
    graph.nodes.push(Node {
        id: marker_id,
        shape: NodeShape::Point,
        label: String::new(),
    });
    graph.edges.push(Edge {
        from: marker_id,
        to: min.start(),
        label: String::new(),
    });

    for (id, state) in min.states().iter().enumerate() {
        graph.nodes.push(Node {
            id,
            shape: if state.is_accept {
                NodeShape::DoubleCircle
            } else {
                NodeShape::Circle
            },
            label: format!("m{id}"),
        });
        for (symbol, &to) in &state.transitions {
            graph.edges.push(Edge {
                from: id,
                to,
                label: display_label(symbol),
            });
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn tree_graph_has_one_node_per_subtree() {
        let tree = Tree::Concat(
            Box::new(Tree::Literal(Rc::from("a"))),
            Box::new(Tree::Literal(Rc::from("b"))),
        );
        let graph = from_tree(&tree);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn nfa_graph_has_start_marker() {
        use crate::tokenizer::tokenize;
        use crate::{concat, shunting_yard, thompson, tree as tree_mod};

        let tokens = tokenize("a", None).unwrap();
        let tokens = concat::insert_concatenation(tokens);
        let postfix = shunting_yard::to_postfix(tokens).unwrap();
        let tree = tree_mod::build_tree(postfix).unwrap();
        let nfa = thompson::build(&tree);
        let graph = from_nfa(&nfa);

        assert!(graph.nodes.iter().any(|n| n.shape == NodeShape::Point));
        assert_eq!(graph.nodes.len(), nfa.states().len() + 1);
    }
}
