//! Error kinds produced anywhere in the compilation pipeline.
//!
//! Every stage (tokenizer, Shunting-Yard, tree builder, Thompson builder) returns
//! [`PipelineError`] rather than its own type: the stages are chained with `?` and a caller
//! cares about *which kind* failed and *where*, not which module raised it.

use thiserror::Error;

/// Something went wrong turning a regex string into an automaton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("malformed character class starting at byte {0}: class is empty or unclosed")]
    MalformedClass(usize),

    #[error("incomplete escape sequence at byte {0}: '\\' at end of input")]
    IncompleteEscape(usize),

    #[error("operator '{op}' at token {index} has no preceding operand")]
    MissingOperand { op: String, index: usize },

    #[error("unmatched parenthesis at byte {0}")]
    UnmatchedParen(usize),

    #[error("unrecognized character '{0}' at byte {1}")]
    UnrecognizedToken(char, usize),

    #[error("postfix expression is malformed: {0}")]
    MalformedPostfix(String),

    #[error("tree contains an operator the Thompson builder does not implement: {0}")]
    UnsupportedOperator(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
