//! Stage 3: infix token list → postfix (RPN) token list.

use crate::error::{PipelineError, Result};
use crate::token::Token;

/// Converts `tokens` (with `Concat` already inserted) to postfix order.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    for (index, token) in tokens.into_iter().enumerate() {
        match token {
            Token::Literal(_) | Token::Epsilon => output.push(token),
            Token::LParen => ops.push(token),
            Token::RParen => {
                loop {
                    match ops.pop() {
                        Some(Token::LParen) => break,
                        Some(op) => output.push(op),
                        None => return Err(PipelineError::UnmatchedParen(index)),
                    }
                }
            }
            ref op if op.is_operator() => {
                let prec = op.precedence().expect("operator has precedence");
                let binary = op.is_binary_operator();
                while let Some(top) = ops.last() {
                    let Some(top_prec) = top.precedence() else { break };
                    if top_prec > prec || (top_prec == prec && binary) {
                        output.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }
                ops.push(token);
            }
            _ => unreachable!("concatenation insertion never introduces other tokens"),
        }
    }

    while let Some(op) = ops.pop() {
        if matches!(op, Token::LParen | Token::RParen) {
            return Err(PipelineError::UnmatchedParen(usize::MAX));
        }
        output.push(op);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn lit(s: &str) -> Token {
        Token::Literal(Rc::from(s))
    }

    #[test]
    fn simple_concat() {
        let out = to_postfix(vec![lit("a"), Token::Concat, lit("b")]).unwrap();
        assert_eq!(out, vec![lit("a"), lit("b"), Token::Concat]);
    }

    #[test]
    fn precedence_union_below_concat() {
        // a.b|c -> a b . c |
        let out = to_postfix(vec![lit("a"), Token::Concat, lit("b"), Token::Union, lit("c")]).unwrap();
        assert_eq!(out, vec![lit("a"), lit("b"), Token::Concat, lit("c"), Token::Union]);
    }

    #[test]
    fn star_binds_tighter_than_concat() {
        // a.b* -> a b * .
        let out = to_postfix(vec![lit("a"), Token::Concat, lit("b"), Token::Star]).unwrap();
        assert_eq!(out, vec![lit("a"), lit("b"), Token::Star, Token::Concat]);
    }

    #[test]
    fn parens_override_precedence() {
        // (a|b).c -> a b | c .
        let out = to_postfix(vec![
            Token::LParen,
            lit("a"),
            Token::Union,
            lit("b"),
            Token::RParen,
            Token::Concat,
            lit("c"),
        ])
        .unwrap();
        assert_eq!(out, vec![lit("a"), lit("b"), Token::Union, lit("c"), Token::Concat]);
    }

    #[test]
    fn unmatched_close_paren() {
        let err = to_postfix(vec![lit("a"), Token::RParen]).unwrap_err();
        assert_eq!(err, PipelineError::UnmatchedParen(1));
    }

    #[test]
    fn unmatched_open_paren() {
        let err = to_postfix(vec![Token::LParen, lit("a")]).unwrap_err();
        assert!(matches!(err, PipelineError::UnmatchedParen(_)));
    }
}
