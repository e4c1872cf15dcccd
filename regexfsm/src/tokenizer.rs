//! Stage 1: concrete regex string → token sequence.
//!
//! Whitespace is skipped, escapes are decoded, `[...]` classes are expanded to `(a|b|...)`,
//! and ASCII letter runs are matched against the reserved keyword list, falling back to one
//! `Literal` per character. `+` and `?` are emitted as their own operator tokens rather than
//! expanded here (see the Thompson builder, which implements them as first-class rules).

use crate::error::{PipelineError, Result};
use crate::token::{decode_escape, Token, RESERVED_KEYWORDS};
use std::collections::HashSet;
use std::rc::Rc;
use unicode_segmentation::UnicodeSegmentation;

const META_CHARS: &[char] = &['(', ')', '|', '*', '+', '?', '[', ']', '\\'];

/// Tokenizes `input`. If `alphabet` is given, every single-character literal must be a member
/// of it or tokenization fails with [`PipelineError::UnrecognizedToken`]; reserved keywords and
/// decoded escapes are always accepted regardless of `alphabet`.
pub fn tokenize(input: &str, alphabet: Option<&HashSet<char>>) -> Result<Vec<Token>> {
    let graphemes: Vec<(usize, &str)> = input.grapheme_indices(true).collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < graphemes.len() {
        let (offset, g) = graphemes[i];
        let c = g.chars().next().unwrap();

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '|' => {
                tokens.push(Token::Union);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '?' => {
                tokens.push(Token::Question);
                i += 1;
            }
            'ε' => {
                tokens.push(Token::Epsilon);
                i += 1;
            }
            '\\' => {
                let Some(&(_, next)) = graphemes.get(i + 1) else {
                    return Err(PipelineError::IncompleteEscape(offset));
                };
                let decoded = decode_escape(next.chars().next().unwrap());
                tokens.push(literal_char(decoded, alphabet, offset)?);
                i += 2;
            }
            '[' => {
                let (class_tokens, consumed) = expand_class(&graphemes, i, offset, alphabet)?;
                tokens.extend(class_tokens);
                i += consumed;
            }
            _ if c.is_ascii_alphabetic() => {
                let (run_tokens, consumed) = tokenize_letter_run(&graphemes, i, offset, alphabet)?;
                tokens.extend(run_tokens);
                i += consumed;
            }
            _ => {
                tokens.push(literal_char(c, alphabet, offset)?);
                i += 1;
            }
        }
    }

    log::trace!("tokenized {} tokens from {:?}", tokens.len(), input);
    Ok(tokens)
}

fn literal_char(c: char, alphabet: Option<&HashSet<char>>, offset: usize) -> Result<Token> {
    if let Some(alphabet) = alphabet {
        if !alphabet.contains(&c) {
            return Err(PipelineError::UnrecognizedToken(c, offset));
        }
    }
    Ok(Token::Literal(Rc::from(c.to_string().as_str())))
}

/// Consumes a maximal run of ASCII letters starting at `start`. Emits one [`Token::Literal`]
/// for the whole run if it matches a reserved keyword, otherwise one per character.
fn tokenize_letter_run(
    graphemes: &[(usize, &str)],
    start: usize,
    start_offset: usize,
    alphabet: Option<&HashSet<char>>,
) -> Result<(Vec<Token>, usize)> {
    let mut end = start;
    while end < graphemes.len() {
        let c = graphemes[end].1.chars().next().unwrap();
        if c.is_ascii_alphabetic() {
            end += 1;
        } else {
            break;
        }
    }
    let run: String = graphemes[start..end].iter().map(|(_, s)| *s).collect();
    let consumed = end - start;

    if RESERVED_KEYWORDS.contains(&run.as_str()) {
        Ok((vec![Token::Literal(Rc::from(run.as_str()))], consumed))
    } else {
        let mut out = Vec::with_capacity(consumed);
        for (idx, (offset, s)) in graphemes[start..end].iter().enumerate() {
            let c = s.chars().next().unwrap();
            let _ = idx;
            out.push(literal_char(c, alphabet, *offset)?);
        }
        let _ = start_offset;
        Ok((out, consumed))
    }
}

/// Expands `[abc...]` into the token sequence for `(a|b|...)`. `graphemes[start]` must be `[`.
fn expand_class(
    graphemes: &[(usize, &str)],
    start: usize,
    start_offset: usize,
    alphabet: Option<&HashSet<char>>,
) -> Result<(Vec<Token>, usize)> {
    let mut members = Vec::new();
    let mut i = start + 1;
    let mut closed = false;

    while i < graphemes.len() {
        let (offset, g) = graphemes[i];
        let c = g.chars().next().unwrap();
        if c == ']' {
            closed = true;
            i += 1;
            break;
        }
        if c == '\\' {
            let Some(&(_, next)) = graphemes.get(i + 1) else {
                return Err(PipelineError::IncompleteEscape(offset));
            };
            members.push(decode_escape(next.chars().next().unwrap()));
            i += 2;
        } else {
            members.push(c);
            i += 1;
        }
    }

    if !closed || members.is_empty() {
        return Err(PipelineError::MalformedClass(start_offset));
    }

    let mut tokens = vec![Token::LParen];
    for (idx, c) in members.into_iter().enumerate() {
        if idx > 0 {
            tokens.push(Token::Union);
        }
        tokens.push(literal_char(c, alphabet, start_offset)?);
    }
    tokens.push(Token::RParen);

    Ok((tokens, i - start))
}

/// Splits an already escape-decoded input word `w` into the same symbol units the regex
/// tokenizer would produce: a reserved keyword is matched as one token rather than split into
/// its characters, but (unlike regex tokenization) no character here is treated as an operator
/// or metacharacter — `w` carries literal symbols only.
pub fn tokenize_word(w: &str) -> Vec<Rc<str>> {
    let graphemes: Vec<&str> = w.graphemes(true).collect();
    let mut out = Vec::with_capacity(graphemes.len());
    let mut i = 0;

    while i < graphemes.len() {
        let c = graphemes[i].chars().next().unwrap();
        if c.is_ascii_alphabetic() {
            let mut end = i;
            while end < graphemes.len() && graphemes[end].chars().next().unwrap().is_ascii_alphabetic() {
                end += 1;
            }
            let run: String = graphemes[i..end].concat();
            if RESERVED_KEYWORDS.contains(&run.as_str()) {
                out.push(Rc::from(run.as_str()));
            } else {
                out.extend(graphemes[i..end].iter().map(|g| Rc::from(*g)));
            }
            i = end;
        } else {
            out.push(Rc::from(graphemes[i]));
            i += 1;
        }
    }

    out
}
