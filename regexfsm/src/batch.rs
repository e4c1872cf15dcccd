//! Parsing for the batch input line format (`regex;w` or `regex w`) and the escape table used
//! to decode `w`. Pure string transformations only — opening the batch file itself is an
//! external collaborator's job (the CLI driver), not the core's.

use nom::bytes::complete::{is_not, take_while1};
use nom::character::complete::{char, space1};
use nom::combinator::rest;
use nom::sequence::separated_pair;
use nom::IResult;

use crate::token::decode_escape;

fn semi_split(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(is_not(";"), char(';'), rest)(input)
}

fn space_split(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_while1(|c: char| !c.is_whitespace()), space1, rest)(input)
}

/// Splits one batch-file line into `(regex, w)`. A bare regex with no separator implies
/// `w = "ε"`. Leading/trailing whitespace around both parts is trimmed.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok((_, (r, w))) = semi_split(trimmed) {
        return Some((r.trim().to_string(), w.trim().to_string()));
    }
    if let Ok((_, (r, w))) = space_split(trimmed) {
        return Some((r.trim().to_string(), w.trim().to_string()));
    }
    Some((trimmed.to_string(), "ε".to_string()))
}

/// Decodes a `w` literal: `ε` means the empty string, and `\n`/`\t`/`\r`/`\\` decode per the
/// same escape table the tokenizer uses. Any other character passes through unchanged.
pub fn decode_word_literal(w: &str) -> String {
    let w = w.trim();
    if w == "ε" {
        return String::new();
    }
    let mut out = String::with_capacity(w.len());
    let mut chars = w.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(decode_escape(next));
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolon() {
        assert_eq!(parse_line("a(b|c)*;abbcbc"), Some(("a(b|c)*".to_string(), "abbcbc".to_string())));
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(parse_line("a(b|c)* abbcbc"), Some(("a(b|c)*".to_string(), "abbcbc".to_string())));
    }

    #[test]
    fn bare_regex_implies_epsilon() {
        assert_eq!(parse_line("a*"), Some(("a*".to_string(), "ε".to_string())));
    }

    #[test]
    fn empty_line_is_skipped() {
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn decodes_epsilon_word() {
        assert_eq!(decode_word_literal("ε"), "");
    }

    #[test]
    fn decodes_escapes_in_word() {
        assert_eq!(decode_word_literal(r"a\nb"), "a\nb");
    }
}
