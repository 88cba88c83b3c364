//! Raw lexemes
//!
//! The logos lexer splits the source into coarse pieces. Only `[` needs real work: its
//! callback hands the remainder of the input to the tag scanner and, on success, bumps
//! the lexer past the whole tag. A failed scan leaves a literal bracket behind.

use super::tag_scanner::{scan_tag, RawTag};
use logos::{Lexer, Logos};

/// Outcome of scanning from a `[`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagScan {
    Tag(RawTag),
    Literal,
}

#[derive(Logos, Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    #[token("[", bracket)]
    Bracket(TagScan),

    // `\[`, `\]` and `\\` stand for the escaped character
    #[regex(r"\\[\[\]\\]", |lex| lex.slice().chars().nth(1))]
    Escape(char),

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[^\[\\\r\n]+")]
    Text,

    // a backslash that does not start an escape is literal
    #[token("\\")]
    Backslash,

    // a carriage return not followed by a line feed is literal
    #[token("\r")]
    CarriageReturn,
}

fn bracket(lex: &mut Lexer<Lexeme>) -> TagScan {
    match scan_tag(lex.remainder()) {
        Some((tag, consumed)) => {
            lex.bump(consumed);
            TagScan::Tag(tag)
        }
        None => TagScan::Literal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(source: &str) -> Vec<Lexeme> {
        Lexeme::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn text_and_newlines() {
        assert_eq!(
            lexemes("ab\ncd\r\n"),
            vec![Lexeme::Text, Lexeme::Newline, Lexeme::Text, Lexeme::Newline]
        );
    }

    #[test]
    fn escapes_and_stray_backslashes() {
        assert_eq!(
            lexemes(r"\[\\x\y"),
            vec![
                Lexeme::Escape('['),
                Lexeme::Escape('\\'),
                Lexeme::Text,
                Lexeme::Backslash,
                Lexeme::Text
            ]
        );
    }

    #[test]
    fn bracket_scans_whole_tag() {
        let mut lexer = Lexeme::lexer("[b]x");
        assert!(matches!(
            lexer.next(),
            Some(Ok(Lexeme::Bracket(TagScan::Tag(_))))
        ));
        assert_eq!(lexer.span(), 0..3);
        assert_eq!(lexer.next(), Some(Ok(Lexeme::Text)));
    }

    #[test]
    fn failed_scan_is_a_literal_bracket() {
        let mut lexer = Lexeme::lexer("[b x");
        assert_eq!(lexer.next(), Some(Ok(Lexeme::Bracket(TagScan::Literal))));
        assert_eq!(lexer.span(), 0..1);
    }
}
