//! Lexing
//!
//!     Converts markup into a token stream. Lexing is total: every byte of the input ends
//!     up in exactly one token, and the lexer never fails. Anything that does not scan as
//!     a well formed tag is folded back into the surrounding content.
//!
//!     The work is split in two layers:
//!
//!         - [lexemes](lexemes): a logos lexer producing coarse pieces (text, newlines,
//!           escapes, brackets). The `[` callback runs the tag scanner.
//!         - [tokenize]: merges consecutive literal pieces into a single Content token,
//!           emits dedicated Newline tokens and resolves tag names and attributes.
//!
//!     Line breaks are never merged into content so that layout concerns can be handled
//!     separately from styling.

mod lexemes;
mod tag_scanner;

use crate::bbtext::token::{canonical_tag_name, Attribute, AttributeKey, Attributes, TagKind, Token};
use lexemes::{Lexeme, TagScan};
use logos::Logos;
use std::ops::Range;
use tag_scanner::RawTag;
use tracing::debug;

/// Tokenize markup into an ordered token sequence.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending = PendingContent::default();
    let mut lexer = Lexeme::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Lexeme::Bracket(TagScan::Tag(raw))) => {
                pending.flush(&mut tokens);
                tokens.push(tag_token(raw, span));
            }
            Ok(Lexeme::Bracket(TagScan::Literal)) => {
                debug!(offset = span.start, "unterminated tag folded into content");
                pending.push_str("[", span);
            }
            Ok(Lexeme::Escape(ch)) => pending.push(ch, span),
            Ok(Lexeme::Newline) => {
                pending.flush(&mut tokens);
                tokens.push(Token::newline(lexer.slice(), span));
            }
            Ok(Lexeme::Text | Lexeme::Backslash | Lexeme::CarriageReturn) | Err(()) => {
                pending.push_str(lexer.slice(), span);
            }
        }
    }
    pending.flush(&mut tokens);
    tokens
}

fn tag_token(raw: RawTag, span: Range<usize>) -> Token {
    let name = canonical_tag_name(&raw.name);
    if raw.closing {
        return Token::close(name, span);
    }

    let mut attributes = Attributes::new();
    if let Some(value) = raw.shorthand {
        match TagKind::from_name(&name) {
            TagKind::Link => attributes.insert(Attribute::Href(value)),
            _ => debug!(tag = %name, "shorthand value dropped on tag without a default key"),
        }
    }
    for (key, value) in raw.attributes {
        match AttributeKey::parse(&key) {
            Some(key) => attributes.insert(Attribute::new(key, value)),
            None => debug!(tag = %name, key = %key, "unknown attribute key dropped"),
        }
    }
    Token::open(name, attributes, span)
}

/// Literal text waiting to become a Content token.
#[derive(Default)]
struct PendingContent {
    text: String,
    span: Option<Range<usize>>,
}

impl PendingContent {
    fn push(&mut self, ch: char, span: Range<usize>) {
        self.text.push(ch);
        self.extend(span);
    }

    fn push_str(&mut self, text: &str, span: Range<usize>) {
        self.text.push_str(text);
        self.extend(span);
    }

    fn extend(&mut self, span: Range<usize>) {
        self.span = Some(match self.span.take() {
            Some(existing) => existing.start..span.end,
            None => span,
        });
    }

    fn flush(&mut self, tokens: &mut Vec<Token>) {
        if let Some(span) = self.span.take() {
            tokens.push(Token::content(std::mem::take(&mut self.text), span));
        }
    }
}
