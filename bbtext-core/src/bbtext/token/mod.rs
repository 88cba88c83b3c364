//! Token definitions shared by the lexer and the tree builder
//!
//!     A token is one of four kinds: an opening tag, a closing tag, a run of literal
//!     content, or a line break. Tokens are produced strictly left to right and are never
//!     mutated afterwards. Every token remembers the byte span it was scanned from, so the
//!     spans of a token stream always tile the source exactly.

mod attribute;
mod tag;

pub use attribute::{Attribute, AttributeKey, Attributes};
pub use tag::{canonical_tag_name, TagKind};

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// The four token kinds of the markup grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    OpenTag,
    CloseTag,
    Content,
    Newline,
}

/// A single token.
///
/// `value` holds the canonical tag name for tags, the unescaped text for content and
/// the verbatim line break (`\n` or `\r\n`) for newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub attributes: Attributes,
    pub span: Range<usize>,
}

impl Token {
    pub fn open(name: impl Into<String>, attributes: Attributes, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::OpenTag,
            value: name.into(),
            attributes,
            span,
        }
    }

    pub fn close(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::CloseTag,
            value: name.into(),
            attributes: Attributes::new(),
            span,
        }
    }

    pub fn content(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::Content,
            value: text.into(),
            attributes: Attributes::new(),
            span,
        }
    }

    pub fn newline(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind: TokenKind::Newline,
            value: text.into(),
            attributes: Attributes::new(),
            span,
        }
    }

    /// Check if this token is an opening or closing tag
    pub fn is_tag(&self) -> bool {
        matches!(self.kind, TokenKind::OpenTag | TokenKind::CloseTag)
    }

    /// The tag classification for tag tokens; `None` for content and newlines.
    pub fn tag_kind(&self) -> Option<TagKind> {
        self.is_tag().then(|| TagKind::from_name(&self.value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::OpenTag => {
                write!(f, "OPEN {}", self.value)?;
                for attribute in self.attributes.iter() {
                    write!(f, " {}={:?}", attribute.key(), attribute.value())?;
                }
                Ok(())
            }
            TokenKind::CloseTag => write!(f, "CLOSE {}", self.value),
            TokenKind::Content => write!(f, "CONTENT {:?}", self.value),
            TokenKind::Newline => write!(f, "NEWLINE {:?}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_tokens_for_debugging() {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::Href("https://example.com".into()));

        assert_eq!(
            Token::open("url", attributes, 0..31).to_string(),
            "OPEN url href=\"https://example.com\""
        );
        assert_eq!(Token::close("b", 0..4).to_string(), "CLOSE b");
        assert_eq!(Token::content("hi", 0..2).to_string(), "CONTENT \"hi\"");
        assert_eq!(Token::newline("\n", 0..1).to_string(), "NEWLINE \"\\n\"");
    }

    #[test]
    fn only_tags_have_a_tag_kind() {
        assert_eq!(
            Token::close("i", 0..4).tag_kind(),
            Some(TagKind::Trait(crate::bbtext::styling::Trait::Italic))
        );
        assert_eq!(Token::content("i", 0..1).tag_kind(), None);
    }
}
