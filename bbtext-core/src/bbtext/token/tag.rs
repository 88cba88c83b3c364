//! Tag name classification
//!
//! Tag names are case-insensitive and several spellings map to the same tag. Every
//! name is reduced to a canonical spelling before it is stored in a token, so the tree
//! builder can match `[bold]` against `[/b]`.

use crate::bbtext::styling::Trait;
use serde::Serialize;

/// What a tag means for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TagKind {
    /// One of the formatting traits.
    Trait(Trait),
    /// A link carrying an `href` attribute.
    Link,
    /// Syntactically valid but unsupported. Kept in the tree, contributes no style.
    Unknown,
}

impl TagKind {
    /// Classify a (not necessarily canonical) tag name.
    pub fn from_name(name: &str) -> Self {
        match canonical_tag_name(name).as_str() {
            "b" => TagKind::Trait(Trait::Bold),
            "i" => TagKind::Trait(Trait::Italic),
            "u" => TagKind::Trait(Trait::Underline),
            "s" => TagKind::Trait(Trait::StrikeThrough),
            "url" => TagKind::Link,
            _ => TagKind::Unknown,
        }
    }
}

/// Lower-case a tag name and fold aliases onto the canonical spelling.
pub fn canonical_tag_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "b" | "bold" | "strong" => "b",
        "i" | "italic" | "em" => "i",
        "u" | "underline" | "underlined" => "u",
        "s" | "strike" | "strikethrough" | "del" => "s",
        "url" | "link" | "a" => "url",
        _ => return lower,
    };
    canonical.to_string()
}
