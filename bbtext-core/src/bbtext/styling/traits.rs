//! Formatting traits
//!
//! Each trait is an independent boolean: a [`TraitSet`] is a bit set, so toggling
//! underline can never disturb strike-through and vice versa.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Set of formatting traits active on a run of text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TraitSet: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKE_THROUGH = 1 << 3;
    }
}

impl TraitSet {
    /// Members in fixed priority order (bold, italic, underline, strike-through).
    pub fn members(self) -> impl Iterator<Item = Trait> {
        Trait::ALL
            .into_iter()
            .filter(move |member| self.contains(member.flag()))
    }
}

impl From<Trait> for TraitSet {
    fn from(value: Trait) -> Self {
        value.flag()
    }
}

impl FromIterator<Trait> for TraitSet {
    fn from_iter<I: IntoIterator<Item = Trait>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TraitSet::empty(), |set, member| set | member.flag())
    }
}

/// A single formatting trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trait {
    Bold,
    Italic,
    Underline,
    StrikeThrough,
}

impl Trait {
    /// All traits in priority order.
    pub const ALL: [Trait; 4] = [
        Trait::Bold,
        Trait::Italic,
        Trait::Underline,
        Trait::StrikeThrough,
    ];

    pub fn flag(self) -> TraitSet {
        match self {
            Trait::Bold => TraitSet::BOLD,
            Trait::Italic => TraitSet::ITALIC,
            Trait::Underline => TraitSet::UNDERLINE,
            Trait::StrikeThrough => TraitSet::STRIKE_THROUGH,
        }
    }

    /// Canonical markup tag for this trait.
    pub fn tag_name(self) -> &'static str {
        match self {
            Trait::Bold => "b",
            Trait::Italic => "i",
            Trait::Underline => "u",
            Trait::StrikeThrough => "s",
        }
    }

    /// Position in the fixed priority order used for serialization tie-breaks.
    pub fn priority(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trait::Bold => "bold",
            Trait::Italic => "italic",
            Trait::Underline => "underline",
            Trait::StrikeThrough => "strike-through",
        };
        f.write_str(name)
    }
}

/// Error returned when a trait name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTraitError(String);

impl fmt::Display for ParseTraitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown trait '{}' (expected bold, italic, underline or strike-through)",
            self.0
        )
    }
}

impl std::error::Error for ParseTraitError {}

impl FromStr for Trait {
    type Err = ParseTraitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "b" | "bold" => Ok(Trait::Bold),
            "i" | "italic" => Ok(Trait::Italic),
            "u" | "underline" | "underlined" => Ok(Trait::Underline),
            "s" | "strike" | "strikethrough" | "strike-through" => Ok(Trait::StrikeThrough),
            _ => Err(ParseTraitError(s.to_string())),
        }
    }
}
