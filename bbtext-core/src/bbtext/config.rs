//! Engine configuration
//!
//! One immutable [`Configuration`] value is built up front and handed by reference to
//! every stage that needs it. Nothing in the engine mutates it or keeps a global copy.
//! Loading it from files is the job of the `bbtext-config` crate.

use crate::bbtext::styling::{Trait, TraitSet};
use bitflags::bitflags;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Enabled editor features.
    ///
    /// `NONE` and `PLAIN_TEXT` both turn markup conversion off. `READONLY` converts markup
    /// but rejects interactive formatting. `ALL` enables every formatting trait.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct Features: u32 {
        const NONE = 1 << 0;
        const PLAIN_TEXT = 1 << 1;
        const READONLY = 1 << 2;
        const BOLD = 1 << 3;
        const ITALIC = 1 << 4;
        const UNDERLINED = 1 << 5;
        const STRIKE_THROUGH = 1 << 6;
        const ALL = 1 << 20;
    }
}

impl Features {
    /// The feature flag guarding a trait.
    pub fn for_trait(member: Trait) -> Features {
        match member {
            Trait::Bold => Features::BOLD,
            Trait::Italic => Features::ITALIC,
            Trait::Underline => Features::UNDERLINED,
            Trait::StrikeThrough => Features::STRIKE_THROUGH,
        }
    }

    /// Look up a single feature by its configuration name (`plain-text`, `bold`, ...).
    pub fn from_config_name(name: &str) -> Option<Features> {
        let feature = match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => Features::NONE,
            "plain-text" | "plaintext" => Features::PLAIN_TEXT,
            "readonly" | "read-only" => Features::READONLY,
            "bold" => Features::BOLD,
            "italic" => Features::ITALIC,
            "underlined" | "underline" => Features::UNDERLINED,
            "strike-through" | "strikethrough" => Features::STRIKE_THROUGH,
            "all" => Features::ALL,
            _ => return None,
        };
        Some(feature)
    }
}

bitflags! {
    /// Kinds of structured content a detector is asked to find.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct DetectionKinds: u8 {
        const PHONE_NUMBER = 1;
        const LINK = 1 << 1;
        const ADDRESS = 1 << 2;
        const DATE = 1 << 3;
    }
}

/// An RGB colour, written `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LINK_BLUE: Color = Color::rgb(0x00, 0x7a, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned for colours that are not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour '{}' (expected #rrggbb)", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(error)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(error());
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| error());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    features: Features,
    detection: DetectionKinds,
    default_text_color: Color,
    highlight_color: Color,
    initial_traits: TraitSet,
}

impl Configuration {
    pub fn new(features: Features) -> Self {
        Self {
            features,
            detection: DetectionKinds::empty(),
            default_text_color: Color::BLACK,
            highlight_color: Color::LINK_BLUE,
            initial_traits: TraitSet::empty(),
        }
    }

    pub fn with_detection(mut self, detection: DetectionKinds) -> Self {
        self.detection = detection;
        self
    }

    pub fn with_colors(mut self, default_text: Color, highlight: Color) -> Self {
        self.default_text_color = default_text;
        self.highlight_color = highlight;
        self
    }

    pub fn with_initial_traits(mut self, traits: TraitSet) -> Self {
        self.initial_traits = traits;
        self
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn detection(&self) -> DetectionKinds {
        self.detection
    }

    pub fn default_text_color(&self) -> Color {
        self.default_text_color
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn initial_traits(&self) -> TraitSet {
        self.initial_traits
    }

    /// Markup is shown verbatim, not converted.
    pub fn is_plain_text(&self) -> bool {
        self.features
            .intersects(Features::NONE | Features::PLAIN_TEXT)
    }

    /// Interactive formatting is rejected.
    pub fn is_readonly(&self) -> bool {
        self.is_plain_text() || self.features.contains(Features::READONLY)
    }

    /// Whether `member` is styled when it appears in markup or is toggled.
    pub fn allows(&self, member: Trait) -> bool {
        !self.is_plain_text()
            && (self.features.contains(Features::ALL)
                || self.features.contains(Features::for_trait(member)))
    }

    /// All traits this configuration allows.
    pub fn allowed_traits(&self) -> TraitSet {
        Trait::ALL
            .into_iter()
            .filter(|member| self.allows(*member))
            .collect()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Features::ALL)
    }
}
