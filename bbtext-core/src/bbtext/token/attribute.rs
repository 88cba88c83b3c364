//! Tag attributes
//!
//! The attribute key set is closed. Keys the engine does not know about are dropped by
//! the lexer, so every attribute that reaches the tree is typed.

use serde::Serialize;
use std::fmt;

/// The recognised attribute keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKey {
    /// Link target.
    Href,
    /// Link title.
    Title,
}

impl AttributeKey {
    /// Resolve a key as written in markup. Matching is case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "href" | "target" => Some(AttributeKey::Href),
            "title" => Some(AttributeKey::Title),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKey::Href => "href",
            AttributeKey::Title => "title",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Href(String),
    Title(String),
}

impl Attribute {
    pub fn new(key: AttributeKey, value: impl Into<String>) -> Self {
        match key {
            AttributeKey::Href => Attribute::Href(value.into()),
            AttributeKey::Title => Attribute::Title(value.into()),
        }
    }

    pub fn key(&self) -> AttributeKey {
        match self {
            Attribute::Href(_) => AttributeKey::Href,
            Attribute::Title(_) => AttributeKey::Title,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Attribute::Href(value) | Attribute::Title(value) => value,
        }
    }
}

/// Ordered attribute list with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert an attribute. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, attribute: Attribute) {
        let key = attribute.key();
        match self.0.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = attribute,
            None => self.0.push(attribute),
        }
    }

    pub fn get(&self, key: AttributeKey) -> Option<&str> {
        self.0
            .iter()
            .find(|attribute| attribute.key() == key)
            .map(Attribute::value)
    }

    pub fn href(&self) -> Option<&str> {
        self.get(AttributeKey::Href)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for attribute in iter {
            attributes.insert(attribute);
        }
        attributes
    }
}
