//! Shared configuration loader for the bbtext toolchain.
//!
//! `defaults/bbtext.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`BbtextConfig`],
//! which [`BbtextConfig::to_configuration`] turns into the engine's immutable
//! [`Configuration`].

use bbtext_core::bbtext::config::{Color, Configuration, DetectionKinds, Features, ParseColorError};
use bbtext_core::bbtext::detection::{DetectionKind, ParseDetectionKindError};
use bbtext_core::bbtext::styling::{ParseTraitError, Trait, TraitSet};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/bbtext.default.toml");

/// Top-level configuration consumed by bbtext applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BbtextConfig {
    pub features: FeaturesConfig,
    pub detection: DetectionConfig,
    pub colors: ColorsConfig,
    pub initial: InitialConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default)]
    pub enabled: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub kinds: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorsConfig {
    pub default_text: String,
    pub highlight: String,
}

/// Formatting restored by a reset.
#[derive(Debug, Clone, Deserialize)]
pub struct InitialConfig {
    #[serde(default)]
    pub traits: Vec<String>,
}

/// A configuration value that deserialized fine but means nothing to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueError {
    UnknownFeature(String),
    UnknownDetectionKind(ParseDetectionKindError),
    UnknownTrait(ParseTraitError),
    InvalidColor {
        key: &'static str,
        source: ParseColorError,
    },
}

impl fmt::Display for ConfigValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValueError::UnknownFeature(name) => {
                write!(f, "features.enabled: unknown feature '{}'", name)
            }
            ConfigValueError::UnknownDetectionKind(err) => write!(f, "detection.kinds: {}", err),
            ConfigValueError::UnknownTrait(err) => write!(f, "initial.traits: {}", err),
            ConfigValueError::InvalidColor { key, source } => write!(f, "{}: {}", key, source),
        }
    }
}

impl std::error::Error for ConfigValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigValueError::UnknownFeature(_) => None,
            ConfigValueError::UnknownDetectionKind(err) => Some(err),
            ConfigValueError::UnknownTrait(err) => Some(err),
            ConfigValueError::InvalidColor { source, .. } => Some(source),
        }
    }
}

impl BbtextConfig {
    /// Resolve names and colours into the engine configuration.
    pub fn to_configuration(&self) -> Result<Configuration, ConfigValueError> {
        let mut features = Features::empty();
        for name in &self.features.enabled {
            features |= Features::from_config_name(name)
                .ok_or_else(|| ConfigValueError::UnknownFeature(name.clone()))?;
        }

        let mut detection = DetectionKinds::empty();
        for name in &self.detection.kinds {
            let kind: DetectionKind = name.parse().map_err(ConfigValueError::UnknownDetectionKind)?;
            detection |= kind.flag();
        }

        let mut initial = TraitSet::empty();
        for name in &self.initial.traits {
            let member: Trait = name.parse().map_err(ConfigValueError::UnknownTrait)?;
            initial |= member.flag();
        }

        let default_text = parse_color("colors.default_text", &self.colors.default_text)?;
        let highlight = parse_color("colors.highlight", &self.colors.highlight)?;

        Ok(Configuration::new(features)
            .with_detection(detection)
            .with_colors(default_text, highlight)
            .with_initial_traits(initial))
    }
}

fn parse_color(key: &'static str, value: &str) -> Result<Color, ConfigValueError> {
    value
        .parse()
        .map_err(|source| ConfigValueError::InvalidColor { key, source })
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BbtextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BbtextConfig, ConfigError> {
    Loader::new().build()
}
