//! Document facade
//!
//!     [`RichText`] is what a host editor holds on to: one configuration and the current
//!     styled buffer. It routes loading and exporting through the pipeline, guards
//!     interactive formatting with the configuration's feature flags, and runs the
//!     detection overlay with the configured kinds.
//!
//!     Markup is converted on the way in and re-derived on demand on the way out; the
//!     buffer is the source of truth in between.

use crate::bbtext::config::Configuration;
use crate::bbtext::detection::{self, Detector};
use crate::bbtext::editing::{self, snap_to_graphemes};
use crate::bbtext::pipeline;
use crate::bbtext::styling::{StyledBuffer, Trait, TraitSet};
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// An interactive edit the configuration does not permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The document is readonly or shows plain text.
    Readonly,
    /// The trait's feature is not enabled.
    FeatureDisabled(Trait),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Readonly => write!(f, "document does not accept formatting changes"),
            EditError::FeatureDisabled(member) => {
                write!(f, "{} formatting is not enabled", member)
            }
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    config: Configuration,
    buffer: StyledBuffer,
}

impl RichText {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            buffer: StyledBuffer::new(),
        }
    }

    pub fn from_markup(markup: &str, config: Configuration) -> Self {
        let mut document = Self::new(config);
        document.set_text(markup);
        document
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Replace the content with converted `markup`.
    pub fn set_text(&mut self, markup: &str) {
        self.buffer = pipeline::load(markup, &self.config);
    }

    pub fn set_buffer(&mut self, buffer: StyledBuffer) {
        self.buffer = buffer;
    }

    pub fn buffer(&self) -> &StyledBuffer {
        &self.buffer
    }

    /// Text without any markup.
    pub fn plain_text(&self) -> &str {
        self.buffer.text()
    }

    /// The content encoded as markup. In plain text mode this is the text itself.
    pub fn markup(&self) -> String {
        if self.config.is_plain_text() {
            return self.buffer.text().to_string();
        }
        pipeline::export(&self.buffer)
    }

    /// Toggle `member` over `range`, widened to whole grapheme clusters.
    pub fn toggle(&mut self, range: Range<usize>, member: Trait) -> Result<(), EditError> {
        if self.config.is_readonly() {
            return Err(EditError::Readonly);
        }
        if !self.config.allows(member) {
            return Err(EditError::FeatureDisabled(member));
        }
        let range = self.buffer.clamp(range);
        let snapped = snap_to_graphemes(self.buffer.text(), range.clone());
        if snapped != range {
            debug!(?range, ?snapped, "selection widened to grapheme boundaries");
        }
        self.buffer = editing::toggle_trait(&self.buffer, snapped, member);
        Ok(())
    }

    /// Traits active across `range`, limited to the ones this document allows.
    pub fn active_traits(&self, range: Range<usize>) -> TraitSet {
        editing::active_traits(&self.buffer, range) & self.config.allowed_traits()
    }

    /// Back to the configured initial traits, dropping markup links.
    pub fn reset_formatting(&mut self) {
        self.buffer = editing::reset_formatting(&self.buffer, self.config.initial_traits());
    }

    /// Refresh the detection overlay with the configured kinds.
    pub fn detect(&mut self, detector: &dyn Detector) {
        let kinds = self.config.detection();
        if kinds.is_empty() {
            return;
        }
        self.buffer = detection::detect(&self.buffer, detector, kinds);
    }
}

impl Default for RichText {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}
