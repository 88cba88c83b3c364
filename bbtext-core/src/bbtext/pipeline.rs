//! Pipeline
//!
//! The two directions a document travels, composed from the individual stages:
//!
//!     load:   markup -> tokenize -> build -> apply -> styled buffer
//!     export: styled buffer -> to_tree -> render -> markup
//!
//! With a plain text configuration `load` skips conversion and keeps the markup
//! verbatim as unstyled text.

use crate::bbtext::config::Configuration;
use crate::bbtext::lexing::tokenize;
use crate::bbtext::parsing::build;
use crate::bbtext::serializing::serialize;
use crate::bbtext::styling::{apply, StyledBuffer};
use tracing::trace_span;

/// Markup to styled buffer.
pub fn load(markup: &str, config: &Configuration) -> StyledBuffer {
    let _span = trace_span!("load", bytes = markup.len()).entered();
    if config.is_plain_text() {
        return StyledBuffer::plain(markup);
    }
    let tokens = tokenize(markup);
    let tree = build(&tokens);
    apply(&tree, config)
}

/// Styled buffer to canonical markup.
pub fn export(buffer: &StyledBuffer) -> String {
    let _span = trace_span!("export", runs = buffer.runs().len()).entered();
    serialize(buffer)
}

/// Load and export again, producing the canonical form of `markup`.
pub fn reformat(markup: &str, config: &Configuration) -> String {
    export(&load(markup, config))
}
