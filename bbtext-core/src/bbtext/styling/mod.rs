//! Styling
//!
//!     The styled buffer is the in-memory form of a document: its text plus a normalized
//!     partition into runs, each with a [`TraitSet`] and an optional [`Link`]. The
//!     [applier](apply) produces one from a tag tree.

mod applier;
mod buffer;
mod traits;

pub use applier::{apply, apply_default};
pub use buffer::{BufferBuilder, InvariantViolation, Link, LinkOrigin, Run, StyledBuffer};
pub use traits::{ParseTraitError, Trait, TraitSet};
