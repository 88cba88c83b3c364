//! Editing
//!
//!     Selection scoped formatting changes on a [`StyledBuffer`]. Every operation takes
//!     the buffer by reference and returns the edited copy; nothing else is touched.
//!
//!     Ranges are character offsets. They are ordered and clamped to the buffer, so an
//!     out of range selection never fails. An empty selection changes nothing.
//!
//!     Toggling uses uniform activation: a trait counts as active over a selection only
//!     when every run the selection touches has it. Toggling an active trait removes it
//!     from the whole selection, toggling an inactive one adds it to the whole selection.
//!     Runs crossing the selection edges are split first so the edit covers exactly the
//!     selection, and the result is normalized again.

mod graphemes;

pub use graphemes::snap_to_graphemes;

use crate::bbtext::styling::{StyledBuffer, Trait, TraitSet};
use std::ops::Range;
use tracing::debug;

/// Toggle `target` over `range`.
pub fn toggle_trait(buffer: &StyledBuffer, range: Range<usize>, target: Trait) -> StyledBuffer {
    let range = clamped(buffer, range);
    if range.is_empty() {
        return buffer.clone();
    }
    let active = is_trait_active(buffer, range.clone(), target);
    set_trait(buffer, range, target, !active)
}

/// Add or remove `target` over `range`, leaving every other trait alone.
pub fn set_trait(
    buffer: &StyledBuffer,
    range: Range<usize>,
    target: Trait,
    enabled: bool,
) -> StyledBuffer {
    let range = clamped(buffer, range);
    let mut edited = buffer.clone();
    if range.is_empty() {
        return edited;
    }
    edited.split_at(range.start);
    edited.split_at(range.end);
    for run in edited.runs_within_mut(range) {
        run.traits.set(target.flag(), enabled);
    }
    edited.normalize();
    edited
}

/// Whether every run touched by `range` carries `target`.
pub fn is_trait_active(buffer: &StyledBuffer, range: Range<usize>, target: Trait) -> bool {
    active_traits(buffer, range).contains(target.flag())
}

/// Traits present over the whole of `range`.
///
/// For an empty range (a caret) this is the style of the character before the caret,
/// or of the first character when the caret is at the start.
pub fn active_traits(buffer: &StyledBuffer, range: Range<usize>) -> TraitSet {
    let range = buffer.clamp(range);
    if range.is_empty() {
        let offset = range.start.saturating_sub(1);
        return buffer.traits_at(offset);
    }
    buffer
        .runs_in(range)
        .fold(TraitSet::all(), |active, run| active & run.traits)
}

/// Replace every run's traits with `initial` and drop markup links.
///
/// Detected links survive; they are owned by the detection overlay.
pub fn reset_formatting(buffer: &StyledBuffer, initial: TraitSet) -> StyledBuffer {
    let mut edited = buffer.clone();
    for run in edited.runs_mut() {
        run.traits = initial;
        if !run.link.as_ref().is_some_and(|link| link.is_detected()) {
            run.link = None;
        }
    }
    edited.normalize();
    edited
}

fn clamped(buffer: &StyledBuffer, range: Range<usize>) -> Range<usize> {
    let clamped = buffer.clamp(range.clone());
    if clamped != range {
        debug!(?range, ?clamped, "selection clamped to buffer");
    }
    clamped
}
