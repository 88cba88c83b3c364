//! Styled buffer
//!
//! Text plus a partition of its characters into style runs. All offsets are character
//! (code point) offsets, never byte offsets.
//!
//! Invariants, restored by [`StyledBuffer::normalize`] after every mutation:
//!
//!     - runs are contiguous, non-empty, and cover `[0, len)` exactly
//!     - no two neighbouring runs carry the same traits and link

use super::traits::TraitSet;
use crate::bbtext::detection::DetectionKind;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Where a link attribute came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkOrigin {
    /// Written in the markup with a link tag.
    Markup,
    /// Added by a detection pass.
    Detected(DetectionKind),
}

/// Link attribute of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub target: String,
    pub origin: LinkOrigin,
}

impl Link {
    pub fn markup(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            origin: LinkOrigin::Markup,
        }
    }

    pub fn detected(target: impl Into<String>, kind: DetectionKind) -> Self {
        Self {
            target: target.into(),
            origin: LinkOrigin::Detected(kind),
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self.origin, LinkOrigin::Detected(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub range: Range<usize>,
    pub traits: TraitSet,
    pub link: Option<Link>,
}

impl Run {
    pub fn new(range: Range<usize>, traits: TraitSet, link: Option<Link>) -> Self {
        Self {
            range,
            traits,
            link,
        }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Same traits and link.
    pub fn same_style(&self, other: &Run) -> bool {
        self.traits == other.traits && self.link == other.link
    }

    fn intersects(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyledBuffer {
    text: String,
    runs: Vec<Run>,
}

impl StyledBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstyled buffer over `text`.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![Run::new(0..len, TraitSet::empty(), None)]
        };
        Self { text, runs }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.runs.last().map_or(0, |run| run.range.end)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The run covering character `offset`.
    pub fn run_at(&self, offset: usize) -> Option<&Run> {
        let index = self.runs.partition_point(|run| run.range.end <= offset);
        self.runs.get(index).filter(|run| run.range.contains(&offset))
    }

    pub fn traits_at(&self, offset: usize) -> TraitSet {
        self.run_at(offset).map_or(TraitSet::empty(), |run| run.traits)
    }

    /// Runs overlapping `range`.
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(move |run| run.intersects(&range))
    }

    /// Text of a character range (clamped).
    pub fn slice(&self, range: Range<usize>) -> &str {
        let range = self.clamp(range);
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        &self.text[start..end]
    }

    pub fn run_text(&self, run: &Run) -> &str {
        self.slice(run.range.clone())
    }

    /// Order the bounds and clamp them to `[0, len]`.
    pub fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len();
        let (start, end) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        start.min(len)..end.min(len)
    }

    /// Make `offset` a run boundary, splitting the run that spans it.
    pub(crate) fn split_at(&mut self, offset: usize) {
        let index = self.runs.partition_point(|run| run.range.end <= offset);
        let Some(run) = self.runs.get_mut(index) else {
            return;
        };
        if run.range.start >= offset {
            return;
        }
        let tail = Run::new(offset..run.range.end, run.traits, run.link.clone());
        run.range.end = offset;
        self.runs.insert(index + 1, tail);
    }

    /// Runs fully inside `range`. Split at both ends first.
    pub(crate) fn runs_within_mut(&mut self, range: Range<usize>) -> impl Iterator<Item = &mut Run> {
        self.runs
            .iter_mut()
            .filter(move |run| run.range.start >= range.start && run.range.end <= range.end)
    }

    pub(crate) fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.runs.iter_mut()
    }

    /// Merge neighbouring runs with identical style and drop empty runs.
    pub fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.same_style(&run) && last.range.end == run.range.start => {
                    last.range.end = run.range.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
        debug_assert!(self.validate().is_ok(), "{:?}", self.validate());
    }

    /// Check the run invariants.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let len = self.text.chars().count();
        let mut expected_start = 0;
        for (index, run) in self.runs.iter().enumerate() {
            if run.range.start != expected_start {
                return Err(InvariantViolation::Gap {
                    index,
                    expected: expected_start,
                    found: run.range.start,
                });
            }
            if run.is_empty() {
                return Err(InvariantViolation::EmptyRun { index });
            }
            if index > 0 && self.runs[index - 1].same_style(run) {
                return Err(InvariantViolation::Unmerged { index });
            }
            expected_start = run.range.end;
        }
        if expected_start != len {
            return Err(InvariantViolation::Coverage {
                covered: expected_start,
                len,
            });
        }
        Ok(())
    }
}

/// A broken buffer invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    Gap {
        index: usize,
        expected: usize,
        found: usize,
    },
    EmptyRun {
        index: usize,
    },
    Unmerged {
        index: usize,
    },
    Coverage {
        covered: usize,
        len: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::Gap {
                index,
                expected,
                found,
            } => write!(f, "run {} starts at {} instead of {}", index, found, expected),
            InvariantViolation::EmptyRun { index } => write!(f, "run {} is empty", index),
            InvariantViolation::Unmerged { index } => {
                write!(f, "run {} has the same style as its predecessor", index)
            }
            InvariantViolation::Coverage { covered, len } => {
                write!(f, "runs cover {} of {} characters", covered, len)
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Appends styled text piece by piece, merging pieces with the same style.
#[derive(Debug, Default)]
pub struct BufferBuilder {
    buffer: StyledBuffer,
}

impl BufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str, traits: TraitSet, link: Option<Link>) -> &mut Self {
        let count = text.chars().count();
        if count == 0 {
            return self;
        }
        let start = self.buffer.len();
        self.buffer.text.push_str(text);
        let run = Run::new(start..start + count, traits, link);
        match self.buffer.runs.last_mut() {
            Some(last) if last.same_style(&run) => last.range.end = run.range.end,
            _ => self.buffer.runs.push(run),
        }
        self
    }

    pub fn finish(self) -> StyledBuffer {
        self.buffer
    }
}

/// Byte offset of character `offset` in `text`, or `text.len()` past the end.
fn byte_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}
