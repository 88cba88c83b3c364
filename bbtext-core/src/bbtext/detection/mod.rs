//! Detection overlay
//!
//!     Marks recognisable entities (phone numbers, web links, addresses, dates) in a
//!     buffer's text with detected link attributes. Detection is an overlay: it never
//!     touches traits, never replaces a link written in the markup, and never reaches
//!     serialized output.
//!
//!     Applying detections first removes every previously detected link, so running a
//!     pass twice gives the same buffer as running it once.
//!
//!     The matching itself sits behind the [`Detector`] trait. [`PatternDetector`] is a
//!     regex based implementation good enough for tests and the command line tool.

mod patterns;

pub use patterns::PatternDetector;

use crate::bbtext::config::DetectionKinds;
use crate::bbtext::styling::{Link, StyledBuffer};
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetectionKind {
    PhoneNumber,
    Link,
    Address,
    Date,
}

impl DetectionKind {
    pub const ALL: [DetectionKind; 4] = [
        DetectionKind::PhoneNumber,
        DetectionKind::Link,
        DetectionKind::Address,
        DetectionKind::Date,
    ];

    pub fn flag(self) -> DetectionKinds {
        match self {
            DetectionKind::PhoneNumber => DetectionKinds::PHONE_NUMBER,
            DetectionKind::Link => DetectionKinds::LINK,
            DetectionKind::Address => DetectionKinds::ADDRESS,
            DetectionKind::Date => DetectionKinds::DATE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DetectionKind::PhoneNumber => "phone",
            DetectionKind::Link => "link",
            DetectionKind::Address => "address",
            DetectionKind::Date => "date",
        }
    }
}

impl fmt::Display for DetectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a detection kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDetectionKindError(String);

impl fmt::Display for ParseDetectionKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown detection kind '{}' (expected phone, link, address or date)",
            self.0
        )
    }
}

impl std::error::Error for ParseDetectionKindError {}

impl FromStr for DetectionKind {
    type Err = ParseDetectionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "phone" | "phone-number" => Ok(DetectionKind::PhoneNumber),
            "link" | "url" => Ok(DetectionKind::Link),
            "address" => Ok(DetectionKind::Address),
            "date" => Ok(DetectionKind::Date),
            _ => Err(ParseDetectionKindError(s.to_string())),
        }
    }
}

/// One detected entity. `range` is in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub range: Range<usize>,
    pub kind: DetectionKind,
    pub target: String,
}

impl Detection {
    pub fn new(range: Range<usize>, kind: DetectionKind, target: impl Into<String>) -> Self {
        Self {
            range,
            kind,
            target: target.into(),
        }
    }
}

/// Finds entities of the requested kinds in plain text.
pub trait Detector {
    fn detect(&self, text: &str, kinds: DetectionKinds) -> Vec<Detection>;
}

/// Run `detector` over the buffer's text and overlay the result.
pub fn detect(
    buffer: &StyledBuffer,
    detector: &dyn Detector,
    kinds: DetectionKinds,
) -> StyledBuffer {
    if kinds.is_empty() {
        return clear_detections(buffer);
    }
    let detections = detector.detect(buffer.text(), kinds);
    debug!(count = detections.len(), ?kinds, "detection pass");
    apply_detections(buffer, &detections)
}

/// Overlay `detections`, replacing whatever an earlier pass left behind.
///
/// Characters already carrying a markup link keep it; a detection only fills the
/// characters around it.
pub fn apply_detections(buffer: &StyledBuffer, detections: &[Detection]) -> StyledBuffer {
    let mut overlaid = clear_detections(buffer);
    for detection in detections {
        let range = overlaid.clamp(detection.range.clone());
        if range.is_empty() {
            continue;
        }
        overlaid.split_at(range.start);
        overlaid.split_at(range.end);
        let link = Link::detected(detection.target.clone(), detection.kind);
        for run in overlaid.runs_within_mut(range) {
            if run.link.is_none() {
                run.link = Some(link.clone());
            }
        }
    }
    overlaid.normalize();
    overlaid
}

/// Drop every detected link.
pub fn clear_detections(buffer: &StyledBuffer) -> StyledBuffer {
    let mut cleared = buffer.clone();
    for run in cleared.runs_mut() {
        if run.link.as_ref().is_some_and(Link::is_detected) {
            run.link = None;
        }
    }
    cleared.normalize();
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbtext::styling::{BufferBuilder, TraitSet};

    fn links(buffer: &StyledBuffer) -> Vec<(Range<usize>, Option<Link>)> {
        buffer
            .runs()
            .iter()
            .map(|run| (run.range.clone(), run.link.clone()))
            .collect()
    }

    #[test]
    fn kind_names() {
        assert_eq!("Phone_Number".parse(), Ok(DetectionKind::PhoneNumber));
        assert_eq!("url".parse(), Ok(DetectionKind::Link));
        assert!("weather".parse::<DetectionKind>().is_err());
        for kind in DetectionKind::ALL {
            assert_eq!(kind.name().parse(), Ok(kind));
        }
    }

    #[test]
    fn overlay_sets_detected_links() {
        let buffer = StyledBuffer::plain("call 555-1234 now");
        let overlaid = apply_detections(
            &buffer,
            &[Detection::new(5..13, DetectionKind::PhoneNumber, "tel:555-1234")],
        );
        assert_eq!(
            links(&overlaid),
            vec![
                (0..5, None),
                (
                    5..13,
                    Some(Link::detected("tel:555-1234", DetectionKind::PhoneNumber))
                ),
                (13..17, None)
            ]
        );
    }

    #[test]
    fn markup_links_win() {
        let mut builder = BufferBuilder::new();
        builder
            .push("ab", TraitSet::empty(), None)
            .push("cd", TraitSet::empty(), Some(Link::markup("m")));
        let overlaid = apply_detections(
            &builder.finish(),
            &[Detection::new(0..4, DetectionKind::Link, "d")],
        );
        assert_eq!(
            links(&overlaid),
            vec![
                (0..2, Some(Link::detected("d", DetectionKind::Link))),
                (2..4, Some(Link::markup("m")))
            ]
        );
    }

    #[test]
    fn reapplying_is_idempotent() {
        let buffer = StyledBuffer::plain("see www.example.com");
        let detections = [Detection::new(4..19, DetectionKind::Link, "http://www.example.com")];
        let once = apply_detections(&buffer, &detections);
        let twice = apply_detections(&once, &detections);
        assert_eq!(once, twice);
    }

    #[test]
    fn stale_detections_are_removed() {
        let buffer = StyledBuffer::plain("abcd");
        let first = apply_detections(&buffer, &[Detection::new(0..2, DetectionKind::Date, "x")]);
        let second = apply_detections(&first, &[Detection::new(2..4, DetectionKind::Date, "y")]);
        assert_eq!(
            links(&second),
            vec![
                (0..2, None),
                (2..4, Some(Link::detected("y", DetectionKind::Date)))
            ]
        );
    }

    #[test]
    fn traits_are_untouched() {
        let mut builder = BufferBuilder::new();
        builder.push("12-34", TraitSet::BOLD, None);
        let overlaid = apply_detections(
            &builder.finish(),
            &[Detection::new(0..9, DetectionKind::PhoneNumber, "tel:1234")],
        );
        assert!(overlaid.runs().iter().all(|run| run.traits == TraitSet::BOLD));
    }

    #[test]
    fn no_kinds_clears_the_overlay() {
        let buffer = apply_detections(
            &StyledBuffer::plain("abc"),
            &[Detection::new(0..3, DetectionKind::Link, "x")],
        );
        let cleared = detect(&buffer, &PatternDetector::new(), DetectionKinds::empty());
        assert_eq!(cleared, StyledBuffer::plain("abc"));
    }
}
