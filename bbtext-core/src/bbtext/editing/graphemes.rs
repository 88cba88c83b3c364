//! Grapheme aware selections

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Widen a character range so both ends sit on grapheme cluster boundaries.
///
/// The start moves back and the end moves forward, so a selection never cuts a
/// user-perceived character (a flag, an emoji with modifiers, a base letter with
/// combining marks) in half.
pub fn snap_to_graphemes(text: &str, range: Range<usize>) -> Range<usize> {
    let mut start = range.start;
    let mut end = range.end;
    let mut offset = 0;
    for grapheme in text.graphemes(true) {
        let next = offset + grapheme.chars().count();
        if offset < range.start && range.start < next {
            start = offset;
        }
        if offset < range.end && range.end < next {
            end = next;
        }
        offset = next;
    }
    start..end
}
