//! Regex based detector
//!
//! Patterns are tried in a fixed priority order (links, dates, addresses, phone
//! numbers). A candidate overlapping one already accepted is dropped, so a date is
//! never also reported as a phone number.

use super::{Detection, DetectionKind, Detector};
use crate::bbtext::config::DetectionKinds;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>\[\]]+").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[\w.+-]+@[\w-]+(?:\.[\w-]+)+\b").unwrap());

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}))\b").unwrap()
});

static ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b\d{1,5}(?: [A-Z][a-z]+){1,3} (?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr)\b",
    )
    .unwrap()
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ .-]?)?(?:\(\d{2,4}\)[ .-]?|\d{2,4}[ .-])(?:\d{2,4}[ .-]){0,2}\d{3,4}\b")
        .unwrap()
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\'', '"'];

/// Detector backed by a handful of regular expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    fn candidates(&self, text: &str, kinds: DetectionKinds) -> Vec<(Range<usize>, DetectionKind, String)> {
        let mut found = Vec::new();
        if kinds.contains(DetectionKinds::LINK) {
            for m in URL_REGEX.find_iter(text) {
                let matched = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
                let target = if matched.len() >= 4 && matched[..4].eq_ignore_ascii_case("www.") {
                    format!("http://{}", matched)
                } else {
                    matched.to_string()
                };
                found.push((m.start()..m.start() + matched.len(), DetectionKind::Link, target));
            }
            for m in EMAIL_REGEX.find_iter(text) {
                found.push((m.range(), DetectionKind::Link, format!("mailto:{}", m.as_str())));
            }
        }
        if kinds.contains(DetectionKinds::DATE) {
            for m in DATE_REGEX.find_iter(text) {
                found.push((m.range(), DetectionKind::Date, m.as_str().to_string()));
            }
        }
        if kinds.contains(DetectionKinds::ADDRESS) {
            for m in ADDRESS_REGEX.find_iter(text) {
                let query = m.as_str().replace(' ', "+");
                found.push((
                    m.range(),
                    DetectionKind::Address,
                    format!("https://maps.apple.com/?q={}", query),
                ));
            }
        }
        if kinds.contains(DetectionKinds::PHONE_NUMBER) {
            for m in PHONE_REGEX.find_iter(text) {
                let dialable: String = m
                    .as_str()
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '+')
                    .collect();
                let digits = dialable.chars().filter(char::is_ascii_digit).count();
                if (7..=15).contains(&digits) {
                    found.push((m.range(), DetectionKind::PhoneNumber, format!("tel:{}", dialable)));
                }
            }
        }
        found
    }
}

impl Detector for PatternDetector {
    fn detect(&self, text: &str, kinds: DetectionKinds) -> Vec<Detection> {
        let mut accepted: Vec<(Range<usize>, DetectionKind, String)> = Vec::new();
        for candidate in self.candidates(text, kinds) {
            let overlaps = accepted
                .iter()
                .any(|(range, _, _)| range.start < candidate.0.end && candidate.0.start < range.end);
            if !overlaps && !candidate.0.is_empty() {
                accepted.push(candidate);
            }
        }
        accepted.sort_by_key(|(range, _, _)| range.start);
        accepted
            .into_iter()
            .map(|(range, kind, target)| {
                let start = text[..range.start].chars().count();
                let len = text[range].chars().count();
                Detection::new(start..start + len, kind, target)
            })
            .collect()
    }
}
