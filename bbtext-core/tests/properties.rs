//! Property based tests: lenient input handling and semantic round trips

use bbtext_core::bbtext::config::{Configuration, DetectionKinds};
use bbtext_core::bbtext::detection::{detect, PatternDetector};
use bbtext_core::bbtext::editing::toggle_trait;
use bbtext_core::bbtext::lexing::tokenize;
use bbtext_core::bbtext::parsing::build;
use bbtext_core::bbtext::pipeline::{export, load};
use bbtext_core::bbtext::serializing::serialize;
use bbtext_core::bbtext::styling::{apply_default, Trait};
use proptest::prelude::*;

/// Markup assembled from fragments that exercise tags, escapes and line breaks.
fn markup_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("[b]"),
        Just("[/b]"),
        Just("[I]"),
        Just("[/i]"),
        Just("[u]"),
        Just("[/u]"),
        Just("[strike]"),
        Just("[/s]"),
        Just("[url=x]"),
        Just("[url href=\"y\" title=\"t\"]"),
        Just("[url href=\"a\\\"b\"]"),
        Just("[/url]"),
        Just("[color]"),
        Just("[/color]"),
        Just("\\["),
        Just("\\]"),
        Just("\\\\"),
        Just("\\"),
        Just("["),
        Just("]"),
        Just("\n"),
        Just("\r\n"),
        Just("\r"),
        Just("a"),
        Just("bc"),
        Just(" "),
        Just("é"),
    ];
    prop::collection::vec(fragment, 0..40).prop_map(|fragments| fragments.concat())
}

fn trait_strategy() -> impl Strategy<Value = Trait> {
    prop::sample::select(Trait::ALL.to_vec())
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics(source in "\\PC*") {
        let tokens = tokenize(&source);
        let tree = build(&tokens);
        let buffer = apply_default(&tree);
        prop_assert!(buffer.validate().is_ok());
        let _ = serialize(&buffer);
    }

    #[test]
    fn token_spans_tile_the_input(source in markup_strategy()) {
        let tokens = tokenize(&source);
        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.span.start, offset);
            offset = token.span.end;
        }
        prop_assert_eq!(offset, source.len());
    }

    #[test]
    fn export_then_load_preserves_the_buffer(source in markup_strategy()) {
        let config = Configuration::default();
        let buffer = load(&source, &config);
        let markup = export(&buffer);
        let reloaded = load(&markup, &config);
        prop_assert_eq!(&reloaded, &buffer, "exported as {:?}", markup);
        prop_assert_eq!(export(&reloaded), markup);
    }

    #[test]
    fn toggle_makes_the_range_uniform(
        source in markup_strategy(),
        start in 0usize..30,
        end in 0usize..30,
        member in trait_strategy(),
    ) {
        let buffer = load(&source, &Configuration::default());
        let toggled = toggle_trait(&buffer, start..end, member);
        prop_assert!(toggled.validate().is_ok());
        prop_assert_eq!(toggled.text(), buffer.text());

        let range = buffer.clamp(start..end);
        let states: Vec<bool> = range
            .clone()
            .map(|offset| toggled.traits_at(offset).contains(member.flag()))
            .collect();
        prop_assert!(states.iter().all(|state| *state == states[0]) || states.is_empty());
        for offset in (0..buffer.len()).filter(|offset| !range.contains(offset)) {
            prop_assert_eq!(toggled.traits_at(offset), buffer.traits_at(offset));
        }
    }

    #[test]
    fn detection_is_idempotent(text in "[a-z0-9 .:/@-]{0,60}") {
        let buffer = load(&text, &Configuration::default());
        let once = detect(&buffer, &PatternDetector::new(), DetectionKinds::all());
        let twice = detect(&once, &PatternDetector::new(), DetectionKinds::all());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(export(&once), export(&buffer));
    }
}
