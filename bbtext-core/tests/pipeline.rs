//! End to end behaviour of the markup <-> buffer pipeline

use bbtext_core::bbtext::config::Configuration;
use bbtext_core::bbtext::editing::toggle_trait;
use bbtext_core::bbtext::lexing::tokenize;
use bbtext_core::bbtext::parsing::build;
use bbtext_core::bbtext::pipeline::{export, load, reformat};
use bbtext_core::bbtext::styling::{apply_default, BufferBuilder, Link, Trait, TraitSet};
use bbtext_core::bbtext::testing::{assert_buffer, assert_tree};
use rstest::rstest;

#[test]
fn empty_input_produces_nothing() {
    assert!(tokenize("").is_empty());
    let tree = build(&tokenize(""));
    assert_tree(&tree).child_count(0);
    assert_buffer(&apply_default(&tree)).text("").run_count(0);
}

#[test]
fn single_bold_run() {
    let buffer = load("[b]hi[/b]", &Configuration::default());
    assert_buffer(&buffer)
        .text("hi")
        .run_count(1)
        .run(0, |run| {
            run.range(0..2).traits(TraitSet::BOLD).no_link();
        });
}

#[test]
fn nested_tags_union_their_traits() {
    let buffer = load("[b][i]x[/i][/b]", &Configuration::default());
    assert_buffer(&buffer).run_count(1).run(0, |run| {
        run.traits(TraitSet::BOLD | TraitSet::ITALIC);
    });
}

#[test]
fn toggle_scenario_on_hello() {
    let buffer = load("[b]hello[/b]", &Configuration::default());
    let toggled = toggle_trait(&buffer, 1..3, Trait::Bold);
    assert_buffer(&toggled)
        .text("hello")
        .run_count(3)
        .run(0, |run| {
            run.range(0..1).traits(TraitSet::BOLD);
        })
        .run(1, |run| {
            run.range(1..3).traits(TraitSet::empty());
        })
        .run(2, |run| {
            run.range(3..5).traits(TraitSet::BOLD);
        })
        .is_normalized();
    assert_eq!(export(&toggled), "[b]h[/b]el[b]lo[/b]");

    let restored = toggle_trait(&toggled, 1..3, Trait::Bold);
    assert_buffer(&restored).run_count(1).run(0, |run| {
        run.range(0..5).traits(TraitSet::BOLD);
    });
}

#[test]
fn mismatched_close_is_recovered() {
    let tree = build(&tokenize("[b]x[/i]"));
    assert_tree(&tree).child_count(1).child(0, |b| {
        b.tag("b").child_count(1).child(0, |x| {
            x.content("x").ancestors(&["b"]);
        });
    });
}

#[test]
fn close_of_an_ancestor_unwinds_the_stack() {
    let buffer = load("[b]a[i]b[/b]c[/i]", &Configuration::default());
    assert_buffer(&buffer)
        .text("abc")
        .traits_at(0, TraitSet::BOLD)
        .traits_at(1, TraitSet::BOLD | TraitSet::ITALIC)
        .traits_at(2, TraitSet::empty());
}

#[test]
fn links_come_from_markup() {
    let buffer = load(
        "[url href=\"https://a.io\"][b]a[/b]b[/url]",
        &Configuration::default(),
    );
    assert_buffer(&buffer)
        .run_count(2)
        .run(0, |run| {
            run.traits(TraitSet::BOLD).link("https://a.io");
        })
        .run(1, |run| {
            run.traits(TraitSet::empty()).link("https://a.io");
        });
}

#[test]
fn innermost_link_wins() {
    let buffer = load("[url=a]x[url=b]y[/url]z[/url]", &Configuration::default());
    assert_buffer(&buffer)
        .run_count(3)
        .run(0, |run| {
            run.link("a");
        })
        .run(1, |run| {
            run.link("b");
        })
        .run(2, |run| {
            run.link("a");
        });
}

#[rstest]
#[case::unterminated_tag("[b", "\\[b")]
#[case::newline_inside_tag("[b\n]x", "\\[b\n]x")]
#[case::unterminated_quote("[url href=\"x]y", "\\[url href=\"x]y")]
#[case::bad_name("[1]", "\\[1]")]
#[case::stray_backslash("a\\b", "a\\\\b")]
#[case::escaped_bracket("\\[b]", "\\[b]")]
#[case::unknown_tag("[color]x[/color]", "x")]
#[case::unclosed_tag("[i]x", "[i]x[/i]")]
fn lenient_inputs_degrade_to_content(#[case] markup: &str, #[case] expected: &str) {
    assert_eq!(reformat(markup, &Configuration::default()), expected);
}

#[rstest]
#[case("[b]a[/b]\n[i]b[/i]")]
#[case("[b]a[i]b[/i]c[/b]")]
#[case("[u]a[s]b[/s][/u][s]c[/s]")]
#[case("x [url href=\"https://example.com/?q=1\"]site[/url] y")]
#[case("line\r\nline\n")]
#[case("[url href=\"say \\\"hi\\\"\"]q[/url]")]
fn canonical_markup_is_a_fixed_point(#[case] markup: &str) {
    let config = Configuration::default();
    assert_eq!(reformat(markup, &config), markup);
}

#[rstest]
#[case::quote("a\"b", "[url href=\"a\\\"b\"]x[/url]")]
#[case::backslash(r"C:\dir", r#"[url href="C:\\dir"]x[/url]"#)]
#[case::percent("a%22b", "[url href=\"a%22b\"]x[/url]")]
#[case::line_break("a\nb", "[url href=\"a\\\nb\"]x[/url]")]
fn link_targets_survive_export_and_load(#[case] target: &str, #[case] expected: &str) {
    let mut builder = BufferBuilder::new();
    builder.push("x", TraitSet::empty(), Some(Link::markup(target)));
    let buffer = builder.finish();

    let markup = export(&buffer);
    assert_eq!(markup, expected);
    assert_eq!(load(&markup, &Configuration::default()), buffer);
}
