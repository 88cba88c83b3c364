//! ANSI rendering of a styled buffer
//!
//! Each run becomes one crossterm `StyledContent`: traits map to text attributes,
//! plain runs take the configured default text colour and links are drawn underlined
//! in the highlight colour.

use bbtext_core::bbtext::config::{Color as TextColor, Configuration};
use bbtext_core::bbtext::styling::{Run, StyledBuffer, Trait};
use crossterm::style::{Attribute, Color, ContentStyle};

pub fn to_ansi(buffer: &StyledBuffer, config: &Configuration) -> String {
    let mut output = String::new();
    for run in buffer.runs() {
        let style = style_for(run, config);
        output.push_str(&style.apply(buffer.run_text(run)).to_string());
    }
    output
}

fn style_for(run: &Run, config: &Configuration) -> ContentStyle {
    let mut style = ContentStyle::new();
    for member in run.traits.members() {
        style.attributes.set(attribute_for(member));
    }
    let color = if run.link.is_some() {
        style.attributes.set(Attribute::Underlined);
        config.highlight_color()
    } else {
        config.default_text_color()
    };
    style.foreground_color = Some(terminal_color(color));
    style
}

fn attribute_for(member: Trait) -> Attribute {
    match member {
        Trait::Bold => Attribute::Bold,
        Trait::Italic => Attribute::Italic,
        Trait::Underline => Attribute::Underlined,
        Trait::StrikeThrough => Attribute::CrossedOut,
    }
}

fn terminal_color(color: TextColor) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbtext_core::bbtext::pipeline::load;

    fn colored() -> Configuration {
        Configuration::default()
            .with_colors(TextColor::rgb(0x11, 0x22, 0x33), TextColor::rgb(0xff, 0, 0))
    }

    #[test]
    fn plain_runs_use_the_default_text_color() {
        let config = colored();
        let buffer = load("plain", &config);
        let style = style_for(&buffer.runs()[0], &config);
        assert_eq!(
            style.foreground_color,
            Some(Color::Rgb {
                r: 0x11,
                g: 0x22,
                b: 0x33
            })
        );
        assert!(!style.attributes.has(Attribute::Underlined));

        let rendered = to_ansi(&buffer, &config);
        assert!(rendered.contains("plain"));
    }

    #[test]
    fn links_use_the_highlight_color() {
        let config = colored();
        let buffer = load("[url=x]go[/url]", &config);
        let style = style_for(&buffer.runs()[0], &config);
        assert_eq!(style.foreground_color, Some(Color::Rgb { r: 0xff, g: 0, b: 0 }));
        assert!(style.attributes.has(Attribute::Underlined));
    }

    #[test]
    fn bold_runs_are_wrapped() {
        let buffer = load("a[b]b[/b]", &Configuration::default());
        let rendered = to_ansi(&buffer, &Configuration::default());
        assert!(rendered.contains('a'));
        assert!(rendered.contains("\u{1b}[1m"));
        assert!(rendered.contains('b'));
    }
}
