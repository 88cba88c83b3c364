//! Run listing
//!
//! One line per run: `<start>..<end> <traits> <text>` followed by ` -> <target>` when the
//! run carries a link. Detected links are marked with their kind.

use crate::bbtext::styling::{LinkOrigin, StyledBuffer};

pub fn buffer_to_debug_string(buffer: &StyledBuffer) -> String {
    let mut output = String::new();
    for run in buffer.runs() {
        let traits: Vec<String> = run
            .traits
            .members()
            .map(|member| member.tag_name().to_string())
            .collect();
        let traits = if traits.is_empty() {
            "-".to_string()
        } else {
            traits.join(",")
        };
        output.push_str(&format!(
            "{}..{} {} {:?}",
            run.range.start,
            run.range.end,
            traits,
            buffer.run_text(run)
        ));
        if let Some(link) = &run.link {
            output.push_str(&format!(" -> {}", link.target));
            if let LinkOrigin::Detected(kind) = link.origin {
                output.push_str(&format!(" ({})", kind));
            }
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbtext::config::Configuration;
    use crate::bbtext::detection::{apply_detections, Detection, DetectionKind};
    use crate::bbtext::pipeline::load;

    #[test]
    fn lists_runs() {
        let buffer = load("[b]a[i]b[/i][/b][url=x]c[/url] 555", &Configuration::default());
        let buffer = apply_detections(
            &buffer,
            &[Detection::new(4..7, DetectionKind::PhoneNumber, "tel:555")],
        );
        insta::assert_snapshot!(buffer_to_debug_string(&buffer), @r###"
        0..1 b "a"
        1..2 b,i "b"
        2..3 - "c" -> x
        3..4 - " "
        4..7 - "555" -> tel:555 (phone)
        "###);
    }
}
