//! Treeviz formatter for tag trees
//!
//! One line per node, nesting encoded by box drawing connectors:
//!
//!     <prefix><connector> <icon> <label>
//!
//! Labels of text leaves are their quoted text, truncated to 30 characters.
//!
//! Icons
//!     Document: ⧉
//!     Bold: 𝐁
//!     Italic: 𝐼
//!     Underline: U
//!     StrikeThrough: S
//!     Link: ⊕
//!     Unknown tag: ○
//!     Content: ◦
//!     Newline: ↵

use crate::bbtext::parsing::{NodeId, NodeKind, Tree};
use crate::bbtext::styling::Trait;
use crate::bbtext::token::TagKind;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon_and_label(tree: &Tree, id: NodeId) -> (&'static str, String) {
    let node = tree.node(id);
    match node.kind() {
        NodeKind::Root => ("⧉", "document".to_string()),
        NodeKind::Content(text) => ("◦", format!("{:?}", truncate(text, 30))),
        NodeKind::Newline(text) => ("↵", format!("{:?}", text)),
        NodeKind::Element(name) => {
            let icon = match TagKind::from_name(name) {
                TagKind::Trait(Trait::Bold) => "𝐁",
                TagKind::Trait(Trait::Italic) => "𝐼",
                TagKind::Trait(Trait::Underline) => "U",
                TagKind::Trait(Trait::StrikeThrough) => "S",
                TagKind::Link => "⊕",
                TagKind::Unknown => "○",
            };
            let mut label = name.clone();
            for attribute in node.attributes().iter() {
                label.push_str(&format!(" {}={:?}", attribute.key(), attribute.value()));
            }
            (icon, label)
        }
    }
}

fn format_node(tree: &Tree, id: NodeId, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let (icon, label) = icon_and_label(tree, id);
    output.push_str(&format!("{}{} {} {}\n", prefix, connector, icon, label));

    let children = tree.node(id).children();
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    for (i, child) in children.iter().enumerate() {
        format_node(tree, *child, &child_prefix, i == children.len() - 1, output);
    }
}

/// Render a tag tree in treeviz form.
pub fn tree_to_treeviz(tree: &Tree) -> String {
    let (icon, label) = icon_and_label(tree, tree.root());
    let mut output = format!("{} {}\n", icon, label);
    let children = tree.node(tree.root()).children();
    for (i, child) in children.iter().enumerate() {
        format_node(tree, *child, "", i == children.len() - 1, &mut output);
    }
    output
}
