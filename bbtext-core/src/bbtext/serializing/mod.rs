//! Serializing
//!
//!     Turns a styled buffer back into markup in two steps: [to_tree] re-derives a tag
//!     tree from the runs, and [render] prints any tag tree as markup.
//!
//!     The tree is built by walking the runs with a stack of open tags. At each run
//!     boundary every tag that is no longer active is closed, together with the tags
//!     opened after it (they are reopened right away if still active, which keeps the
//!     output properly nested). Newly active tags are then opened in this order:
//!
//!         1. the tag that stays active over more of the following runs first
//!         2. on equal reach, bold, italic, underline, strike-through, link
//!
//!     Only links written in markup are serialized. Detected links are an overlay and are
//!     recomputed after loading.
//!
//!     The round trip is semantic: re-loading the output gives every character the same
//!     traits and markup link. The exact tag nesting of the original markup is not kept.

mod escape;

pub use escape::{escape_attribute, escape_text};

use crate::bbtext::parsing::{NodeId, NodeKind, Tree};
use crate::bbtext::styling::{LinkOrigin, Run, StyledBuffer, Trait};
use crate::bbtext::token::{Attribute, Attributes};
use tracing::trace;

/// Serialize a buffer to canonical markup.
pub fn serialize(buffer: &StyledBuffer) -> String {
    render(&to_tree(buffer))
}

/// Re-derive a tag tree from the buffer's runs.
pub fn to_tree(buffer: &StyledBuffer) -> Tree {
    let runs = buffer.runs();
    let marks: Vec<Vec<Mark>> = runs.iter().map(marks_of).collect();
    let mut tree = Tree::new();
    let mut open: Vec<(Mark, NodeId)> = Vec::new();

    for (index, run) in runs.iter().enumerate() {
        let wanted = &marks[index];

        if let Some(depth) = open.iter().position(|(mark, _)| !wanted.contains(mark)) {
            open.truncate(depth);
        }

        let mut opening: Vec<&Mark> = wanted
            .iter()
            .filter(|mark| !open.iter().any(|(open_mark, _)| open_mark == *mark))
            .collect();
        opening.sort_by_key(|mark| {
            let reach = marks[index..]
                .iter()
                .take_while(|later| later.contains(mark))
                .count();
            (std::cmp::Reverse(reach), mark.priority())
        });

        for mark in opening {
            let parent = open.last().map_or(tree.root(), |(_, id)| *id);
            let id = tree.append_element(parent, mark.tag_name(), mark.attributes());
            open.push((mark.clone(), id));
        }

        let parent = open.last().map_or(tree.root(), |(_, id)| *id);
        append_text(&mut tree, parent, buffer.run_text(run));
    }

    trace!(runs = runs.len(), nodes = tree.len(), "derived tree from runs");
    tree
}

/// Print a tag tree as markup.
pub fn render(tree: &Tree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), &mut out);
    out
}

fn render_node(tree: &Tree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    match node.kind() {
        NodeKind::Content(text) => out.push_str(&escape_text(text)),
        NodeKind::Newline(text) => out.push_str(text),
        NodeKind::Root => {
            for child in node.children() {
                render_node(tree, *child, out);
            }
        }
        NodeKind::Element(name) => {
            out.push('[');
            out.push_str(name);
            for attribute in node.attributes().iter() {
                out.push(' ');
                out.push_str(attribute.key().as_str());
                out.push_str("=\"");
                out.push_str(&escape_attribute(attribute.value()));
                out.push('"');
            }
            out.push(']');
            for child in node.children() {
                render_node(tree, *child, out);
            }
            out.push_str("[/");
            out.push_str(name);
            out.push(']');
        }
    }
}

/// Append `text` as content and newline leaves.
fn append_text(tree: &mut Tree, parent: NodeId, text: &str) {
    let mut rest = text;
    while let Some(at) = rest.find('\n') {
        let (line, tail) = rest.split_at(at);
        let (line, newline) = match line.strip_suffix('\r') {
            Some(line) => (line, "\r\n"),
            None => (line, "\n"),
        };
        if !line.is_empty() {
            tree.append_content(parent, line);
        }
        tree.append_newline(parent, newline);
        rest = &tail[1..];
    }
    if !rest.is_empty() {
        tree.append_content(parent, rest);
    }
}

/// A tag the serializer can hold open.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mark {
    Trait(Trait),
    Link(String),
}

impl Mark {
    fn priority(&self) -> usize {
        match self {
            Mark::Trait(member) => member.priority(),
            Mark::Link(_) => Trait::ALL.len(),
        }
    }

    fn tag_name(&self) -> &'static str {
        match self {
            Mark::Trait(member) => member.tag_name(),
            Mark::Link(_) => "url",
        }
    }

    fn attributes(&self) -> Attributes {
        match self {
            Mark::Trait(_) => Attributes::new(),
            Mark::Link(target) => [Attribute::Href(target.clone())].into_iter().collect(),
        }
    }
}

fn marks_of(run: &Run) -> Vec<Mark> {
    let mut marks: Vec<Mark> = run.traits.members().map(Mark::Trait).collect();
    if let Some(link) = &run.link {
        if link.origin == LinkOrigin::Markup {
            marks.push(Mark::Link(link.target.clone()));
        }
    }
    marks
}
