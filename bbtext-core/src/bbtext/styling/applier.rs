//! Style applier
//!
//! Walks the tag tree depth first, pre-order, carrying the traits of all enclosing tags
//! (nesting is a union) and the innermost link. Every leaf appends its text with the
//! accumulated style; neighbouring leaves with the same style land in one run.
//!
//! Tags whose trait the configuration does not allow, and unknown tags, still have their
//! content emitted, just without style.

use super::buffer::{BufferBuilder, Link, StyledBuffer};
use super::traits::TraitSet;
use crate::bbtext::config::Configuration;
use crate::bbtext::parsing::{Node, NodeId, NodeKind, Tree};
use crate::bbtext::token::TagKind;
use tracing::trace;

/// Apply the tree's styles, producing a normalized buffer.
pub fn apply(tree: &Tree, config: &Configuration) -> StyledBuffer {
    let mut builder = BufferBuilder::new();
    let mut pending: Vec<(NodeId, TraitSet, Option<Link>)> =
        vec![(tree.root(), TraitSet::empty(), None)];

    while let Some((id, traits, link)) = pending.pop() {
        let node = tree.node(id);
        match node.kind() {
            NodeKind::Content(text) | NodeKind::Newline(text) => {
                if !node.children().is_empty() {
                    fatal_leaf_with_children(id);
                }
                builder.push(text, traits, link);
            }
            NodeKind::Root | NodeKind::Element(_) => {
                let (traits, link) = contribute(node, traits, link, config);
                for child in node.children().iter().rev() {
                    if child.index() <= id.index() {
                        fatal_cycle(id, *child);
                    }
                    pending.push((*child, traits, link.clone()));
                }
            }
        }
    }

    let buffer = builder.finish();
    trace!(runs = buffer.runs().len(), chars = buffer.len(), "applied styles");
    buffer
}

/// Apply with every feature enabled.
pub fn apply_default(tree: &Tree) -> StyledBuffer {
    apply(tree, &Configuration::default())
}

fn contribute(
    node: &Node,
    traits: TraitSet,
    link: Option<Link>,
    config: &Configuration,
) -> (TraitSet, Option<Link>) {
    let Some(name) = node.tag_name() else {
        return (traits, link);
    };
    match TagKind::from_name(name) {
        TagKind::Trait(member) if config.allows(member) => (traits | member.flag(), link),
        TagKind::Link if !config.is_plain_text() => match node.attributes().href() {
            Some(target) => (traits, Some(Link::markup(target))),
            None => (traits, link),
        },
        _ => (traits, link),
    }
}

fn fatal_leaf_with_children(id: NodeId) -> ! {
    panic!("leaf node {} has children", id.index());
}

// Children are always appended after their parent, so a child id at or below its
// parent's id means the arena was tampered with.
fn fatal_cycle(parent: NodeId, child: NodeId) -> ! {
    panic!(
        "node {} lists node {} as a child; trees must be acyclic",
        parent.index(),
        child.index()
    );
}
