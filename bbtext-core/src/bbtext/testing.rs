//! Fluent assertions for styled buffers and tag trees
//!
//!     Tests that poke at `buffer.runs()[1].range` by hand get long and break whenever
//!     the run representation moves. These helpers state what a test cares about (the
//!     text, how many runs, what style a run or a character has) and produce messages
//!     that show the whole buffer when something does not match.
//!
//!     ```rust,ignore
//!     use bbtext_core::bbtext::testing::assert_buffer;
//!
//!     assert_buffer(&buffer)
//!         .text("hello")
//!         .run_count(3)
//!         .run(1, |run| {
//!             run.range(1..3).traits(TraitSet::empty()).no_link();
//!         })
//!         .is_normalized();
//!     ```

use crate::bbtext::formats::{buffer_to_debug_string, tree_to_treeviz};
use crate::bbtext::parsing::{NodeId, NodeKind, Tree};
use crate::bbtext::styling::{Run, StyledBuffer, TraitSet};
use std::ops::Range;

/// Create an assertion builder for a buffer.
pub fn assert_buffer(buffer: &StyledBuffer) -> BufferAssertion<'_> {
    BufferAssertion { buffer }
}

/// Create an assertion builder for the root of a tree.
pub fn assert_tree(tree: &Tree) -> NodeAssertion<'_> {
    NodeAssertion {
        tree,
        id: tree.root(),
        context: "root".to_string(),
    }
}

pub struct BufferAssertion<'a> {
    buffer: &'a StyledBuffer,
}

impl<'a> BufferAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.buffer.text(), expected, "buffer text differs");
        self
    }

    pub fn run_count(self, expected: usize) -> Self {
        assert_eq!(
            self.buffer.runs().len(),
            expected,
            "Expected {} runs, found:\n{}",
            expected,
            buffer_to_debug_string(self.buffer)
        );
        self
    }

    /// Assert on the run at `index`.
    pub fn run<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(RunAssertion<'a>),
    {
        let Some(run) = self.buffer.runs().get(index) else {
            panic!(
                "Run index {} out of bounds, buffer is:\n{}",
                index,
                buffer_to_debug_string(self.buffer)
            );
        };
        assertion(RunAssertion {
            run,
            context: format!("runs[{}]", index),
        });
        self
    }

    /// Assert the traits of the character at `offset`.
    pub fn traits_at(self, offset: usize, expected: TraitSet) -> Self {
        assert_eq!(
            self.buffer.traits_at(offset),
            expected,
            "traits at {} differ, buffer is:\n{}",
            offset,
            buffer_to_debug_string(self.buffer)
        );
        self
    }

    pub fn is_normalized(self) -> Self {
        if let Err(violation) = self.buffer.validate() {
            panic!(
                "buffer is not normalized ({}):\n{}",
                violation,
                buffer_to_debug_string(self.buffer)
            );
        }
        self
    }
}

pub struct RunAssertion<'a> {
    run: &'a Run,
    context: String,
}

impl RunAssertion<'_> {
    pub fn range(self, expected: Range<usize>) -> Self {
        assert_eq!(self.run.range, expected, "{}: range differs", self.context);
        self
    }

    pub fn traits(self, expected: TraitSet) -> Self {
        assert_eq!(self.run.traits, expected, "{}: traits differ", self.context);
        self
    }

    /// Assert the run links to `target`, whatever the link's origin.
    pub fn link(self, target: &str) -> Self {
        let actual = self.run.link.as_ref().map(|link| link.target.as_str());
        assert_eq!(actual, Some(target), "{}: link differs", self.context);
        self
    }

    pub fn no_link(self) -> Self {
        assert!(
            self.run.link.is_none(),
            "{}: expected no link, found {:?}",
            self.context,
            self.run.link
        );
        self
    }
}

pub struct NodeAssertion<'a> {
    tree: &'a Tree,
    id: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Assert the node is an element with the given canonical tag name.
    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.tree.node(self.id).tag_name(),
            Some(expected),
            "{}: tag differs in\n{}",
            self.context,
            tree_to_treeviz(self.tree)
        );
        self
    }

    /// Assert the node is a content leaf with the given text.
    pub fn content(self, expected: &str) -> Self {
        match self.tree.node(self.id).kind() {
            NodeKind::Content(text) => {
                assert_eq!(text, expected, "{}: content differs", self.context)
            }
            other => panic!("{}: expected content, found {:?}", self.context, other),
        }
        self
    }

    /// Assert the tag path recorded on a leaf.
    pub fn ancestors(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .tree
            .node(self.id)
            .ancestors()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(actual, expected, "{}: ancestors differ", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.tree.node(self.id).children().len();
        assert_eq!(
            actual,
            expected,
            "{}: expected {} children, found {} in\n{}",
            self.context,
            expected,
            actual,
            tree_to_treeviz(self.tree)
        );
        self
    }

    /// Assert on the child at `index`.
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.tree.node(self.id).children();
        let Some(child) = children.get(index) else {
            panic!(
                "{}: child index {} out of bounds in\n{}",
                self.context,
                index,
                tree_to_treeviz(self.tree)
            );
        };
        assertion(NodeAssertion {
            tree: self.tree,
            id: *child,
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}
