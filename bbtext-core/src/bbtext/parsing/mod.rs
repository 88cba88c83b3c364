//! Tree building
//!
//!     Turns a token stream into a tag tree. The builder keeps an explicit stack of open
//!     elements with the root permanently at the bottom and never fails:
//!
//!         - OpenTag: a new element under the stack top, pushed.
//!         - CloseTag matching the top: pop.
//!         - CloseTag matching an element deeper in the stack: every element above it, and
//!           the element itself, is closed at this point.
//!         - CloseTag matching nothing open: discarded. It does not reappear as content.
//!         - Content / Newline: a leaf under the stack top.
//!
//!     Elements still open at the end of input are closed implicitly.

mod tree;

pub use tree::{Node, NodeId, NodeKind, Tree};

use crate::bbtext::lexing::tokenize;
use crate::bbtext::token::{Token, TokenKind};
use tracing::debug;

/// Build a tree from tokens.
pub fn build(tokens: &[Token]) -> Tree {
    let mut tree = Tree::new();
    let mut open = OpenElements::new(tree.root());

    for token in tokens {
        match token.kind {
            TokenKind::OpenTag => {
                let id = tree.append_element(open.top(), &token.value, token.attributes.clone());
                open.push(id);
            }
            TokenKind::CloseTag => match open.find(&tree, &token.value) {
                Some(depth) => {
                    let closed = open.close_from(depth);
                    if closed > 1 {
                        debug!(
                            tag = %token.value,
                            implicitly_closed = closed - 1,
                            "close tag unwound unclosed elements"
                        );
                    }
                }
                None => {
                    debug!(tag = %token.value, offset = token.span.start, "stray close tag discarded");
                }
            },
            TokenKind::Content => {
                tree.append_content(open.top(), &token.value);
            }
            TokenKind::Newline => {
                tree.append_newline(open.top(), &token.value);
            }
        }
    }

    if !open.is_empty() {
        debug!(unclosed = open.len(), "elements closed at end of input");
    }
    tree
}

/// Tokenize and build in one step.
pub fn parse_markup(source: &str) -> Tree {
    build(&tokenize(source))
}

/// Stack of open elements. The root sits below it and is never popped.
struct OpenElements {
    root: NodeId,
    stack: Vec<NodeId>,
}

impl OpenElements {
    fn new(root: NodeId) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.root)
    }

    fn push(&mut self, id: NodeId) {
        self.stack.push(id);
    }

    /// Position of the innermost open element named `name`.
    fn find(&self, tree: &Tree, name: &str) -> Option<usize> {
        self.stack
            .iter()
            .rposition(|id| tree.node(*id).tag_name() == Some(name))
    }

    /// Close the element at `depth` and everything above it. Returns how many closed.
    fn close_from(&mut self, depth: usize) -> usize {
        let closed = self.stack.len() - depth;
        self.stack.truncate(depth);
        closed
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_tags(tree: &Tree, id: NodeId) -> Vec<String> {
        tree.node(id)
            .children()
            .iter()
            .map(|child| match tree.node(*child).kind() {
                NodeKind::Element(name) => format!("[{name}]"),
                NodeKind::Content(text) => text.clone(),
                NodeKind::Newline(_) => "\\n".to_string(),
                NodeKind::Root => "root".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_input_gives_bare_root() {
        let tree = parse_markup("");
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).tag_name(), None);
    }

    #[test]
    fn nests_elements() {
        let tree = parse_markup("a[b]x[i]y[/i][/b]z");
        let root = tree.root();
        assert_eq!(child_tags(&tree, root), vec!["a", "[b]", "z"]);
        let b = tree.node(root).children()[1];
        assert_eq!(child_tags(&tree, b), vec!["x", "[i]"]);
    }

    #[test]
    fn stray_close_tag_is_discarded() {
        let tree = parse_markup("[b]x[/i]");
        let root = tree.root();
        assert_eq!(child_tags(&tree, root), vec!["[b]"]);
        let b = tree.node(root).children()[0];
        assert_eq!(child_tags(&tree, b), vec!["x"]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.text(), "x");
    }

    #[test]
    fn closing_an_ancestor_unwinds_intervening_elements() {
        let tree = parse_markup("[b][i]x[/b]y");
        let root = tree.root();
        assert_eq!(child_tags(&tree, root), vec!["[b]", "y"]);
        let leaf = tree.leaves()[0];
        assert_eq!(tree.node(leaf).ancestors(), ["b".to_string(), "i".to_string()]);
        let y = tree.leaves()[1];
        assert!(tree.node(y).ancestors().is_empty());
    }

    #[test]
    fn closes_innermost_element_of_a_name() {
        let tree = parse_markup("[b]1[i]2[b]3[/b]4[/i]5");
        let leaves: Vec<_> = tree
            .leaves()
            .into_iter()
            .map(|id| tree.node(id).ancestors().join("/"))
            .collect();
        assert_eq!(leaves, vec!["b", "b/i", "b/i/b", "b/i", "b"]);
    }

    #[test]
    fn newline_leaves_carry_ancestors() {
        let tree = parse_markup("[u]a\nb[/u]");
        let newline = tree.leaves()[1];
        assert_eq!(tree.node(newline).content(), Some("\n"));
        assert_eq!(tree.node(newline).ancestors(), ["u".to_string()]);
    }

    #[test]
    fn unknown_tags_build_normally() {
        let tree = parse_markup("[color]x[/color]");
        let root = tree.root();
        assert_eq!(child_tags(&tree, root), vec!["[color]"]);
    }
}
