//! Nodes of the syntax tree produced by a successful match.

use std::ops::Range;
use std::sync::Arc;

/// Name given to nodes built by rules that were never declared under a name.
pub const ANONYMOUS: &str = "anonymous";

/// A node in the tree built while matching. A node never owns any text; it
/// records the half-open byte range it covers and borrows the source so that
/// `data()` can be sliced on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode<'i> {
    name: Option<Arc<str>>,
    range: Range<usize>,
    children: Vec<AstNode<'i>>,
    merge: bool,
    source: &'i str,
}

impl<'i> AstNode<'i> {
    pub fn new(
        name: Option<Arc<str>>,
        range: Range<usize>,
        children: Vec<AstNode<'i>>,
        merge: bool,
        source: &'i str,
    ) -> AstNode<'i> {
        debug_assert!(range.start <= range.end && range.end <= source.len());
        AstNode {
            name,
            range,
            children,
            merge,
            source,
        }
    }

    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or(ANONYMOUS)
    }

    pub fn range(&self) -> Range<usize> {
        self.range
            .clone()
    }

    pub fn start(&self) -> usize {
        self.range
            .start
    }

    pub fn end(&self) -> usize {
        self.range
            .end
    }

    pub fn children(&self) -> &[AstNode<'i>] {
        &self.children
    }

    /// Whether this node is spliced away into its parent rather than kept.
    pub fn is_merging(&self) -> bool {
        self.merge
    }

    pub fn is_leaf(&self) -> bool {
        self.children
            .is_empty()
    }

    /// The text this node covers.
    pub fn data(&self) -> &'i str {
        &self.source[self.range.clone()]
    }

    /// All direct children with the given name, in order.
    pub fn get_children(&self, name: &str) -> Vec<&AstNode<'i>> {
        self.children
            .iter()
            .filter(|child| child.name() == name)
            .collect()
    }

    /// The direct child with the given name, provided there is exactly one.
    pub fn child(&self, name: &str) -> Option<&AstNode<'i>> {
        let mut found = self
            .children
            .iter()
            .filter(|child| child.name() == name);

        match (found.next(), found.next()) {
            (Some(child), None) => Some(child),
            _ => None,
        }
    }

    /// The text of the single leaf child with the given name.
    pub fn value(&self, name: &str) -> Option<&'i str> {
        self.child(name)
            .filter(|child| child.is_leaf())
            .map(|child| child.data())
    }

    /// Attach this node to a list of siblings under construction, honouring
    /// the merge flag: a merging node gives up its children instead of
    /// itself. Since every level is assembled this way, the children handed
    /// over are never merging themselves.
    pub(crate) fn attach_to(self, siblings: &mut Vec<AstNode<'i>>) {
        if self.merge {
            siblings.extend(self.children);
        } else {
            siblings.push(self);
        }
    }

    /// Render the tree as indented text, leaves showing their data:
    ///
    /// ```text
    /// sent{
    ///   id{'ab'}
    ///   id{'ac'}
    /// }
    /// ```
    pub fn to_tree_string(&self) -> String {
        let mut output = String::new();
        self.write_tree(&mut output, 0);
        output
    }

    fn write_tree(&self, output: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);

        if self.is_leaf() {
            output.push_str(&format!("{}{}{{'{}'}}\n", indent, self.name(), self.data()));
        } else {
            output.push_str(&format!("{}{}{{\n", indent, self.name()));
            for child in &self.children {
                child.write_tree(output, depth + 1);
            }
            output.push_str(&format!("{}}}\n", indent));
        }
    }
}

/// Assemble the children of a new node out of the nodes produced by its
/// successful sub-matches.
pub(crate) fn assemble<'i>(nodes: impl IntoIterator<Item = AstNode<'i>>) -> Vec<AstNode<'i>> {
    let mut children = Vec::new();
    for node in nodes {
        node.attach_to(&mut children);
    }
    children
}
