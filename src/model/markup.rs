//! Markup tree types for the rich-text subset of response comments.

use serde::{Deserialize, Serialize};

/// Kind of a block-level markup node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A `<p>` paragraph.
    Paragraph,
    /// `<strong>` / `<b>`.
    Bold,
    /// `<em>` / `<i>`.
    Italic,
    /// `<u>`.
    Underline,
    /// `<ul>`.
    UnorderedList,
    /// `<ol>`.
    OrderedList,
    /// Any tag the renderer does not understand. Content is never
    /// silently dropped; it falls back to flattened plain text.
    Unknown,
}

impl BlockKind {
    /// Whether this block is a list container whose children are list items.
    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::UnorderedList | BlockKind::OrderedList)
    }
}

/// A node in a parsed response-comment markup tree.
///
/// The tree is strictly hierarchical: each node is owned by its parent,
/// built once per comment field and never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    /// A leaf text run.
    Text(String),

    /// A block element with ordered children.
    Block {
        /// What the block renders as.
        kind: BlockKind,
        /// Child nodes in document order.
        children: Vec<MarkupNode>,
    },

    /// An `<li>` item. May contain nested list blocks to unbounded depth.
    ListItem(Vec<MarkupNode>),
}

impl MarkupNode {
    /// Create a block node.
    pub fn block(kind: BlockKind, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Block { kind, children }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    /// Concatenate all descendant text, discarding nested inline styling.
    ///
    /// Nested style composition inside `<b>`/`<i>`/`<u>` is not supported;
    /// those tags render their full flattened content in a single style.
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(s) => out.push_str(s),
            MarkupNode::Block { children, .. } | MarkupNode::ListItem(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Children of this node, if any.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Text(_) => &[],
            MarkupNode::Block { children, .. } | MarkupNode::ListItem(children) => children,
        }
    }
}

/// A parsed comment: the top-level nodes plus the pre-walk table flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupTree {
    /// Top-level nodes in document order.
    pub nodes: Vec<MarkupNode>,
    /// True if a `<table>` element appeared anywhere in the input.
    /// Table rendering is unsupported; the whole field is rejected.
    pub contains_table: bool,
}

impl MarkupTree {
    /// Whether the tree has any renderable top-level content.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
