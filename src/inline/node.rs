//! Inline-level node types.

use serde::{Deserialize, Serialize};

/// A unit of formatted text inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InlineNode {
    /// Plain text content.
    Text {
        /// The literal text, escapes already resolved.
        content: String,
    },

    /// Strong emphasis (`**bold**`).
    Bold {
        /// Nested inline content.
        children: Vec<InlineNode>,
    },

    /// Emphasis (`*italic*`).
    Italic {
        /// Nested inline content.
        children: Vec<InlineNode>,
    },

    /// Inline code content, never parsed further.
    Code {
        /// Raw code text.
        content: String,
    },

    /// A hyperlink, either written as `[label](url)` or synthesized from a
    /// block reference.
    Link {
        /// Link destination.
        url: String,
        /// Rendered label. Never contains another link.
        children: Vec<InlineNode>,
    },

    /// An image `![alt](src)`.
    Image {
        /// Image source.
        src: String,
        /// Alt text, plain.
        alt: String,
    },

    /// Hard line break between source lines of one block.
    Break,
}

impl InlineNode {
    /// Build a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Flatten to plain text. Breaks become `\n`, images their alt text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Self::Text { content } | Self::Code { content } => out.push_str(content),
            Self::Bold { children } | Self::Italic { children } | Self::Link { children, .. } => {
                for child in children {
                    child.write_plain(out);
                }
            }
            Self::Image { alt, .. } => out.push_str(alt),
            Self::Break => out.push('\n'),
        }
    }

    /// Whether this node is a break or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Break => true,
            Self::Text { content } => content.trim().is_empty(),
            _ => false,
        }
    }
}

/// Flatten a run of inline nodes to plain text.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_plain(&mut out);
    }
    out
}

/// Append text, extending a trailing text node instead of starting a new one.
pub fn push_text(nodes: &mut Vec<InlineNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineNode::Text { content }) = nodes.last_mut() {
        content.push_str(text);
    } else {
        nodes.push(InlineNode::text(text));
    }
}

/// Merge adjacent text nodes and drop empty ones, recursively.
pub fn merge_text(nodes: &mut Vec<InlineNode>) {
    let mut merged: Vec<InlineNode> = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        match &mut node {
            InlineNode::Text { content } => {
                push_text(&mut merged, content);
                continue;
            }
            InlineNode::Bold { children }
            | InlineNode::Italic { children }
            | InlineNode::Link { children, .. } => merge_text(children),
            _ => {}
        }
        merged.push(node);
    }
    *nodes = merged;
}
