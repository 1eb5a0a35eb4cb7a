//! chatmark: Markdown to document tree for language model chat output
//!
//! This crate turns free-form, possibly still streaming text into a tree of
//! typed blocks and inline nodes that a chat client can render. Besides
//! the usual Markdown subset it decodes extension fences (timelines,
//! comparisons, galleries, link graphs, task cards) and recovers from the
//! typical ways model output goes wrong.
//!
//! # Design Principles
//! - Total: every input produces a tree, nothing is dropped
//! - Deterministic: the same text always yields the same tree, so a
//!   client can re-parse the whole buffer on every streamed chunk
//! - Bounded: recursion and scanning are capped, see [`limits`]
//!
//! # Example
//! ```
//! use chatmark::{BlockNode, InlineNode};
//!
//! let blocks = chatmark::parse("Hello **world**");
//! assert_eq!(
//!     blocks,
//!     vec![BlockNode::Paragraph {
//!         children: vec![
//!             InlineNode::text("Hello "),
//!             InlineNode::Bold { children: vec![InlineNode::text("world")] },
//!         ],
//!     }]
//! );
//! ```

pub mod block;
pub mod cursor;
pub mod ext;
pub mod inline;
pub mod limits;
pub mod normalize;

// Re-export primary types
pub use block::{
    Alignment, BlockNode, BlockParser, ChecklistItem, CompareItem, GalleryImage, ListItem,
    TaskCard, TaskPriority, TaskStatus, TimelineItem,
};
pub use ext::ExtensionError;
pub use inline::{InlineNode, InlineParser, plain_text};
pub use normalize::extract_completion_marker;

/// Parsing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Decode extension fences. When off every fence is a code block.
    pub extensions: bool,
    /// Turn diagram fences carrying a block id into `localgraph` nodes.
    pub intercept_diagrams: bool,
    /// Recognize loose block references in text.
    pub references: bool,
    /// Strip the `[localgraph:ID]` marker and append a `localgraph` node.
    pub completion_marker: bool,
    /// Merge runs of single-image paragraphs into galleries.
    pub merge_galleries: bool,
    /// Maximum inline nesting depth.
    pub max_inline_depth: usize,
    /// Maximum blockquote nesting depth.
    pub max_quote_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            extensions: true,
            intercept_diagrams: true,
            references: true,
            completion_marker: true,
            merge_galleries: true,
            max_inline_depth: limits::MAX_INLINE_NESTING,
            max_quote_depth: limits::MAX_QUOTE_NESTING,
        }
    }
}

/// Parse a chat message into block nodes.
///
/// This is the primary API for simple use cases.
pub fn parse(text: &str) -> Vec<BlockNode> {
    parse_with_options(text, &Options::default())
}

/// Parse a chat message into block nodes with options.
pub fn parse_with_options(text: &str, options: &Options) -> Vec<BlockNode> {
    let text = normalize::normalize_newlines(text);

    let marker = if options.completion_marker {
        normalize::extract_completion_marker(&text)
    } else {
        None
    };
    let (body, block_id) = match &marker {
        Some((rest, block_id)) => (rest.as_str(), Some(*block_id)),
        None => (text.as_ref(), None),
    };

    let mut blocks = block::parse_blocks(body, options, 0);
    normalize::merge_text_nodes(&mut blocks);
    if let Some(block_id) = block_id {
        blocks.push(BlockNode::LocalGraph { block_id });
    }
    blocks
}

/// Parse a single run of inline text.
pub fn parse_inline(text: &str) -> Vec<InlineNode> {
    parse_inline_with_options(text, &Options::default())
}

/// Parse a single run of inline text with options.
pub fn parse_inline_with_options(text: &str, options: &Options) -> Vec<InlineNode> {
    let text = normalize::normalize_newlines(text);
    InlineParser::new(options).parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineNode {
        InlineNode::text(s)
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse(" \n\t\n").is_empty());
    }

    #[test]
    fn test_bold_paragraph() {
        assert_eq!(
            parse("Hello **world**"),
            vec![BlockNode::Paragraph {
                children: vec![
                    text("Hello "),
                    InlineNode::Bold {
                        children: vec![text("world")]
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_crlf() {
        assert_eq!(parse("a\r\nb"), parse("a\nb"));
        assert_eq!(parse("# T\r\rx"), parse("# T\n\nx"));
    }

    #[test]
    fn test_timeline_fence() {
        assert_eq!(
            parse("```timeline\n2024-01-01 | Launched | v1 release\n```"),
            vec![BlockNode::Timeline {
                items: vec![TimelineItem {
                    date: "2024-01-01".into(),
                    title: vec![text("Launched")],
                    description: Some(vec![text("v1 release")]),
                    category: None,
                }],
            }]
        );
    }

    #[test]
    fn test_unterminated_mermaid_intercepted() {
        assert_eq!(
            parse("```mermaid\ngraph TD\n  A[blockId=777] --> B"),
            vec![BlockNode::LocalGraph { block_id: 777 }]
        );
    }

    #[test]
    fn test_completion_marker() {
        assert_eq!(
            parse("See the graph. [localgraph:12]"),
            vec![
                BlockNode::Paragraph {
                    children: vec![text("See the graph.")]
                },
                BlockNode::LocalGraph { block_id: 12 },
            ]
        );
        assert_eq!(
            parse("[localgraph:12]"),
            vec![BlockNode::LocalGraph { block_id: 12 }]
        );
    }

    #[test]
    fn test_completion_marker_disabled() {
        let options = Options {
            completion_marker: false,
            references: false,
            ..Options::default()
        };
        assert_eq!(
            parse_with_options("[localgraph:12]", &options),
            vec![BlockNode::Paragraph {
                children: vec![text("[localgraph:12]")]
            }]
        );
    }

    #[test]
    fn test_reference_link() {
        assert_eq!(
            parse_inline("see blockid:42"),
            vec![
                text("see "),
                InlineNode::Link {
                    url: "block://42".into(),
                    children: vec![text("#42")],
                },
            ]
        );
    }

    #[test]
    fn test_gallery_merge() {
        let blocks = parse("![a](a.png)\n\n![b](b.png)");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind(), "gallery");

        let options = Options {
            merge_galleries: false,
            ..Options::default()
        };
        assert_eq!(
            parse_with_options("![a](a.png)\n\n![b](b.png)", &options).len(),
            2
        );
    }

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert!(options.extensions && options.references);
        assert_eq!(options.max_inline_depth, limits::MAX_INLINE_NESTING);
    }
}
