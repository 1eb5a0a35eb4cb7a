//! Block-level parser.
//!
//! The block parser is line-oriented and handles:
//! - Fenced code blocks and extension fences
//! - Thematic breaks
//! - Blockquotes (parsed recursively as nested documents)
//! - ATX headings
//! - Pipe tables
//! - Checklists and lists
//! - Paragraphs

mod list;
pub mod node;
mod parser;
pub(crate) mod table;

pub use node::{
    Alignment, BlockNode, ChecklistItem, CompareItem, GalleryImage, ListItem, TaskCard,
    TaskPriority, TaskStatus, TimelineItem,
};
pub use parser::BlockParser;

use crate::Options;
use crate::normalize;

/// Parse one document nested `depth` quotes deep, with gallery merging.
pub(crate) fn parse_blocks(text: &str, options: &Options, depth: usize) -> Vec<BlockNode> {
    let blocks = BlockParser::with_depth(text, options, depth).parse();
    if options.merge_galleries {
        normalize::merge_galleries(blocks)
    } else {
        blocks
    }
}
