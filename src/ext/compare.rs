//! ```` ```compare ```` fences.
//!
//! ```text
//! Rust | Go
//! ---
//! ownership | garbage collector
//! ```

use super::ExtensionError;
use crate::block::node::{BlockNode, CompareItem};
use crate::block::table::{is_separator_row, split_cells};
use crate::inline::InlineParser;

pub fn parse(content: &str, inline: &InlineParser) -> Result<BlockNode, ExtensionError> {
    let mut lines = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let header = lines.next().ok_or(ExtensionError::Empty)?;
    let titles = split_cells(header);
    if titles.len() < 2 {
        return Err(ExtensionError::MissingField("rightTitle"));
    }
    if lines.peek().is_some_and(|line| is_separator_row(line)) {
        lines.next();
    }

    let items: Vec<CompareItem> = lines
        .filter_map(|line| {
            let cells = split_cells(line);
            (cells.len() >= 2).then(|| CompareItem {
                left: inline.parse(cells[0]),
                right: inline.parse(cells[1]),
            })
        })
        .collect();

    if items.is_empty() {
        return Err(ExtensionError::NoRows("compare"));
    }
    Ok(BlockNode::Compare {
        left_title: inline.parse(titles[0]),
        right_title: inline.parse(titles[1]),
        items,
    })
}
