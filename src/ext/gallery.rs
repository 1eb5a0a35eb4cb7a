//! ```` ```gallery ```` / ```` ```images ```` fences.
//!
//! One image per line, either `![alt](src) | caption` or `src | alt | caption`.

use super::ExtensionError;
use crate::block::node::{BlockNode, GalleryImage};
use crate::block::table::split_cells;
use crate::inline::links::match_link;
use crate::inline::{InlineParser, plain_text};

pub fn parse(content: &str, inline: &InlineParser) -> Result<BlockNode, ExtensionError> {
    if content.trim().is_empty() {
        return Err(ExtensionError::Empty);
    }

    let images: Vec<GalleryImage> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse_line(line, inline))
        .collect();

    if images.is_empty() {
        return Err(ExtensionError::NoRows("gallery"));
    }
    Ok(BlockNode::Gallery { images })
}

fn parse_line(line: &str, inline: &InlineParser) -> Option<GalleryImage> {
    if line.starts_with("![") {
        let link = match_link(line, 1)?;
        let caption = line[link.end..].trim_start().strip_prefix('|').map(str::trim);
        return Some(GalleryImage {
            src: link.url.to_string(),
            alt: plain_text(&inline.parse(link.label)),
            caption: non_empty(caption),
        });
    }

    let fields = split_cells(line);
    let src = *fields.first()?;
    if src.is_empty() || src.contains(char::is_whitespace) {
        return None;
    }
    Some(GalleryImage {
        src: src.to_string(),
        alt: fields.get(1).copied().unwrap_or_default().to_string(),
        caption: non_empty(fields.get(2).copied()),
    })
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_string)
}
