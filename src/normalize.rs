//! Recovery passes around block parsing.
//!
//! Before: the out-of-band completion marker `[localgraph:ID]` is stripped
//! and remembered. After: runs of single-image paragraphs become galleries
//! and adjacent text nodes are merged everywhere in the tree.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::node::{BlockNode, GalleryImage};
use crate::inline::merge_text;

static COMPLETION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*local[_ -]?graph\s*[:=]\s*([0-9]+)\s*\]")
        .expect("completion marker pattern must compile")
});

/// Replace `\r\n` and lone `\r` with `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Find the completion marker. Returns the text with every marker removed
/// and the id of the first marker carrying a positive id. Markers inside a
/// closed code fence are code, not markers.
pub fn extract_completion_marker(text: &str) -> Option<(String, u64)> {
    let fenced = closed_fence_bodies(text);
    let markers: Vec<_> = COMPLETION_MARKER
        .captures_iter(text)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|m| !fenced.iter().any(|body| body.contains(&m.start())))
        })
        .collect();

    let block_id = markers
        .iter()
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .find(|&id| id > 0)?;

    let mut rest = String::with_capacity(text.len());
    let mut last = 0;
    for m in markers.iter().filter_map(|caps| caps.get(0)) {
        rest.push_str(&text[last..m.start()]);
        last = m.end();
    }
    rest.push_str(&text[last..]);

    log::debug!("completion marker found, appending localgraph {block_id}");
    Some((rest, block_id))
}

/// Byte ranges of fenced code bodies that have a closing fence. Fence
/// lines follow the block scanner: three or more backticks or tildes,
/// closed by a bare run of the same char at least as long.
fn closed_fence_bodies(text: &str) -> Vec<Range<usize>> {
    let mut bodies = Vec::new();
    // (fence char, fence length, body start)
    let mut open: Option<(u8, usize, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let trimmed = line.trim();
        let fence_char = match trimmed.as_bytes().first() {
            Some(&c @ (b'`' | b'~')) => c,
            _ => continue,
        };
        let run = trimmed.bytes().take_while(|&b| b == fence_char).count();

        match open {
            Some((c, len, body)) => {
                if c == fence_char && run >= len && run == trimmed.len() {
                    bodies.push(body..start);
                    open = None;
                }
            }
            None => {
                let info = &trimmed[run..];
                if run >= 3 && !(fence_char == b'`' && info.contains('`')) {
                    open = Some((fence_char, run, offset));
                }
            }
        }
    }
    bodies
}

/// Merge every run of two or more single-image paragraphs into one
/// gallery. A lone single-image paragraph is left alone.
pub fn merge_galleries(blocks: Vec<BlockNode>) -> Vec<BlockNode> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut run: Vec<BlockNode> = Vec::new();

    for block in blocks {
        if block.single_image().is_some() {
            run.push(block);
        } else {
            flush_run(&mut run, &mut out);
            out.push(block);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<BlockNode>, out: &mut Vec<BlockNode>) {
    if run.len() < 2 {
        out.append(run);
        return;
    }
    let images = run
        .iter()
        .filter_map(BlockNode::single_image)
        .map(|(src, alt)| GalleryImage {
            src: src.to_string(),
            alt: alt.to_string(),
            caption: None,
        })
        .collect();
    run.clear();
    out.push(BlockNode::Gallery { images });
}

/// Merge adjacent text nodes in every inline sequence of the tree.
pub fn merge_text_nodes(blocks: &mut [BlockNode]) {
    for block in blocks {
        match block {
            BlockNode::Paragraph { children } | BlockNode::Heading { children, .. } => {
                merge_text(children);
            }
            BlockNode::List { items, .. } => merge_list_items(items),
            BlockNode::Checklist { items } => {
                for item in items {
                    merge_text(&mut item.children);
                }
            }
            BlockNode::Quote { children } => merge_text_nodes(children),
            BlockNode::Table { headers, rows, .. } => {
                headers.iter_mut().for_each(merge_text);
                rows.iter_mut().flatten().for_each(merge_text);
            }
            BlockNode::Timeline { items } => {
                for item in items {
                    merge_text(&mut item.title);
                    if let Some(description) = &mut item.description {
                        merge_text(description);
                    }
                }
            }
            BlockNode::Compare {
                left_title,
                right_title,
                items,
            } => {
                merge_text(left_title);
                merge_text(right_title);
                for item in items {
                    merge_text(&mut item.left);
                    merge_text(&mut item.right);
                }
            }
            BlockNode::CodeBlock { .. }
            | BlockNode::Hr
            | BlockNode::Gallery { .. }
            | BlockNode::LocalGraph { .. }
            | BlockNode::TaskCard { .. } => {}
        }
    }
}

fn merge_list_items(items: &mut [crate::block::node::ListItem]) {
    for item in items {
        merge_text(&mut item.content);
        if let Some(children) = &mut item.children {
            merge_list_items(children);
        }
    }
}
