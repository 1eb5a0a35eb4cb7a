//! Line-oriented block parser.
//!
//! Each line is classified once, in this order: fence line (while a fence
//! is open), blank, fence opener, thematic break, blockquote, ATX heading,
//! table, checklist item, list item, and finally paragraph text. Open
//! paragraphs and lists are buffered as raw lines and only handed to the
//! inline parser when they close.

use super::list::{
    ChecklistBuilder, ListBuilder, ListMarker, indent_width, parse_checklist_marker,
    parse_list_marker,
};
use super::node::BlockNode;
use super::table;
use crate::Options;
use crate::ext;
use crate::inline::InlineParser;

/// State for an open fenced code block.
#[derive(Debug)]
struct FenceState<'a> {
    /// The fence character (` or ~).
    fence_char: u8,
    /// Length of the opening run.
    fence_len: usize,
    /// Indentation of the opener, stripped from content lines.
    indent: usize,
    /// First word of the info string.
    language: Option<&'a str>,
    lines: Vec<&'a str>,
}

/// Block parser over one document or quote body.
pub struct BlockParser<'a> {
    lines: Vec<&'a str>,
    options: Options,
    inline: InlineParser,
    /// Blockquote nesting of this document.
    depth: usize,
    blocks: Vec<BlockNode>,
    paragraph: Vec<&'a str>,
    list: Option<ListBuilder>,
    checklist: Option<ChecklistBuilder>,
    fence: Option<FenceState<'a>>,
}

impl<'a> BlockParser<'a> {
    /// Create a parser for a top-level document.
    pub fn new(input: &'a str, options: &Options) -> Self {
        Self::with_depth(input, options, 0)
    }

    /// Create a parser for a document nested `depth` quotes deep.
    pub fn with_depth(input: &'a str, options: &Options, depth: usize) -> Self {
        Self {
            lines: input.lines().collect(),
            options: *options,
            inline: InlineParser::new(options),
            depth,
            blocks: Vec::new(),
            paragraph: Vec::new(),
            list: None,
            checklist: None,
            fence: None,
        }
    }

    /// Parse all lines into block nodes.
    pub fn parse(mut self) -> Vec<BlockNode> {
        let mut i = 0;
        while i < self.lines.len() {
            i = self.parse_line(i);
        }
        self.close_fence(false);
        self.close_all();
        self.blocks
    }

    /// Handle the line at `i`, returning the index of the next unconsumed line.
    fn parse_line(&mut self, i: usize) -> usize {
        let line = self.lines[i];

        if self.fence.is_some() {
            self.parse_fence_line(line);
            return i + 1;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.close_all();
            return i + 1;
        }

        if self.try_code_fence(line) {
            return i + 1;
        }

        if is_thematic_break(trimmed) {
            self.close_all();
            self.blocks.push(BlockNode::Hr);
            return i + 1;
        }

        if trimmed.starts_with('>') {
            if self.depth < self.options.max_quote_depth {
                return self.parse_quote(i);
            }
            log::trace!("quote depth {} reached, keeping line as text", self.depth);
        }

        if let Some((level, text)) = parse_atx_heading(trimmed) {
            self.close_all();
            self.blocks.push(BlockNode::Heading {
                level,
                children: self.inline.parse(text),
            });
            return i + 1;
        }

        if table::starts_table(&self.lines, i) {
            self.close_all();
            let (node, next) = table::parse_table(&self.lines, i, &self.inline);
            self.blocks.push(node);
            return next;
        }

        if let Some((checked, text)) = parse_checklist_marker(line) {
            self.close_paragraph();
            self.close_list();
            self.checklist
                .get_or_insert_with(ChecklistBuilder::default)
                .push(checked, text);
            return i + 1;
        }

        if let Some(marker) = parse_list_marker(line) {
            self.push_list_item(&marker);
            return i + 1;
        }

        if indent_width(line) > 0 {
            if let Some(list) = &mut self.list {
                list.continue_item(trimmed);
                return i + 1;
            }
            if let Some(checklist) = &mut self.checklist {
                checklist.continue_item(trimmed);
                return i + 1;
            }
        }

        self.close_list();
        self.close_checklist();
        self.paragraph.push(trimmed);
        i + 1
    }

    fn push_list_item(&mut self, marker: &ListMarker<'_>) {
        self.close_paragraph();
        self.close_checklist();

        // A marker of the other kind starts a new list at the root level
        // and nests as a child list anywhere deeper.
        let continues = self.list.as_ref().is_some_and(|list| {
            list.ordered() == marker.ordered || !list.is_root_indent(marker.indent)
        });
        if continues {
            if let Some(list) = &mut self.list {
                list.push(marker);
            }
        } else {
            self.close_list();
            self.list = Some(ListBuilder::new(marker));
        }
    }

    /// Collect the quote run starting at `start` and parse it as a nested
    /// document. Blank lines inside the run belong to the quote.
    fn parse_quote(&mut self, start: usize) -> usize {
        self.close_all();

        let mut inner: Vec<&str> = Vec::new();
        let mut kept = 0;
        for line in &self.lines[start..] {
            if let Some(rest) = line.trim_start().strip_prefix('>') {
                inner.push(rest.strip_prefix(' ').unwrap_or(rest));
                kept = inner.len();
            } else if line.trim().is_empty() {
                inner.push("");
            } else {
                break;
            }
        }
        inner.truncate(kept);

        let body = inner.join("\n");
        let children = super::parse_blocks(&body, &self.options, self.depth + 1);
        self.blocks.push(BlockNode::Quote { children });
        start + kept
    }

    /// Try to open a fenced code block.
    fn try_code_fence(&mut self, line: &'a str) -> bool {
        let trimmed = line.trim_start();
        let fence_char = match trimmed.as_bytes().first() {
            Some(&c @ (b'`' | b'~')) => c,
            _ => return false,
        };
        let fence_len = trimmed.bytes().take_while(|&b| b == fence_char).count();
        if fence_len < 3 {
            return false;
        }

        let info = trimmed[fence_len..].trim();
        // Backtick fences cannot have backticks in the info string.
        if fence_char == b'`' && info.contains('`') {
            return false;
        }

        self.close_all();
        self.fence = Some(FenceState {
            fence_char,
            fence_len,
            indent: indent_width(line),
            language: info.split_whitespace().next(),
            lines: Vec::new(),
        });
        true
    }

    /// Handle a line inside an open fence.
    fn parse_fence_line(&mut self, line: &'a str) {
        let Some(fence) = &mut self.fence else {
            return;
        };

        let trimmed = line.trim_start();
        let run = trimmed
            .bytes()
            .take_while(|&b| b == fence.fence_char)
            .count();
        if run >= fence.fence_len && trimmed[run..].trim().is_empty() {
            self.close_fence(true);
            return;
        }

        fence.lines.push(strip_indent(line, fence.indent));
    }

    fn close_fence(&mut self, closed: bool) {
        if let Some(fence) = self.fence.take() {
            let content = fence.lines.join("\n");
            let node = ext::dispatch(fence.language, &content, closed, &self.options, &self.inline);
            self.blocks.push(node);
        }
    }

    fn close_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join("\n");
        self.paragraph.clear();
        let children = self.inline.parse(&text);
        if !children.is_empty() {
            self.blocks.push(BlockNode::Paragraph { children });
        }
    }

    fn close_list(&mut self) {
        if let Some(list) = self.list.take() {
            self.blocks.push(list.finish(&self.inline));
        }
    }

    fn close_checklist(&mut self) {
        if let Some(checklist) = self.checklist.take() {
            self.blocks.push(checklist.finish(&self.inline));
        }
    }

    fn close_all(&mut self) {
        self.close_paragraph();
        self.close_list();
        self.close_checklist();
    }
}

/// Three or more of the same `-`, `*` or `_`, optionally spaced.
fn is_thematic_break(trimmed: &str) -> bool {
    let mut marker = None;
    let mut count = 0;
    for b in trimmed.bytes() {
        match b {
            b' ' | b'\t' => {}
            b'-' | b'*' | b'_' if marker.is_none_or(|m| m == b) => {
                marker = Some(b);
                count += 1;
            }
            _ => return false,
        }
    }
    count >= 3
}

/// `#` to `######` followed by whitespace or end of line.
fn parse_atx_heading(trimmed: &str) -> Option<(u8, &str)> {
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level as u8, trim_heading_end(rest.trim())))
}

/// Drop a closing `#` sequence. It must be preceded by whitespace.
fn trim_heading_end(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() || without.is_empty() {
        return without;
    }
    if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}

/// Remove up to `columns` of leading indentation.
fn strip_indent(line: &str, columns: usize) -> &str {
    let mut width = 0;
    let mut offset = 0;
    for b in line.bytes() {
        let w = match b {
            b' ' => 1,
            b'\t' => 4,
            _ => break,
        };
        if width + w > columns {
            break;
        }
        width += w;
        offset += 1;
    }
    &line[offset..]
}
