//! List and checklist accumulation.
//!
//! Items are collected as raw text while their lines arrive and only run
//! through the inline parser when the list is flushed. Nesting follows
//! indentation: an item indented deeper than the current level opens a
//! child level under the previous item, a shallower one closes levels
//! until it fits.

use smallvec::SmallVec;

use super::node::{BlockNode, ChecklistItem, ListItem};
use crate::inline::InlineParser;
use crate::limits;

/// Parsed list marker of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker<'a> {
    /// Indentation in columns.
    pub indent: usize,
    /// `1.` / `1)` style.
    pub ordered: bool,
    /// Number of an ordered marker.
    pub number: Option<u32>,
    /// Item text after the marker, trimmed.
    pub content: &'a str,
}

/// Leading indentation in columns. A tab counts as four.
pub fn indent_width(line: &str) -> usize {
    line.bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .map(|b| if b == b'\t' { 4 } else { 1 })
        .sum()
}

/// Recognize `- `, `* `, `+ `, `1. ` or `1) `.
pub fn parse_list_marker(line: &str) -> Option<ListMarker<'_>> {
    let indent = indent_width(line);
    let trimmed = line.trim_start();
    let bytes = trimmed.as_bytes();

    let (ordered, number, marker_len) = match bytes.first()? {
        b'-' | b'*' | b'+' => (false, None, 1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > limits::MAX_LIST_MARKER_DIGITS
                || !matches!(bytes.get(digits), Some(b'.' | b')'))
            {
                return None;
            }
            (true, trimmed[..digits].parse::<u32>().ok(), digits + 1)
        }
        _ => return None,
    };

    if !matches!(bytes.get(marker_len), Some(b' ' | b'\t')) {
        return None;
    }
    Some(ListMarker {
        indent,
        ordered,
        number,
        content: trimmed[marker_len..].trim(),
    })
}

/// Recognize `- [ ] text` / `- [x] text`, returning the state and text.
pub fn parse_checklist_marker(line: &str) -> Option<(bool, &str)> {
    let trimmed = line.trim_start();
    let rest = trimmed
        .strip_prefix(['-', '*', '+'])?
        .trim_start_matches([' ', '\t']);
    if rest.len() == trimmed.len() - 1 {
        // No space between bullet and box.
        return None;
    }
    let bytes = rest.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'[' || bytes[2] != b']' {
        return None;
    }
    let checked = match bytes[1] {
        b' ' => false,
        b'x' | b'X' => true,
        _ => return None,
    };
    match bytes.get(3) {
        None => Some((checked, "")),
        Some(b' ' | b'\t') => Some((checked, rest[3..].trim())),
        Some(_) => None,
    }
}

#[derive(Debug, Default)]
struct PendingItem {
    text: String,
    children: Vec<PendingItem>,
}

impl PendingItem {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    fn continue_with(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line.trim());
    }

    fn into_item(self, inline: &InlineParser) -> ListItem {
        ListItem {
            content: inline.parse(&self.text),
            children: (!self.children.is_empty()).then(|| {
                self.children
                    .into_iter()
                    .map(|child| child.into_item(inline))
                    .collect()
            }),
        }
    }
}

#[derive(Debug)]
struct Frame {
    indent: usize,
    items: Vec<PendingItem>,
}

/// An open list.
#[derive(Debug)]
pub struct ListBuilder {
    ordered: bool,
    start: Option<u32>,
    stack: SmallVec<[Frame; 4]>,
}

impl ListBuilder {
    /// Start a list with its first item.
    pub fn new(marker: &ListMarker<'_>) -> Self {
        let mut stack = SmallVec::new();
        stack.push(Frame {
            indent: marker.indent,
            items: vec![PendingItem::new(marker.content)],
        });
        Self {
            ordered: marker.ordered,
            start: if marker.ordered { marker.number } else { None },
            stack,
        }
    }

    /// Whether the root level is ordered.
    pub fn ordered(&self) -> bool {
        self.ordered
    }

    /// Whether an item at `indent` would be a root-level item.
    pub fn is_root_indent(&self, indent: usize) -> bool {
        self.stack.first().is_none_or(|root| indent <= root.indent)
    }

    /// Add an item, nesting by indentation.
    pub fn push(&mut self, marker: &ListMarker<'_>) {
        let item = PendingItem::new(marker.content);
        let top_indent = self.stack.last().map_or(0, |top| top.indent);
        if marker.indent > top_indent {
            self.stack.push(Frame {
                indent: marker.indent,
                items: vec![item],
            });
            return;
        }
        while self.stack.len() > 1 && self.stack.last().is_some_and(|top| marker.indent < top.indent) {
            self.fold_top();
        }
        if let Some(top) = self.stack.last_mut() {
            top.items.push(item);
        }
    }

    /// Append a continuation line to the most recent item.
    pub fn continue_item(&mut self, line: &str) {
        if let Some(item) = self.stack.last_mut().and_then(|top| top.items.last_mut()) {
            item.continue_with(line);
        }
    }

    /// Close the top level, attaching its items to the parent's last item.
    fn fold_top(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if let Some(parent) = self.stack.last_mut().and_then(|top| top.items.last_mut()) {
            parent.children.extend(frame.items);
        }
    }

    /// Close every level and build the node.
    pub fn finish(mut self, inline: &InlineParser) -> BlockNode {
        while self.stack.len() > 1 {
            self.fold_top();
        }
        let items = self
            .stack
            .pop()
            .map(|root| root.items)
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.into_item(inline))
            .collect();
        BlockNode::List {
            ordered: self.ordered,
            start: self.start,
            items,
        }
    }
}

/// An open checklist. Checklists are flat.
#[derive(Debug, Default)]
pub struct ChecklistBuilder {
    items: Vec<(bool, PendingItem)>,
}

impl ChecklistBuilder {
    /// Add an item.
    pub fn push(&mut self, checked: bool, text: &str) {
        self.items.push((checked, PendingItem::new(text)));
    }

    /// Append a continuation line to the most recent item.
    pub fn continue_item(&mut self, line: &str) {
        if let Some((_, item)) = self.items.last_mut() {
            item.continue_with(line);
        }
    }

    /// Build the node.
    pub fn finish(self, inline: &InlineParser) -> BlockNode {
        BlockNode::Checklist {
            items: self
                .items
                .into_iter()
                .map(|(checked, item)| ChecklistItem {
                    checked,
                    children: inline.parse(&item.text),
                })
                .collect(),
        }
    }
}
