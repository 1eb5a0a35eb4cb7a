//! Inline parser.
//!
//! A single left-to-right scan with manual lookahead. At each position the
//! constructs are tried in priority order:
//! 1. Backslash escape of ASCII punctuation
//! 2. Code span
//! 3. Image `![alt](src)`
//! 4. Link `[label](url)`, label parsed recursively without nested links
//! 5. Bold `**...**`, then italic `*...*`
//! 6. Block reference heuristics (outside links only), see [`refs`]
//!
//! Anything else is text. A construct whose closer never shows up
//! degrades to its opening characters as text and scanning continues.

mod code_span;
mod emphasis;
pub(crate) mod links;
pub mod node;
pub mod refs;

pub use node::{InlineNode, merge_text, plain_text, push_text};

use rustc_hash::FxHashSet;

use crate::Options;
use crate::cursor::Cursor;
use code_span::match_code_span;
use emphasis::{Closer, Strength, can_open, find_closer};
use links::{LinkMatch, match_link};

/// Bytes at which the scanner has to stop and look. Everything else is
/// copied through as text in runs.
const fn special_table() -> [bool; 256] {
    let mut table = [false; 256];
    table[b'\\' as usize] = true;
    table[b'`' as usize] = true;
    table[b'!' as usize] = true;
    table[b'[' as usize] = true;
    table[b'*' as usize] = true;
    table[b'\n' as usize] = true;
    table[b'b' as usize] = true;
    table[b'B' as usize] = true;
    // UTF-8 lead bytes of localized reference words.
    table[0xE3] = true;
    table[0xE5] = true;
    table
}

static SPECIAL: [bool; 256] = special_table();

#[inline]
fn is_special(b: u8) -> bool {
    SPECIAL[b as usize]
}

/// Recursion state of one scan.
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    depth: usize,
    in_link: bool,
}

/// A failed emphasis search.
#[derive(Debug, Clone, Copy)]
struct Miss {
    /// Openers at or after this offset have no closer either.
    from: usize,
    /// End of the last code span the search skipped.
    past_code: usize,
}

/// Positions past which a closer is known to be missing, so repeated
/// unmatched openers cost one search instead of one each.
#[derive(Default)]
struct Misses {
    code_runs: FxHashSet<usize>,
    strong: Option<Miss>,
    emphasis: Option<Miss>,
    link_from: Option<usize>,
}

impl Misses {
    fn known(from: Option<usize>, pos: usize) -> bool {
        from.is_some_and(|p| pos >= p)
    }

    fn emphasis_known(miss: Option<Miss>, pos: usize) -> bool {
        miss.is_some_and(|m| pos >= m.from)
    }

    /// A link or image consumed `consumed`. If that swallowed a backtick,
    /// code spans skipped by earlier emphasis searches may never be seen
    /// by the scan, so their misses only hold past those spans.
    fn consumed(&mut self, consumed: &str) {
        if memchr::memchr(b'`', consumed.as_bytes()).is_none() {
            return;
        }
        for miss in [&mut self.strong, &mut self.emphasis].into_iter().flatten() {
            miss.from = miss.from.max(miss.past_code);
        }
    }
}

/// Inline parser.
#[derive(Debug, Clone, Copy)]
pub struct InlineParser {
    max_depth: usize,
    references: bool,
}

impl InlineParser {
    /// Create a new inline parser.
    pub fn new(options: &Options) -> Self {
        Self {
            max_depth: options.max_inline_depth,
            references: options.references,
        }
    }

    /// Parse one logical line or joined line group. Newlines become breaks.
    pub fn parse(&self, text: &str) -> Vec<InlineNode> {
        let mut nodes = self.scan(text, Context::default());
        merge_text(&mut nodes);
        nodes
    }

    /// Parse a nested span one level deeper, or return it as plain text
    /// once the depth bound is hit.
    fn nested(&self, text: &str, ctx: Context) -> Vec<InlineNode> {
        let ctx = Context {
            depth: ctx.depth + 1,
            ..ctx
        };
        if ctx.depth > self.max_depth {
            log::trace!("inline depth {} exceeded, keeping span as text", self.max_depth);
            let mut nodes = Vec::new();
            push_text(&mut nodes, text);
            return nodes;
        }
        self.scan(text, ctx)
    }

    fn scan(&self, text: &str, ctx: Context) -> Vec<InlineNode> {
        let mut nodes = Vec::new();
        let bytes = text.as_bytes();
        if !bytes.iter().any(|&b| is_special(b)) {
            push_text(&mut nodes, text);
            return nodes;
        }

        let mut misses = Misses::default();
        let mut cursor = Cursor::new(text);

        while let Some(b) = cursor.peek() {
            let pos = cursor.offset();

            match b {
                b'\\' => {
                    if cursor.peek_ahead(1).is_some_and(|c| c.is_ascii_punctuation()) {
                        push_text(&mut nodes, &text[pos + 1..pos + 2]);
                        cursor.advance(2);
                        continue;
                    }
                }
                b'\n' => {
                    nodes.push(InlineNode::Break);
                    cursor.bump();
                    continue;
                }
                b'`' => {
                    let run = cursor.run_len(b'`');
                    if !misses.code_runs.contains(&run) {
                        if let Some(span) = match_code_span(text, pos) {
                            nodes.push(InlineNode::Code {
                                content: span.content(),
                            });
                            cursor = Cursor::new_at(text, span.end);
                            continue;
                        }
                        misses.code_runs.insert(run);
                    }
                    push_text(&mut nodes, &text[pos..pos + run]);
                    cursor.advance(run);
                    continue;
                }
                b'!' if cursor.peek_ahead(1) == Some(b'[') => {
                    if let Some(link) = self.try_link(text, pos + 1, &mut misses) {
                        misses.consumed(&text[pos..link.end]);
                        let link_ctx = Context {
                            in_link: true,
                            ..ctx
                        };
                        nodes.push(InlineNode::Image {
                            src: link.url.to_string(),
                            alt: plain_text(&self.nested(link.label, link_ctx)),
                        });
                        cursor = Cursor::new_at(text, link.end);
                        continue;
                    }
                }
                b'[' if !ctx.in_link => {
                    if let Some(link) = self.try_link(text, pos, &mut misses) {
                        misses.consumed(&text[pos..link.end]);
                        let link_ctx = Context {
                            in_link: true,
                            ..ctx
                        };
                        nodes.push(InlineNode::Link {
                            url: link.url.to_string(),
                            children: self.nested(link.label, link_ctx),
                        });
                        cursor = Cursor::new_at(text, link.end);
                        continue;
                    }
                }
                b'*' => {
                    if let Some((node, end)) = self.try_emphasis(text, pos, ctx, &mut misses) {
                        nodes.push(node);
                        cursor = Cursor::new_at(text, end);
                        continue;
                    }
                }
                _ => {}
            }

            if self.references && !ctx.in_link && refs::is_trigger(b) {
                if let Some(found) = refs::match_reference(text, pos) {
                    nodes.push(InlineNode::Link {
                        url: refs::reference_url(found.id),
                        children: vec![InlineNode::text(found.label)],
                    });
                    cursor.advance(found.len);
                    continue;
                }
            }

            if is_special(b) {
                // Unmatched opener or trigger: one char of literal text.
                if cursor.bump_char().is_none() {
                    break;
                }
                push_text(&mut nodes, cursor.slice_from(pos));
            } else {
                let run = bytes[pos..]
                    .iter()
                    .position(|&c| is_special(c))
                    .unwrap_or(bytes.len() - pos);
                push_text(&mut nodes, &text[pos..pos + run]);
                cursor.advance(run);
            }
        }

        nodes
    }

    fn try_link<'t>(
        &self,
        text: &'t str,
        open: usize,
        misses: &mut Misses,
    ) -> Option<LinkMatch<'t>> {
        if Misses::known(misses.link_from, open) {
            return None;
        }
        let rest = &text.as_bytes()[open..];
        if memchr::memchr(b']', rest).is_none() || memchr::memchr(b')', rest).is_none() {
            misses.link_from = Some(open);
            return None;
        }
        match_link(text, open)
    }

    fn try_emphasis(
        &self,
        text: &str,
        pos: usize,
        ctx: Context,
        misses: &mut Misses,
    ) -> Option<(InlineNode, usize)> {
        let bytes = text.as_bytes();
        let run = code_span::run_len(bytes, pos, b'*');

        if run >= 2 && !Misses::emphasis_known(misses.strong, pos) && can_open(bytes, pos + 2) {
            let start = pos + 2;
            match find_closer(text, start, Strength::Strong) {
                Closer::At(close) => {
                    let children = self.nested(&text[start..close], ctx);
                    return Some((InlineNode::Bold { children }, close + Strength::Strong.len()));
                }
                Closer::Missing { past_code } => {
                    misses.strong = Some(Miss {
                        from: pos,
                        past_code,
                    })
                }
            }
        }

        if run == 1 && !Misses::emphasis_known(misses.emphasis, pos) && can_open(bytes, pos + 1) {
            let start = pos + 1;
            match find_closer(text, start, Strength::Emphasis) {
                Closer::At(close) => {
                    let children = self.nested(&text[start..close], ctx);
                    return Some((InlineNode::Italic { children }, close + Strength::Emphasis.len()));
                }
                Closer::Missing { past_code } => {
                    misses.emphasis = Some(Miss {
                        from: pos,
                        past_code,
                    })
                }
            }
        }

        None
    }
}

impl Default for InlineParser {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}
