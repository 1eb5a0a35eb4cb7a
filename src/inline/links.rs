//! Link and image syntax.
//!
//! Handles:
//! - Inline links: `[text](url "title")`
//! - Images: `![alt](url "title")`
//!
//! Titles are accepted and dropped. Destinations may be wrapped in `<...>`.

use crate::limits;

/// A matched `[label](url)` starting at an opening bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    /// Raw label text between the brackets.
    pub label: &'a str,
    /// Link destination.
    pub url: &'a str,
    /// Offset just past the closing `)`.
    pub end: usize,
}

/// Match `[label](destination)` with the `[` at `open`.
pub fn match_link(text: &str, open: usize) -> Option<LinkMatch<'_>> {
    let close = find_label_end(text, open)?;
    let bytes = text.as_bytes();
    if bytes.get(close + 1) != Some(&b'(') {
        return None;
    }
    let (url, end) = parse_destination(text, close + 2)?;
    Some(LinkMatch {
        label: &text[open + 1..close],
        url,
        end,
    })
}

/// Find the `]` closing the label opened at `open`, honouring nesting and
/// backslash escapes.
pub fn find_label_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'['));

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => {
                depth += 1;
                if depth > limits::MAX_BRACKET_DEPTH {
                    return None;
                }
            }
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Parse a destination starting just after `(`.
/// Returns the URL and the offset past the closing `)`.
fn parse_destination(text: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'\n' => return None,
            b'(' => {
                depth += 1;
                if depth > limits::MAX_LINK_PAREN_DEPTH {
                    return None;
                }
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
        i += 1;
    }
    if depth != 0 || i >= bytes.len() {
        return None;
    }

    let inner = text[start..i].trim();
    let url = if let Some(rest) = inner.strip_prefix('<') {
        match rest.find('>') {
            Some(gt) => &rest[..gt],
            None => first_token(inner),
        }
    } else {
        first_token(inner)
    };
    Some((url, i + 1))
}

fn first_token(s: &str) -> &str {
    s.split_ascii_whitespace().next().unwrap_or("")
}
