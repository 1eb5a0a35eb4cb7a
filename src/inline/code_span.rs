//! Code span matching.
//!
//! Code spans have highest precedence after escapes.
//! Backtick runs must match exactly.

/// A matched code span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSpan<'a> {
    /// Raw content between the backtick runs.
    pub raw: &'a str,
    /// Offset just past the closing run.
    pub end: usize,
}

impl CodeSpan<'_> {
    /// Content with line endings turned into spaces and one surrounding
    /// space stripped when both ends have one.
    pub fn content(&self) -> String {
        let raw = self.raw;
        let bytes = raw.as_bytes();
        let padded = bytes.len() >= 2
            && matches!(bytes[0], b' ' | b'\n')
            && matches!(bytes[bytes.len() - 1], b' ' | b'\n')
            && bytes.iter().any(|&b| b != b' ' && b != b'\n');
        let trimmed = if padded { &raw[1..raw.len() - 1] } else { raw };
        trimmed.replace('\n', " ")
    }
}

/// Length of the run of `b` starting at `pos`.
#[inline]
pub fn run_len(bytes: &[u8], pos: usize, b: u8) -> usize {
    bytes[pos..].iter().take_while(|&&c| c == b).count()
}

/// Match a code span whose opening backtick run starts at `start`.
pub fn match_code_span(text: &str, start: usize) -> Option<CodeSpan<'_>> {
    let bytes = text.as_bytes();
    let open_len = run_len(bytes, start, b'`');
    if open_len == 0 {
        return None;
    }

    let content_start = start + open_len;
    let mut pos = content_start;
    while let Some(offset) = memchr::memchr(b'`', &bytes[pos..]) {
        let closer = pos + offset;
        let close_len = run_len(bytes, closer, b'`');
        if close_len == open_len {
            return Some(CodeSpan {
                raw: &text[content_start..closer],
                end: closer + close_len,
            });
        }
        pos = closer + close_len;
    }
    None
}
