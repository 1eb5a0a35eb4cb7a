//! Emphasis closer search.
//!
//! `**` opens bold and `*` opens italic when the next char is not
//! whitespace. A closer is an asterisk run preceded by a non-whitespace
//! char. For bold the last two asterisks of a run of two or more close;
//! for italic the last asterisk of a run of one or three-plus closes, so a
//! nested `**bold**` inside italic text is skipped over.

use super::code_span::{match_code_span, run_len};

/// Which emphasis is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// `*...*`
    Emphasis,
    /// `**...**`
    Strong,
}

impl Strength {
    /// Delimiter length.
    pub fn len(self) -> usize {
        match self {
            Self::Emphasis => 1,
            Self::Strong => 2,
        }
    }
}

/// Whether the delimiter ending just before `content_start` can open.
#[inline]
pub fn can_open(bytes: &[u8], content_start: usize) -> bool {
    bytes
        .get(content_start)
        .is_some_and(|b| !b.is_ascii_whitespace())
}

/// Outcome of a closer search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closer {
    /// Start of the closing delimiter.
    At(usize),
    /// No closer. `past_code` is the end of the last code span the search
    /// skipped, or the content start when it skipped none.
    Missing { past_code: usize },
}

/// Find the start of the closing delimiter for content beginning at
/// `content_start`. Code spans are skipped whole.
pub fn find_closer(text: &str, content_start: usize, strength: Strength) -> Closer {
    let bytes = text.as_bytes();
    let mut past_code = content_start;
    let mut i = content_start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => match match_code_span(text, i) {
                Some(span) => {
                    i = span.end;
                    past_code = span.end;
                }
                None => i += run_len(bytes, i, b'`'),
            },
            b'*' => {
                let run = run_len(bytes, i, b'*');
                let preceded = i > content_start && !bytes[i - 1].is_ascii_whitespace();
                if preceded {
                    match strength {
                        Strength::Strong if run >= 2 => return Closer::At(i + run - 2),
                        Strength::Emphasis if run != 2 => return Closer::At(i + run - 1),
                        _ => {}
                    }
                }
                i += run;
            }
            _ => i += 1,
        }
    }
    Closer::Missing { past_code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_closer() {
        assert_eq!(find_closer("**bold** x", 2, Strength::Strong), Closer::At(6));
    }

    #[test]
    fn test_emphasis_skips_nested_strong() {
        let text = "*a **b** c*";
        assert_eq!(find_closer(text, 1, Strength::Emphasis), Closer::At(10));
    }

    #[test]
    fn test_triple_run_closes_both() {
        let text = "***x***";
        assert_eq!(find_closer(text, 2, Strength::Strong), Closer::At(5));
        assert_eq!(find_closer("*x*", 1, Strength::Emphasis), Closer::At(2));
    }

    #[test]
    fn test_whitespace_before_closer_rejected() {
        assert_eq!(
            find_closer("**a **", 2, Strength::Strong),
            Closer::Missing { past_code: 2 }
        );
        assert_eq!(
            find_closer("*a *", 1, Strength::Emphasis),
            Closer::Missing { past_code: 1 }
        );
    }

    #[test]
    fn test_code_span_hides_delimiters() {
        assert_eq!(find_closer("*`a*` b*", 1, Strength::Emphasis), Closer::At(7));
    }

    #[test]
    fn test_miss_starts_after_skipped_code() {
        assert_eq!(
            find_closer("**a `x **b**` c", 2, Strength::Strong),
            Closer::Missing { past_code: 13 }
        );
    }

    #[test]
    fn test_can_open() {
        assert!(can_open(b"**a", 2));
        assert!(!can_open(b"** a", 2));
        assert!(!can_open(b"**", 2));
    }
}
