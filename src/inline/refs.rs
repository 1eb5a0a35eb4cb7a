//! Block reference heuristics.
//!
//! Model output mentions content blocks in many loose forms. Each form is
//! one entry in [`PATTERNS`], tried in order at the scan position; the
//! first that matches wins and becomes a synthetic link to
//! `block://<id>`. New forms go in the table, not in the scanning loop.

use std::sync::LazyLock;

use regex::Regex;

use crate::limits;

/// URL scheme of synthesized reference links.
pub const REFERENCE_SCHEME: &str = "block";

/// How the link label is derived from a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Keep the matched source text.
    Matched,
    /// Replace with `#<id>`.
    Normalized,
}

/// One reference form.
#[derive(Debug)]
pub struct ReferencePattern {
    /// Short name, used in logs and tests.
    pub name: &'static str,
    /// Anchored pattern; capture group 1 holds the id digits.
    pub regex: Regex,
    /// First bytes the pattern can start with.
    pub triggers: &'static [u8],
    /// Reject when the preceding char is an ASCII word char.
    pub word_start: bool,
    /// Reject when immediately followed by this byte.
    pub reject_next: Option<u8>,
    /// Label style.
    pub label: Label,
}

/// A recognized reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Name of the pattern that matched.
    pub pattern: &'static str,
    /// Referenced block id, always positive.
    pub id: u64,
    /// Length of the matched source text in bytes.
    pub len: usize,
    /// Display label for the link.
    pub label: String,
}

/// Leading words of natural-language references, localized.
const LATIN_WORDS: &str = "block|bloque|bloc";
const CJK_WORDS: &str = "块|區塊|区块|ブロック";

/// Lead bytes of every pattern, including the UTF-8 lead bytes of the
/// CJK words above.
const LATIN_TRIGGERS: &[u8] = b"bB";
const CJK_TRIGGERS: &[u8] = &[0xE3, 0xE5];

/// Reference forms in priority order.
pub static PATTERNS: LazyLock<Vec<ReferencePattern>> = LazyLock::new(|| {
    vec![
        ReferencePattern {
            name: "scheme",
            regex: anchored(&format!(r"(?i){REFERENCE_SCHEME}://([0-9]+)")),
            triggers: LATIN_TRIGGERS,
            word_start: true,
            reject_next: None,
            label: Label::Normalized,
        },
        ReferencePattern {
            name: "blockid",
            regex: anchored(r"(?i)block[_-]?id(?:[ \t]*:[ \t]*|[ \t]+)([0-9]+)"),
            triggers: LATIN_TRIGGERS,
            word_start: true,
            reject_next: None,
            label: Label::Normalized,
        },
        ReferencePattern {
            name: "hash",
            regex: anchored(&format!(r"(?i)(?:{LATIN_WORDS})[ \t]*#[ \t]*([0-9]+)")),
            triggers: LATIN_TRIGGERS,
            word_start: true,
            reject_next: None,
            label: Label::Matched,
        },
        ReferencePattern {
            name: "cjk",
            regex: anchored(&format!(r"(?:{CJK_WORDS})[ \t]*#?[ \t]*([0-9]+)")),
            triggers: CJK_TRIGGERS,
            word_start: false,
            reject_next: None,
            label: Label::Matched,
        },
        ReferencePattern {
            name: "loose",
            regex: anchored(&format!(
                r"(?i)(?:{LATIN_WORDS})[ \t]+([0-9]{{{},}})",
                limits::MIN_LOOSE_REF_DIGITS
            )),
            triggers: LATIN_TRIGGERS,
            word_start: true,
            reject_next: None,
            label: Label::Matched,
        },
        ReferencePattern {
            name: "bracket",
            regex: anchored(&format!(
                r"\[([0-9]{{{},}})\]",
                limits::MIN_BRACKET_REF_DIGITS
            )),
            triggers: b"[",
            word_start: false,
            reject_next: Some(b'('),
            label: Label::Normalized,
        },
    ]
});

fn anchored(pattern: &str) -> Regex {
    // Patterns are compile-time constants; a failure here is a programming error.
    Regex::new(&format!("^(?:{pattern})")).expect("reference pattern must compile")
}

/// Whether any pattern can start with `b`.
#[inline]
pub fn is_trigger(b: u8) -> bool {
    LATIN_TRIGGERS.contains(&b) || CJK_TRIGGERS.contains(&b) || b == b'['
}

/// Build the link target for a block id.
pub fn reference_url(id: u64) -> String {
    format!("{REFERENCE_SCHEME}://{id}")
}

/// Try every pattern at byte offset `pos` of `text`, first match wins.
pub fn match_reference(text: &str, pos: usize) -> Option<ReferenceMatch> {
    let first = *text.as_bytes().get(pos)?;
    let rest = &text[pos..];
    let preceded_by_word = text[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');

    PATTERNS.iter().find_map(|pattern| {
        if !pattern.triggers.contains(&first) || (pattern.word_start && preceded_by_word) {
            return None;
        }
        let caps = pattern.regex.captures(rest)?;
        let whole = caps.get(0)?;
        let digits = caps.get(1)?.as_str();
        let next = rest.as_bytes().get(whole.end()).copied();
        if next.is_some_and(|b| b.is_ascii_alphanumeric())
            || (next.is_some() && next == pattern.reject_next)
        {
            return None;
        }
        let id = digits.parse::<u64>().ok().filter(|&id| id > 0)?;
        let label = match pattern.label {
            Label::Matched => whole.as_str().to_string(),
            Label::Normalized => format!("#{id}"),
        };
        Some(ReferenceMatch {
            pattern: pattern.name,
            id,
            len: whole.end(),
            label,
        })
    })
}
