//! DoS prevention constants.
//!
//! Model output is untrusted. These limits keep every parse bounded
//! by input length rather than by how adversarially it nests.

/// Maximum nesting depth for inline elements (emphasis, link labels).
pub const MAX_INLINE_NESTING: usize = 10;

/// Maximum nesting depth for blockquotes.
pub const MAX_QUOTE_NESTING: usize = 16;

/// Maximum table columns. Wider header rows are truncated.
pub const MAX_TABLE_COLUMNS: usize = 128;

/// Maximum digits in an ordered list marker (prevents big-integer parsing).
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

/// Maximum bracket depth when matching `[...]` in links and images.
pub const MAX_BRACKET_DEPTH: usize = 8;

/// Maximum parentheses nesting in a link destination.
pub const MAX_LINK_PAREN_DEPTH: usize = 32;

/// Minimum digits for a bracketed bare-number reference like `[1234]`.
pub const MIN_BRACKET_REF_DIGITS: usize = 3;

/// Minimum digits for a natural-language reference without `#` (`Block 123`).
pub const MIN_LOOSE_REF_DIGITS: usize = 3;

/// Minimum digits for the last-resort bare number inside a diagram fence.
pub const MIN_BARE_DIAGRAM_ID_DIGITS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MAX_INLINE_NESTING >= 4) };
        const { assert!(MAX_INLINE_NESTING <= 32) };
        const { assert!(MAX_QUOTE_NESTING >= 4) };
        const { assert!(MAX_LINK_PAREN_DEPTH >= 1) };
        const { assert!(MIN_BRACKET_REF_DIGITS >= 1) };
        const { assert!(MIN_BARE_DIAGRAM_ID_DIGITS > MIN_BRACKET_REF_DIGITS) };
    }
}
