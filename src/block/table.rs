//! Pipe tables.
//!
//! A table starts at a line containing `|` directly followed by a
//! separator row (`| --- | :-: |`). Every following non-blank line that
//! contains `|` is a data row. Rows are padded or truncated to the header
//! width.

use smallvec::SmallVec;

use super::node::{Alignment, BlockNode};
use crate::inline::{InlineNode, InlineParser};
use crate::limits;

/// Cells of one row, trimmed.
pub type Cells<'a> = SmallVec<[&'a str; 8]>;

/// Whether `line` is a separator row: only spaces, pipes, colons and
/// dashes, with at least one dash.
pub fn is_separator_row(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty()
        && t.contains('-')
        && t.bytes().all(|b| matches!(b, b' ' | b'\t' | b'|' | b':' | b'-'))
}

/// Whether `lines[i]` opens a table. The header needs a non-empty cell.
pub fn starts_table(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|')
        && lines.get(i + 1).is_some_and(|next| is_separator_row(next))
        && split_cells(lines[i]).iter().any(|cell| !cell.is_empty())
}

/// Split a row into trimmed cells. Outer pipes are optional; `\|` and
/// pipes inside code spans do not split.
pub fn split_cells(line: &str) -> Cells<'_> {
    let mut row = line.trim();
    if let Some(rest) = row.strip_prefix('|') {
        row = rest;
    }
    if row.ends_with('|') && !row.ends_with("\\|") {
        row = &row[..row.len() - 1];
    }

    let bytes = row.as_bytes();
    let mut cells = Cells::new();
    let mut start = 0;
    let mut i = 0;
    let mut code_run = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'`' => {
                let run = bytes[i..].iter().take_while(|&&b| b == b'`').count();
                code_run = if code_run == 0 {
                    run
                } else if code_run == run {
                    0
                } else {
                    code_run
                };
                i += run;
                continue;
            }
            b'|' if code_run == 0 => {
                cells.push(row[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    cells.push(row[start.min(row.len())..].trim());
    cells
}

/// Alignment of one separator cell.
pub fn parse_alignment(cell: &str) -> Alignment {
    let cell = cell.trim();
    match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    }
}

/// Parse the table whose header is `lines[start]`.
/// Returns the node and the index of the first line after it.
pub fn parse_table(lines: &[&str], start: usize, inline: &InlineParser) -> (BlockNode, usize) {
    let header_cells = split_cells(lines[start]);
    let width = header_cells.len().min(limits::MAX_TABLE_COLUMNS);

    let headers: Vec<Vec<InlineNode>> = header_cells
        .iter()
        .take(width)
        .map(|cell| inline.parse(cell))
        .collect();

    let mut alignments: Vec<Alignment> = split_cells(lines[start + 1])
        .iter()
        .take(width)
        .map(|cell| parse_alignment(cell))
        .collect();
    alignments.resize(width, Alignment::None);

    let mut rows = Vec::new();
    let mut i = start + 2;
    while let Some(line) = lines.get(i) {
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        let mut row: Vec<Vec<InlineNode>> = split_cells(line)
            .iter()
            .take(width)
            .map(|cell| inline.parse(cell))
            .collect();
        row.resize_with(width, Vec::new);
        rows.push(row);
        i += 1;
    }

    (
        BlockNode::Table {
            headers,
            alignments,
            rows,
        },
        i,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_table() {
        assert!(starts_table(&["a | b", "--|--"], 0));
        assert!(starts_table(&["| | b |", "|---|---|"], 0));
        assert!(!starts_table(&["|", "-"], 0));
        assert!(!starts_table(&["a | b"], 0));
    }

    #[test]
    fn test_separator_rows() {
        assert!(is_separator_row("| --- | --- |"));
        assert!(is_separator_row(":-:|---:"));
        assert!(is_separator_row("---"));
        assert!(!is_separator_row("| :: |"));
        assert!(!is_separator_row("| a | b |"));
        assert!(!is_separator_row(""));
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| a | b |").as_slice(), ["a", "b"]);
        assert_eq!(split_cells("a | b").as_slice(), ["a", "b"]);
        assert_eq!(split_cells("| a |  |").as_slice(), ["a", ""]);
        assert_eq!(split_cells(r"| f\|oo |").as_slice(), [r"f\|oo"]);
        assert_eq!(split_cells("| `a|b` | c |").as_slice(), ["`a|b`", "c"]);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(parse_alignment(":---"), Alignment::Left);
        assert_eq!(parse_alignment("---:"), Alignment::Right);
        assert_eq!(parse_alignment(":---:"), Alignment::Center);
        assert_eq!(parse_alignment("---"), Alignment::None);
    }

    #[test]
    fn test_parse_table_pads_and_truncates() {
        let lines = ["| a | b |", "| :- | -: |", "| 1 |", "| 1 | 2 | 3 |", "after"];
        let inline = InlineParser::default();
        let (node, next) = parse_table(&lines, 0, &inline);
        assert_eq!(next, 4);
        let BlockNode::Table {
            headers,
            alignments,
            rows,
        } = node
        else {
            panic!("expected table");
        };
        assert_eq!(headers.len(), 2);
        assert_eq!(alignments, vec![Alignment::Left, Alignment::Right]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], Vec::<InlineNode>::new());
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[1][1], vec![InlineNode::text("2")]);
    }
}
