//! Diagram fence interception.
//!
//! Models asked for a link graph often answer with a mermaid or graphviz
//! block instead. When such a block carries a recognizable block id it is
//! turned into a `localgraph` node.

use std::sync::LazyLock;

use regex::Regex;

use crate::limits;

/// Fence tags treated as diagrams, compared lowercase.
pub const DIAGRAM_LANGUAGES: &[&str] = &["flowchart", "graph", "mermaid", "dot", "graphviz", "diagram"];

/// Id patterns in priority order. Capture group 1 holds the digits.
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)\b(?:block[_-]?id|root[_-]?id|id)\s*[:=]\s*["']?([0-9]+)"#.to_string(),
        r"(?i)block://([0-9]+)".to_string(),
        format!(r"\b([0-9]{{{},}})\b", limits::MIN_BARE_DIAGRAM_ID_DIGITS),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("diagram id pattern must compile"))
    .collect()
});

/// Whether `language` names a diagram family.
pub fn is_diagram(language: &str) -> bool {
    DIAGRAM_LANGUAGES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(language))
}

/// The block id carried by a diagram body. The first pattern that matches
/// decides; its id must be positive.
pub fn extract_id(content: &str) -> Option<u64> {
    let caps = ID_PATTERNS.iter().find_map(|re| re.captures(content))?;
    caps.get(1)?.as_str().parse::<u64>().ok().filter(|&id| id > 0)
}
