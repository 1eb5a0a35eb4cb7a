//! ```` ```timeline ```` fences: `date | title | description? | category?`.

use super::ExtensionError;
use crate::block::node::{BlockNode, TimelineItem};
use crate::block::table::{is_separator_row, split_cells};
use crate::inline::InlineParser;

pub fn parse(content: &str, inline: &InlineParser) -> Result<BlockNode, ExtensionError> {
    if content.trim().is_empty() {
        return Err(ExtensionError::Empty);
    }

    let items: Vec<TimelineItem> = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !is_separator_row(line))
        .filter_map(|line| parse_item(line, inline))
        .collect();

    if items.is_empty() {
        return Err(ExtensionError::NoRows("timeline"));
    }
    Ok(BlockNode::Timeline { items })
}

fn parse_item(line: &str, inline: &InlineParser) -> Option<TimelineItem> {
    let fields = split_cells(line);
    let date = *fields.first()?;
    let title = *fields.get(1)?;
    if date.is_empty() || title.is_empty() {
        return None;
    }
    let optional = |i: usize| fields.get(i).copied().filter(|s| !s.is_empty());
    Some(TimelineItem {
        date: date.to_string(),
        title: inline.parse(title),
        description: optional(2).map(|d| inline.parse(d)),
        category: optional(3).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::InlineNode;

    fn parse_default(content: &str) -> Result<BlockNode, ExtensionError> {
        parse(content, &InlineParser::default())
    }

    #[test]
    fn test_single_item() {
        let node = parse_default("2024-01-01 | Launched | v1 release").unwrap();
        assert_eq!(
            node,
            BlockNode::Timeline {
                items: vec![TimelineItem {
                    date: "2024-01-01".into(),
                    title: vec![InlineNode::text("Launched")],
                    description: Some(vec![InlineNode::text("v1 release")]),
                    category: None,
                }],
            }
        );
    }

    #[test]
    fn test_category_and_inline_title() {
        let BlockNode::Timeline { items } =
            parse_default("Q1 | **Beta** | | product").unwrap()
        else {
            panic!("expected timeline");
        };
        assert_eq!(
            items[0].title,
            vec![InlineNode::Bold {
                children: vec![InlineNode::text("Beta")]
            }]
        );
        assert_eq!(items[0].description, None);
        assert_eq!(items[0].category.as_deref(), Some("product"));
    }

    #[test]
    fn test_incomplete_lines_skipped() {
        let BlockNode::Timeline { items } =
            parse_default("just a date\n2020 | Founded\n| only title").unwrap()
        else {
            panic!("expected timeline");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, "2020");
    }

    #[test]
    fn test_failures() {
        assert_eq!(parse_default("  \n"), Err(ExtensionError::Empty));
        assert_eq!(
            parse_default("nothing here"),
            Err(ExtensionError::NoRows("timeline"))
        );
    }
}
