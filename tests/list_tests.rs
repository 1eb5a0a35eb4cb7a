use chatmark::{BlockNode, ChecklistItem, InlineNode, ListItem, parse};

fn text(s: &str) -> InlineNode {
    InlineNode::text(s)
}

fn item(s: &str) -> ListItem {
    ListItem {
        content: vec![text(s)],
        children: None,
    }
}

fn single_list(input: &str) -> (bool, Option<u32>, Vec<ListItem>) {
    let blocks = parse(input);
    match blocks.as_slice() {
        [BlockNode::List {
            ordered,
            start,
            items,
        }] => (*ordered, *start, items.clone()),
        other => panic!("expected one list, got {other:?}"),
    }
}

// --- Lists ---

#[test]
fn bullet_markers_mix() {
    let (ordered, start, items) = single_list("- a\n* b\n+ c");
    assert!(!ordered);
    assert_eq!(start, None);
    assert_eq!(items, vec![item("a"), item("b"), item("c")]);
}

#[test]
fn ordered_list_start() {
    let (ordered, start, items) = single_list("3. three\n4) four");
    assert!(ordered);
    assert_eq!(start, Some(3));
    assert_eq!(items.len(), 2);
}

#[test]
fn nested_three_levels() {
    let (_, _, items) = single_list("- a\n  - b\n    - c\n- d");
    assert_eq!(
        items,
        vec![
            ListItem {
                content: vec![text("a")],
                children: Some(vec![ListItem {
                    content: vec![text("b")],
                    children: Some(vec![item("c")]),
                }]),
            },
            item("d"),
        ]
    );
}

#[test]
fn tab_indented_child() {
    let (_, _, items) = single_list("- a\n\t- b");
    assert_eq!(items[0].children, Some(vec![item("b")]));
}

#[test]
fn nested_ordered_under_bullets() {
    let (ordered, _, items) = single_list("- setup\n  1. install\n  2. configure\n- run");
    assert!(!ordered);
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0].children,
        Some(vec![item("install"), item("configure")])
    );
}

#[test]
fn kind_switch_at_root_starts_new_list() {
    let blocks = parse("1. a\n- b");
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[0], BlockNode::List { ordered: true, .. }));
    assert!(matches!(blocks[1], BlockNode::List { ordered: false, .. }));
}

#[test]
fn inline_markup_in_items() {
    let (_, _, items) = single_list("- **bold** and `code`");
    assert_eq!(
        items[0].content,
        vec![
            InlineNode::Bold {
                children: vec![text("bold")]
            },
            text(" and "),
            InlineNode::Code {
                content: "code".into()
            },
        ]
    );
}

#[test]
fn list_then_paragraph() {
    let blocks = parse("- a\n\nafter");
    assert_eq!(
        blocks.iter().map(BlockNode::kind).collect::<Vec<_>>(),
        ["list", "paragraph"]
    );
}

#[test]
fn numbers_that_are_not_markers() {
    let blocks = parse("2024 was a good year.\n3.5 stars");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind(), "paragraph");
}

// --- Checklists ---

#[test]
fn checklist_items() {
    assert_eq!(
        parse("- [x] **done**\n- [ ] open"),
        vec![BlockNode::Checklist {
            items: vec![
                ChecklistItem {
                    checked: true,
                    children: vec![InlineNode::Bold {
                        children: vec![text("done")]
                    }],
                },
                ChecklistItem {
                    checked: false,
                    children: vec![text("open")],
                },
            ],
        }]
    );
}

#[test]
fn checklist_continuation_line() {
    assert_eq!(
        parse("- [ ] long task\n  that wraps"),
        vec![BlockNode::Checklist {
            items: vec![ChecklistItem {
                checked: false,
                children: vec![text("long task"), InlineNode::Break, text("that wraps")],
            }],
        }]
    );
}

#[test]
fn list_then_checklist() {
    let blocks = parse("- plain\n- [ ] task");
    assert_eq!(
        blocks.iter().map(BlockNode::kind).collect::<Vec<_>>(),
        ["list", "checklist"]
    );
}
