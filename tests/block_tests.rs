use chatmark::{BlockNode, InlineNode, parse};
use serde_json::json;

fn text(s: &str) -> InlineNode {
    InlineNode::text(s)
}

fn paragraph(s: &str) -> BlockNode {
    BlockNode::Paragraph {
        children: vec![text(s)],
    }
}

fn kinds(input: &str) -> Vec<&'static str> {
    parse(input).iter().map(BlockNode::kind).collect()
}

// --- Document structure ---

#[test]
fn mixed_document() {
    let input = "# Plan\n\nIntro text.\n\n---\n\n- one\n- two\n\n```sh\nmake\n```\n\n> quoted";
    assert_eq!(
        kinds(input),
        ["heading", "paragraph", "hr", "list", "codeblock", "quote"]
    );
}

#[test]
fn heading_interrupts_paragraph() {
    assert_eq!(
        parse("text\n## Next"),
        vec![
            paragraph("text"),
            BlockNode::Heading {
                level: 2,
                children: vec![text("Next")],
            },
        ]
    );
}

#[test]
fn heading_closing_hashes_trimmed() {
    assert_eq!(
        parse("### Title ###"),
        vec![BlockNode::Heading {
            level: 3,
            children: vec![text("Title")],
        }]
    );
}

#[test]
fn paragraph_lines_trimmed() {
    assert_eq!(
        parse("  first  \n   second"),
        vec![BlockNode::Paragraph {
            children: vec![text("first"), InlineNode::Break, text("second")],
        }]
    );
}

// --- Code fences ---

#[test]
fn fence_keeps_original_language_case() {
    assert_eq!(
        parse("```Python\nx = 1\n```"),
        vec![BlockNode::CodeBlock {
            content: "x = 1".into(),
            language: Some("Python".into()),
        }]
    );
}

#[test]
fn fence_info_uses_first_word() {
    assert_eq!(
        parse("```rust title=main.rs\nfn main() {}\n```"),
        vec![BlockNode::CodeBlock {
            content: "fn main() {}".into(),
            language: Some("rust".into()),
        }]
    );
}

#[test]
fn unterminated_fence_runs_to_end() {
    assert_eq!(
        parse("intro\n```js\nlet a = 1;\n\nlet b = 2;"),
        vec![
            paragraph("intro"),
            BlockNode::CodeBlock {
                content: "let a = 1;\n\nlet b = 2;".into(),
                language: Some("js".into()),
            },
        ]
    );
}

#[test]
fn empty_fence() {
    assert_eq!(
        parse("```\n```"),
        vec![BlockNode::CodeBlock {
            content: String::new(),
            language: None,
        }]
    );
}

// --- Blockquotes ---

#[test]
fn quote_holds_full_document() {
    let blocks = parse("> ## Note\n> - a\n>\n> ```\n> code\n> ```");
    let [BlockNode::Quote { children }] = blocks.as_slice() else {
        panic!("expected one quote, got {blocks:?}");
    };
    assert_eq!(
        children.iter().map(BlockNode::kind).collect::<Vec<_>>(),
        ["heading", "list", "codeblock"]
    );
}

#[test]
fn nested_quotes() {
    let blocks = parse("> outer\n>> inner");
    let [BlockNode::Quote { children }] = blocks.as_slice() else {
        panic!("expected one quote, got {blocks:?}");
    };
    assert_eq!(children[0], paragraph("outer"));
    assert_eq!(
        children[1],
        BlockNode::Quote {
            children: vec![paragraph("inner")]
        }
    );
}

#[test]
fn quote_ends_at_plain_line() {
    assert_eq!(kinds("> quoted\nplain"), ["quote", "paragraph"]);
}

#[test]
fn deep_quote_nesting_is_bounded() {
    let input = ">".repeat(100) + " deep";
    let mut blocks = parse(&input);
    let mut depth = 0;
    while let [BlockNode::Quote { children }] = blocks.as_slice() {
        depth += 1;
        blocks = children.clone();
    }
    assert_eq!(depth, chatmark::limits::MAX_QUOTE_NESTING);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind(), "paragraph");
}

// --- Wire format ---

#[test]
fn heading_json() {
    let value = serde_json::to_value(parse("# Hi")).unwrap();
    assert_eq!(
        value,
        json!([{
            "type": "heading",
            "level": 1,
            "children": [{ "type": "text", "content": "Hi" }]
        }])
    );
}

#[test]
fn codeblock_and_hr_json() {
    let value = serde_json::to_value(parse("```rust\nx\n```\n***")).unwrap();
    assert_eq!(
        value,
        json!([
            { "type": "codeblock", "content": "x", "language": "rust" },
            { "type": "hr" }
        ])
    );
}

#[test]
fn json_round_trip() {
    let blocks = parse("# T\n\n- a\n  - b\n\n| x | y |\n|---|--:|\n| 1 | 2 |\n\n> q");
    let json = serde_json::to_string(&blocks).unwrap();
    let back: Vec<BlockNode> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, blocks);
}
