//! Extension fences.
//!
//! A closed fence whose language tag names an extension is handed to that
//! extension's sub-parser. Sub-parsers are pure functions from the fence
//! body to a node; a rejection falls back to a plain code block so no
//! content is ever lost. Diagram fences are intercepted separately, see
//! [`diagram`].

mod compare;
pub mod diagram;
mod error;
mod gallery;
mod localgraph;
mod task;
mod timeline;

pub use error::ExtensionError;

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::Options;
use crate::block::node::BlockNode;
use crate::inline::InlineParser;

/// Decodes the body of one kind of extension fence.
pub type SubParser = fn(&str, &InlineParser) -> Result<BlockNode, ExtensionError>;

/// Extension language tags, lowercase, to sub-parsers.
static REGISTRY: LazyLock<FxHashMap<&'static str, SubParser>> = LazyLock::new(|| {
    let mut map: FxHashMap<&'static str, SubParser> = FxHashMap::default();
    map.insert("timeline", timeline::parse);
    map.insert("compare", compare::parse);
    map.insert("gallery", gallery::parse);
    map.insert("images", gallery::parse);
    map.insert("localgraph", localgraph::parse);
    map.insert("task", task::parse);
    map
});

/// Whether `language` is a registered extension tag.
pub fn is_extension(language: &str) -> bool {
    REGISTRY.contains_key(language.to_ascii_lowercase().as_str())
}

/// Turn a finished fence into a node.
///
/// Extension sub-parsers only see closed fences; an unterminated fence at
/// the end of input may still be cut off mid-stream. Diagram interception
/// applies to both.
pub fn dispatch(
    language: Option<&str>,
    content: &str,
    closed: bool,
    options: &Options,
    inline: &InlineParser,
) -> BlockNode {
    if let Some(language) = language {
        let tag = language.to_ascii_lowercase();

        if closed && options.extensions {
            if let Some(sub_parser) = REGISTRY.get(tag.as_str()) {
                match sub_parser(content, inline) {
                    Ok(node) => return node,
                    Err(err) => log::debug!("{tag} fence rejected, keeping it as code: {err}"),
                }
            }
        }

        if options.intercept_diagrams && diagram::is_diagram(&tag) {
            if let Some(block_id) = diagram::extract_id(content) {
                log::debug!("{tag} fence intercepted as localgraph {block_id}");
                return BlockNode::LocalGraph { block_id };
            }
        }
    }

    BlockNode::CodeBlock {
        content: content.to_string(),
        language: language.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch_default(language: &str, content: &str) -> BlockNode {
        dispatch(
            Some(language),
            content,
            true,
            &Options::default(),
            &InlineParser::default(),
        )
    }

    #[test]
    fn test_registry() {
        for tag in ["timeline", "compare", "gallery", "images", "localgraph", "task"] {
            assert!(is_extension(tag), "{tag}");
        }
        assert!(is_extension("Timeline"));
        assert!(!is_extension("rust"));
    }

    #[test]
    fn test_case_insensitive_tag() {
        assert_eq!(
            dispatch_default("LocalGraph", "7"),
            BlockNode::LocalGraph { block_id: 7 }
        );
    }

    #[test]
    fn test_rejection_falls_back_to_code() {
        assert_eq!(
            dispatch_default("localgraph", "abc"),
            BlockNode::CodeBlock {
                content: "abc".into(),
                language: Some("localgraph".into()),
            }
        );
    }

    #[test]
    fn test_diagram_interception() {
        assert_eq!(
            dispatch_default("mermaid", "graph TD\nA[blockId=777]"),
            BlockNode::LocalGraph { block_id: 777 }
        );
        assert_eq!(dispatch_default("mermaid", "graph TD\nA --> B").kind(), "codeblock");
    }

    #[test]
    fn test_unterminated_fence() {
        let options = Options::default();
        let inline = InlineParser::default();
        let node = dispatch(Some("localgraph"), "42", false, &options, &inline);
        assert_eq!(node.kind(), "codeblock");
        let node = dispatch(Some("mermaid"), "blockId=777", false, &options, &inline);
        assert_eq!(node, BlockNode::LocalGraph { block_id: 777 });
    }

    #[test]
    fn test_options_disable() {
        let options = Options {
            extensions: false,
            intercept_diagrams: false,
            ..Options::default()
        };
        let inline = InlineParser::default();
        assert_eq!(
            dispatch(Some("localgraph"), "7", true, &options, &inline).kind(),
            "codeblock"
        );
        assert_eq!(
            dispatch(Some("mermaid"), "blockId=7", true, &options, &inline).kind(),
            "codeblock"
        );
    }
}
