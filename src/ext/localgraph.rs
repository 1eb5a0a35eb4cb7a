//! ```` ```localgraph ```` fences hold a single block id.

use super::ExtensionError;
use crate::block::node::BlockNode;
use crate::inline::InlineParser;

pub fn parse(content: &str, _inline: &InlineParser) -> Result<BlockNode, ExtensionError> {
    let raw = content.trim();
    if raw.is_empty() {
        return Err(ExtensionError::Empty);
    }
    match raw.parse::<u64>() {
        Ok(block_id) if block_id > 0 => Ok(BlockNode::LocalGraph { block_id }),
        _ => Err(ExtensionError::InvalidId(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(content: &str) -> Result<BlockNode, ExtensionError> {
        parse(content, &InlineParser::default())
    }

    #[test]
    fn test_valid_id() {
        assert_eq!(
            parse_default(" 42\n"),
            Ok(BlockNode::LocalGraph { block_id: 42 })
        );
    }

    #[test]
    fn test_invalid_ids() {
        for raw in ["0", "-5", "abc", "12 13", "4.5"] {
            assert_eq!(
                parse_default(raw),
                Err(ExtensionError::InvalidId(raw.to_string())),
                "{raw}"
            );
        }
        assert_eq!(parse_default(""), Err(ExtensionError::Empty));
    }
}
