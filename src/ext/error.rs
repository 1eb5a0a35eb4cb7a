//! Extension fence rejection reasons.

use thiserror::Error;

/// Why an extension fence could not be decoded. The fence is then rendered
/// as a plain code block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    /// The fence body holds nothing but whitespace.
    #[error("fence body is empty")]
    Empty,
    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A block id is not a positive integer.
    #[error("invalid block id `{0}`")]
    InvalidId(String),
    /// No usable entry survived filtering.
    #[error("no valid {0} entries")]
    NoRows(&'static str),
}
