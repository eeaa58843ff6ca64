//! Pattern compilation errors.
//!
//! Compilation either produces a complete pattern or one of these. Every
//! variant carries the 1-based line of the offending pattern text.

use thiserror::Error;

use crate::node::MatchNodeKind;
use crate::property::MatchProperty;

/// Malformed pattern text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("match pattern has no nodes")]
    Empty,

    /// A rule token that is not `property:value` or `property:param:value`.
    #[error("line {line}: malformed rule `{token}`")]
    MalformedRule { line: usize, token: String },

    #[error("line {line}: unknown matching property `{name}` for {kind} node")]
    UnknownProperty {
        line: usize,
        kind: MatchNodeKind,
        name: String,
    },

    /// A value outside the property's vocabulary, or a non-integer size.
    #[error("line {line}: invalid value `{value}` for property `{property}`")]
    InvalidValue {
        line: usize,
        property: MatchProperty,
        value: String,
    },

    #[error("line {line}: rule parameter `{parameter}` is not a non-negative integer")]
    InvalidParameter { line: usize, parameter: String },

    #[error("line {line}: indentation skips a nesting level")]
    IndentTooDeep { line: usize },

    #[error("line {line}: pattern has more than one root node")]
    MultipleRoots { line: usize },

    #[error("line {line}: indentation must use spaces")]
    TabIndent { line: usize },
}
