//! Decode failures for class-file attributes.
//!
//! Every variant means the same thing to the caller: the attribute being
//! decoded is malformed and nothing partial was produced. The caller decides
//! whether to abort the enclosing class or skip the attribute.

use thiserror::Error;

/// Result of decoding an attribute (or a piece of one).
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A malformed-attribute failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The stream ended before a fixed-width field was complete.
    #[error(
        "malformed attribute: unexpected end of data at offset {offset} \
         (needed {needed} bytes, {remaining} left)"
    )]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The symbol table has no entry at this index.
    #[error("malformed attribute: constant pool index {index} does not resolve")]
    UnresolvedIndex { index: u16 },

    /// The symbol table entry exists but is the wrong kind of constant.
    #[error("malformed attribute: constant #{index} is {found}, expected {expected}")]
    ConstantKindMismatch {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },

    /// An `element_value` tag outside the known set.
    #[error("malformed attribute: invalid element tag 0x{tag:02x}")]
    InvalidElementTag { tag: u8 },

    /// A `target_type` byte outside the known set.
    #[error("malformed attribute: unknown target type 0x{tag:02x}")]
    UnknownTargetType { tag: u8 },

    /// A field descriptor that does not parse.
    #[error("malformed attribute: invalid field descriptor `{descriptor}`")]
    InvalidDescriptor { descriptor: String },

    /// A whole-attribute decode finished with bytes left over.
    #[error("malformed attribute: {remaining} trailing bytes after offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

impl DecodeError {
    #[cold]
    pub(crate) fn invalid_descriptor(descriptor: &str) -> Self {
        DecodeError::InvalidDescriptor {
            descriptor: descriptor.to_owned(),
        }
    }
}
