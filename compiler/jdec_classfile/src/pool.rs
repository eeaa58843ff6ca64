//! Symbol table access for the decoders.
//!
//! The decoders never own the constant pool. They see it through
//! [`SymbolTable`], which maps a 16-bit index to a resolved [`Constant`].
//! An index that does not resolve is a decode failure, never a default.

use std::fmt;

use crate::error::{DecodeError, DecodeResult};

/// A resolved constant pool entry.
///
/// Byte, char, short and boolean values are stored as `Integer`, the same
/// way the class-file format stores them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Constant {
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    /// `CONSTANT_Utf8` and `CONSTANT_String` both resolve to text.
    Str(String),
}

impl Constant {
    /// Short name of the constant kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::Integer(_) => "integer",
            Constant::Float(_) => "float",
            Constant::Long(_) => "long",
            Constant::Double(_) => "double",
            Constant::Str(_) => "string",
        }
    }

    /// Whether this entry occupies two pool slots.
    pub fn is_wide(&self) -> bool {
        matches!(self, Constant::Long(_) | Constant::Double(_))
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(v) => write!(f, "{v}"),
            Constant::Float(v) => write!(f, "{v}f"),
            Constant::Long(v) => write!(f, "{v}L"),
            Constant::Double(v) => write!(f, "{v}d"),
            Constant::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// Index-to-constant resolution, implemented by the class-file reader.
pub trait SymbolTable {
    /// Look up the entry at `index`, or `None` if there is none.
    fn resolve(&self, index: u16) -> Option<&Constant>;

    /// Look up `index`, failing if it does not resolve.
    fn constant(&self, index: u16) -> DecodeResult<&Constant> {
        self.resolve(index).ok_or(DecodeError::UnresolvedIndex { index })
    }

    /// Look up `index`, failing unless it resolves to text.
    fn utf8(&self, index: u16) -> DecodeResult<&str> {
        match self.constant(index)? {
            Constant::Str(s) => Ok(s),
            other => Err(DecodeError::ConstantKindMismatch {
                index,
                expected: "string",
                found: other.kind_name(),
            }),
        }
    }
}

/// An owned, 1-based constant pool.
///
/// Slot 0 is never valid. Long and double entries take two slots, so the
/// index after one of them is unusable, as in a real class file.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantPool {
    slots: Vec<Option<Constant>>,
}

impl ConstantPool {
    pub fn new() -> Self {
        ConstantPool { slots: vec![None] }
    }

    /// Append `constant` and return its index, or `None` once every index a
    /// class file can address is taken. A full pool is left unchanged.
    pub fn try_push(&mut self, constant: Constant) -> Option<u16> {
        let index = u16::try_from(self.slots.len()).ok()?;
        let wide = constant.is_wide();
        self.slots.push(Some(constant));
        if wide {
            self.slots.push(None);
        }
        Some(index)
    }

    /// Append `constant` and return its index.
    ///
    /// # Panics
    ///
    /// Panics if the pool is full; see [`ConstantPool::try_push`].
    pub fn push(&mut self, constant: Constant) -> u16 {
        let Some(index) = self.try_push(constant) else {
            panic!("constant pool is full");
        };
        index
    }

    /// Append a text constant and return its index.
    pub fn push_str(&mut self, s: impl Into<String>) -> u16 {
        self.push(Constant::Str(s.into()))
    }

    /// Number of slots, including the unusable slot 0 and wide-entry padding.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable for ConstantPool {
    fn resolve(&self, index: u16) -> Option<&Constant> {
        self.slots.get(usize::from(index))?.as_ref()
    }
}
