//! JVM field descriptors and the semantic types they denote.
//!
//! Annotation element values name types by descriptor (`I`, `[J`,
//! `Ljava/lang/String;`). The decoders parse those into [`VarType`] so
//! downstream expression construction works with typed values instead of
//! descriptor strings.

use std::fmt;

use crate::error::{DecodeError, DecodeResult};

/// Internal name of `java.lang.Object`.
pub const OBJECT_CLASS: &str = "java/lang/Object";
/// Internal name of `java.lang.String`.
pub const STRING_CLASS: &str = "java/lang/String";
/// Internal name of `java.lang.Class`.
pub const CLASS_CLASS: &str = "java/lang/Class";

/// The non-array part of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
    /// A class or interface, by internal name (`java/lang/String`).
    Object(String),
}

impl BaseType {
    /// Map a one-letter descriptor to its primitive (or void) type.
    pub fn from_primitive_descriptor(c: u8) -> Option<Self> {
        Some(match c {
            b'B' => BaseType::Byte,
            b'C' => BaseType::Char,
            b'D' => BaseType::Double,
            b'F' => BaseType::Float,
            b'I' => BaseType::Int,
            b'J' => BaseType::Long,
            b'S' => BaseType::Short,
            b'Z' => BaseType::Boolean,
            b'V' => BaseType::Void,
            _ => return None,
        })
    }

    /// The name `Class.getName()` reports for this type.
    ///
    /// Primitives and void use their keyword; classes use the internal name.
    pub fn reflective_name(&self) -> &str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
            BaseType::Void => "void",
            BaseType::Object(name) => name,
        }
    }
}

/// A JVM type: a base type plus an array dimension count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VarType {
    pub base: BaseType,
    pub array_dim: u8,
}

impl VarType {
    pub fn new(base: BaseType) -> Self {
        VarType { base, array_dim: 0 }
    }

    /// A non-array class type.
    pub fn object(class_name: impl Into<String>) -> Self {
        VarType::new(BaseType::Object(class_name.into()))
    }

    /// `java.lang.Object[]`, the placeholder type of an empty annotation array.
    pub fn object_array() -> Self {
        VarType {
            base: BaseType::Object(OBJECT_CLASS.to_owned()),
            array_dim: 1,
        }
    }

    /// This type with one more array dimension, saturating at the JVM limit.
    #[must_use]
    pub fn array_of(&self) -> Self {
        VarType {
            base: self.base.clone(),
            array_dim: self.array_dim.saturating_add(1),
        }
    }

    /// Parse a field descriptor, also accepting a bare `V` for `void.class`.
    pub fn parse_descriptor(descriptor: &str) -> DecodeResult<Self> {
        let bytes = descriptor.as_bytes();
        let dims = bytes.iter().take_while(|&&b| b == b'[').count();
        let array_dim =
            u8::try_from(dims).map_err(|_| DecodeError::invalid_descriptor(descriptor))?;

        let base = match &bytes[dims..] {
            [b'L', .., b';'] => {
                let name = &descriptor[dims + 1..descriptor.len() - 1];
                if name.is_empty() || name.contains(';') {
                    return Err(DecodeError::invalid_descriptor(descriptor));
                }
                BaseType::Object(name.to_owned())
            }
            [b'V'] if array_dim == 0 => BaseType::Void,
            [b'V'] => return Err(DecodeError::invalid_descriptor(descriptor)),
            &[c] => BaseType::from_primitive_descriptor(c)
                .ok_or_else(|| DecodeError::invalid_descriptor(descriptor))?,
            _ => return Err(DecodeError::invalid_descriptor(descriptor)),
        };

        Ok(VarType { base, array_dim })
    }

    /// Render back to descriptor form.
    pub fn to_descriptor(&self) -> String {
        let mut out = "[".repeat(usize::from(self.array_dim));
        match &self.base {
            BaseType::Object(name) => {
                out.push('L');
                out.push_str(name);
                out.push(';');
            }
            BaseType::Byte => out.push('B'),
            BaseType::Char => out.push('C'),
            BaseType::Double => out.push('D'),
            BaseType::Float => out.push('F'),
            BaseType::Int => out.push('I'),
            BaseType::Long => out.push('J'),
            BaseType::Short => out.push('S'),
            BaseType::Boolean => out.push('Z'),
            BaseType::Void => out.push('V'),
        }
        out
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.reflective_name())?;
        for _ in 0..self.array_dim {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// Class name of an annotation type.
///
/// Annotation `type_index` entries are descriptors (`Lcom/example/Foo;`);
/// the `L`/`;` wrapper is removed. Anything not in that form is already a
/// bare name and is returned unchanged.
pub fn annotation_class_name(descriptor: &str) -> &str {
    descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
        .filter(|name| !name.is_empty())
        .unwrap_or(descriptor)
}
