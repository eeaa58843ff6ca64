//! `type_annotation` decoding (JVMS 4.7.20).
//!
//! ```text
//! type_annotation := target_type:u8 target_info type_path annotation
//! type_path       := path_length:u8 (type_path_kind:u8 type_argument_index:u8)*
//! ```
//!
//! The target type selects one of ten `target_info` shapes. Several target
//! types share a shape; the mapping is fixed by [`TargetType::shape`] and
//! every read width is fixed per shape.

use tracing::{debug, trace};

use crate::annotation::{decode_annotation, AnnotationNode};
use crate::error::{DecodeError, DecodeResult};
use crate::pool::SymbolTable;
use crate::reader::ByteReader;

/// Where a type annotation appears.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TargetType {
    ClassTypeParameter = 0x00,
    MethodTypeParameter = 0x01,
    SuperTypeReference = 0x10,
    ClassTypeParameterBound = 0x11,
    MethodTypeParameterBound = 0x12,
    Field = 0x13,
    MethodReturnType = 0x14,
    MethodReceiver = 0x15,
    MethodParameter = 0x16,
    ThrowsReference = 0x17,
    LocalVariable = 0x40,
    ResourceVariable = 0x41,
    CatchClause = 0x42,
    ExprInstanceof = 0x43,
    ExprNew = 0x44,
    ExprConstructorRef = 0x45,
    ExprMethodRef = 0x46,
    TypeArgCast = 0x47,
    TypeArgConstructorCall = 0x48,
    TypeArgMethodCall = 0x49,
    TypeArgConstructorRef = 0x4A,
    TypeArgMethodRef = 0x4B,
}

/// The `target_info` layout a [`TargetType`] uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetShape {
    TypeParameter,
    Supertype,
    TypeParameterBound,
    Empty,
    FormalParameter,
    Throws,
    LocalVar,
    Catch,
    Offset,
    TypeArgument,
}

impl TargetType {
    /// Every target type, in tag order.
    pub const ALL: [TargetType; 22] = [
        TargetType::ClassTypeParameter,
        TargetType::MethodTypeParameter,
        TargetType::SuperTypeReference,
        TargetType::ClassTypeParameterBound,
        TargetType::MethodTypeParameterBound,
        TargetType::Field,
        TargetType::MethodReturnType,
        TargetType::MethodReceiver,
        TargetType::MethodParameter,
        TargetType::ThrowsReference,
        TargetType::LocalVariable,
        TargetType::ResourceVariable,
        TargetType::CatchClause,
        TargetType::ExprInstanceof,
        TargetType::ExprNew,
        TargetType::ExprConstructorRef,
        TargetType::ExprMethodRef,
        TargetType::TypeArgCast,
        TargetType::TypeArgConstructorCall,
        TargetType::TypeArgMethodCall,
        TargetType::TypeArgConstructorRef,
        TargetType::TypeArgMethodRef,
    ];

    pub fn from_byte(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn shape(self) -> TargetShape {
        match self {
            TargetType::ClassTypeParameter | TargetType::MethodTypeParameter => {
                TargetShape::TypeParameter
            }
            TargetType::SuperTypeReference => TargetShape::Supertype,
            TargetType::ClassTypeParameterBound | TargetType::MethodTypeParameterBound => {
                TargetShape::TypeParameterBound
            }
            TargetType::Field | TargetType::MethodReturnType | TargetType::MethodReceiver => {
                TargetShape::Empty
            }
            TargetType::MethodParameter => TargetShape::FormalParameter,
            TargetType::ThrowsReference => TargetShape::Throws,
            TargetType::LocalVariable | TargetType::ResourceVariable => TargetShape::LocalVar,
            TargetType::CatchClause => TargetShape::Catch,
            TargetType::ExprInstanceof
            | TargetType::ExprNew
            | TargetType::ExprConstructorRef
            | TargetType::ExprMethodRef => TargetShape::Offset,
            TargetType::TypeArgCast
            | TargetType::TypeArgConstructorCall
            | TargetType::TypeArgMethodCall
            | TargetType::TypeArgConstructorRef
            | TargetType::TypeArgMethodRef => TargetShape::TypeArgument,
        }
    }
}

/// `supertype_index` value meaning the superclass rather than an interface.
pub const SUPERCLASS_INDEX: u16 = 0xFFFF;

/// One live range of an annotated local variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalVarRange {
    pub start_pc: u16,
    pub length: u16,
    pub index: u16,
}

/// Decoded `target_info`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetInfo {
    TypeParameter { index: u8 },
    /// [`SUPERCLASS_INDEX`] for `extends`, otherwise an `implements` index.
    Supertype { index: u16 },
    TypeParameterBound { param_index: u8, bound_index: u8 },
    Empty,
    FormalParameter { index: u8 },
    Throws { index: u16 },
    /// Ranges in class-file order.
    LocalVar(Vec<LocalVarRange>),
    Catch { exception_table_index: u16 },
    Offset { offset: u16 },
    TypeArgument { offset: u16, arg_index: u8 },
}

impl TargetInfo {
    pub fn shape(&self) -> TargetShape {
        match self {
            TargetInfo::TypeParameter { .. } => TargetShape::TypeParameter,
            TargetInfo::Supertype { .. } => TargetShape::Supertype,
            TargetInfo::TypeParameterBound { .. } => TargetShape::TypeParameterBound,
            TargetInfo::Empty => TargetShape::Empty,
            TargetInfo::FormalParameter { .. } => TargetShape::FormalParameter,
            TargetInfo::Throws { .. } => TargetShape::Throws,
            TargetInfo::LocalVar(_) => TargetShape::LocalVar,
            TargetInfo::Catch { .. } => TargetShape::Catch,
            TargetInfo::Offset { .. } => TargetShape::Offset,
            TargetInfo::TypeArgument { .. } => TargetShape::TypeArgument,
        }
    }

    fn decode(reader: &mut ByteReader<'_>, shape: TargetShape) -> DecodeResult<Self> {
        Ok(match shape {
            TargetShape::TypeParameter => TargetInfo::TypeParameter {
                index: reader.read_u8()?,
            },
            TargetShape::Supertype => TargetInfo::Supertype {
                index: reader.read_u16()?,
            },
            TargetShape::TypeParameterBound => TargetInfo::TypeParameterBound {
                param_index: reader.read_u8()?,
                bound_index: reader.read_u8()?,
            },
            TargetShape::Empty => TargetInfo::Empty,
            TargetShape::FormalParameter => TargetInfo::FormalParameter {
                index: reader.read_u8()?,
            },
            TargetShape::Throws => TargetInfo::Throws {
                index: reader.read_u16()?,
            },
            TargetShape::LocalVar => {
                let count = reader.read_u16()?;
                let mut ranges = Vec::with_capacity(usize::from(count));
                for _ in 0..count {
                    ranges.push(LocalVarRange {
                        start_pc: reader.read_u16()?,
                        length: reader.read_u16()?,
                        index: reader.read_u16()?,
                    });
                }
                TargetInfo::LocalVar(ranges)
            }
            TargetShape::Catch => TargetInfo::Catch {
                exception_table_index: reader.read_u16()?,
            },
            TargetShape::Offset => TargetInfo::Offset {
                offset: reader.read_u16()?,
            },
            TargetShape::TypeArgument => TargetInfo::TypeArgument {
                offset: reader.read_u16()?,
                arg_index: reader.read_u8()?,
            },
        })
    }
}

/// Meaning of a type path step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypePathKind {
    /// Deeper in an array type.
    Array,
    /// Deeper in a nested type.
    Nested,
    /// On the bound of a wildcard type argument.
    Wildcard,
    /// On a type argument of a parameterized type.
    TypeArgument,
}

/// One step of a type path, as stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypePathEntry {
    pub kind: u8,
    pub arg_index: u8,
}

impl TypePathEntry {
    /// Typed view of `kind`, or `None` for a value outside 0..=3.
    pub fn path_kind(self) -> Option<TypePathKind> {
        match self.kind {
            0 => Some(TypePathKind::Array),
            1 => Some(TypePathKind::Nested),
            2 => Some(TypePathKind::Wildcard),
            3 => Some(TypePathKind::TypeArgument),
            _ => None,
        }
    }
}

/// A decoded type annotation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAnnotation {
    pub target_type: TargetType,
    pub target_info: TargetInfo,
    pub type_path: Vec<TypePathEntry>,
    pub annotation: AnnotationNode,
}

impl TypeAnnotation {
    /// Whether the annotation applies to the outermost type (empty path).
    pub fn is_top_level(&self) -> bool {
        self.type_path.is_empty()
    }
}

/// Decode a `u16`-counted list of type annotations.
#[tracing::instrument(level = "trace", skip_all)]
pub fn decode_type_annotations<S: SymbolTable + ?Sized>(
    reader: &mut ByteReader<'_>,
    symbols: &S,
) -> DecodeResult<Vec<TypeAnnotation>> {
    let count = reader.read_u16()?;
    let annotations = (0..count)
        .map(|_| decode_type_annotation(reader, symbols))
        .collect::<DecodeResult<Vec<_>>>()?;
    debug!(count = annotations.len(), "decoded type annotations");
    Ok(annotations)
}

/// Decode one `type_annotation`.
pub fn decode_type_annotation<S: SymbolTable + ?Sized>(
    reader: &mut ByteReader<'_>,
    symbols: &S,
) -> DecodeResult<TypeAnnotation> {
    let tag = reader.read_u8()?;
    let target_type = TargetType::from_byte(tag).ok_or(DecodeError::UnknownTargetType { tag })?;
    trace!(?target_type, "type annotation target");

    let target_info = TargetInfo::decode(reader, target_type.shape())?;

    let path_length = reader.read_u8()?;
    let mut type_path = Vec::with_capacity(usize::from(path_length));
    for _ in 0..path_length {
        type_path.push(TypePathEntry {
            kind: reader.read_u8()?,
            arg_index: reader.read_u8()?,
        });
    }

    let annotation = decode_annotation(reader, symbols)?;

    Ok(TypeAnnotation {
        target_type,
        target_info,
        type_path,
        annotation,
    })
}
