//! Annotation and `element_value` decoding.
//!
//! Layout (big-endian, JVMS 4.7.16):
//!
//! ```text
//! annotation    := type_index:u16 num_pairs:u16 (name_index:u16 element_value)*
//! element_value := tag:u8 payload
//! ```
//!
//! The payload shape is chosen by the tag. Arrays and nested annotations
//! recurse, so a decoded value is a tree. Pair order in the tree is the
//! order in the class file, which is source order.

use jdec_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::descriptor::{annotation_class_name, BaseType, VarType, CLASS_CLASS, STRING_CLASS};
use crate::error::{DecodeError, DecodeResult};
use crate::pool::{Constant, SymbolTable};
use crate::reader::ByteReader;

/// Kind of a constant-valued element (`B C D F I J S Z s`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    String,
}

impl PrimitiveKind {
    /// The element tag byte for this kind.
    pub fn tag(self) -> u8 {
        match self {
            PrimitiveKind::Byte => b'B',
            PrimitiveKind::Char => b'C',
            PrimitiveKind::Double => b'D',
            PrimitiveKind::Float => b'F',
            PrimitiveKind::Int => b'I',
            PrimitiveKind::Long => b'J',
            PrimitiveKind::Short => b'S',
            PrimitiveKind::Boolean => b'Z',
            PrimitiveKind::String => b's',
        }
    }

    /// Semantic type of a value of this kind.
    pub fn value_type(self) -> VarType {
        VarType::new(match self {
            PrimitiveKind::Byte => BaseType::Byte,
            PrimitiveKind::Char => BaseType::Char,
            PrimitiveKind::Double => BaseType::Double,
            PrimitiveKind::Float => BaseType::Float,
            PrimitiveKind::Int => BaseType::Int,
            PrimitiveKind::Long => BaseType::Long,
            PrimitiveKind::Short => BaseType::Short,
            PrimitiveKind::Boolean => BaseType::Boolean,
            PrimitiveKind::String => BaseType::Object(STRING_CLASS.to_owned()),
        })
    }
}

/// Decoded `element_value` tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementTag {
    Primitive(PrimitiveKind),
    Enum,
    Class,
    Array,
    Annotation,
}

impl ElementTag {
    pub fn from_byte(tag: u8) -> Option<Self> {
        Some(match tag {
            b'B' => ElementTag::Primitive(PrimitiveKind::Byte),
            b'C' => ElementTag::Primitive(PrimitiveKind::Char),
            b'D' => ElementTag::Primitive(PrimitiveKind::Double),
            b'F' => ElementTag::Primitive(PrimitiveKind::Float),
            b'I' => ElementTag::Primitive(PrimitiveKind::Int),
            b'J' => ElementTag::Primitive(PrimitiveKind::Long),
            b'S' => ElementTag::Primitive(PrimitiveKind::Short),
            b'Z' => ElementTag::Primitive(PrimitiveKind::Boolean),
            b's' => ElementTag::Primitive(PrimitiveKind::String),
            b'e' => ElementTag::Enum,
            b'c' => ElementTag::Class,
            b'[' => ElementTag::Array,
            b'@' => ElementTag::Annotation,
            _ => return None,
        })
    }

    pub fn to_byte(self) -> u8 {
        match self {
            ElementTag::Primitive(kind) => kind.tag(),
            ElementTag::Enum => b'e',
            ElementTag::Class => b'c',
            ElementTag::Array => b'[',
            ElementTag::Annotation => b'@',
        }
    }
}

/// One decoded `element_value`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnotationValue {
    /// A constant: the tag's kind plus the raw pool constant.
    Primitive { kind: PrimitiveKind, value: Constant },
    /// `Foo.class`, by reflective name (`int`, `void`, `java/util/List`).
    /// Array dimensions are dropped.
    ClassLiteral(String),
    /// `Enum.CONSTANT`.
    EnumConstant { enum_type: VarType, const_name: String },
    /// `{a, b, c}`. `array_type` is the type of the whole array.
    Array {
        array_type: VarType,
        elements: Vec<AnnotationValue>,
    },
    /// A nested `@Annotation(...)`.
    Annotation(AnnotationNode),
}

impl AnnotationValue {
    /// Build an array value, deriving its type from the first element.
    ///
    /// An empty array carries no element type in the class file, so it is
    /// typed `java.lang.Object[]`.
    pub fn array(elements: Vec<AnnotationValue>) -> Self {
        let array_type = elements
            .first()
            .map_or_else(VarType::object_array, |first| first.value_type().array_of());
        AnnotationValue::Array {
            array_type,
            elements,
        }
    }

    /// The semantic type of this value as an expression.
    pub fn value_type(&self) -> VarType {
        match self {
            AnnotationValue::Primitive { kind, .. } => kind.value_type(),
            AnnotationValue::ClassLiteral(_) => VarType::object(CLASS_CLASS),
            AnnotationValue::EnumConstant { enum_type, .. } => enum_type.clone(),
            AnnotationValue::Array { array_type, .. } => array_type.clone(),
            AnnotationValue::Annotation(node) => VarType::object(node.type_name.clone()),
        }
    }
}

/// One `name = value` pair of an annotation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementPair {
    pub name: String,
    pub value: AnnotationValue,
}

/// A decoded annotation: its type and its pairs in class-file order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotationNode {
    pub type_name: String,
    pub pairs: Vec<ElementPair>,
}

impl AnnotationNode {
    /// Value of the pair called `name`, if present.
    pub fn get(&self, name: &str) -> Option<&AnnotationValue> {
        self.pairs.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Pair names in class-file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.name.as_str())
    }
}

/// Decode a `u16`-counted list of annotations.
pub fn decode_annotations<S: SymbolTable + ?Sized>(
    reader: &mut ByteReader<'_>,
    symbols: &S,
) -> DecodeResult<Vec<AnnotationNode>> {
    let count = reader.read_u16()?;
    (0..count)
        .map(|_| decode_annotation(reader, symbols))
        .collect()
}

/// Decode one `annotation` structure.
pub fn decode_annotation<S: SymbolTable + ?Sized>(
    reader: &mut ByteReader<'_>,
    symbols: &S,
) -> DecodeResult<AnnotationNode> {
    let type_name = annotation_class_name(symbols.utf8(reader.read_u16()?)?).to_owned();

    let count = reader.read_u16()?;
    let mut pairs = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let name = symbols.utf8(reader.read_u16()?)?.to_owned();
        let value = decode_element_value(reader, symbols)?;
        pairs.push(ElementPair { name, value });
    }

    trace!(%type_name, pairs = pairs.len(), "decoded annotation");
    Ok(AnnotationNode { type_name, pairs })
}

/// Decode one `element_value`.
///
/// An unknown tag fails after consuming only the tag byte.
pub fn decode_element_value<S: SymbolTable + ?Sized>(
    reader: &mut ByteReader<'_>,
    symbols: &S,
) -> DecodeResult<AnnotationValue> {
    ensure_sufficient_stack(|| {
        let byte = reader.read_u8()?;
        let Some(tag) = ElementTag::from_byte(byte) else {
            return Err(DecodeError::InvalidElementTag { tag: byte });
        };
        trace!(?tag, offset = reader.position() - 1, "element value");

        match tag {
            ElementTag::Enum => {
                let type_descriptor = symbols.utf8(reader.read_u16()?)?;
                let const_name = symbols.utf8(reader.read_u16()?)?.to_owned();
                Ok(AnnotationValue::EnumConstant {
                    enum_type: VarType::parse_descriptor(type_descriptor)?,
                    const_name,
                })
            }
            ElementTag::Class => {
                let descriptor = symbols.utf8(reader.read_u16()?)?;
                // Dimensions are dropped: `String[].class` names `java/lang/String`.
                let ty = VarType::parse_descriptor(descriptor)?;
                Ok(AnnotationValue::ClassLiteral(
                    ty.base.reflective_name().to_owned(),
                ))
            }
            ElementTag::Array => {
                let count = reader.read_u16()?;
                let elements = (0..count)
                    .map(|_| decode_element_value(reader, symbols))
                    .collect::<DecodeResult<Vec<_>>>()?;
                Ok(AnnotationValue::array(elements))
            }
            ElementTag::Annotation => {
                decode_annotation(reader, symbols).map(AnnotationValue::Annotation)
            }
            ElementTag::Primitive(kind) => {
                let value = symbols.constant(reader.read_u16()?)?.clone();
                Ok(AnnotationValue::Primitive { kind, value })
            }
        }
    })
}
