//! Attribute encoder used by the decoder tests.
//!
//! Writes the same big-endian layout the decoders read and interns every
//! referenced constant into a [`ConstantPool`], so tests can state inputs
//! as value trees instead of hand-assembled bytes.

use crate::annotation::{AnnotationNode, AnnotationValue, ElementTag};
use crate::descriptor::{BaseType, VarType};
use crate::pool::{Constant, ConstantPool};
use crate::type_annotation::{TargetInfo, TypeAnnotation};

/// Byte sink plus the pool its indices refer to.
#[derive(Default)]
pub struct AttrWriter {
    pub bytes: Vec<u8>,
    pub pool: ConstantPool,
}

impl AttrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Intern `s` and write its index.
    pub fn utf8(&mut self, s: &str) -> &mut Self {
        let index = self.pool.push_str(s);
        self.u16(index)
    }

    /// Intern `c` and write its index.
    pub fn constant(&mut self, c: Constant) -> &mut Self {
        let index = self.pool.push(c);
        self.u16(index)
    }

    pub fn annotations(&mut self, nodes: &[AnnotationNode]) -> &mut Self {
        self.u16(len_u16(nodes.len()));
        for node in nodes {
            self.annotation(node);
        }
        self
    }

    pub fn annotation(&mut self, node: &AnnotationNode) -> &mut Self {
        self.utf8(&format!("L{};", node.type_name));
        self.u16(len_u16(node.pairs.len()));
        for pair in &node.pairs {
            self.utf8(&pair.name);
            self.element(&pair.value);
        }
        self
    }

    pub fn element(&mut self, value: &AnnotationValue) -> &mut Self {
        match value {
            AnnotationValue::Primitive { kind, value } => {
                self.u8(kind.tag()).constant(value.clone());
            }
            AnnotationValue::ClassLiteral(name) => {
                self.u8(ElementTag::Class.to_byte())
                    .utf8(&class_literal_descriptor(name));
            }
            AnnotationValue::EnumConstant {
                enum_type,
                const_name,
            } => {
                self.u8(ElementTag::Enum.to_byte())
                    .utf8(&enum_type.to_descriptor())
                    .utf8(const_name);
            }
            AnnotationValue::Array { elements, .. } => {
                self.u8(ElementTag::Array.to_byte())
                    .u16(len_u16(elements.len()));
                for element in elements {
                    self.element(element);
                }
            }
            AnnotationValue::Annotation(node) => {
                self.u8(ElementTag::Annotation.to_byte()).annotation(node);
            }
        }
        self
    }

    pub fn type_annotation(&mut self, annotation: &TypeAnnotation) -> &mut Self {
        self.u8(annotation.target_type.tag());
        match &annotation.target_info {
            TargetInfo::TypeParameter { index } | TargetInfo::FormalParameter { index } => {
                self.u8(*index);
            }
            TargetInfo::Supertype { index } | TargetInfo::Throws { index } => {
                self.u16(*index);
            }
            TargetInfo::TypeParameterBound {
                param_index,
                bound_index,
            } => {
                self.u8(*param_index).u8(*bound_index);
            }
            TargetInfo::Empty => {}
            TargetInfo::LocalVar(ranges) => {
                self.u16(len_u16(ranges.len()));
                for range in ranges {
                    self.u16(range.start_pc).u16(range.length).u16(range.index);
                }
            }
            TargetInfo::Catch {
                exception_table_index,
            } => {
                self.u16(*exception_table_index);
            }
            TargetInfo::Offset { offset } => {
                self.u16(*offset);
            }
            TargetInfo::TypeArgument { offset, arg_index } => {
                self.u16(*offset).u8(*arg_index);
            }
        }
        self.u8(u8::try_from(annotation.type_path.len()).unwrap_or(u8::MAX));
        for entry in &annotation.type_path {
            self.u8(entry.kind).u8(entry.arg_index);
        }
        self.annotation(&annotation.annotation)
    }
}

fn len_u16(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

/// Descriptor that decodes back to the class literal `name`.
fn class_literal_descriptor(name: &str) -> String {
    let base = match name {
        "byte" => BaseType::Byte,
        "char" => BaseType::Char,
        "double" => BaseType::Double,
        "float" => BaseType::Float,
        "int" => BaseType::Int,
        "long" => BaseType::Long,
        "short" => BaseType::Short,
        "boolean" => BaseType::Boolean,
        "void" => BaseType::Void,
        other => BaseType::Object(other.to_owned()),
    };
    VarType::new(base).to_descriptor()
}
