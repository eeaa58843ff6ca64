//! Class-file annotation decoding for the jdec decompiler.
//!
//! This crate provides:
//! - [`ByteReader`], the sequential big-endian cursor both decoders consume
//! - [`SymbolTable`], the decoders' view of the constant pool
//! - Annotation decoding into [`AnnotationNode`] / [`AnnotationValue`] trees
//! - Type-annotation decoding into [`TypeAnnotation`] (target, path, annotation)
//!
//! # Failure Model
//!
//! Every failure is a [`DecodeError`]: a truncated stream, an index the
//! symbol table cannot resolve, or an unrecognized tag or target type.
//! Nothing partial is returned. Decoders hold no state of their own, so
//! independent streams can be decoded concurrently.

mod annotation;
mod attribute;
mod descriptor;
mod error;
mod pool;
mod reader;
mod type_annotation;

#[cfg(test)]
mod test_helpers;

pub use annotation::{
    decode_annotation, decode_annotations, decode_element_value, AnnotationNode, AnnotationValue,
    ElementPair, ElementTag, PrimitiveKind,
};
pub use attribute::{parse_annotations_attribute, parse_type_annotations_attribute};
pub use descriptor::{
    annotation_class_name, BaseType, VarType, CLASS_CLASS, OBJECT_CLASS, STRING_CLASS,
};
pub use error::{DecodeError, DecodeResult};
pub use pool::{Constant, ConstantPool, SymbolTable};
pub use reader::ByteReader;
pub use type_annotation::{
    decode_type_annotation, decode_type_annotations, LocalVarRange, TargetInfo, TargetShape,
    TargetType, TypeAnnotation, TypePathEntry, TypePathKind, SUPERCLASS_INDEX,
};
