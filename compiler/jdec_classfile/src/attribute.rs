//! Whole-attribute entry points.
//!
//! The class reader hands over the body of a `Runtime*Annotations` or
//! `Runtime*TypeAnnotations` attribute after stripping its name and length.
//! These functions decode that body and require it to be consumed exactly.

use tracing::debug;

use crate::annotation::{decode_annotations, AnnotationNode};
use crate::error::{DecodeError, DecodeResult};
use crate::pool::SymbolTable;
use crate::reader::ByteReader;
use crate::type_annotation::{decode_type_annotations, TypeAnnotation};

/// Decode a `RuntimeVisibleAnnotations` / `RuntimeInvisibleAnnotations` body.
pub fn parse_annotations_attribute<S: SymbolTable + ?Sized>(
    body: &[u8],
    symbols: &S,
) -> DecodeResult<Vec<AnnotationNode>> {
    parse_whole(body, |reader| decode_annotations(reader, symbols))
}

/// Decode a `RuntimeVisibleTypeAnnotations` / `RuntimeInvisibleTypeAnnotations` body.
pub fn parse_type_annotations_attribute<S: SymbolTable + ?Sized>(
    body: &[u8],
    symbols: &S,
) -> DecodeResult<Vec<TypeAnnotation>> {
    parse_whole(body, |reader| decode_type_annotations(reader, symbols))
}

fn parse_whole<T>(
    body: &[u8],
    decode: impl FnOnce(&mut ByteReader<'_>) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let mut reader = ByteReader::new(body);
    let value = decode(&mut reader).inspect_err(|error| debug!(%error, "attribute rejected"))?;
    if !reader.is_at_end() {
        return Err(DecodeError::TrailingBytes {
            offset: reader.position(),
            remaining: reader.remaining(),
        });
    }
    Ok(value)
}
