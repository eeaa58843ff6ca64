//! Sequential big-endian reader over an attribute body.
//!
//! Attributes are consumed front to back with 8- and 16-bit unsigned reads
//! only. A read that cannot complete fails without moving the cursor, so the
//! reported offset is always the start of the incomplete field.

use crate::error::{DecodeError, DecodeResult};

/// Cursor over the bytes of one attribute.
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the first byte.
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, pos: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    /// Read one big-endian unsigned 16-bit value.
    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.take::<2>().map(u16::from_be_bytes)
    }

    fn take<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let Some(chunk) = self
            .bytes
            .get(self.pos..self.pos + N)
            .and_then(|s| <[u8; N]>::try_from(s).ok())
        else {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: N,
                remaining: self.remaining(),
            });
        };
        self.pos += N;
        Ok(chunk)
    }
}
