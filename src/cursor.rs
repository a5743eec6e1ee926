//! Bounds-checked sequential reads over account data.
//!
//! All account fields are read through a [`Cursor`], which never reads past the end of its
//! buffer. Every read either returns the field and moves forward, or returns an error and leaves
//! the cursor where it can still be inspected. Reads are little-endian throughout.

use byteorder::{ByteOrder, LittleEndian};
use educe::Educe;

use crate::{
    error::{Error, Result},
    key::{Key, KEY_LEN},
};

/// A read position within an immutable byte buffer.
///
/// The offset only ever moves forward, and always stays within `0..=buf.len()`.
#[derive(Educe, Clone)]
#[educe(Debug)]
pub struct Cursor<'a> {
    #[educe(Debug(ignore))]
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Start reading at `offset`. Fails if the offset is past the end of the buffer.
    pub fn at(buf: &'a [u8], offset: usize) -> Result<Self> {
        if offset > buf.len() {
            return Err(Error::OutOfBounds {
                step: "start cursor",
                offset: 0,
                needed: offset,
                available: buf.len(),
            });
        }
        Ok(Self { buf, offset })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.offset == self.buf.len()
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Read the next `n` bytes.
    pub fn read_fixed(&mut self, n: usize, step: &'static str) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or(Error::OutOfBounds {
                step,
                offset: self.offset,
                needed: n,
                available: self.remaining(),
            })?;
        let buf: &'a [u8] = self.buf;
        let bytes = &buf[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, step: &'static str) -> Result<u8> {
        Ok(self.read_fixed(1, step)?[0])
    }

    pub fn read_u32_le(&mut self, step: &'static str) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_fixed(4, step)?))
    }

    pub fn read_i64_le(&mut self, step: &'static str) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_fixed(8, step)?))
    }

    pub fn read_key(&mut self, step: &'static str) -> Result<Key> {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(self.read_fixed(KEY_LEN, step)?);
        Ok(Key::new(key))
    }

    /// Read a u32 length prefix, then that many bytes as UTF-8.
    ///
    /// On invalid UTF-8 the cursor has already moved past the string payload.
    pub fn read_string(&mut self, step: &'static str) -> Result<String> {
        let len = self.read_u32_le(step)? as usize;
        let start = self.offset;
        let raw = self.read_fixed(len, step)?;
        let s = std::str::from_utf8(raw).map_err(|source| Error::InvalidUtf8 {
            step,
            offset: start,
            source,
        })?;
        Ok(s.to_string())
    }

    /// Read a u32 count, then that many keys.
    pub fn read_vec_of_keys(&mut self, step: &'static str) -> Result<Vec<Key>> {
        let count = self.read_u32_le(step)? as usize;
        // Don't trust the count for allocation; a bad count can claim far more keys than fit.
        let mut keys = Vec::with_capacity(count.min(self.remaining() / KEY_LEN));
        for _ in 0..count {
            keys.push(self.read_key(step)?);
        }
        Ok(keys)
    }
}
