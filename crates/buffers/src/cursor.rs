//! Bounds-checked binary cursor.

use std::str;

use crate::BufferError;

/// A bounds-checked forward reader over an immutable byte slice.
///
/// The cursor tracks a position between a start and an exclusive end offset.
/// Every read either returns exactly the requested bytes and advances the
/// position, or fails with [`BufferError::EndOfBuffer`] without advancing.
/// Reads never copy the underlying buffer; byte and string reads return
/// slices borrowed from it.
///
/// # Example
///
/// ```
/// use ledgerwire_buffers::Cursor;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut cursor = Cursor::new(&data);
///
/// assert_eq!(cursor.u8(), Ok(0x01));
/// assert_eq!(cursor.u16(), Ok(0x0203));
/// assert_eq!(cursor.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    /// Current position. Invariant: `x <= end`.
    x: usize,
    /// End position (exclusive).
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over the whole slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            x: 0,
            end: bytes.len(),
        }
    }

    /// Current position from the start of the underlying slice.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.end - self.x
    }

    /// Returns `true` when no bytes are left.
    pub fn is_empty(&self) -> bool {
        self.x == self.end
    }

    fn check(&self, size: usize) -> Result<(), BufferError> {
        if size > self.remaining() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

    /// Returns the next `size` bytes and advances the cursor.
    pub fn read(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.bytes[x..self.x])
    }

    /// Returns the next `size` bytes without advancing the cursor.
    pub fn peek(&self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        Ok(&self.bytes[self.x..self.x + size])
    }

    /// Advances the cursor by `size` bytes.
    pub fn skip(&mut self, size: usize) -> Result<(), BufferError> {
        self.check(size)?;
        self.x += size;
        Ok(())
    }

    /// Splits off a sub-cursor over the next `size` bytes and advances past
    /// them. The sub-cursor references the same underlying memory.
    pub fn cut(&mut self, size: usize) -> Result<Cursor<'a>, BufferError> {
        self.check(size)?;
        let x = self.x;
        self.x += size;
        Ok(Cursor {
            bytes: self.bytes,
            x,
            end: self.x,
        })
    }

    /// Reads an unsigned 8-bit integer.
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.bytes[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 8-bit integer.
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.u8()? as i8)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        let b = self.read(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Reads a signed 16-bit integer (big-endian).
    pub fn i16(&mut self) -> Result<i16, BufferError> {
        Ok(self.u16()? as i16)
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        let b = self.read(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a signed 32-bit integer (big-endian).
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        Ok(self.u32()? as i32)
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        let b = self.read(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Reads a signed 64-bit integer (big-endian).
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        Ok(self.u64()? as i64)
    }

    /// Reads a 32-bit floating point number (big-endian).
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        Ok(f32::from_bits(self.u32()?))
    }

    /// Reads a 64-bit floating point number (big-endian).
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        Ok(f64::from_bits(self.u64()?))
    }

    /// Reads a UTF-8 string of `size` bytes.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let bytes = &self.bytes[self.x..self.x + size];
        // Cursor must not advance on failure.
        let s = str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }
}
