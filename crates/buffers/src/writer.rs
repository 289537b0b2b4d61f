//! Auto-growing binary writer.

/// Writes binary data to an auto-growing buffer.
///
/// Integer writes use big-endian byte order, matching [`crate::Cursor`].
///
/// # Example
///
/// ```
/// use ledgerwire_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u32(7);
/// writer.buf(b"abc");
/// assert_eq!(writer.flush(), vec![0, 0, 0, 7, b'a', b'b', b'c']);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a writer with a preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Writes an unsigned 8-bit integer.
    pub fn u8(&mut self, val: u8) {
        self.bytes.push(val);
    }

    /// Writes a signed 8-bit integer.
    pub fn i8(&mut self, val: i8) {
        self.bytes.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    pub fn u16(&mut self, val: u16) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer (big-endian).
    pub fn i16(&mut self, val: i16) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    pub fn u32(&mut self, val: u32) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    pub fn i32(&mut self, val: i32) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    pub fn u64(&mut self, val: u64) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    pub fn i64(&mut self, val: i64) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 32-bit floating point number (big-endian).
    pub fn f32(&mut self, val: f32) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    pub fn f64(&mut self, val: f64) {
        self.bytes.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes the UTF-8 bytes of a string, without a length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cursor;

    #[test]
    fn test_integers_round_trip() {
        let mut writer = Writer::new();
        writer.u8(0xab);
        writer.u16(0x0102);
        writer.u32(0xdead_beef);
        writer.u64(42);
        writer.i32(-7);
        writer.i64(-1);
        let data = writer.flush();
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.u8(), Ok(0xab));
        assert_eq!(cursor.u16(), Ok(0x0102));
        assert_eq!(cursor.u32(), Ok(0xdead_beef));
        assert_eq!(cursor.u64(), Ok(42));
        assert_eq!(cursor.i32(), Ok(-7));
        assert_eq!(cursor.i64(), Ok(-1));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_flush_resets() {
        let mut writer = Writer::new();
        writer.u8(1);
        assert_eq!(writer.flush(), vec![1]);
        assert!(writer.is_empty());
        writer.u8(2);
        assert_eq!(writer.flush(), vec![2]);
    }
}
