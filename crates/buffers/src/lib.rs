//! Binary buffer utilities for ledgerwire.
//!
//! This crate provides the low-level byte plumbing used by the decoding
//! engine: a bounds-checked cursor for reading, an auto-growing writer for
//! producing test fixtures and encoded records, and hex rendering helpers
//! for diagnostics.
//!
//! # Overview
//!
//! - [`Cursor`] - Bounds-checked forward reader over an immutable byte slice
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//! - [`hex_table`] - Fixed-width hex/ASCII view of a byte range
//!
//! # Example
//!
//! ```
//! use ledgerwire_buffers::{Cursor, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut cursor = Cursor::new(&data);
//! assert_eq!(cursor.u8(), Ok(0x01));
//! assert_eq!(cursor.u16(), Ok(0x0203));
//! assert_eq!(cursor.utf8(5), Ok("hello"));
//! assert_eq!(cursor.remaining(), 0);
//! ```

mod cursor;
mod hex;
mod writer;

pub use cursor::Cursor;
pub use hex::{hex_table, print_octets};
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
