//! Opaque blobs — captured, undecoded byte ranges.

use ledgerwire_buffers::Cursor;

use crate::decoder::Decoder;
use crate::descriptor::TypeDescriptor;
use crate::error::DecodeError;
use crate::registry::SchemaRegistry;
use crate::value::DecodedValue;

/// A borrowed byte range holding a nested, independently serialized record.
///
/// The outer schema declares the field as raw bytes; decoding them requires
/// an explicitly supplied [`TypeDescriptor`]. The blob never outlives the
/// buffer it references, and [`OpaqueBlob::decode_as`] produces a fresh value
/// graph without re-reading the outer buffer.
///
/// This is the envelope-decoding mechanism: an outer record's blob field is
/// decoded in a second, separate step after the outer decode completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueBlob<'a> {
    bytes: &'a [u8],
}

impl<'a> OpaqueBlob<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The captured bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Declared length of the captured range.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A zero-length blob is valid and distinct from an absent field.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decodes the captured bytes as a record of the given type.
    ///
    /// A fresh cursor is constructed over the blob's byte range, so the
    /// position of any outer cursor is irrelevant.
    pub fn decode_as(
        &self,
        registry: &SchemaRegistry,
        descriptor: &TypeDescriptor,
    ) -> Result<DecodedValue<'a>, DecodeError> {
        let mut cursor = Cursor::new(self.bytes);
        Decoder::new(registry).decode(descriptor, &mut cursor)
    }
}
