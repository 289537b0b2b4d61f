//! Typed entry points over the untyped decoder engine.
//!
//! One structural decoder does all the wire work; each record type gets a
//! thin typed facade via [`WireRecord`], giving static type safety at the
//! boundary without a parallel decoding path per type.

use ledgerwire_buffers::Cursor;

use crate::decoder::Decoder;
use crate::descriptor::TypeDescriptor;
use crate::dump::dump_bytes;
use crate::error::DecodeError;
use crate::registry::SchemaRegistry;
use crate::value::DecodedValue;

/// Serialization magic: format name, format version 1, three reserved bytes.
///
/// Every top-level serialized record, including records nested inside opaque
/// blobs, starts with this header.
pub const MAGIC: [u8; 8] = *b"ldgr\x01\x00\x00\x00";

/// A type that can be mapped from a decoded value graph.
///
/// The lifetime ties borrowing implementations (records holding blobs or
/// string slices) to the input buffer; owned records implement the trait for
/// every lifetime.
pub trait WireRecord<'a>: Sized {
    /// Qualified name of the decoding plan for this type.
    const DESCRIPTOR: &'static str;

    /// The descriptor statically associated with this type.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(Self::DESCRIPTOR)
    }

    /// Maps the decoded value onto the typed representation, field by field.
    /// Shape drift between the value and the type fails with
    /// [`DecodeError::SchemaMismatch`].
    fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError>;
}

/// Verifies and strips the serialization magic.
pub fn strip_magic(bytes: &[u8]) -> Result<&[u8], DecodeError> {
    if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
        return Err(DecodeError::BadMagic);
    }
    Ok(&bytes[MAGIC.len()..])
}

/// Parses a magic-prefixed serialized record into its typed representation.
///
/// Looks up the descriptor statically associated with `T`, runs the decoder
/// engine over the bytes after the header, and converts the resulting value
/// graph via [`WireRecord::from_value`].
pub fn parse<'a, T: WireRecord<'a>>(
    registry: &SchemaRegistry,
    bytes: &'a [u8],
) -> Result<T, DecodeError> {
    let body = strip_magic(bytes)?;
    let mut cursor = Cursor::new(body);
    let value = Decoder::new(registry).decode(&T::descriptor(), &mut cursor)?;
    T::from_value(&value)
}

/// Renders a byte range for inspection. Delegates to the diagnostic dumper.
pub fn dump(bytes: &[u8]) -> String {
    dump_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DecodingPlan, PrimitiveKind};
    use ledgerwire_buffers::Writer;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl<'a> WireRecord<'a> for Point {
        const DESCRIPTOR: &'static str = "t:Point";

        fn from_value(value: &DecodedValue<'a>) -> Result<Self, DecodeError> {
            Ok(Point {
                x: value.get("x")?.as_i32()?,
                y: value.get("y")?.as_i32()?,
            })
        }
    }

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                Point::descriptor(),
                DecodingPlan::new()
                    .field("x", PrimitiveKind::I32)
                    .field("y", PrimitiveKind::I32),
            )
            .unwrap();
        registry
    }

    fn encode_point(x: i32, y: i32) -> Vec<u8> {
        let mut w = Writer::new();
        w.buf(&MAGIC);
        w.u8(2);
        w.i32(x);
        w.i32(y);
        w.flush()
    }

    #[test]
    fn test_parse_typed_record() {
        let bytes = encode_point(3, -4);
        let point: Point = parse(&registry(), &bytes).unwrap();
        assert_eq!(point, Point { x: 3, y: -4 });
    }

    #[test]
    fn test_parse_rejects_bad_magic() {
        let mut bytes = encode_point(1, 2);
        bytes[4] = 0x02; // wrong format version
        assert_eq!(
            parse::<Point>(&registry(), &bytes),
            Err(DecodeError::BadMagic)
        );
    }

    #[test]
    fn test_parse_rejects_short_header() {
        assert_eq!(
            parse::<Point>(&registry(), b"ldgr"),
            Err(DecodeError::BadMagic)
        );
    }

    #[test]
    fn test_strip_magic_returns_body() {
        let bytes = encode_point(0, 0);
        let body = strip_magic(&bytes).unwrap();
        assert_eq!(body.len(), bytes.len() - MAGIC.len());
        assert_eq!(body[0], 2); // field count
    }
}
