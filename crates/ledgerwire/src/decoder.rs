//! Schema-driven decoder engine.
//!
//! Resolves a [`DecodingPlan`] for a type descriptor and reads fields from a
//! bounds-checked cursor in plan order, recursing for nested composites and
//! capturing blob fields without interpreting them. Any structural violation
//! aborts the whole top-level call with an error naming the field path at
//! which it occurred.

use ledgerwire_buffers::{BufferError, Cursor};

use crate::blob::OpaqueBlob;
use crate::descriptor::TypeDescriptor;
use crate::error::{DecodeError, FieldPath};
use crate::registry::SchemaRegistry;
use crate::schema::{FieldKind, PrimitiveKind};
use crate::value::{DecodedValue, Scalar};

/// Field name under which an extensible plan's trailing bytes are preserved.
pub const TRAILING_FIELD: &str = "_trailing";

/// The decoder engine.
///
/// Holds a shared reference to an immutable, fully populated
/// [`SchemaRegistry`]. Decoding is synchronous and pure: the same registry,
/// descriptor, and bytes always produce the same value or error, and
/// independent buffers may be decoded concurrently.
///
/// # Wire format
///
/// A record starts with a u8 declared-field-count, followed by its fields in
/// plan order. Numerics are fixed-width big-endian; strings, byte arrays,
/// blobs, and framed composites carry a u32 big-endian length prefix;
/// sequences carry a u32 element count. Inline composites share the parent
/// cursor with no framing of their own.
pub struct Decoder<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Decodes one top-level record of type `descriptor` from `cursor`.
    ///
    /// The cursor is expected to span exactly one record: leftover bytes
    /// after the last declared field fail with
    /// [`DecodeError::UnexpectedTrailingData`] unless the plan is extensible,
    /// in which case they are preserved under [`TRAILING_FIELD`].
    pub fn decode<'a>(
        &self,
        descriptor: &TypeDescriptor,
        cursor: &mut Cursor<'a>,
    ) -> Result<DecodedValue<'a>, DecodeError> {
        let mut path = FieldPath::root();
        self.read_record(descriptor, cursor, &mut path, true)
    }

    /// Reads one record. `bounded` is true when `cursor` ends exactly at the
    /// record's end (top level or a framed composite), which is the only
    /// situation where trailing data can be recognized and captured.
    fn read_record<'a>(
        &self,
        descriptor: &TypeDescriptor,
        cursor: &mut Cursor<'a>,
        path: &mut FieldPath,
        bounded: bool,
    ) -> Result<DecodedValue<'a>, DecodeError> {
        let plan = self
            .registry
            .get(descriptor)
            .ok_or_else(|| DecodeError::UnknownSchema {
                descriptor: descriptor.clone(),
                path: path.clone(),
            })?;
        let declared = self.read_field_count(cursor, path)? as usize;
        let specs = plan.fields();
        if declared < specs.len() {
            return Err(DecodeError::mismatch(
                path.clone(),
                format!("{} fields, wire declares {}", specs.len(), declared),
            ));
        }
        if declared > specs.len() && !(bounded && plan.is_extensible()) {
            return Err(DecodeError::UnexpectedTrailingData {
                path: path.clone(),
                remaining: cursor.remaining(),
            });
        }
        let mut fields = Vec::with_capacity(specs.len());
        for spec in specs {
            path.push_field(&spec.name);
            let value = self.read_field(&spec.kind, cursor, path)?;
            path.pop();
            fields.push((spec.name.clone(), value));
        }
        if bounded && cursor.remaining() > 0 {
            if plan.is_extensible() {
                let size = cursor.remaining();
                let tail = self.read_bytes(cursor, size, path)?;
                fields.push((
                    TRAILING_FIELD.to_string(),
                    DecodedValue::Blob(OpaqueBlob::new(tail)),
                ));
            } else {
                return Err(DecodeError::UnexpectedTrailingData {
                    path: path.clone(),
                    remaining: cursor.remaining(),
                });
            }
        }
        Ok(DecodedValue::Composite {
            descriptor: descriptor.clone(),
            fields,
        })
    }

    fn read_field<'a>(
        &self,
        kind: &FieldKind,
        cursor: &mut Cursor<'a>,
        path: &mut FieldPath,
    ) -> Result<DecodedValue<'a>, DecodeError> {
        match kind {
            FieldKind::Primitive(primitive) => self.read_primitive(*primitive, cursor, path),
            FieldKind::Composite { descriptor, framed } => {
                if *framed {
                    let size = self.read_length(cursor, path)?;
                    let mut sub = cursor
                        .cut(size)
                        .map_err(|_| DecodeError::TruncatedInput { path: path.clone() })?;
                    self.read_record(descriptor, &mut sub, path, true)
                } else {
                    self.read_record(descriptor, cursor, path, false)
                }
            }
            FieldKind::Sequence(element) => {
                let count = self.read_length(cursor, path)?;
                let mut items = Vec::new();
                for index in 0..count {
                    path.push_index(index);
                    let item = self.read_field(element, cursor, path)?;
                    path.pop();
                    items.push(item);
                }
                Ok(DecodedValue::Seq(items))
            }
            FieldKind::Blob => {
                let size = self.read_length(cursor, path)?;
                let bytes = self.read_bytes(cursor, size, path)?;
                Ok(DecodedValue::Blob(OpaqueBlob::new(bytes)))
            }
        }
    }

    fn read_primitive<'a>(
        &self,
        kind: PrimitiveKind,
        cursor: &mut Cursor<'a>,
        path: &mut FieldPath,
    ) -> Result<DecodedValue<'a>, DecodeError> {
        let truncated = |_: BufferError| DecodeError::TruncatedInput { path: path.clone() };
        let scalar = match kind {
            PrimitiveKind::Bool => {
                let byte = cursor.u8().map_err(truncated)?;
                match byte {
                    0 => Scalar::Bool(false),
                    1 => Scalar::Bool(true),
                    other => {
                        return Err(DecodeError::InvalidBool {
                            path: path.clone(),
                            byte: other,
                        })
                    }
                }
            }
            PrimitiveKind::U8 => Scalar::U8(cursor.u8().map_err(truncated)?),
            PrimitiveKind::U16 => Scalar::U16(cursor.u16().map_err(truncated)?),
            PrimitiveKind::U32 => Scalar::U32(cursor.u32().map_err(truncated)?),
            PrimitiveKind::U64 => Scalar::U64(cursor.u64().map_err(truncated)?),
            PrimitiveKind::I8 => Scalar::I8(cursor.i8().map_err(truncated)?),
            PrimitiveKind::I16 => Scalar::I16(cursor.i16().map_err(truncated)?),
            PrimitiveKind::I32 => Scalar::I32(cursor.i32().map_err(truncated)?),
            PrimitiveKind::I64 => Scalar::I64(cursor.i64().map_err(truncated)?),
            PrimitiveKind::F32 => Scalar::F32(cursor.f32().map_err(truncated)?),
            PrimitiveKind::F64 => Scalar::F64(cursor.f64().map_err(truncated)?),
            PrimitiveKind::Str => {
                let size = self.read_length(cursor, path)?;
                let s = cursor.utf8(size).map_err(|err| match err {
                    BufferError::EndOfBuffer => DecodeError::TruncatedInput { path: path.clone() },
                    BufferError::InvalidUtf8 => DecodeError::InvalidUtf8 { path: path.clone() },
                })?;
                Scalar::Str(s)
            }
            PrimitiveKind::Bytes => {
                let size = self.read_length(cursor, path)?;
                Scalar::Bytes(self.read_bytes(cursor, size, path)?)
            }
        };
        Ok(DecodedValue::Scalar(scalar))
    }

    fn read_field_count(
        &self,
        cursor: &mut Cursor<'_>,
        path: &FieldPath,
    ) -> Result<u8, DecodeError> {
        cursor
            .u8()
            .map_err(|_| DecodeError::TruncatedInput { path: path.clone() })
    }

    /// Reads a u32 length or count prefix.
    fn read_length(&self, cursor: &mut Cursor<'_>, path: &FieldPath) -> Result<usize, DecodeError> {
        let size = cursor
            .u32()
            .map_err(|_| DecodeError::TruncatedInput { path: path.clone() })?;
        Ok(size as usize)
    }

    /// Reads exactly `size` raw bytes. A length prefix exceeding the
    /// remaining input fails here rather than under-reading.
    fn read_bytes<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        size: usize,
        path: &FieldPath,
    ) -> Result<&'a [u8], DecodeError> {
        cursor
            .read(size)
            .map_err(|_| DecodeError::TruncatedInput { path: path.clone() })
    }
}

/// Decodes `bytes` as a single record of the given type.
///
/// Convenience over building a cursor by hand; the whole slice must hold
/// exactly one record.
pub fn decode_value<'a>(
    registry: &SchemaRegistry,
    descriptor: &TypeDescriptor,
    bytes: &'a [u8],
) -> Result<DecodedValue<'a>, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    Decoder::new(registry).decode(descriptor, &mut cursor)
}
