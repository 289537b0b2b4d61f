//! Plan-driven encoder, the counterpart of the decoder engine.
//!
//! Primarily serves round-trip testing and fixture construction; the
//! consuming system writes records through the same plans it decodes with.

use ledgerwire_buffers::Writer;

use thiserror::Error;

use crate::decoder::TRAILING_FIELD;
use crate::descriptor::TypeDescriptor;
use crate::registry::SchemaRegistry;
use crate::schema::{FieldKind, PrimitiveKind};
use crate::value::{DecodedValue, Scalar};

/// Error type for plan-driven encoding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    #[error("unknown schema `{0}`")]
    UnknownSchema(TypeDescriptor),
    #[error("value does not fit plan: {0}")]
    ValueMismatch(String),
    #[error("length {0} exceeds the u32 prefix range")]
    LengthOverflow(usize),
}

/// Encodes `value` as a record of the given type.
///
/// The value must be a composite whose fields match the registered plan in
/// name and order. An extensible plan's [`TRAILING_FIELD`] blob, when
/// present, is appended verbatim after the declared fields.
pub fn encode(
    registry: &SchemaRegistry,
    descriptor: &TypeDescriptor,
    value: &DecodedValue<'_>,
) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    encode_record(registry, descriptor, value, &mut writer)?;
    Ok(writer.flush())
}

fn encode_record(
    registry: &SchemaRegistry,
    descriptor: &TypeDescriptor,
    value: &DecodedValue<'_>,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    let plan = registry
        .get(descriptor)
        .ok_or_else(|| EncodeError::UnknownSchema(descriptor.clone()))?;
    let DecodedValue::Composite { fields, .. } = value else {
        return Err(EncodeError::ValueMismatch(format!(
            "composite required for `{}`, got {}",
            descriptor,
            value.kind_name()
        )));
    };
    let specs = plan.fields();
    let trailing = fields
        .iter()
        .find(|(name, _)| name == TRAILING_FIELD)
        .map(|(_, tail)| tail);
    let declared = fields.len() - usize::from(trailing.is_some());
    if declared != specs.len() {
        return Err(EncodeError::ValueMismatch(format!(
            "`{}` expects {} fields, value has {}",
            descriptor,
            specs.len(),
            declared
        )));
    }
    writer.u8(specs.len() as u8);
    for (spec, (name, field_value)) in specs.iter().zip(fields) {
        if *name != spec.name {
            return Err(EncodeError::ValueMismatch(format!(
                "field `{}` where plan expects `{}`",
                name, spec.name
            )));
        }
        encode_field(registry, &spec.kind, field_value, writer)?;
    }
    if let Some(tail) = trailing {
        let DecodedValue::Blob(blob) = tail else {
            return Err(EncodeError::ValueMismatch(
                "trailing field must be a blob".to_string(),
            ));
        };
        writer.buf(blob.bytes());
    }
    Ok(())
}

fn encode_field(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &DecodedValue<'_>,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    match kind {
        FieldKind::Primitive(primitive) => encode_primitive(*primitive, value, writer),
        FieldKind::Composite { descriptor, framed } => {
            if *framed {
                let mut inner = Writer::new();
                encode_record(registry, descriptor, value, &mut inner)?;
                let bytes = inner.flush();
                write_length(bytes.len(), writer)?;
                writer.buf(&bytes);
                Ok(())
            } else {
                encode_record(registry, descriptor, value, writer)
            }
        }
        FieldKind::Sequence(element) => {
            let items = value
                .as_seq()
                .map_err(|_| mismatch("sequence", value))?;
            write_length(items.len(), writer)?;
            for item in items {
                encode_field(registry, element, item, writer)?;
            }
            Ok(())
        }
        FieldKind::Blob => {
            let blob = value.as_blob().map_err(|_| mismatch("blob", value))?;
            write_length(blob.len(), writer)?;
            writer.buf(blob.bytes());
            Ok(())
        }
    }
}

fn encode_primitive(
    kind: PrimitiveKind,
    value: &DecodedValue<'_>,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    let DecodedValue::Scalar(scalar) = value else {
        return Err(mismatch("scalar", value));
    };
    match (kind, scalar) {
        (PrimitiveKind::Bool, Scalar::Bool(b)) => writer.u8(u8::from(*b)),
        (PrimitiveKind::U8, Scalar::U8(n)) => writer.u8(*n),
        (PrimitiveKind::U16, Scalar::U16(n)) => writer.u16(*n),
        (PrimitiveKind::U32, Scalar::U32(n)) => writer.u32(*n),
        (PrimitiveKind::U64, Scalar::U64(n)) => writer.u64(*n),
        (PrimitiveKind::I8, Scalar::I8(n)) => writer.i8(*n),
        (PrimitiveKind::I16, Scalar::I16(n)) => writer.i16(*n),
        (PrimitiveKind::I32, Scalar::I32(n)) => writer.i32(*n),
        (PrimitiveKind::I64, Scalar::I64(n)) => writer.i64(*n),
        (PrimitiveKind::F32, Scalar::F32(n)) => writer.f32(*n),
        (PrimitiveKind::F64, Scalar::F64(n)) => writer.f64(*n),
        (PrimitiveKind::Str, Scalar::Str(s)) => {
            write_length(s.len(), writer)?;
            writer.utf8(s);
        }
        (PrimitiveKind::Bytes, Scalar::Bytes(b)) => {
            write_length(b.len(), writer)?;
            writer.buf(b);
        }
        _ => return Err(mismatch("matching primitive kind", value)),
    }
    Ok(())
}

fn write_length(len: usize, writer: &mut Writer) -> Result<(), EncodeError> {
    let prefix = u32::try_from(len).map_err(|_| EncodeError::LengthOverflow(len))?;
    writer.u32(prefix);
    Ok(())
}

fn mismatch(expected: &str, value: &DecodedValue<'_>) -> EncodeError {
    EncodeError::ValueMismatch(format!("{} required, got {}", expected, value.kind_name()))
}
