//! Decoded value graph — the type-erased output of the decoder engine.

use crate::blob::OpaqueBlob;
use crate::descriptor::TypeDescriptor;
use crate::error::{DecodeError, FieldPath};

/// A decoded primitive scalar. `Str` and `Bytes` borrow from the input
/// buffer; nothing is copied during decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Bytes(&'a [u8]),
}

/// Tagged variant over everything the decoder can produce.
///
/// The graph is owned by the caller that received it; it borrows from the
/// input buffer and must not outlive it. Field order in composites and
/// element order in sequences match wire order.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue<'a> {
    Scalar(Scalar<'a>),
    Seq(Vec<DecodedValue<'a>>),
    Composite {
        descriptor: TypeDescriptor,
        fields: Vec<(String, DecodedValue<'a>)>,
    },
    Blob(OpaqueBlob<'a>),
}

impl<'a> DecodedValue<'a> {
    /// Short human-readable name of the variant, for mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DecodedValue::Scalar(scalar) => match scalar {
                Scalar::Bool(_) => "bool",
                Scalar::U8(_) => "u8",
                Scalar::U16(_) => "u16",
                Scalar::U32(_) => "u32",
                Scalar::U64(_) => "u64",
                Scalar::I8(_) => "i8",
                Scalar::I16(_) => "i16",
                Scalar::I32(_) => "i32",
                Scalar::I64(_) => "i64",
                Scalar::F32(_) => "f32",
                Scalar::F64(_) => "f64",
                Scalar::Str(_) => "string",
                Scalar::Bytes(_) => "bytes",
            },
            DecodedValue::Seq(_) => "sequence",
            DecodedValue::Composite { .. } => "composite",
            DecodedValue::Blob(_) => "blob",
        }
    }

    fn expected(&self, what: &str) -> DecodeError {
        DecodeError::mismatch(
            FieldPath::root(),
            format!("{}, got {}", what, self.kind_name()),
        )
    }

    /// Looks up a field of a composite by name.
    pub fn get(&self, name: &str) -> Result<&DecodedValue<'a>, DecodeError> {
        match self {
            DecodedValue::Composite { fields, .. } => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    DecodeError::mismatch(FieldPath::field(name), "field to be present")
                }),
            other => Err(other.expected("composite")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::Bool(b)) => Ok(*b),
            other => Err(other.expected("bool")),
        }
    }

    pub fn as_u32(&self) -> Result<u32, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::U32(n)) => Ok(*n),
            other => Err(other.expected("u32")),
        }
    }

    pub fn as_u64(&self) -> Result<u64, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::U64(n)) => Ok(*n),
            other => Err(other.expected("u64")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::I32(n)) => Ok(*n),
            other => Err(other.expected("i32")),
        }
    }

    pub fn as_i64(&self) -> Result<i64, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::I64(n)) => Ok(*n),
            other => Err(other.expected("i64")),
        }
    }

    pub fn as_f64(&self) -> Result<f64, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::F64(n)) => Ok(*n),
            other => Err(other.expected("f64")),
        }
    }

    pub fn as_str(&self) -> Result<&'a str, DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::Str(s)) => Ok(s),
            other => Err(other.expected("string")),
        }
    }

    pub fn as_bytes(&self) -> Result<&'a [u8], DecodeError> {
        match self {
            DecodedValue::Scalar(Scalar::Bytes(b)) => Ok(b),
            other => Err(other.expected("bytes")),
        }
    }

    pub fn as_seq(&self) -> Result<&[DecodedValue<'a>], DecodeError> {
        match self {
            DecodedValue::Seq(items) => Ok(items),
            other => Err(other.expected("sequence")),
        }
    }

    pub fn as_blob(&self) -> Result<OpaqueBlob<'a>, DecodeError> {
        match self {
            DecodedValue::Blob(blob) => Ok(*blob),
            other => Err(other.expected("blob")),
        }
    }
}
