//! Diagnostic rendering of byte ranges and decoded values.

use std::fmt::Write;

use ledgerwire_buffers::hex_table;

use crate::value::{DecodedValue, Scalar};

/// Renders a byte range as a fixed-width hex/ASCII table.
///
/// Pure and deterministic; non-printable bytes render as `.` in the ASCII
/// gutter rather than failing.
pub fn dump_bytes(bytes: &[u8]) -> String {
    hex_table(bytes)
}

/// Renders a decoded value as an indented tree of field names and values.
///
/// Binary scalars and blobs print as size summaries rather than full
/// contents; use [`dump_bytes`] on the raw range for the octets.
///
/// # Example
///
/// ```
/// use ledgerwire::{dump_value, DecodedValue, Scalar, TypeDescriptor};
///
/// let value = DecodedValue::Composite {
///     descriptor: TypeDescriptor::new("t:Point"),
///     fields: vec![
///         ("x".to_string(), DecodedValue::Scalar(Scalar::I32(1))),
///         ("y".to_string(), DecodedValue::Scalar(Scalar::I32(2))),
///     ],
/// };
/// let text = dump_value(&value);
/// assert!(text.contains("x: 1"));
/// ```
pub fn dump_value(value: &DecodedValue<'_>) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out.push('\n');
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_value(out: &mut String, value: &DecodedValue<'_>, depth: usize) {
    match value {
        DecodedValue::Scalar(scalar) => write_scalar(out, scalar),
        DecodedValue::Seq(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (index, item) in items.iter().enumerate() {
                indent(out, depth + 1);
                let _ = write!(out, "{}. ", index);
                write_value(out, item, depth + 1);
                out.push('\n');
            }
            indent(out, depth);
            out.push(']');
        }
        DecodedValue::Composite { descriptor, fields } => {
            if fields.is_empty() {
                let _ = write!(out, "{} {{}}", descriptor);
                return;
            }
            let _ = write!(out, "{} {{\n", descriptor);
            for (name, field_value) in fields {
                indent(out, depth + 1);
                let _ = write!(out, "{}: ", name);
                write_value(out, field_value, depth + 1);
                out.push('\n');
            }
            indent(out, depth);
            out.push('}');
        }
        DecodedValue::Blob(blob) => {
            let _ = write!(out, "<blob of {} bytes>", blob.len());
        }
    }
}

fn write_scalar(out: &mut String, scalar: &Scalar<'_>) {
    match scalar {
        Scalar::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        Scalar::U8(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::U16(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::U32(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::U64(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::I8(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::I16(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::I32(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::I64(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::F32(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::F64(n) => {
            let _ = write!(out, "{}", n);
        }
        Scalar::Str(s) => {
            let _ = write!(out, "{:?}", s);
        }
        Scalar::Bytes(b) => {
            let _ = write!(out, "<binary of {} bytes>", b.len());
        }
    }
}
