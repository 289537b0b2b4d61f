//! Decoding plans — ordered field layouts for record types.

use crate::descriptor::TypeDescriptor;

/// Fixed-width and length-prefixed primitive kinds.
///
/// Numeric kinds use a fixed byte width, big-endian. `Str` and `Bytes` are
/// length-prefixed with an unsigned 32-bit big-endian count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Str,
    Bytes,
}

/// The kind of one field in a decoding plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    /// A nested record. Inline composites share the parent cursor; framed
    /// composites are wrapped in a u32 length prefix so readers that do not
    /// know the nested plan can skip them.
    Composite {
        descriptor: TypeDescriptor,
        framed: bool,
    },
    /// A u32 count prefix followed by that many elements. Element order is
    /// semantically significant and preserved by decoding.
    Sequence(Box<FieldKind>),
    /// A u32 length prefix followed by that many uninterpreted bytes,
    /// captured as an [`crate::OpaqueBlob`] for on-demand decoding.
    Blob,
}

impl FieldKind {
    /// Inline composite field of the given type.
    pub fn composite(descriptor: impl Into<TypeDescriptor>) -> Self {
        FieldKind::Composite {
            descriptor: descriptor.into(),
            framed: false,
        }
    }

    /// Length-prefixed composite field of the given type.
    pub fn framed_composite(descriptor: impl Into<TypeDescriptor>) -> Self {
        FieldKind::Composite {
            descriptor: descriptor.into(),
            framed: true,
        }
    }

    /// Sequence of the given element kind.
    pub fn sequence(element: FieldKind) -> Self {
        FieldKind::Sequence(Box::new(element))
    }
}

impl From<PrimitiveKind> for FieldKind {
    fn from(kind: PrimitiveKind) -> Self {
        FieldKind::Primitive(kind)
    }
}

/// One field of a decoding plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Ordered field layout describing how to read one record type from bytes.
///
/// Plan order matches wire field order exactly. A plan may be marked
/// extensible, in which case trailing wire data beyond the declared fields is
/// preserved as an opaque tail instead of being rejected.
///
/// # Example
///
/// ```
/// use ledgerwire::{DecodingPlan, PrimitiveKind};
///
/// let plan = DecodingPlan::new()
///     .field("epoch_seconds", PrimitiveKind::I64)
///     .field("nanos", PrimitiveKind::I32);
/// assert_eq!(plan.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodingPlan {
    fields: Vec<FieldSpec>,
    extensible: bool,
}

impl DecodingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Call order defines wire order.
    pub fn field(mut self, name: &str, kind: impl Into<FieldKind>) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            kind: kind.into(),
        });
        self
    }

    /// Marks the plan as open-ended: trailing wire data beyond the declared
    /// fields is captured as an opaque tail.
    pub fn extensible(mut self) -> Self {
        self.extensible = true;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn is_extensible(&self) -> bool {
        self.extensible
    }
}
