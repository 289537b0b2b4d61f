//! Structural decoding errors and field paths.

use std::fmt;

use thiserror::Error;

use crate::descriptor::TypeDescriptor;

/// One step of a field path: a named field or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Path from the root of a decode call to the field where an error occurred.
///
/// Renders as `sigs[0].bytes`; the empty path renders as `(root)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path, naming the top-level record itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A single-field path.
    pub fn field(name: &str) -> Self {
        Self(vec![PathSegment::Field(name.to_string())])
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn push_field(&mut self, name: &str) {
        self.0.push(PathSegment::Field(name.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        let mut first = true;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
            first = false;
        }
        Ok(())
    }
}

/// Error type for schema registration, decoding, and typed mapping.
///
/// Every decode-time variant carries the [`FieldPath`] at which it occurred.
/// None of these are fatal to the process; each is scoped to the single call
/// that produced it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// The cursor ran out of bytes before a required read completed.
    #[error("truncated input at `{path}`")]
    TruncatedInput { path: FieldPath },
    /// The requested descriptor has no registered plan.
    #[error("unknown schema `{descriptor}` at `{path}`")]
    UnknownSchema {
        descriptor: TypeDescriptor,
        path: FieldPath,
    },
    /// A conflicting plan is already registered under this descriptor.
    #[error("conflicting plan registered for `{descriptor}`")]
    DuplicateSchema { descriptor: TypeDescriptor },
    /// The plan reaches itself through inline composites, which would expand
    /// forever at decode time. An opaque blob is the only legal boundary for
    /// self-referential records.
    #[error("plan for `{descriptor}` references itself without a blob boundary")]
    RecursiveSchema { descriptor: TypeDescriptor },
    /// Wire data declares more fields than the plan, or leftover bytes remain
    /// after the last declared field of a non-extensible plan.
    #[error("{remaining} unexpected trailing bytes at `{path}`")]
    UnexpectedTrailingData { path: FieldPath, remaining: usize },
    /// A decoded value cannot be mapped onto the shape the caller expects.
    #[error("schema mismatch at `{path}`: expected {expected}")]
    SchemaMismatch { path: FieldPath, expected: String },
    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {byte:#04x} at `{path}`")]
    InvalidBool { path: FieldPath, byte: u8 },
    /// A string field held bytes that are not valid UTF-8.
    #[error("invalid UTF-8 at `{path}`")]
    InvalidUtf8 { path: FieldPath },
    /// The serialized record does not start with the expected magic header.
    #[error("bad magic or version in record header")]
    BadMagic,
}

impl DecodeError {
    /// Shorthand for a [`DecodeError::SchemaMismatch`] at the given path.
    pub fn mismatch(path: FieldPath, expected: impl Into<String>) -> Self {
        DecodeError::SchemaMismatch {
            path,
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display_root() {
        assert_eq!(FieldPath::root().to_string(), "(root)");
    }

    #[test]
    fn test_path_display_nested() {
        let mut path = FieldPath::root();
        path.push_field("sigs");
        path.push_index(0);
        path.push_field("bytes");
        assert_eq!(path.to_string(), "sigs[0].bytes");
    }

    #[test]
    fn test_path_display_index_first() {
        let mut path = FieldPath::root();
        path.push_index(3);
        path.push_field("x");
        assert_eq!(path.to_string(), "[3].x");
    }

    #[test]
    fn test_error_display_carries_path() {
        let err = DecodeError::TruncatedInput {
            path: FieldPath::field("blob"),
        };
        assert_eq!(err.to_string(), "truncated input at `blob`");
    }
}
