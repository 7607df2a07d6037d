use super::{Error, ErrorKind};
use crate::tree::NodeKind;

/// Error when a tree node's kind disagrees with the shape the target type
/// requires, e.g. a list where a keyed-map struct is expected.
#[derive(Debug)]
pub(super) struct ShapeMismatchError {
    ty: Box<str>,
    field: Option<Box<str>>,
    expected: NodeKind,
    actual: NodeKind,
}

impl std::error::Error for ShapeMismatchError {}

impl core::fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "shape mismatch for `{}", self.ty)?;
        if let Some(field) = &self.field {
            write!(f, ".{field}")?;
        }
        write!(f, "`: expected {}, found {}", self.expected, self.actual)
    }
}

impl Error {
    /// Creates a shape mismatch error for a whole type.
    pub fn shape_mismatch(ty: impl Into<String>, expected: NodeKind, actual: NodeKind) -> Error {
        Error::from(ErrorKind::ShapeMismatch(ShapeMismatchError {
            ty: ty.into().into(),
            field: None,
            expected,
            actual,
        }))
    }

    /// Creates a shape mismatch error for one field of a type.
    pub fn field_shape_mismatch(
        ty: impl Into<String>,
        field: impl Into<String>,
        expected: NodeKind,
        actual: NodeKind,
    ) -> Error {
        Error::from(ErrorKind::ShapeMismatch(ShapeMismatchError {
            ty: ty.into().into(),
            field: Some(field.into().into()),
            expected,
            actual,
        }))
    }

    /// Returns `true` if this error, or any error in its context chain, is a
    /// shape mismatch.
    pub fn is_shape_mismatch(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::ShapeMismatch(_)))
    }

    /// Returns the expected and actual node kinds of the first shape mismatch
    /// in the context chain.
    pub fn shape_kinds(&self) -> Option<(NodeKind, NodeKind)> {
        self.chain().find_map(|err| match err.kind() {
            ErrorKind::ShapeMismatch(e) => Some((e.expected, e.actual)),
            _ => None,
        })
    }
}
