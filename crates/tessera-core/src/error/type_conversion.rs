use super::{Error, ErrorKind};
use crate::tree::NodeKind;

/// Error when a scalar cannot be coerced to the target type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    target: Box<str>,
    kinds: Option<(NodeKind, NodeKind)>,
    detail: Option<Box<str>>,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert to {}", self.target)?;
        if let Some((expected, actual)) = self.kinds {
            write!(f, ": expected {expected}, found {actual}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a type conversion error for a node of the wrong kind.
    pub fn type_conversion(target: impl ToString, expected: NodeKind, actual: NodeKind) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversionError {
            target: target.to_string().into(),
            kinds: Some((expected, actual)),
            detail: None,
        }))
    }

    /// Creates a type conversion error for a node of the right kind whose
    /// content could not be converted (out of range, unparsable, unknown
    /// variant).
    pub fn type_conversion_detail(target: impl ToString, detail: impl Into<String>) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversionError {
            target: target.to_string().into(),
            kinds: None,
            detail: Some(detail.into().into()),
        }))
    }

    /// Returns `true` if this error, or any error in its context chain, is a
    /// type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::TypeConversion(_)))
    }

    /// Returns the expected and actual node kinds of the first type
    /// conversion error in the context chain, if it recorded them.
    pub fn conversion_kinds(&self) -> Option<(NodeKind, NodeKind)> {
        self.chain().find_map(|err| match err.kind() {
            ErrorKind::TypeConversion(e) => e.kinds,
            _ => None,
        })
    }
}
