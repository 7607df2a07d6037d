use super::{Error, ErrorKind};

/// Error when a type violates its marker contract.
///
/// This occurs when:
/// - a relation field references a type that is not an entity
/// - an entity has zero or several keys where exactly one is required
/// - a field of an ordinal-list type lacks an ordinal index
/// - a date-format pattern is malformed
/// - composite keys reference each other in a cycle
///
/// These are programming errors in the type's declaration and never
/// transient.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error in its context chain, is a
    /// configuration error.
    pub fn is_configuration(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), ErrorKind::Configuration(_)))
    }
}
