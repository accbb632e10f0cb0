use super::Error;

/// Error when a model or fixture declaration is malformed.
///
/// This occurs when:
/// - A table-name override is empty or duplicates a registered table
/// - A relationship targets a model with no usable primary key
/// - A fixture source entry is missing its `data` list
///
/// These errors are caught at declaration/load time, never at record access.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
