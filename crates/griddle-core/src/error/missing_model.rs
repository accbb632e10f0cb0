use super::Error;

/// Error when a fixture references a table no registered model provides.
#[derive(Debug)]
pub(super) struct MissingModelError {
    table: Box<str>,
}

impl core::fmt::Display for MissingModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no model registered for table `{}`", self.table)
    }
}

impl Error {
    /// Creates a missing-model error.
    pub fn missing_model(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingModel(MissingModelError {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing-model error.
    pub fn is_missing_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingModel(_))
    }
}
