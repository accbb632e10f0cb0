use super::Error;

/// Error when a generated column or association attribute collides with an
/// attribute the destination model already defines.
///
/// Collisions are never silently overwritten. The error names the incoming
/// attribute, the model that owns the slot, and the current occupant so both
/// declarations can be found.
#[derive(Debug)]
pub(super) struct AlreadyExistsError {
    attribute: Box<str>,
    model: Box<str>,
    occupant: Box<str>,
}

impl core::fmt::Display for AlreadyExistsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "attribute `{}` already exists on `{}` as {}",
            self.attribute, self.model, self.occupant
        )
    }
}

impl Error {
    /// Creates a collision error.
    pub fn already_exists(
        attribute: impl Into<String>,
        model: impl Into<String>,
        occupant: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::AlreadyExists(AlreadyExistsError {
            attribute: attribute.into().into(),
            model: model.into().into(),
            occupant: occupant.into().into(),
        }))
    }

    /// Returns `true` if this error is a collision error.
    pub fn is_already_exists(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AlreadyExists(_))
    }
}
