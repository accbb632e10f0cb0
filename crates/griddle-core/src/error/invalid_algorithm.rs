use super::Error;

/// Error when a configured hash algorithm fails validation.
///
/// Raised once, at configuration time, when the hasher probes each
/// configured algorithm against a known test value.
#[derive(Debug)]
pub(super) struct InvalidAlgorithmError {
    algorithm: Box<str>,
    reason: Box<str>,
}

impl core::fmt::Display for InvalidAlgorithmError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "hash algorithm `{}` is invalid: {}",
            self.algorithm, self.reason
        )
    }
}

impl Error {
    /// Creates an algorithm-validation error.
    pub fn invalid_algorithm(
        algorithm: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidAlgorithm(InvalidAlgorithmError {
            algorithm: algorithm.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an algorithm-validation error.
    pub fn is_invalid_algorithm(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidAlgorithm(_))
    }
}
