use super::Error;

/// Error when a fixture source uses a format Griddle cannot parse.
///
/// Identifies the requested format and the known supported set so the
/// caller can either convert the file or parse it themselves and hand over
/// the already-structured data.
#[derive(Debug)]
pub(super) struct UnsupportedFormatError {
    requested: Box<str>,
    supported: &'static [&'static str],
}

impl core::fmt::Display for UnsupportedFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "`{}` fixture sources are not supported (supported: {})",
            self.requested,
            self.supported.join(", ")
        )
    }
}

impl Error {
    /// Creates an unsupported-format error.
    pub fn unsupported_format(
        requested: impl Into<String>,
        supported: &'static [&'static str],
    ) -> Error {
        Error::from(super::ErrorKind::UnsupportedFormat(UnsupportedFormatError {
            requested: requested.into().into(),
            supported,
        }))
    }

    /// Returns `true` if this error is an unsupported-format error.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedFormat(_))
    }
}
