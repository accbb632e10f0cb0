use super::Error;

/// Error when reading a setting the store does not hold.
#[derive(Debug)]
pub(super) struct NoSettingError {
    key: Box<str>,
}

impl core::fmt::Display for NoSettingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "setting `{}` is not available in the project settings",
            self.key
        )
    }
}

impl Error {
    /// Creates a no-such-setting error.
    pub fn no_setting(key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoSetting(NoSettingError {
            key: key.into().into(),
        }))
    }

    /// Returns `true` if this error is a no-such-setting error.
    pub fn is_no_setting(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSetting(_))
    }
}
