mod adhoc;
mod already_exists;
mod configuration;
mod dependency_cycle;
mod invalid_algorithm;
mod missing_model;
mod no_setting;
mod unsupported_format;

use adhoc::AdhocError;
use already_exists::AlreadyExistsError;
use configuration::ConfigurationError;
use dependency_cycle::DependencyCycleError;
use invalid_algorithm::InvalidAlgorithmError;
use missing_model::MissingModelError;
use no_setting::NoSettingError;
use unsupported_format::UnsupportedFormatError;

/// Returns early with a formatted adhoc error.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates a formatted adhoc error.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while compiling a schema or loading fixtures.
///
/// Every condition here is fatal at declaration or load time; nothing is
/// retried. Structured kinds carry the data tests and callers need (the
/// colliding attribute, the dependency cycle path, the missing table name).
pub struct Error {
    kind: Box<ErrorKind>,
}

enum ErrorKind {
    Adhoc(AdhocError),
    AlreadyExists(AlreadyExistsError),
    Configuration(ConfigurationError),
    DependencyCycle(DependencyCycleError),
    InvalidAlgorithm(InvalidAlgorithmError),
    MissingModel(MissingModelError),
    NoSetting(NoSettingError),
    UnsupportedFormat(UnsupportedFormatError),
    Anyhow(anyhow::Error),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self.kind() {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            AlreadyExists(err) => core::fmt::Display::fmt(err, f),
            Configuration(err) => core::fmt::Display::fmt(err, f),
            DependencyCycle(err) => core::fmt::Display::fmt(err, f),
            InvalidAlgorithm(err) => core::fmt::Display::fmt(err, f),
            MissingModel(err) => core::fmt::Display::fmt(err, f),
            NoSetting(err) => core::fmt::Display::fmt(err, f),
            UnsupportedFormat(err) => core::fmt::Display::fmt(err, f),
            Anyhow(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind: Box::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
