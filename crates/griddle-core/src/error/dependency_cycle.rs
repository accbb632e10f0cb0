use super::Error;

/// Error when fixture dependencies admit no valid creation order.
///
/// Carries the offending cycle as an ordered chain of table names, first
/// table repeated at the end, so diagnostics (and tests) can show the exact
/// loop rather than just "a cycle exists".
#[derive(Debug)]
pub(super) struct DependencyCycleError {
    path: Vec<String>,
}

impl core::fmt::Display for DependencyCycleError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "fixture dependency order is looped: {}",
            self.path.join(" <-> ")
        )
    }
}

impl Error {
    /// Creates a dependency-cycle error from the ordered cycle path.
    pub fn dependency_cycle(path: Vec<String>) -> Error {
        Error::from(super::ErrorKind::DependencyCycle(DependencyCycleError {
            path,
        }))
    }

    /// Returns `true` if this error is a dependency-cycle error.
    pub fn is_dependency_cycle(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DependencyCycle(_))
    }

    /// The cycle path, if this is a dependency-cycle error.
    pub fn dependency_cycle_path(&self) -> Option<&[String]> {
        match self.kind() {
            super::ErrorKind::DependencyCycle(err) => Some(&err.path),
            _ => None,
        }
    }
}
