use crate::seed::{self, SeedReport};
use griddle_core::config;
use griddle_core::driver::{Dialect, Session};
use griddle_core::fixture::FixtureSet;
use griddle_core::schema::{ModelDecl, ModelId, Registry};
use griddle_core::Result;
use std::path::Path;

/// A database handle: a registry of compiled models plus the storage
/// session seed records are staged into.
pub struct Db<S: Session> {
    registry: Registry,
    session: S,
}

/// Configures a [`Db`] before connecting it to a session.
#[derive(Debug, Default)]
pub struct Builder {
    dialect: Option<Dialect>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Reads the active dialect from the process-wide settings store.
    pub fn from_settings(mut self) -> Result<Self> {
        let settings = config::read_settings();
        let dialect = if settings.contains("database_dialect") {
            settings.str("database_dialect")?.parse()?
        } else {
            Dialect::Generic
        };
        self.dialect = Some(dialect);
        Ok(self)
    }

    pub fn connect<S: Session>(self, session: S) -> Db<S> {
        Db {
            registry: Registry::with_dialect(self.dialect.unwrap_or_default()),
            session,
        }
    }
}

impl<S: Session> Db<S> {
    /// Compiles a declaration and registers the finished model.
    pub fn define(&mut self, decl: ModelDecl) -> Result<ModelId> {
        self.registry.define(decl)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Releases the handle and hands the session back.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Seeds the given fixtures: resolves the creation order, constructs
    /// every record, stages it, and commits the batch once.
    pub fn seed(&mut self, fixtures: &FixtureSet) -> Result<SeedReport> {
        seed::seed_all(&self.registry, &mut self.session, fixtures)
    }

    /// Seeds from a fixture file or directory.
    pub fn seed_path(&mut self, path: impl AsRef<Path>) -> Result<SeedReport> {
        let path = path.as_ref();
        let mut fixtures = FixtureSet::new();
        if path.is_dir() {
            fixtures.load_dir(path)?;
        } else {
            fixtures.load_file(path)?;
        }
        self.seed(&fixtures)
    }
}
