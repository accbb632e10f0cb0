mod db;
mod seed;

pub use db::{Builder, Db};
pub use seed::SeedReport;

pub use griddle_core::{config, driver, fixture, hash, schema, value, Error, Result};

pub use griddle_core::driver::{Dialect, MemorySession, Session, StagedRecord};
pub use griddle_core::fixture::FixtureSet;
pub use griddle_core::schema::{
    FieldSpec, Model, ModelDecl, ModelId, Registry, RelationSpec, Transform,
};
pub use griddle_core::value::{ScalarType, Value};
