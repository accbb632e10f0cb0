use crate::value::Value;
use crate::{Error, Result};
use indexmap::IndexMap;

/// The active storage dialect, consulted for postinit tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Generic,
    Sqlite,
}

impl std::str::FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Dialect::Generic),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(Error::configuration(format!(
                "unknown storage dialect `{other}`"
            ))),
        }
    }
}

/// One constructed record, ready for staging.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRecord {
    pub table: String,
    pub values: IndexMap<String, Value>,
}

/// The storage/session collaborator.
///
/// The core stages a whole batch through [`add`] and issues exactly one
/// [`commit`] per seeding run, after all records are staged. Persistence
/// semantics beyond that are the implementation's concern.
///
/// [`add`]: Session::add
/// [`commit`]: Session::commit
pub trait Session {
    fn add(&mut self, record: StagedRecord) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
}

/// An in-memory session that records what was staged and how often commit
/// was called. Ships for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySession {
    pub staged: Vec<StagedRecord>,
    pub commits: usize,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Session for MemorySession {
    fn add(&mut self, record: StagedRecord) -> Result<()> {
        self.staged.push(record);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}
