use crate::value::Value;
use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

pub(crate) const SUPPORTED_FORMATS: &[&str] = &["json", "toml"];

/// A fixture source encoding, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "toml" => Ok(SourceFormat::Toml),
            other => Err(Error::unsupported_format(other, SUPPORTED_FORMATS)),
        }
    }
}

/// Seed data for one table: declared dependencies plus an ordered list of
/// field-value records.
#[derive(Debug, Clone, Default)]
pub struct TableFixture {
    pub depends: IndexSet<String>,
    pub records: Vec<IndexMap<String, Value>>,
}

/// Fixture data merged from any number of sources.
///
/// A table appearing in several sources is merged: dependency sets are
/// unioned and record lists concatenated, in load order.
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    tables: IndexMap<String, TableFixture>,
}

/// Wire shape of one table entry in a source file.
#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    depends: Vec<String>,
    data: Option<Vec<IndexMap<String, Value>>>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn table(&self, name: &str) -> Option<&TableFixture> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = (&str, &TableFixture)> {
        self.tables.iter().map(|(name, t)| (name.as_str(), t))
    }

    /// Adds one table's data, merging with any already-loaded entry.
    pub fn add_table(&mut self, name: impl Into<String>, fixture: TableFixture) {
        let entry = self.tables.entry(name.into()).or_default();
        entry.depends.extend(fixture.depends);
        entry.records.extend(fixture.records);
    }

    /// Parses one source document in the given format.
    pub fn load_str(&mut self, format: SourceFormat, text: &str) -> Result<()> {
        let raw: IndexMap<String, RawTable> = match format {
            SourceFormat::Json => serde_json::from_str(text)?,
            SourceFormat::Toml => toml::from_str(text)?,
        };

        for (name, table) in raw {
            let records = table.data.ok_or_else(|| {
                Error::configuration(format!("fixture table `{name}` has no `data` list"))
            })?;
            self.add_table(
                name,
                TableFixture {
                    depends: table.depends.into_iter().collect(),
                    records,
                },
            );
        }
        Ok(())
    }

    /// Loads one source file; the format comes from the extension.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format = SourceFormat::from_extension(ext)?;
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading fixture source");
        self.load_str(format, &text)
    }

    /// Walks a directory and loads every file in a supported format.
    /// Unsupported files are skipped; entries are visited in name order so
    /// merging is deterministic.
    pub fn load_dir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut entries: Vec<_> = fs::read_dir(path.as_ref())?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        for entry in entries {
            if entry.is_dir() {
                self.load_dir(&entry)?;
                continue;
            }
            let ext = entry.extension().and_then(|e| e.to_str()).unwrap_or("");
            if SourceFormat::from_extension(ext).is_ok() {
                self.load_file(&entry)?;
            }
        }
        Ok(())
    }
}
