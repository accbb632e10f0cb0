use super::{builder, Model, ModelDecl, ModelId, SchemaGenerator, StructuralGenerator};
use crate::config::Settings;
use crate::driver::Dialect;
use crate::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// The process-wide set of compiled model types, keyed by table name.
///
/// An explicit context object: the construction pipeline appends to it and
/// everything else — fixture resolution, join-type reuse — reads it.
/// Iteration follows definition order.
pub struct Registry {
    pub(crate) dialect: Dialect,
    pub(crate) generator: Box<dyn SchemaGenerator>,

    /// Models, indexed by [`ModelId`].
    pub(crate) models: Vec<Model>,

    /// Maps table names to identifiers.
    pub(crate) table_lookup: IndexMap<String, ModelId>,

    /// Memoized join models, keyed by the declaring pair.
    pub(crate) m2m_pairs: HashMap<(ModelId, ModelId), ModelId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_dialect(Dialect::Generic)
    }

    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            generator: Box::new(StructuralGenerator),
            models: Vec::new(),
            table_lookup: IndexMap::new(),
            m2m_pairs: HashMap::new(),
        }
    }

    /// Reads the active storage dialect from a settings store.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let dialect = if settings.contains("database_dialect") {
            settings.str("database_dialect")?.parse()?
        } else {
            Dialect::Generic
        };
        Ok(Self::with_dialect(dialect))
    }

    /// Replaces the validation-schema collaborator.
    pub fn generator(mut self, generator: Box<dyn SchemaGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Compiles a declaration and registers the finished model.
    pub fn define(&mut self, decl: ModelDecl) -> Result<ModelId> {
        builder::define(self, decl)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Get a model by id.
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(id.into().0).expect("invalid model ID")
    }

    pub(crate) fn model_ref(&self, id: ModelId) -> Result<&Model> {
        self.models.get(id.0).ok_or_else(|| {
            Error::configuration(
                "relationship references a model that was not registered with the registry",
            )
        })
    }

    pub fn by_table(&self, table: &str) -> Option<&Model> {
        self.table_lookup.get(table).map(|id| &self.models[id.0])
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.table_lookup.contains_key(table)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.table_lookup.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub(crate) fn m2m_pair(&self, a: ModelId, b: ModelId) -> Option<ModelId> {
        self.m2m_pairs
            .get(&(a, b))
            .or_else(|| self.m2m_pairs.get(&(b, a)))
            .copied()
    }

    pub(crate) fn insert(&mut self, model: Model) {
        self.table_lookup.insert(model.table_name.clone(), model.id);
        self.models.push(model);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("dialect", &self.dialect)
            .field("tables", &self.table_lookup.keys().collect::<Vec<_>>())
            .finish()
    }
}
