use super::{FieldSpec, RelationSpec, Transform};

/// Meta-information about a model declaration.
///
/// Normalized against defaults during precreation; the resolved table name
/// is written back here so later lookups are stable.
#[derive(Debug, Clone)]
pub struct ModelMeta {
    /// Explicit table name; derived from the declared type name if unset.
    pub table_name: Option<String>,

    /// Inject the default `id` primary key. On by default.
    pub default_pk: bool,
}

impl Default for ModelMeta {
    fn default() -> Self {
        Self {
            table_name: None,
            default_pk: true,
        }
    }
}

/// A model declaration: the input record the construction pipeline rewrites
/// and compiles into a [`Model`].
///
/// Field, relationship and transform entries keep their declaration order;
/// the pipeline relies on it for deterministic wiring.
///
/// [`Model`]: super::Model
#[derive(Debug, Clone, Default)]
pub struct ModelDecl {
    /// The declared type name, e.g. `UserModel`.
    pub name: String,

    pub meta: ModelMeta,

    /// Declared fields, in order.
    pub fields: Vec<(String, FieldSpec)>,

    /// Declared relationship attributes, in order.
    pub relations: Vec<(String, RelationSpec)>,

    /// Explicit value-transform hooks, applied after field-level ones.
    pub transforms: Vec<(String, Transform)>,
}

impl ModelDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn meta(mut self, meta: ModelMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Overrides the derived table name.
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.meta.table_name = Some(table_name.into());
        self
    }

    /// Suppresses default primary-key injection.
    pub fn no_default_pk(mut self) -> Self {
        self.meta.default_pk = false;
        self
    }

    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    pub fn relation(mut self, name: impl Into<String>, relation: RelationSpec) -> Self {
        self.relations.push((name.into(), relation));
        self
    }

    /// Attaches an explicit value-transform hook to a declared field.
    pub fn transform(mut self, field: impl Into<String>, transform: Transform) -> Self {
        self.transforms.push((field.into(), transform));
        self
    }
}
