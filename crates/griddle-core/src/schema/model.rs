use super::{Association, Field, FieldId, Name, Transform, TransformContext, ValidationSchema};
use crate::driver::StagedRecord;
use crate::value::Value;
use crate::Result;
use indexmap::IndexMap;
use std::fmt;

/// A compiled model type.
///
/// Produced once by the construction pipeline and immutable afterwards,
/// except for the association attributes other models install through their
/// deferred wiring.
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the registry.
    pub id: ModelId,

    /// The declared type name.
    pub name: Name,

    /// The table name; unique across the registry.
    pub table_name: String,

    /// Columns, in declaration order.
    pub fields: Vec<Field>,

    /// Fields composing the primary key. One entry unless injection was
    /// suppressed; synthesized join models carry a composite two-field key.
    pub primary_key: Vec<FieldId>,

    /// Association attributes, in wiring order.
    pub associations: Vec<Association>,

    /// Value-transform hooks, in declaration order.
    pub transforms: Vec<(String, Transform)>,

    /// Companion validation schema, generated from the final column set.
    pub validation: Option<ValidationSchema>,

    pub hints: DialectHints,
}

/// Storage-engine-specific tuning applied during postinit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialectHints {
    /// SQLite needs an explicit row-id hint for an integer
    /// auto-incrementing primary key.
    pub sqlite_with_rowid: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn field(&self, id: impl Into<FieldId>) -> &Field {
        let field_id = id.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn association_by_name(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|assoc| assoc.name == name)
    }

    /// The primary-key field, when the key is a single column.
    pub fn single_primary_key(&self) -> Option<&Field> {
        match &self.primary_key[..] {
            [id] => Some(&self.fields[id.index]),
            _ => None,
        }
    }

    /// Describes the attribute currently occupying `name`, if any. Used by
    /// collision detection to name the current occupant.
    pub(crate) fn occupant_of(&self, name: &str) -> Option<String> {
        if let Some(field) = self.field_by_name(name) {
            return Some(format!("column `{}`", field.name));
        }
        if let Some(assoc) = self.association_by_name(name) {
            return Some(format!("association `{assoc}`"));
        }
        None
    }

    /// Constructs one record for this model, applying each value-transform
    /// hook exactly once before the fields are staged.
    ///
    /// A hook runs when its field was supplied a value, or when it does not
    /// require one (the auto-generation case).
    pub fn new_record(
        &self,
        mut values: IndexMap<String, Value>,
        cx: &TransformContext,
    ) -> Result<StagedRecord> {
        for (name, transform) in &self.transforms {
            if let Some(current) = values.get(name).cloned() {
                values.insert(name.clone(), transform.apply(Some(current), cx)?);
            } else if !transform.requires_argument() {
                values.insert(name.clone(), transform.apply(None, cx)?);
            }
        }

        Ok(StagedRecord {
            table: self.table_name.clone(),
            values,
        })
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
