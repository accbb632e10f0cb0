use crate::value::ScalarType;
use indexmap::IndexMap;

/// Per-column entry of a validation schema: semantic type plus whether a
/// value must be supplied (no default and not nullable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub ty: ScalarType,
    pub required: bool,
}

/// The companion validation schema generated for each model.
///
/// Purely structural: it mirrors column semantic types and nullability and
/// never observes record values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSchema {
    pub model: String,
    pub fields: IndexMap<String, FieldRule>,
}

/// The validation-schema collaborator.
///
/// Given a model name and its column → (type, required?) mapping, returns a
/// schema object the core stores but never inspects. Invoked once per model
/// type, during postinit.
pub trait SchemaGenerator {
    fn generate(&self, model: &str, columns: &[(String, ScalarType, bool)]) -> ValidationSchema;
}

/// Default generator: a direct structural mirror of the column set.
#[derive(Debug, Default)]
pub struct StructuralGenerator;

impl SchemaGenerator for StructuralGenerator {
    fn generate(&self, model: &str, columns: &[(String, ScalarType, bool)]) -> ValidationSchema {
        let fields = columns
            .iter()
            .map(|(name, ty, required)| {
                (
                    name.clone(),
                    FieldRule {
                        ty: *ty,
                        required: *required,
                    },
                )
            })
            .collect();

        ValidationSchema {
            model: model.to_string(),
            fields,
        }
    }
}
