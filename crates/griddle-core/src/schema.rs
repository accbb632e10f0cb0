mod builder;
mod decl;
mod field;
mod model;
mod name;
mod registry;
mod relation;
mod transform;
mod validate;

pub use decl::{ModelDecl, ModelMeta};
pub use field::{Field, FieldArgs, FieldId, FieldSpec};
pub use model::{DialectHints, Model, ModelId};
pub use name::Name;
pub use registry::Registry;
pub use relation::{Association, AssociationKind, RelationKind, RelationSpec};
pub use transform::{Transform, TransformContext, RANDOM_ALPHABET};
pub use validate::{FieldRule, SchemaGenerator, StructuralGenerator, ValidationSchema};
