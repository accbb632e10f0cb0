use super::transform::Transform;
use super::ModelId;
use crate::value::{ScalarType, Value};
use std::fmt;

/// The keyword configuration of a field descriptor.
///
/// Every entry is optional; unset entries fall back to the defaults layered
/// in by the descriptor's kind chain. [`FieldArgs::overlaid`] merges two
/// sets key-by-key with the more specific set winning, which is how a kind
/// inherits its parent's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldArgs {
    pub nullable: Option<bool>,
    pub primary_key: Option<bool>,
    pub auto_increment: Option<bool>,
    pub unique: Option<bool>,
    pub indexed: Option<bool>,
    pub default: Option<Value>,
}

impl FieldArgs {
    /// Merges `over` on top of `self`, key by key.
    pub fn overlaid(&self, over: &FieldArgs) -> FieldArgs {
        FieldArgs {
            nullable: over.nullable.or(self.nullable),
            primary_key: over.primary_key.or(self.primary_key),
            auto_increment: over.auto_increment.or(self.auto_increment),
            unique: over.unique.or(self.unique),
            indexed: over.indexed.or(self.indexed),
            default: over.default.clone().or_else(|| self.default.clone()),
        }
    }
}

/// A field descriptor: one column of a model declaration.
///
/// Built-in kinds form an inheritance chain — each constructor starts from
/// its parent kind and overlays its own default arguments and transform, so
/// `id()` is `integer()` plus the primary-key argument set, and
/// `coefficient()` is `float()` plus a clamping transform.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub ty: ScalarType,
    pub length: Option<usize>,
    pub args: FieldArgs,
    pub transform: Option<Transform>,
    pub references: Option<FieldId>,
    pub transient: bool,
}

impl FieldSpec {
    fn base(ty: ScalarType) -> Self {
        Self {
            ty,
            length: None,
            args: FieldArgs::default(),
            transform: None,
            references: None,
            transient: false,
        }
    }

    /// Standard integer field.
    pub fn integer() -> Self {
        Self::base(ScalarType::Integer)
    }

    /// Integer field with the argument set of an identity column.
    pub fn id() -> Self {
        Self::integer().defaults(FieldArgs {
            auto_increment: Some(true),
            indexed: Some(true),
            primary_key: Some(true),
            unique: Some(true),
            ..FieldArgs::default()
        })
    }

    /// Integer field clamped to non-negative values.
    pub fn positive_integer() -> Self {
        Self::integer().with_transform(Transform::Clamp {
            min: Some(0.0),
            max: None,
        })
    }

    /// Standard float field.
    pub fn float() -> Self {
        Self::base(ScalarType::Float)
    }

    /// Float field clamped to [0.0, 1.0], for ratio-like values.
    pub fn coefficient() -> Self {
        Self::coefficient_bounds(0.0, 1.0)
    }

    /// Float field clamped to the given bounds.
    pub fn coefficient_bounds(min: f64, max: f64) -> Self {
        Self::float().with_transform(Transform::Clamp {
            min: Some(min),
            max: Some(max),
        })
    }

    /// Standard string field. Unlimited length unless [`length`] is set.
    ///
    /// [`length`]: FieldSpec::length
    pub fn string() -> Self {
        Self::base(ScalarType::Text)
    }

    /// String field that generates a random value when none is supplied.
    pub fn random_string() -> Self {
        Self::string().with_transform(Transform::RandomString { length: None })
    }

    /// String field that one-way hashes its value through the configured
    /// hashing entry point.
    pub fn password() -> Self {
        Self::string().with_transform(Transform::PasswordHash)
    }

    /// Standard datetime field. Values travel as strings.
    pub fn datetime() -> Self {
        Self::base(ScalarType::DateTime)
    }

    /// Standard boolean field.
    pub fn boolean() -> Self {
        Self::base(ScalarType::Boolean)
    }

    /// Overlays a default argument set; later calls win key-by-key.
    pub fn defaults(mut self, args: FieldArgs) -> Self {
        self.args = self.args.overlaid(&args);
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.args.nullable = Some(nullable);
        self
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.args.primary_key = Some(primary_key);
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.args.auto_increment = Some(auto_increment);
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.args.unique = Some(unique);
        self
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.args.indexed = Some(indexed);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.args.default = Some(value.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Marks the declared field as a foreign key to `target`.
    pub fn references(mut self, target: FieldId) -> Self {
        self.references = Some(target);
        self
    }

    /// Marks the field for removal before the model is finalized.
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }
}

/// A finished column on a compiled model. Immutable once the owning model
/// is constructed.
#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The column name.
    pub name: String,

    /// The semantic type.
    pub ty: ScalarType,

    /// Declared string length, if any.
    pub length: Option<usize>,

    /// True if the column accepts nulls.
    pub nullable: bool,

    /// True if the column is part of the primary key.
    pub primary_key: bool,

    pub auto_increment: bool,
    pub unique: bool,
    pub indexed: bool,

    /// Default value policy, if declared.
    pub default: Option<Value>,

    /// The primary-key field this column is a foreign key to, if any.
    pub references: Option<FieldId>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

impl FieldSpec {
    /// Resolves the spec into a finished column.
    ///
    /// An unset `nullable` defaults to true for ordinary columns and false
    /// for primary-key members.
    pub(crate) fn into_field(self, id: FieldId, name: String) -> Field {
        let primary_key = self.args.primary_key.unwrap_or(false);
        Field {
            id,
            name,
            ty: self.ty,
            length: self.length,
            nullable: self.args.nullable.unwrap_or(!primary_key),
            primary_key,
            auto_increment: self.args.auto_increment.unwrap_or(false),
            unique: self.args.unique.unwrap_or(false),
            indexed: self.args.indexed.unwrap_or(false),
            default: self.args.default,
            references: self.references,
        }
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_chain_inherits_and_overrides() {
        // id() inherits integer defaults and layers the identity set
        let id = FieldSpec::id();
        assert_eq!(id.args.primary_key, Some(true));
        assert_eq!(id.args.auto_increment, Some(true));

        // user overrides are most specific and win key-by-key
        let plain = FieldSpec::id().auto_increment(false);
        assert_eq!(plain.args.auto_increment, Some(false));
        assert_eq!(plain.args.primary_key, Some(true));
    }

    #[test]
    fn overlay_is_key_by_key() {
        let base = FieldArgs {
            nullable: Some(false),
            unique: Some(true),
            ..FieldArgs::default()
        };
        let over = FieldArgs {
            nullable: Some(true),
            ..FieldArgs::default()
        };
        let merged = base.overlaid(&over);
        assert_eq!(merged.nullable, Some(true));
        assert_eq!(merged.unique, Some(true));
    }
}
