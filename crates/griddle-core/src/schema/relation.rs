use super::{FieldArgs, FieldSpec, Model, ModelId};
use crate::value::ScalarType;
use crate::{Error, Result};
use std::fmt;

/// The association shape a relationship descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Many-to-one: the declaring side holds the foreign key.
    ForeignKey,
    /// Foreign key with a single-valued back side.
    OneToOne,
    /// Association through a join model holding two foreign keys.
    ManyToMany,
}

/// A relationship descriptor: one association between two model types.
///
/// Holds a direct reference to the target model (its registry id), so the
/// target must be declared before the referrer. Compilation advances each
/// descriptor through: id-column generated → forward attribute attached →
/// backward attribute attached → (many-to-many) join type synthesized or
/// reused.
#[derive(Debug, Clone)]
pub struct RelationSpec {
    pub kind: RelationKind,

    /// The model this association points at.
    pub target: ModelId,

    /// Explicit name for the back attribute on the target; defaults to the
    /// referencing table's name.
    pub backref: Option<String>,

    /// Overrides for the generated foreign-key column.
    pub column_args: FieldArgs,

    /// Explicit join model for many-to-many; one is synthesized if absent.
    pub through: Option<ModelId>,
}

impl RelationSpec {
    fn new(kind: RelationKind, target: ModelId) -> Self {
        Self {
            kind,
            target,
            backref: None,
            column_args: FieldArgs::default(),
            through: None,
        }
    }

    pub fn foreign_key(target: impl Into<ModelId>) -> Self {
        Self::new(RelationKind::ForeignKey, target.into())
    }

    pub fn one_to_one(target: impl Into<ModelId>) -> Self {
        Self::new(RelationKind::OneToOne, target.into())
    }

    pub fn many_to_many(target: impl Into<ModelId>) -> Self {
        Self::new(RelationKind::ManyToMany, target.into())
    }

    pub fn backref(mut self, name: impl Into<String>) -> Self {
        self.backref = Some(name.into());
        self
    }

    pub fn column_args(mut self, args: FieldArgs) -> Self {
        self.column_args = self.column_args.overlaid(&args);
        self
    }

    /// Overrides the generated column's nullability (false by default).
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.column_args.nullable = Some(nullable);
        self
    }

    pub fn through(mut self, join: impl Into<ModelId>) -> Self {
        self.through = Some(join.into());
        self
    }

    /// Derives the generated foreign-key column for the declaring side.
    ///
    /// The name is `{target_table}_{target_pk_name}`, the semantic type
    /// mirrors the target's primary key, and nullability defaults to false
    /// unless overridden.
    pub(crate) fn fk_column(&self, target: &Model) -> Result<(String, FieldSpec)> {
        let pk = target.single_primary_key().ok_or_else(|| {
            Error::configuration(format!(
                "relationship target `{}` has no single-column primary key",
                target.name.upper_camel_case()
            ))
        })?;

        let name = format!("{}_{}", target.table_name, pk.name);
        let spec = mirror_spec(pk.ty, pk.length)
            .defaults(FieldArgs {
                nullable: Some(false),
                ..FieldArgs::default()
            })
            .defaults(self.column_args.clone())
            .references(pk.id);
        Ok((name, spec))
    }
}

/// A field spec whose semantic type mirrors a referenced primary key.
pub(crate) fn mirror_spec(ty: ScalarType, length: Option<usize>) -> FieldSpec {
    let spec = match ty {
        ScalarType::Integer => FieldSpec::integer(),
        ScalarType::Float => FieldSpec::float(),
        ScalarType::Text => FieldSpec::string(),
        ScalarType::Boolean => FieldSpec::boolean(),
        ScalarType::DateTime => FieldSpec::datetime(),
    };
    match length {
        Some(length) => spec.length(length),
        None => spec,
    }
}

/// Whether an association attribute evaluates to a single record or a
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    One,
    Many,
}

/// A finished association attribute on a compiled model.
#[derive(Debug, Clone)]
pub struct Association {
    /// The attribute name.
    pub name: String,

    /// The model the attribute points at.
    pub target: ModelId,

    /// The target's table name, for display and staging.
    pub target_table: String,

    pub kind: AssociationKind,

    /// The join model this association goes through, for many-to-many.
    pub via: Option<ModelId>,
}

impl fmt::Display for RelationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to model #{}", self.kind, self.target.0)?;
        if let Some(backref) = &self.backref {
            write!(f, " (back as {backref})")?;
        }
        Ok(())
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::ForeignKey => "foreign key",
            RelationKind::OneToOne => "one to one",
            RelationKind::ManyToMany => "many to many",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AssociationKind::One => {
                write!(f, "reference to <{}> (as {})", self.target_table, self.name)
            }
            AssociationKind::Many => {
                write!(f, "collection of <{}> (as {})", self.target_table, self.name)
            }
        }
    }
}
