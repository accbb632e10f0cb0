use super::relation::mirror_spec;
use super::{
    Association, AssociationKind, FieldId, FieldSpec, Model, ModelDecl, ModelId, Name, Registry,
    RelationKind, RelationSpec, Transform,
};
use crate::driver::Dialect;
use crate::value::ScalarType;
use crate::{Error, Result};
use heck::{ToSnakeCase, ToUpperCamelCase};
use indexmap::IndexSet;
use tracing::debug;

/// An action recorded during precreation and executed once the model object
/// exists, in recording order.
///
/// Any mutation that targets another model goes through here: the other
/// model's shape may still be affected after the current one is known, but
/// must not change before the current one fully exists.
pub(crate) enum Deferred {
    /// Attach the forward and backward attributes of a reference relation.
    InstallReference {
        model: ModelId,
        attr: String,
        relation: RelationSpec,
    },

    /// Synthesize or reuse the join model, then attach both sides.
    InstallManyToMany {
        model: ModelId,
        attr: String,
        relation: RelationSpec,
    },
}

/// Compiles one declaration into a registered model.
///
/// Precreate rewrites the declaration record; postinit operates on the
/// registered model and drains the deferred queue.
pub(crate) fn define(registry: &mut Registry, mut decl: ModelDecl) -> Result<ModelId> {
    // ---- precreate: rewrite the declaration before the model exists ----

    let table_name = resolve_table_name(registry, &mut decl)?;
    inject_default_pk(&mut decl);
    check_declared_attributes(&decl)?;

    let id = ModelId(registry.models.len());
    let mut deferred = Vec::new();
    translate_relations(registry, &mut decl, id, &mut deferred)?;

    let transforms = collect_transforms(&mut decl);
    decl.fields.retain(|(_, spec)| !spec.transient);

    let mut fields = Vec::with_capacity(decl.fields.len());
    for (index, (name, spec)) in std::mem::take(&mut decl.fields).into_iter().enumerate() {
        fields.push(spec.into_field(FieldId { model: id, index }, name));
    }
    let primary_key = fields
        .iter()
        .filter(|field| field.primary_key)
        .map(|field| field.id)
        .collect();

    let model = Model {
        id,
        name: Name::new(&decl.name),
        table_name: table_name.clone(),
        fields,
        primary_key,
        associations: Vec::new(),
        transforms,
        validation: None,
        hints: Default::default(),
    };

    // The slot is reserved here so deferred actions (and join synthesis)
    // can resolve the model; it becomes observable to callers only after
    // postinit completes.
    registry.insert(model);

    // ---- postinit: the model object now exists ----

    generate_validation(registry, id);
    apply_dialect_hints(registry, id);
    for action in deferred {
        run_deferred(registry, action)?;
    }

    debug!(
        model = %registry.model(id).name.upper_camel_case(),
        table = %table_name,
        "compiled model"
    );
    Ok(id)
}

/// Steps 1 and 2: metadata normalization and table-name derivation. The
/// resolved name is written back into the metadata so later lookups are
/// stable.
fn resolve_table_name(registry: &Registry, decl: &mut ModelDecl) -> Result<String> {
    let table_name = match &decl.meta.table_name {
        Some(name) => {
            if name.is_empty() {
                return Err(Error::configuration(format!(
                    "model `{}` declares an empty table name",
                    decl.name
                )));
            }
            name.clone()
        }
        None => derived_table_name(&decl.name),
    };

    if registry.contains_table(&table_name) {
        return Err(Error::configuration(format!(
            "table `{table_name}` is already registered"
        )));
    }

    decl.meta.table_name = Some(table_name.clone());
    Ok(table_name)
}

/// Strips the conventional `Model` suffix and converts to snake case.
fn derived_table_name(clsname: &str) -> String {
    let base = match clsname.strip_suffix("Model") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => clsname,
    };
    base.to_snake_case()
}

/// Step 3: inject the default `id` primary key unless suppressed or the
/// declaration already carries one.
fn inject_default_pk(decl: &mut ModelDecl) {
    if !decl.meta.default_pk {
        return;
    }
    if decl.fields.iter().any(|(name, _)| name == "id") {
        return;
    }
    decl.fields.insert(0, ("id".to_string(), FieldSpec::id()));
}

fn check_declared_attributes(decl: &ModelDecl) -> Result<()> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for (name, _) in &decl.fields {
        if !seen.insert(name.as_str()) {
            return Err(Error::already_exists(
                name,
                &decl.name,
                format!("column `{name}`"),
            ));
        }
    }
    for (name, _) in &decl.relations {
        if !seen.insert(name.as_str()) {
            return Err(Error::already_exists(
                name,
                &decl.name,
                format!("attribute `{name}`"),
            ));
        }
    }
    Ok(())
}

/// Step 4: generate each relation's foreign-key column immediately where
/// possible and queue the cross-model wiring for postinit.
fn translate_relations(
    registry: &Registry,
    decl: &mut ModelDecl,
    id: ModelId,
    deferred: &mut Vec<Deferred>,
) -> Result<()> {
    for (attr, relation) in decl.relations.clone() {
        let target = registry.model_ref(relation.target)?;

        if relation.kind != RelationKind::ManyToMany {
            let (column_name, spec) = relation.fk_column(target)?;
            if let Some(occupant) = declared_occupant(decl, &column_name) {
                return Err(Error::already_exists(&column_name, &decl.name, occupant));
            }
            decl.fields.push((column_name, spec));
        }

        deferred.push(match relation.kind {
            RelationKind::ManyToMany => Deferred::InstallManyToMany {
                model: id,
                attr,
                relation,
            },
            _ => Deferred::InstallReference {
                model: id,
                attr,
                relation,
            },
        });
    }
    Ok(())
}

fn declared_occupant(decl: &ModelDecl, name: &str) -> Option<String> {
    if decl.fields.iter().any(|(n, _)| n == name) {
        return Some(format!("column `{name}`"));
    }
    if decl.relations.iter().any(|(n, _)| n == name) {
        return Some(format!("attribute `{name}`"));
    }
    None
}

/// Step 5: collect value-transform hooks into one ordered list — field-level
/// hooks in declaration order, then explicit declaration-level hooks.
fn collect_transforms(decl: &mut ModelDecl) -> Vec<(String, Transform)> {
    let mut hooks = Vec::new();
    for (name, spec) in &mut decl.fields {
        if let Some(mut transform) = spec.transform.take() {
            if let Transform::RandomString { length } = &mut transform {
                if length.is_none() {
                    *length = spec.length;
                }
            }
            hooks.push((name.clone(), transform));
        }
    }
    hooks.extend(decl.transforms.drain(..));
    hooks
}

/// Step 7: request the companion validation schema, once per model.
fn generate_validation(registry: &mut Registry, id: ModelId) {
    let (name, columns) = {
        let model = &registry.models[id.0];
        let columns: Vec<(String, ScalarType, bool)> = model
            .fields
            .iter()
            .map(|field| {
                let required = field.default.is_none() && !field.nullable;
                (field.name.clone(), field.ty, required)
            })
            .collect();
        (model.name.upper_camel_case(), columns)
    };

    let schema = registry.generator.generate(&name, &columns);
    registry.models[id.0].validation = Some(schema);
}

/// Step 8: storage-engine tuning. SQLite wants an explicit row-id hint for
/// an integer auto-incrementing primary key.
fn apply_dialect_hints(registry: &mut Registry, id: ModelId) {
    if registry.dialect != Dialect::Sqlite {
        return;
    }

    let needs_rowid = registry.models[id.0]
        .single_primary_key()
        .map(|pk| pk.ty == ScalarType::Integer && pk.auto_increment)
        .unwrap_or(false);

    if needs_rowid {
        registry.models[id.0].hints.sqlite_with_rowid = true;
    }
}

/// Step 9: deferred actions, in recording order.
fn run_deferred(registry: &mut Registry, action: Deferred) -> Result<()> {
    match action {
        Deferred::InstallReference {
            model,
            attr,
            relation,
        } => install_reference(registry, model, &attr, &relation),
        Deferred::InstallManyToMany {
            model,
            attr,
            relation,
        } => install_many_to_many(registry, model, &attr, &relation),
    }
}

fn ensure_vacant(registry: &Registry, model: ModelId, name: &str) -> Result<()> {
    let model = &registry.models[model.0];
    if let Some(occupant) = model.occupant_of(name) {
        return Err(Error::already_exists(
            name,
            model.name.upper_camel_case(),
            occupant,
        ));
    }
    Ok(())
}

fn install_reference(
    registry: &mut Registry,
    child: ModelId,
    attr: &str,
    relation: &RelationSpec,
) -> Result<()> {
    let parent = relation.target;
    let parent_table = registry.models[parent.0].table_name.clone();
    let child_table = registry.models[child.0].table_name.clone();

    // forward attribute on the declaring side
    ensure_vacant(registry, child, attr)?;
    registry.models[child.0].associations.push(Association {
        name: attr.to_string(),
        target: parent,
        target_table: parent_table,
        kind: AssociationKind::One,
        via: None,
    });

    // backward attribute on the target: a collection by convention, a
    // single value for one-to-one
    let back_name = relation
        .backref
        .clone()
        .unwrap_or_else(|| child_table.clone());
    ensure_vacant(registry, parent, &back_name)?;
    let back_kind = match relation.kind {
        RelationKind::OneToOne => AssociationKind::One,
        _ => AssociationKind::Many,
    };
    registry.models[parent.0].associations.push(Association {
        name: back_name,
        target: child,
        target_table: child_table,
        kind: back_kind,
        via: None,
    });

    Ok(())
}

fn install_many_to_many(
    registry: &mut Registry,
    owner: ModelId,
    attr: &str,
    relation: &RelationSpec,
) -> Result<()> {
    let target = relation.target;
    registry.model_ref(target)?;

    let join = match relation.through {
        Some(join) => {
            registry.model_ref(join)?;
            join
        }
        None => match registry.m2m_pair(owner, target) {
            Some(join) => join,
            None => synthesize_join(registry, owner, target)?,
        },
    };
    registry.m2m_pairs.entry((owner, target)).or_insert(join);

    let owner_table = registry.models[owner.0].table_name.clone();
    let target_table = registry.models[target.0].table_name.clone();

    // both sides' attributes point through the join model
    ensure_vacant(registry, owner, attr)?;
    registry.models[owner.0].associations.push(Association {
        name: attr.to_string(),
        target,
        target_table,
        kind: AssociationKind::Many,
        via: Some(join),
    });

    let back_name = relation
        .backref
        .clone()
        .unwrap_or_else(|| owner_table.clone());
    ensure_vacant(registry, target, &back_name)?;
    registry.models[target.0].associations.push(Association {
        name: back_name,
        target: owner,
        target_table: owner_table,
        kind: AssociationKind::Many,
        via: Some(join),
    });

    Ok(())
}

/// The join entity is a declarative template — two foreign-key columns
/// forming a composite key — instantiated through the ordinary builder path
/// and memoized by model pair.
fn synthesize_join(registry: &mut Registry, owner: ModelId, target: ModelId) -> Result<ModelId> {
    let (owner_column, owner_spec, owner_table) = join_side(registry, owner)?;
    let (target_column, target_spec, target_table) = join_side(registry, target)?;

    let table = format!("m2m_{owner_table}_{target_table}");
    let decl = ModelDecl::new(table.to_upper_camel_case())
        .table_name(table.clone())
        .no_default_pk()
        .field(owner_column, owner_spec)
        .field(target_column, target_spec);

    let join = define(registry, decl)?;
    registry.m2m_pairs.insert((owner, target), join);
    debug!(join = %table, "synthesized join model");
    Ok(join)
}

fn join_side(registry: &Registry, side: ModelId) -> Result<(String, FieldSpec, String)> {
    let model = registry.model_ref(side)?;
    let pk = model.single_primary_key().ok_or_else(|| {
        Error::configuration(format!(
            "many-to-many side `{}` has no single-column primary key",
            model.name.upper_camel_case()
        ))
    })?;

    let column = format!("{}_{}", model.table_name, pk.name);
    let spec = mirror_spec(pk.ty, pk.length)
        .primary_key(true)
        .references(pk.id);
    Ok((column, spec, model.table_name.clone()))
}
