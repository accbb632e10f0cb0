use griddle_core::schema::{FieldSpec, ModelDecl, Registry};
use griddle_core::value::ScalarType;

#[test]
fn injects_identity_primary_key() {
    let mut registry = Registry::new();
    let id = registry
        .define(ModelDecl::new("UserModel").field("name", FieldSpec::string().length(40)))
        .unwrap();

    let model = registry.model(id);
    assert_eq!(model.primary_key.len(), 1);

    let pk = model.single_primary_key().unwrap();
    assert_eq!(pk.name, "id");
    assert_eq!(pk.ty, ScalarType::Integer);
    assert!(pk.auto_increment);
    assert!(pk.unique);
    assert!(pk.indexed);
    assert!(!pk.nullable);

    // injected ahead of the declared fields
    assert_eq!(model.fields[0].name, "id");
}

#[test]
fn suppressing_default_pk_removes_it() {
    let mut registry = Registry::new();
    let id = registry
        .define(
            ModelDecl::new("SessionModel")
                .no_default_pk()
                .field("token", FieldSpec::string().length(32).primary_key(true)),
        )
        .unwrap();

    let model = registry.model(id);
    assert!(model.field_by_name("id").is_none());
    assert_eq!(model.single_primary_key().unwrap().name, "token");
}

#[test]
fn suppressing_default_pk_without_replacement_leaves_no_key() {
    let mut registry = Registry::new();
    let id = registry
        .define(
            ModelDecl::new("LogModel")
                .no_default_pk()
                .field("line", FieldSpec::string()),
        )
        .unwrap();

    let model = registry.model(id);
    assert!(model.primary_key.is_empty());
    assert!(model.field_by_name("id").is_none());
}

#[test]
fn user_declared_id_is_kept() {
    let mut registry = Registry::new();
    let id = registry
        .define(ModelDecl::new("UserModel").field("id", FieldSpec::string().primary_key(true)))
        .unwrap();

    let model = registry.model(id);
    let pk = model.single_primary_key().unwrap();
    assert_eq!(pk.ty, ScalarType::Text);
    assert!(!pk.auto_increment);
}

#[test]
fn duplicate_declared_field_collides() {
    let mut registry = Registry::new();
    let err = registry
        .define(
            ModelDecl::new("UserModel")
                .field("name", FieldSpec::string())
                .field("name", FieldSpec::string()),
        )
        .unwrap_err();
    assert!(err.is_already_exists());
}

#[test]
fn transient_fields_are_dropped_before_finalizing() {
    let mut registry = Registry::new();
    let id = registry
        .define(
            ModelDecl::new("UserModel")
                .field("name", FieldSpec::string())
                .field("scratch", FieldSpec::integer().transient()),
        )
        .unwrap();

    let model = registry.model(id);
    assert!(model.field_by_name("scratch").is_none());
    assert!(model.field_by_name("name").is_some());
}
