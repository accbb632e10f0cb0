use griddle_core::config::Settings;
use griddle_core::driver::Dialect;
use griddle_core::schema::{FieldSpec, ModelDecl, Registry};

#[test]
fn sqlite_marks_integer_autoincrement_keys() {
    let mut registry = Registry::with_dialect(Dialect::Sqlite);
    let id = registry.define(ModelDecl::new("UserModel")).unwrap();
    assert!(registry.model(id).hints.sqlite_with_rowid);
}

#[test]
fn generic_dialect_applies_no_hint() {
    let mut registry = Registry::new();
    let id = registry.define(ModelDecl::new("UserModel")).unwrap();
    assert!(!registry.model(id).hints.sqlite_with_rowid);
}

#[test]
fn non_integer_keys_are_left_alone_under_sqlite() {
    let mut registry = Registry::with_dialect(Dialect::Sqlite);
    let id = registry
        .define(
            ModelDecl::new("SessionModel")
                .no_default_pk()
                .field("token", FieldSpec::string().primary_key(true)),
        )
        .unwrap();
    assert!(!registry.model(id).hints.sqlite_with_rowid);
}

#[test]
fn dialect_comes_from_the_settings_store() {
    let mut settings = Settings::new();
    settings.set("Database_Dialect", "sqlite");

    let registry = Registry::from_settings(&settings).unwrap();
    assert_eq!(registry.dialect(), Dialect::Sqlite);
}

#[test]
fn unknown_dialect_setting_is_rejected() {
    let mut settings = Settings::new();
    settings.set("database_dialect", "oracle9i");

    let err = Registry::from_settings(&settings).unwrap_err();
    assert!(err.is_configuration());
}
