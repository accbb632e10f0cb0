use griddle_core::schema::{
    FieldSpec, ModelDecl, Registry, SchemaGenerator, ValidationSchema,
};
use griddle_core::value::ScalarType;
use indexmap::IndexMap;

#[test]
fn validation_schema_mirrors_the_final_column_set() {
    let mut registry = Registry::new();
    let id = registry
        .define(
            ModelDecl::new("UserModel")
                .field("name", FieldSpec::string().length(40).nullable(false))
                .field("bio", FieldSpec::string())
                .field("score", FieldSpec::float().default_value(0.0)),
        )
        .unwrap();

    let schema = registry.model(id).validation.as_ref().unwrap();
    assert_eq!(schema.model, "UserModel");

    // no default and not nullable → required
    assert!(schema.fields["id"].required);
    assert!(schema.fields["name"].required);
    // nullable by default → optional
    assert!(!schema.fields["bio"].required);
    // declared default → optional
    assert!(!schema.fields["score"].required);

    assert_eq!(schema.fields["name"].ty, ScalarType::Text);
    assert_eq!(schema.fields["score"].ty, ScalarType::Float);
}

#[test]
fn generated_fk_columns_appear_in_the_schema() {
    let mut registry = Registry::new();
    let user = registry.define(ModelDecl::new("UserModel")).unwrap();
    let item = registry
        .define(
            ModelDecl::new("ItemModel").relation(
                "owner",
                griddle_core::schema::RelationSpec::foreign_key(user),
            ),
        )
        .unwrap();

    let schema = registry.model(item).validation.as_ref().unwrap();
    assert!(schema.fields["user_id"].required);
    assert_eq!(schema.fields["user_id"].ty, ScalarType::Integer);
}

#[test]
fn custom_generator_is_requested_once_per_model() {
    struct Tagging;

    impl SchemaGenerator for Tagging {
        fn generate(
            &self,
            model: &str,
            _columns: &[(String, ScalarType, bool)],
        ) -> ValidationSchema {
            ValidationSchema {
                model: format!("tagged::{model}"),
                fields: IndexMap::new(),
            }
        }
    }

    let mut registry = Registry::new().generator(Box::new(Tagging));
    let id = registry.define(ModelDecl::new("UserModel")).unwrap();
    assert_eq!(
        registry.model(id).validation.as_ref().unwrap().model,
        "tagged::UserModel"
    );
}
