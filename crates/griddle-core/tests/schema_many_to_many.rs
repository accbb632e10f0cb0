use griddle_core::schema::{AssociationKind, FieldSpec, ModelDecl, Registry, RelationSpec};

#[test]
fn synthesizes_join_model_with_composite_key() {
    let mut registry = Registry::new();
    let shop = registry.define(ModelDecl::new("ShopModel")).unwrap();
    let item = registry
        .define(
            ModelDecl::new("ItemModel").relation("shops", RelationSpec::many_to_many(shop)),
        )
        .unwrap();

    let join = registry.by_table("m2m_item_shop").expect("join model");
    assert_eq!(join.fields.len(), 2);
    assert_eq!(join.primary_key.len(), 2);
    assert!(join.fields.iter().all(|field| field.primary_key));
    assert!(join.fields.iter().all(|field| !field.auto_increment));
    assert!(join.field_by_name("item_id").is_some());
    assert!(join.field_by_name("shop_id").is_some());

    // both sides' attributes point through the join
    let forward = registry.model(item).association_by_name("shops").unwrap();
    assert_eq!(forward.kind, AssociationKind::Many);
    assert_eq!(forward.via, Some(join.id));

    let back = registry.model(shop).association_by_name("item").unwrap();
    assert_eq!(back.kind, AssociationKind::Many);
    assert_eq!(back.via, Some(join.id));
}

#[test]
fn join_columns_reference_both_primary_keys() {
    let mut registry = Registry::new();
    let shop = registry.define(ModelDecl::new("ShopModel")).unwrap();
    registry
        .define(
            ModelDecl::new("ItemModel").relation("shops", RelationSpec::many_to_many(shop)),
        )
        .unwrap();

    let shop_pk = registry.model(shop).single_primary_key().unwrap().id;
    let join = registry.by_table("m2m_item_shop").unwrap();
    assert_eq!(join.field_by_name("shop_id").unwrap().references, Some(shop_pk));
}

#[test]
fn same_pair_reuses_the_join() {
    let mut registry = Registry::new();
    let tag = registry.define(ModelDecl::new("TagModel")).unwrap();
    registry
        .define(
            ModelDecl::new("PostModel")
                .relation("tags", RelationSpec::many_to_many(tag))
                .relation(
                    "labels",
                    RelationSpec::many_to_many(tag).backref("labeled"),
                ),
        )
        .unwrap();

    let joins: Vec<_> = registry
        .tables()
        .filter(|table| table.starts_with("m2m_"))
        .collect();
    assert_eq!(joins, vec!["m2m_post_tag"]);
}

#[test]
fn explicit_through_model_is_reused_not_resynthesized() {
    let mut registry = Registry::new();
    let tag = registry.define(ModelDecl::new("TagModel")).unwrap();
    let join = registry
        .define(
            ModelDecl::new("PostTagModel")
                .no_default_pk()
                .field("post_id", FieldSpec::integer().primary_key(true))
                .field("tag_id", FieldSpec::integer().primary_key(true)),
        )
        .unwrap();
    let post = registry
        .define(
            ModelDecl::new("PostModel")
                .relation("tags", RelationSpec::many_to_many(tag).through(join)),
        )
        .unwrap();

    // no m2m_* table was synthesized for the pair
    assert!(registry.by_table("m2m_post_tag").is_none());

    let forward = registry.model(post).association_by_name("tags").unwrap();
    assert_eq!(forward.via, Some(join));

    let back = registry.model(tag).association_by_name("post").unwrap();
    assert_eq!(back.via, Some(join));
}

#[test]
fn declaring_the_pair_again_with_through_keeps_one_join() {
    let mut registry = Registry::new();
    let tag = registry.define(ModelDecl::new("TagModel")).unwrap();
    let join = registry
        .define(
            ModelDecl::new("PostTagModel")
                .no_default_pk()
                .field("post_id", FieldSpec::integer().primary_key(true))
                .field("tag_id", FieldSpec::integer().primary_key(true)),
        )
        .unwrap();
    registry
        .define(
            ModelDecl::new("PostModel")
                .relation("tags", RelationSpec::many_to_many(tag).through(join))
                .relation(
                    "marks",
                    RelationSpec::many_to_many(tag).backref("marked"),
                ),
        )
        .unwrap();

    // the memoized pair resolves to the explicit join; nothing synthesized
    let synthesized: Vec<_> = registry
        .tables()
        .filter(|table| table.starts_with("m2m_"))
        .collect();
    assert!(synthesized.is_empty());

    let back = registry.model(tag).association_by_name("marked").unwrap();
    assert_eq!(back.via, Some(join));
}

#[test]
fn many_to_many_side_without_single_key_is_rejected() {
    let mut registry = Registry::new();
    let bare = registry
        .define(ModelDecl::new("BareModel").no_default_pk())
        .unwrap();
    let err = registry
        .define(
            ModelDecl::new("ItemModel").relation("bares", RelationSpec::many_to_many(bare)),
        )
        .unwrap_err();
    assert!(err.is_configuration());
}
