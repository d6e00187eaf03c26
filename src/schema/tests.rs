#[cfg(test)]
mod tests {
    use crate::schema::registry::ModelRegistry;
    use crate::schema::types::{
        Descriptor, ExtensionDescriptor, FieldDescriptor, FieldKind, FieldMetadata, ModelDef,
        RawField, RenderCondition, SchemaError, TextDescriptor, TypeExpr, ValidationRule,
        ORDER_UNINDEXED,
    };
    use serde_json::json;

    fn address_model() -> ModelDef {
        ModelDef::new("Address").with_field(RawField::new("zip_code", TypeExpr::Text))
    }

    #[test]
    fn test_derive_basic_model() {
        let mut registry = ModelRegistry::new();
        registry
            .register(
                ModelDef::new("Login")
                    .with_field(RawField::new("username", TypeExpr::Text))
                    .with_field(RawField::new("attempts", TypeExpr::Number)),
            )
            .unwrap();

        let schema = registry.derive("Login").unwrap();
        assert_eq!(schema.name, "Login");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].name(), "username");
        assert_eq!(schema.fields[0].kind(), FieldKind::Text);
        assert_eq!(schema.fields[1].name(), "attempts");
        assert_eq!(schema.fields[1].kind(), FieldKind::Number);
        assert!(matches!(
            schema.fields[0].validation_rules()[0],
            ValidationRule::Required { .. }
        ));
    }

    #[test]
    fn test_derive_not_found() {
        let registry = ModelRegistry::new();
        assert!(matches!(
            registry.derive("Missing"),
            Err(SchemaError::NotFound(_))
        ));
    }

    #[test]
    fn test_unsupported_map_field_is_skipped_in_order() {
        let mut registry = ModelRegistry::new();
        registry
            .register(
                ModelDef::new("Settings")
                    .with_field(RawField::new("first", TypeExpr::Text))
                    .with_field(RawField::new(
                        "lookup",
                        TypeExpr::map(TypeExpr::Text, TypeExpr::Number),
                    ))
                    .with_field(RawField::new("last", TypeExpr::Boolean)),
            )
            .unwrap();

        let schema = registry.derive("Settings").unwrap();
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].name(), "first");
        assert_eq!(schema.fields[1].name(), "last");
    }

    #[test]
    fn test_optional_object_and_number_list() {
        let mut registry = ModelRegistry::new();
        registry.register(address_model()).unwrap();
        registry
            .register(
                ModelDef::new("FormA")
                    .with_field(RawField::new(
                        "address",
                        TypeExpr::optional(TypeExpr::model("Address")),
                    ))
                    .with_field(RawField::new(
                        "numbers",
                        TypeExpr::list(TypeExpr::Number),
                    )),
            )
            .unwrap();

        let schema = registry.derive("FormA").unwrap();

        let address = schema.get_field("address").unwrap().as_object().unwrap();
        assert!(address.inner.rendered);
        assert_eq!(address.model.as_deref(), Some("Address"));
        assert_eq!(address.properties.len(), 1);
        assert_eq!(address.properties[0].name(), "zip_code");
        // Optional type shape, so no unconditional Required rule.
        assert!(address.inner.validation_rules.is_empty());

        let numbers = schema.get_field("numbers").unwrap().as_list().unwrap();
        let item = &numbers.item_definition;
        assert_eq!(item.name(), "numbers_item");
        assert_eq!(item.kind(), FieldKind::Number);
        // List items are never optional merely because the list may be empty.
        assert!(item
            .validation_rules()
            .iter()
            .any(|r| matches!(r, ValidationRule::Required { .. })));
    }

    #[test]
    fn test_enumeration_choices_and_overrides() {
        let mut registry = ModelRegistry::new();
        registry
            .register(
                ModelDef::new("Prefs")
                    .with_field(RawField::new(
                        "theme",
                        TypeExpr::enumeration("Theme", vec![json!("light"), json!("dark")]),
                    ))
                    .with_field(
                        RawField::new(
                            "country",
                            TypeExpr::enumeration("Country", vec![json!("se"), json!("de")]),
                        )
                        .with_metadata(FieldMetadata {
                            choices: Some(vec![json!("se"), json!("de"), json!("no")]),
                            data_source: Some("/api/countries".to_string()),
                            item_value_key: Some("code".to_string()),
                            item_text_key: Some("name".to_string()),
                            ..FieldMetadata::default()
                        }),
                    ),
            )
            .unwrap();

        let schema = registry.derive("Prefs").unwrap();

        let theme = schema.get_field("theme").unwrap().as_enumeration().unwrap();
        assert_eq!(theme.choices, vec![json!("light"), json!("dark")]);
        assert!(theme.data_source.is_none());

        let country = schema
            .get_field("country")
            .unwrap()
            .as_enumeration()
            .unwrap();
        // Explicit choices metadata wins over the declared values.
        assert_eq!(country.choices.len(), 3);
        assert_eq!(country.data_source.as_deref(), Some("/api/countries"));
        assert_eq!(country.item_value_key.as_deref(), Some("code"));
        assert_eq!(country.item_text_key.as_deref(), Some("name"));
    }

    #[test]
    fn test_literal_is_text_and_not_rendered() {
        let mut registry = ModelRegistry::new();
        registry
            .register(
                ModelDef::new("Doc")
                    .with_field(RawField::new("version", TypeExpr::Literal(json!("v2"))))
                    .with_field(
                        RawField::new("revision", TypeExpr::Literal(json!("r1"))).with_metadata(
                            FieldMetadata {
                                rendered: Some(true),
                                ..FieldMetadata::default()
                            },
                        ),
                    ),
            )
            .unwrap();

        let schema = registry.derive("Doc").unwrap();
        let version = schema.get_field("version").unwrap();
        assert_eq!(version.kind(), FieldKind::Text);
        assert!(!version.rendered());
        // Explicit metadata still wins over the computed default.
        assert!(schema.get_field("revision").unwrap().rendered());
    }

    #[test]
    fn test_presentation_metadata_merge() {
        let mut registry = ModelRegistry::new();
        let mut extra = serde_json::Map::new();
        extra.insert("analytics_id".to_string(), json!("f-42"));
        registry
            .register(
                ModelDef::new("Profile")
                    .with_field(
                        RawField::new("name", TypeExpr::Text).with_metadata(FieldMetadata {
                            label: Some("Full name".to_string()),
                            hint: Some("As printed on your id".to_string()),
                            style: Some("wide".to_string()),
                            index: Some(2),
                            extra,
                            ..FieldMetadata::default()
                        }),
                    )
                    .with_field(RawField::new("age", TypeExpr::optional(TypeExpr::Number))),
            )
            .unwrap();

        let schema = registry.derive("Profile").unwrap();
        let name = schema.get_field("name").unwrap();
        assert_eq!(name.label(), Some("Full name"));
        assert_eq!(name.common().hint.as_deref(), Some("As printed on your id"));
        assert_eq!(name.common().style.as_deref(), Some("wide"));
        assert_eq!(name.common().order_index, 2);
        assert_eq!(name.common().metadata.get("analytics_id"), Some(&json!("f-42")));

        // Unindexed fields carry the sentinel placing them last.
        let age = schema.get_field("age").unwrap();
        assert_eq!(age.common().order_index, ORDER_UNINDEXED);
    }

    #[test]
    fn test_render_conditions_carried() {
        let mut registry = ModelRegistry::new();
        registry
            .register(
                ModelDef::new("Order")
                    .with_field(RawField::new("gift", TypeExpr::Boolean))
                    .with_field(
                        RawField::new("gift_note", TypeExpr::optional(TypeExpr::Text))
                            .with_metadata(FieldMetadata {
                                render_conditions: vec![RenderCondition::equals(
                                    "gift",
                                    json!(true),
                                )],
                                ..FieldMetadata::default()
                            }),
                    ),
            )
            .unwrap();

        let schema = registry.derive("Order").unwrap();
        let note = schema.get_field("gift_note").unwrap();
        assert_eq!(note.common().render_conditions.len(), 1);
        assert_eq!(note.common().render_conditions[0].property_path, "gift");
    }

    #[test]
    fn test_render_condition_unknown_sibling_rejected() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(ModelDef::new("Order").with_field(
                RawField::new("note", TypeExpr::Text).with_metadata(FieldMetadata {
                    render_conditions: vec![RenderCondition::any_value("nope")],
                    ..FieldMetadata::default()
                }),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("unknown sibling field 'nope'"));
    }

    #[test]
    fn test_cross_field_targets_must_be_siblings() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(ModelDef::new("Form").with_field(
                RawField::new("b", TypeExpr::optional(TypeExpr::Text)).with_metadata(
                    FieldMetadata {
                        required_if: Some("missing".to_string()),
                        ..FieldMetadata::default()
                    },
                ),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("unknown sibling field 'missing'"));

        let err = registry
            .register(ModelDef::new("Form").with_field(
                RawField::new("b", TypeExpr::Text).with_metadata(FieldMetadata {
                    same_as: Some("b".to_string()),
                    ..FieldMetadata::default()
                }),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("cannot reference its own field"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(
                ModelDef::new("Dup")
                    .with_field(RawField::new("a", TypeExpr::Text))
                    .with_field(RawField::new("a", TypeExpr::Number)),
            )
            .unwrap_err();
        assert!(err.to_string().contains("duplicate field 'a'"));
    }

    #[test]
    fn test_unknown_model_reference_rejected_at_registration() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(
                ModelDef::new("Form").with_field(RawField::new("a", TypeExpr::model("Nowhere"))),
            )
            .unwrap_err();
        assert!(err.to_string().contains("unknown model reference 'Nowhere'"));
        // Nothing from the failed batch is registered.
        assert!(!registry.is_registered("Form"));
    }

    #[test]
    fn test_direct_cycle_rejected() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register_all(vec![
                ModelDef::new("A").with_field(RawField::new("b", TypeExpr::model("B"))),
                ModelDef::new("B").with_field(RawField::new("a", TypeExpr::model("A"))),
            ])
            .unwrap_err();
        assert!(err.to_string().contains("cyclic model reference"));
    }

    #[test]
    fn test_optional_self_reference_is_legal() {
        let mut registry = ModelRegistry::new();
        registry
            .register(
                ModelDef::new("Node")
                    .with_field(RawField::new("value", TypeExpr::Number))
                    .with_field(RawField::new(
                        "parent",
                        TypeExpr::optional(TypeExpr::model("Node")),
                    )),
            )
            .unwrap();

        let schema = registry.derive("Node").unwrap();
        let parent = schema.get_field("parent").unwrap().as_object().unwrap();
        // Re-entry emits the model reference only; consumers expand on
        // demand, bounded by actual data.
        assert_eq!(parent.model.as_deref(), Some("Node"));
        assert!(parent.properties.is_empty());
    }

    #[test]
    fn test_recursion_through_list_is_legal() {
        let mut registry = ModelRegistry::new();
        registry
            .register_all(vec![
                ModelDef::new("Category")
                    .with_field(RawField::new("title", TypeExpr::Text))
                    .with_field(RawField::new(
                        "children",
                        TypeExpr::list(TypeExpr::model("Category")),
                    )),
            ])
            .unwrap();

        let schema = registry.derive("Category").unwrap();
        let children = schema.get_field("children").unwrap().as_list().unwrap();
        let item = children.item_definition.as_object().unwrap();
        assert_eq!(item.model.as_deref(), Some("Category"));
        assert!(item.properties.is_empty());
    }

    #[test]
    fn test_mutual_recursion_through_lists_registers_as_batch() {
        let mut registry = ModelRegistry::new();
        registry
            .register_all(vec![
                ModelDef::new("Author").with_field(RawField::new(
                    "books",
                    TypeExpr::list(TypeExpr::model("Book")),
                )),
                ModelDef::new("Book").with_field(RawField::new(
                    "authors",
                    TypeExpr::list(TypeExpr::model("Author")),
                )),
            ])
            .unwrap();

        let schema = registry.derive("Author").unwrap();
        let books = schema.get_field("books").unwrap().as_list().unwrap();
        let book = books.item_definition.as_object().unwrap();
        assert_eq!(book.properties.len(), 1);
        let authors = book.properties[0].as_list().unwrap();
        let author = authors.item_definition.as_object().unwrap();
        assert_eq!(author.model.as_deref(), Some("Author"));
        assert!(author.properties.is_empty());
    }

    #[test]
    fn test_extension_strategy_is_used() {
        let mut registry = ModelRegistry::new();
        registry.register_extension("address_picker", |_name, _raw, inner| {
            Ok(FieldDescriptor::Text(TextDescriptor { inner }))
        });
        registry
            .register(ModelDef::new("Form").with_field(RawField::new(
                "home",
                TypeExpr::extension("address_picker"),
            )))
            .unwrap();

        let schema = registry.derive("Form").unwrap();
        assert_eq!(schema.fields[0].kind(), FieldKind::Text);
    }

    #[test]
    fn test_extension_without_strategy_derives_generic_descriptor() {
        let mut registry = ModelRegistry::new();
        registry
            .register(ModelDef::new("Form").with_field(RawField::new(
                "widget",
                TypeExpr::extension("color_wheel"),
            )))
            .unwrap();

        let schema = registry.derive("Form").unwrap();
        match &schema.fields[0] {
            FieldDescriptor::Extension(ExtensionDescriptor { kind, .. }) => {
                assert_eq!(kind, "color_wheel");
            }
            other => panic!("expected extension descriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_failure_is_prefixed_with_field_path() {
        let registry = ModelRegistry::new();
        let model = ModelDef::new("AdHoc").with_field(RawField::new(
            "tags",
            TypeExpr::list(TypeExpr::Union(vec![TypeExpr::Number, TypeExpr::Text])),
        ));
        let err = registry.derive_fields(&model).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid field tags:"));
        assert!(message.contains("Invalid field tags_item:"));
    }

    #[test]
    fn test_datetime_default_validated_at_registration() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register(ModelDef::new("Event").with_field(
                RawField::new("starts_at", TypeExpr::DateTime).with_default(json!("tomorrow")),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("not valid RFC 3339"));

        registry
            .register(ModelDef::new("Event").with_field(
                RawField::new("starts_at", TypeExpr::DateTime)
                    .with_default(json!("2026-08-07T12:00:00Z")),
            ))
            .unwrap();
    }

    #[test]
    fn test_derivation_is_fresh_per_call() {
        let mut registry = ModelRegistry::new();
        registry.register(address_model()).unwrap();
        let first = registry.derive("Address").unwrap();
        let second = registry.derive("Address").unwrap();
        assert_eq!(first, second);
    }
}
