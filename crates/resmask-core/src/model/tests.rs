use super::*;
use crate::{
    model::field::FieldKind,
    test_fixtures::{ACCOUNT, ACCOUNT_SUMMARY, USER, USER_UPDATE},
    value::Value,
};

fn text_value() -> Value {
    Value::text("x")
}

#[test]
fn fixture_models_are_valid() {
    for model in [&USER, &USER_UPDATE, &ACCOUNT, &ACCOUNT_SUMMARY] {
        model.validate().unwrap();
    }
}

#[test]
fn duplicate_fields_are_rejected() {
    static MODEL: ResourceModel = ResourceModel {
        path: "tests::Dup",
        name: "dups",
        backing: Backing::Table,
        fields: &[
            FieldModel::required("a", FieldKind::Int),
            FieldModel::nullable("a", FieldKind::Int),
        ],
    };

    assert_eq!(
        MODEL.validate(),
        Err(ModelError::DuplicateField {
            resource: "dups",
            field: "a",
        })
    );
}

#[test]
fn suffix_collisions_are_rejected() {
    // `x_` as a plain scalar collides with the value key of nullable `x`.
    static MODEL: ResourceModel = ResourceModel {
        path: "tests::Collide",
        name: "collide",
        backing: Backing::Table,
        fields: &[
            FieldModel::nullable("x", FieldKind::Text),
            FieldModel::required("x_", FieldKind::Text),
        ],
    };

    assert_eq!(
        MODEL.validate(),
        Err(ModelError::WireKeyCollision {
            resource: "collide",
            key: "x_".to_string(),
            first: "x",
            second: "x_",
        })
    );
}

#[test]
fn set_flag_collision_is_rejected() {
    static MODEL: ResourceModel = ResourceModel {
        path: "tests::SetCollide",
        name: "set_collide",
        backing: Backing::Table,
        fields: &[
            FieldModel::repeated("tags", FieldKind::Text),
            FieldModel::required("tags_set", FieldKind::Bool),
        ],
    };

    assert!(matches!(
        MODEL.validate(),
        Err(ModelError::WireKeyCollision { ref key, .. }) if key == "tags_set"
    ));
}

#[test]
fn invalid_defaults_are_rejected() {
    static NULL_ON_SCALAR: ResourceModel = ResourceModel {
        path: "tests::NullScalar",
        name: "null_scalar",
        backing: Backing::Table,
        fields: &[FieldModel::required("a", FieldKind::Int).with_default(FieldDefault::Null)],
    };
    static LIST_ON_SCALAR: ResourceModel = ResourceModel {
        path: "tests::ListScalar",
        name: "list_scalar",
        backing: Backing::Table,
        fields: &[FieldModel::nullable("a", FieldKind::Int).with_default(FieldDefault::EmptyList)],
    };
    static WRONG_KIND: ResourceModel = ResourceModel {
        path: "tests::WrongKind",
        name: "wrong_kind",
        backing: Backing::Table,
        fields: &[FieldModel::required("a", FieldKind::Int)
            .with_default(FieldDefault::Value(text_value))],
    };

    for model in [&NULL_ON_SCALAR, &LIST_ON_SCALAR, &WRONG_KIND] {
        assert!(matches!(
            model.validate(),
            Err(ModelError::InvalidDefault { field: "a", .. })
        ));
    }
}

#[test]
fn enum_domains_must_be_non_empty_and_unique() {
    static EMPTY: ResourceModel = ResourceModel {
        path: "tests::EmptyEnum",
        name: "empty_enum",
        backing: Backing::Table,
        fields: &[FieldModel::required(
            "state",
            FieldKind::Enum {
                path: "tests::State",
                variants: &[],
            },
        )],
    };
    static DUPLICATE: ResourceModel = ResourceModel {
        path: "tests::DupEnum",
        name: "dup_enum",
        backing: Backing::Table,
        fields: &[FieldModel::required(
            "state",
            FieldKind::Enum {
                path: "tests::State",
                variants: &["ON", "OFF", "ON"],
            },
        )],
    };

    assert_eq!(
        EMPTY.validate(),
        Err(ModelError::EmptyEnum {
            resource: "empty_enum",
            field: "state",
        })
    );
    assert_eq!(
        DUPLICATE.validate(),
        Err(ModelError::DuplicateEnumMember {
            resource: "dup_enum",
            field: "state",
            member: "ON",
        })
    );
}

#[test]
fn keyword_field_names_are_rejected() {
    static MODEL: ResourceModel = ResourceModel {
        path: "tests::Keywords",
        name: "keywords",
        backing: Backing::Table,
        fields: &[
            FieldModel::required("title", FieldKind::Text),
            FieldModel::required("Desc", FieldKind::Text),
        ],
    };

    assert_eq!(
        MODEL.validate(),
        Err(ModelError::ReservedFieldName {
            resource: "keywords",
            field: "Desc",
        })
    );

    for word in ["match", "NULL", "select", "between"] {
        assert!(crate::query::is_keyword(word), "{word}");
    }
    assert!(!crate::query::is_keyword("description"));
}

#[test]
fn empty_names_are_rejected() {
    static NAMELESS: ResourceModel = ResourceModel {
        path: "tests::Nameless",
        name: "",
        backing: Backing::View,
        fields: &[],
    };

    assert_eq!(
        NAMELESS.validate(),
        Err(ModelError::EmptyResourceName {
            path: "tests::Nameless",
        })
    );
}

#[test]
fn field_lookup_follows_declaration_order() {
    assert_eq!(ACCOUNT.field_index("owner"), Some(1));
    assert_eq!(ACCOUNT.field("missing").map(|f| f.name), None);
    assert_eq!(
        USER.field_names().collect::<Vec<_>>(),
        ["id", "nickname", "comments"]
    );
    assert!(USER.same_as(&USER));
    assert!(!USER.same_as(&USER_UPDATE));
}
