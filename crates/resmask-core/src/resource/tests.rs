use crate::{
    resource::{FieldState, FieldValue, ListValue, Resource},
    test_fixtures::{ACCOUNT, USER},
    validate::ValidationError,
    value::Value,
};

fn names(resource: &Resource) -> Vec<&'static str> {
    resource.specified_fields().map(|f| f.name()).collect()
}

#[test]
fn new_resource_has_no_specified_fields() {
    let user = Resource::new(&USER);

    assert!(user.is_empty());
    assert!(names(&user).is_empty());
    assert_eq!(user.get("nickname"), Some(&FieldState::Unspecified));
    assert_eq!(user.get("missing"), None);
}

#[test]
fn set_rejects_null_on_non_nullable_field() {
    let mut user = Resource::new(&USER);
    let err = user
        .set("id", FieldState::Null)
        .expect_err("id is not nullable");

    assert_eq!(
        err,
        ValidationError::NullNotAllowed {
            field: "id".to_string()
        }
    );
    assert!(user.is_empty(), "rejected write must not mutate");
}

#[test]
fn set_rejects_wrong_cardinality_and_kind() {
    let mut user = Resource::new(&USER);

    let err = user
        .set("comments", FieldState::value("hi"))
        .expect_err("comments is repeated");
    assert!(matches!(err, ValidationError::CardinalityMismatch { .. }));

    let err = user
        .set("nickname", FieldState::value(7_i64))
        .expect_err("nickname is text");
    assert!(matches!(err, ValidationError::KindMismatch { ref field, .. } if field == "nickname"));

    let err = user
        .set("nope", FieldState::Null)
        .expect_err("unknown field");
    assert_eq!(err.field(), "nope");
}

#[test]
fn set_rejects_unknown_enum_member() {
    let mut account = Resource::new(&ACCOUNT);
    let err = account
        .set("status", FieldState::value(Value::enum_member("PAUSED")))
        .expect_err("PAUSED is not declared");

    assert_eq!(
        err,
        ValidationError::UnknownEnumMember {
            field: "status".to_string(),
            member: "PAUSED".to_string(),
        }
    );
}

#[test]
fn presence_view_skips_unspecified_and_unset_empty_lists() {
    let user = Resource::new(&USER)
        .with("nickname", FieldState::Null)
        .and_then(|r| {
            r.with(
                "comments",
                FieldState::Specified(FieldValue::List(ListValue::new(vec![], false))),
            )
        })
        .expect("valid states");

    assert_eq!(names(&user), vec!["nickname"]);
    assert!(user.has("nickname"));
    assert!(user.is_null("nickname"));
    assert!(!user.has("comments"));
    assert!(!user.has("id"));
    assert!(!user.is_null("unknown"));
}

#[test]
fn presence_view_includes_explicitly_set_empty_list_with_flag() {
    let user = Resource::new(&USER)
        .with(
            "comments",
            FieldState::Specified(FieldValue::List(ListValue::cleared())),
        )
        .expect("valid state");

    let entries: Vec<_> = user.specified_fields().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), "comments");
    assert_eq!(entries[0].explicitly_set(), Some(true));
}

#[test]
fn presence_view_keeps_non_empty_list_regardless_of_flag() {
    let user = Resource::new(&USER)
        .with(
            "comments",
            FieldState::Specified(FieldValue::List(ListValue::new(
                vec![Value::text("hi")],
                false,
            ))),
        )
        .expect("valid state");

    let entry = user
        .specified_fields()
        .next()
        .expect("non-empty list is specified");
    assert_eq!(entry.explicitly_set(), Some(false));
    assert!(user.has("comments"));
}

#[test]
fn presence_view_is_restartable_and_ordered_by_model() {
    let user = Resource::new(&USER)
        .with("comments", FieldState::list(["a"]))
        .and_then(|r| r.with("id", FieldState::value("u1")))
        .expect("valid states");

    let view = user.specified_fields();
    let first: Vec<_> = view.clone().map(|f| f.name()).collect();
    let second: Vec<_> = view.map(|f| f.name()).collect();

    assert_eq!(first, vec!["id", "comments"]);
    assert_eq!(first, second);
    assert_eq!(names(&user), first);
}

#[test]
fn zero_values_are_specified() {
    let account = Resource::new(&ACCOUNT)
        .with("age", FieldState::value(0_i64))
        .and_then(|r| r.with("active", FieldState::value(false)))
        .and_then(|r| r.with("owner", FieldState::value("")))
        .expect("valid states");

    assert_eq!(names(&account), vec!["owner", "age", "active"]);
}
