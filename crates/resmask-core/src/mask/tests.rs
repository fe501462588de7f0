use super::*;
use crate::{
    resource::{FieldValue, ListValue},
    test_fixtures::{ACCOUNT, USER},
};

fn bob() -> Resource {
    Resource::new(&USER)
        .with("id", FieldState::value("u1"))
        .unwrap()
        .with("nickname", FieldState::value("Bob"))
        .unwrap()
        .with("comments", FieldState::list(["hi"]))
        .unwrap()
}

fn names(resource: &Resource) -> Vec<&'static str> {
    resource.specified_fields().map(|f| f.name()).collect()
}

#[test]
fn empty_mask_selects_everything() {
    let resource = bob();
    let empty = Resource::new(&USER);

    assert_eq!(project(&resource, &empty, Polarity::Positive), resource);
    assert_eq!(project(&resource, &empty, Polarity::Negative), resource);
}

#[test]
fn positive_mask_keeps_only_masked_fields() {
    let mask = Resource::new(&USER)
        .with("nickname", FieldState::value(""))
        .unwrap();

    let projected = project(&bob(), &mask, Polarity::Positive);
    assert_eq!(names(&projected), ["nickname"]);
    assert_eq!(projected.get("nickname"), Some(&FieldState::value("Bob")));
}

#[test]
fn negative_mask_drops_masked_fields() {
    let mask = Resource::new(&USER)
        .with("nickname", FieldState::Null)
        .unwrap();

    let projected = project(&bob(), &mask, Polarity::Negative);
    assert_eq!(names(&projected), ["id", "comments"]);
}

#[test]
fn presence_selects_not_value() {
    // A null or an explicitly cleared list in the mask still selects.
    let mask = Resource::new(&USER)
        .with("nickname", FieldState::Null)
        .unwrap()
        .with(
            "comments",
            FieldState::Specified(FieldValue::List(ListValue::cleared())),
        )
        .unwrap();

    let projected = project(&bob(), &mask, Polarity::Positive);
    assert_eq!(names(&projected), ["nickname", "comments"]);
    assert_eq!(projected.get("comments"), Some(&FieldState::list(["hi"])));
}

#[test]
fn positive_and_negative_partition_the_specified_set() {
    let resource = bob();
    let mask = FieldMask::from_names(["id", "comments"]);

    let kept = project_fields(&resource, &mask, Polarity::Positive);
    let dropped = project_fields(&resource, &mask, Polarity::Negative);

    let mut union = names(&kept);
    union.extend(names(&dropped));
    union.sort_unstable();
    let mut all = names(&resource);
    all.sort_unstable();

    assert_eq!(union, all);
    assert!(names(&kept).iter().all(|n| !dropped.has(n)));
}

#[test]
fn unknown_mask_names_are_ignored() {
    let mask = FieldMask::from_names(["nickname", "shoe_size"]);
    let projected = project_fields(&bob(), &mask, Polarity::Positive);
    assert_eq!(names(&projected), ["nickname"]);

    // A mask built on another model selects by name.
    let foreign = Resource::new(&ACCOUNT)
        .with("owner", FieldState::value("ann"))
        .unwrap();
    let projected = project(&bob(), &foreign, Polarity::Positive);
    assert!(projected.is_empty());
}

#[test]
fn projection_does_not_touch_the_input() {
    let resource = bob();
    let before = resource.clone();

    let _ = project_fields(&resource, &FieldMask::parse("id"), Polarity::Positive);
    assert_eq!(resource, before);
}

#[test]
fn parse_reads_rest_field_lists() {
    let mask = FieldMask::parse(" id, nickname ,,");
    assert_eq!(mask.len(), 2);
    assert!(mask.contains("id"));
    assert!(mask.contains("nickname"));
    assert!(FieldMask::parse("").is_empty());
}
