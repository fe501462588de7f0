mod common;

use common::{MemoryStore, SeenRequest, engine};
use resmask::{
    error::{ErrorKind, ErrorOrigin},
    prelude::*,
};

fn all_fields() -> FieldMask {
    FieldMask::default()
}

#[test]
fn chained_tokens_walk_every_row_then_end() {
    let engine = engine();
    let store = MemoryStore::accounts(7);
    let base = ListQuery::new()
        .filter("age >= 20 AND active == TRUE")
        .order_by("age desc")
        .page_size(3);

    let mut query = base.clone();
    let mut owners = Vec::new();
    let mut tokens = Vec::new();
    loop {
        let page = engine
            .list(&store, "accounts", &query, &all_fields(), Polarity::Positive)
            .unwrap();
        assert_eq!(page.total_size, Some(7));
        owners.extend(page.items.iter().filter_map(|row| row.get("owner").cloned()));

        if page.next_page_token.is_empty() {
            break;
        }
        tokens.push(page.next_page_token.clone());
        query = base.clone().page_token(page.next_page_token);
    }

    assert_eq!(owners.len(), 7);
    assert_eq!(tokens.len(), 2);
    assert_ne!(tokens[0], tokens[1]);

    let seen = store.seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(
        seen[0],
        SeenRequest {
            filter: Some("(age >= 20 AND active = TRUE)".to_string()),
            order_by: "age DESC".to_string(),
            page_size: 3,
            resumed: false,
        }
    );
    assert!(seen[1].resumed && seen[2].resumed);
}

#[test]
fn list_results_are_projected() {
    let engine = engine();
    let store = MemoryStore::accounts(2);

    let page = engine
        .list(
            &store,
            "accounts",
            &ListQuery::new(),
            &FieldMask::parse("id,owner"),
            Polarity::Positive,
        )
        .unwrap();

    assert!(page.next_page_token.is_empty());
    for row in &page.items {
        assert_eq!(row.keys().collect::<Vec<_>>(), ["id", "owner"]);
    }
}

#[test]
fn changing_the_query_invalidates_the_token() {
    let engine = engine();
    let store = MemoryStore::accounts(5);
    let base = ListQuery::new().filter("age = 21").page_size(2);

    let first = engine
        .list(&store, "accounts", &base, &all_fields(), Polarity::Positive)
        .unwrap();
    let token = first.next_page_token;

    for changed in [
        base.clone().filter("age = 22"),
        base.clone().order_by("owner"),
        base.clone().page_size(3),
    ] {
        let err = engine
            .list(
                &store,
                "accounts",
                &changed.page_token(token.clone()),
                &all_fields(),
                Polarity::Positive,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cursor);
        assert_eq!(err.origin, ErrorOrigin::Cursor);
    }

    // Tokens are bound to their resource too.
    let err = engine
        .translate("account_summaries", &base.page_token(token))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cursor);

    // Rejected requests never reach the store.
    assert_eq!(store.seen.borrow().len(), 1);
}

#[test]
fn store_failures_surface_unchanged() {
    let engine = engine();
    let store = MemoryStore::accounts(4);
    let query = ListQuery::new().page_size(2);

    let first = engine
        .list(&store, "accounts", &query, &all_fields(), Polarity::Positive)
        .unwrap();

    store.stale.set(true);
    let err = engine
        .list(
            &store,
            "accounts",
            &query.clone().page_token(first.next_page_token),
            &all_fields(),
            Polarity::Positive,
        )
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StaleCursor);
    assert_eq!(err.origin, ErrorOrigin::Store);
    assert!(err.message.contains("snapshot expired"));

    store.unavailable.set(true);
    let err = engine
        .list(&store, "accounts", &query, &all_fields(), Polarity::Positive)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreUnavailable);
}

#[test]
fn page_size_limits_come_from_config() {
    let config = EngineConfig::from_toml_str("[list]\ndefault_page_size = 2\nmax_page_size = 4")
        .unwrap();
    let engine = Engine::new(config)
        .unwrap()
        .with(&common::ACCOUNT)
        .unwrap();
    let store = MemoryStore::accounts(3);

    let page = engine
        .list(&store, "accounts", &ListQuery::new(), &all_fields(), Polarity::Positive)
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(!page.next_page_token.is_empty());

    let err = engine
        .translate("accounts", &ListQuery::new().page_size(5))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Query(_)));
}
