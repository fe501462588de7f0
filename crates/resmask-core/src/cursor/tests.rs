use super::{
    token::{MAX_PAGE_TOKEN_BYTES, token_bytes, token_text},
    *,
};
use crate::query::{ast::FilterExpr, order::OrderTerm, parse_filter};

fn signature(filter: &str, page_size: u32) -> QuerySignature {
    let expr: FilterExpr = parse_filter(filter).expect("fixture filter should parse");
    QuerySignature::compute("accounts", Some(&expr), &[OrderTerm::asc("owner")], page_size)
}

#[test]
fn token_text_rejects_blank_and_odd_input() {
    assert_eq!(token_bytes(""), Err(TokenTextError::Blank));
    assert_eq!(token_bytes("  \n\t"), Err(TokenTextError::Blank));
    assert_eq!(token_bytes("abc"), Err(TokenTextError::OddLength { len: 3 }));
}

#[test]
fn token_text_reports_the_first_bad_character() {
    assert_eq!(token_bytes("0x"), Err(TokenTextError::NotHex { position: 2 }));
    assert_eq!(token_bytes("ab+f"), Err(TokenTextError::NotHex { position: 3 }));
    assert_eq!(token_bytes("é00"), Err(TokenTextError::NotHex { position: 1 }));
}

#[test]
fn token_text_is_bounded_by_the_payload_limit() {
    let accepted = "0f".repeat(MAX_PAGE_TOKEN_BYTES);
    assert_eq!(token_bytes(&accepted).unwrap().len(), MAX_PAGE_TOKEN_BYTES);

    let rejected = format!("{accepted}0f");
    assert_eq!(
        token_bytes(&rejected),
        Err(TokenTextError::Oversized {
            len: MAX_PAGE_TOKEN_BYTES * 2 + 2,
            max: MAX_PAGE_TOKEN_BYTES * 2,
        })
    );
}

#[test]
fn token_text_reads_either_case_and_writes_lowercase() {
    assert_eq!(token_bytes(" 0aFf10 ").unwrap(), vec![0x0a, 0xff, 0x10]);
    assert_eq!(token_text(&[0x00, 0x0a, 0xff]), "000aff");
}

#[test]
fn page_token_survives_encoding() {
    let token = PageToken::new(signature("age > 3", 20), 40, b"row:17".to_vec());
    let text = token.encode().unwrap();

    assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    let decoded = PageToken::decode(&text).unwrap();
    assert_eq!(decoded, token);
    assert_eq!(decoded.resume(), b"row:17");
    assert_eq!(decoded.initial_offset(), 40);
}

#[test]
fn signature_follows_the_canonical_filter() {
    assert_eq!(signature("age == 3", 20), signature("age   =  3", 20));
    assert_eq!(signature("age != 3", 20), signature("age <> 3", 20));
    assert_ne!(signature("age = 3", 20), signature("age = 4", 20));
    assert_ne!(signature("age = 3", 20), signature("age = 3", 21));
}

#[test]
fn signature_covers_resource_and_order() {
    let base = QuerySignature::compute("accounts", None, &[OrderTerm::asc("owner")], 10);

    assert_ne!(
        base,
        QuerySignature::compute("users", None, &[OrderTerm::asc("owner")], 10)
    );
    assert_ne!(
        base,
        QuerySignature::compute("accounts", None, &[OrderTerm::desc("owner")], 10)
    );
    assert_ne!(base, QuerySignature::compute("accounts", None, &[], 10));
    assert_eq!(base.as_hex().len(), 64);
}

#[test]
fn verify_rejects_other_queries_and_offsets() {
    let sig = signature("age > 3", 20);
    let token = PageToken::new(sig, 0, vec![1, 2, 3]);

    token.verify(sig, 0).unwrap();
    assert!(matches!(
        token.verify(signature("age > 4", 20), 0),
        Err(CursorError::SignatureMismatch { .. })
    ));
    assert_eq!(
        token.verify(sig, 5),
        Err(CursorError::OffsetMismatch {
            expected: 5,
            actual: 0,
        })
    );
}

#[test]
fn decode_rejects_unknown_versions_and_garbage() {
    let token = PageToken::new(signature("age > 3", 20), 0, Vec::new());
    let future = token.encode_with_version(PAGE_TOKEN_VERSION + 1).unwrap();
    assert_eq!(
        PageToken::decode(&future),
        Err(CursorError::UnsupportedVersion {
            version: PAGE_TOKEN_VERSION + 1,
        })
    );

    assert!(matches!(
        PageToken::decode("deadbeef"),
        Err(CursorError::Decode(_))
    ));
    assert!(matches!(
        PageToken::decode("not-hex!"),
        Err(CursorError::Text(TokenTextError::NotHex { .. }))
    ));
}
