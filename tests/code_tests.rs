// Host-side tests for share codes, links and query parsing.

#![allow(dead_code)]
mod code {
    include!("../src/core/code.rs");
}

use code::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn generated_codes_have_the_right_length_and_alphabet() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let code = ShareCode::generate(&mut rng);
        assert_eq!(code.as_str().len(), SHARE_CODE_LEN);
        for ch in code.as_str().chars() {
            assert!(
                ch.is_ascii_alphanumeric(),
                "character {ch:?} outside the alphabet"
            );
        }
    }
}

#[test]
fn generated_code_parses_back() {
    let mut rng = StdRng::seed_from_u64(2);
    let code = ShareCode::generate(&mut rng);
    let parsed = ShareCode::parse(code.as_str()).expect("generated code must parse");
    assert_eq!(parsed, code);
}

#[test]
fn wrong_length_is_a_typed_error() {
    assert_eq!(
        ShareCode::parse("abc"),
        Err(ShareCodeError::InvalidLength {
            expected: SHARE_CODE_LEN,
            found: 3
        })
    );
    assert!(ShareCode::parse("abcdefghijk").is_err());
    assert!(ShareCode::parse("").is_err());
}

#[test]
fn invalid_character_reports_its_index() {
    assert_eq!(
        ShareCode::parse("abcd-fghij"),
        Err(ShareCodeError::InvalidCharacter { ch: '-', index: 4 })
    );
}

#[test]
fn share_url_joins_base_and_code() {
    let code = ShareCode::parse("AbCd123xYz").unwrap();
    assert_eq!(
        share_url("https://example.com", &code),
        "https://example.com/?v=AbCd123xYz"
    );
    // trailing slash on the base is tolerated
    assert_eq!(
        share_url("https://example.com/", &code),
        "https://example.com/?v=AbCd123xYz"
    );
}

#[test]
fn query_param_finds_the_code_among_other_parameters() {
    assert_eq!(
        query_param("?v=AbCd123xYz", SHARE_PARAM).as_deref(),
        Some("AbCd123xYz")
    );
    assert_eq!(
        query_param("?utm=x&v=AbCd123xYz&lang=en", "v").as_deref(),
        Some("AbCd123xYz")
    );
    assert_eq!(query_param("v=NoQuestionM", "v").as_deref(), Some("NoQuestionM"));
}

#[test]
fn query_param_misses_are_none() {
    assert_eq!(query_param("", "v"), None);
    assert_eq!(query_param("?x=1&y=2", "v"), None);
    assert_eq!(query_param("?v=", "v"), None, "empty value counts as missing");
}
