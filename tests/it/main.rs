//! Tests for the crate.

use simple_test_case::test_case;

use envcheck::*;

mod checker;
mod error;
mod module;
mod version;

static_assertions::assert_impl_all!(Error: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(Checker<SystemHost>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Range: Send, Sync, std::str::FromStr);

#[test_case("1.0.0", "1.0.0"; "exact")]
#[test_case("10.13.0", ">=8.9.0 <12.0.0"; "bounded")]
#[test_case("v18.19.0", "^18"; "node_style_version")]
#[test_case("5.1.0", "4.x || 5.x"; "alternatives")]
#[test]
fn check_version_accepts(version: &str, range: &str) {
    assert!(is_version_compatible(Some(version), Some(range)));
    assert!(check_version(Some(version), Some(range)).expect("must check"));
}

#[test]
fn predicate_and_assertion_disagree_on_absent_input() {
    assert!(!is_version_compatible(None, None));
    let err = check_version(None, None).expect_err("must fail");
    assert!(matches!(err, Error::InvalidArgument { .. }), "{err}");
}

#[test_case(Some("x"), true; "text")]
#[test_case(Some(""), false; "empty")]
#[test_case(None, false; "missing")]
#[test]
fn non_empty_text(value: Option<&str>, expected: bool) {
    assert_eq!(is_non_empty(value), expected);
    assert_eq!(check_non_empty(value, "value").is_ok(), expected);
}

#[test]
fn flags() {
    assert!(is_true(Some(true)));
    assert!(!is_true(Some(false)));
    assert!(!is_true(None));
    assert!(check_true(Some(true), "ready").expect("must check"));
    let err = check_true(Some(false), "ready").expect_err("must fail");
    assert_eq!(err.to_string(), "the flag 'ready' must be true");
}
