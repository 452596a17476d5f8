use assert_matches::assert_matches;
use simple_test_case::test_case;

use envcheck::{Error, Range, check_version, parse_version};

#[test_case("1.2.3", ">=1.2.3 <2.0.0", true; "lower_bound_inclusive")]
#[test_case("2.0.0", ">=1.2.3 <2.0.0", false; "upper_bound_exclusive")]
#[test_case("1.5.0", "1.2.3 - 1.5", true; "hyphen_partial_upper")]
#[test_case("1.6.0", "1.2.3 - 1.5", false; "hyphen_past_upper")]
#[test_case("1.2.9", "~1.2.3", true; "tilde_patch")]
#[test_case("1.3.0", "~1.2.3", false; "tilde_minor")]
#[test_case("0.2.5", "^0.2.3", true; "caret_zero_major")]
#[test_case("0.3.0", "^0.2.3", false; "caret_zero_major_bump")]
#[test_case("3.0.0", "*", true; "any")]
#[test_case("3.0.0", "", true; "empty_any")]
#[test_case("1.2.3-beta.1", ">=1.0.0", false; "prerelease_excluded")]
#[test_case("1.2.3-beta.2", ">=1.2.3-beta.1", true; "prerelease_same_tuple")]
#[test]
fn range_semantics(version: &str, range: &str, expected: bool) {
    let range = Range::parse(range).expect("must parse range");
    let version = parse_version(version).expect("must parse version");
    pretty_assertions::assert_eq!(range.satisfied_by(&version), expected, "{version} in {range}");
}

#[test]
fn range_keeps_raw_text() {
    let range: Range = ">=8.9.0 <12.0.0 || ^14".parse().expect("must parse");
    pretty_assertions::assert_eq!(range.to_string(), ">=8.9.0 <12.0.0 || ^14");
    pretty_assertions::assert_eq!(range.as_str(), ">=8.9.0 <12.0.0 || ^14");
    pretty_assertions::assert_eq!(range.alternatives().len(), 2);
}

#[test_case(">=>1"; "double_operator")]
#[test_case("1.2.3 -"; "dangling_hyphen")]
#[test_case("not a range"; "words")]
#[test]
fn malformed_ranges(range: &str) {
    assert_matches!(Range::parse(range), Err(Error::ParseRange { .. }));
    assert_matches!(
        check_version(Some("1.0.0"), Some(range)),
        Err(Error::VersionMismatch { .. })
    );
}

#[test_case("1.0"; "partial")]
#[test_case("latest"; "word")]
#[test]
fn malformed_versions(version: &str) {
    assert_matches!(parse_version(version), Err(Error::ParseVersion { .. }));
    assert_matches!(
        check_version(Some(version), Some("*")),
        Err(Error::VersionMismatch { .. })
    );
}
