use color_eyre::{Result, eyre::Context};
use envcheck::{Range, check_version, parse_version};
use pretty_assertions::assert_eq;

#[test]
fn error_wrappable_context() -> Result<()> {
    let range = Range::parse(">=8.9.0").context("can wrap")?;
    let version = parse_version("v10.13.0").with_context(|| "can wrap")?;
    assert!(range.satisfied_by(&version));
    assert!(check_version(Some("10.13.0"), Some(">=8.9.0")).context("can wrap")?);
    Ok(())
}

#[test]
fn error_wrapped_message() {
    let err = check_version(Some("0.1.0"), Some("1.0.0"))
        .context("check engines")
        .expect_err("must fail");
    assert_eq!(err.to_string(), "check engines");
    assert_eq!(
        err.root_cause().to_string(),
        "found version '0.1.0', but expected version '1.0.0'"
    );
}
