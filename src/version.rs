//! Version compatibility: the predicate and the assertion.
//!
//! [`is_version_compatible`] never fails: missing, empty, or unparseable
//! inputs are simply "not compatible".
//! [`check_version`] is the enforcing form: it rejects missing inputs as
//! [`Error::InvalidArgument`] and a failed comparison as [`Error::VersionMismatch`].

use tracing::debug;

use crate::{Error, Result, check_non_empty, constraint, is_non_empty};

/// Reports whether the version satisfies the range.
///
/// ```
/// # use envcheck::is_version_compatible;
/// assert!(is_version_compatible(Some("10.13.0"), Some(">=8.9.0 <12.0.0")));
/// assert!(!is_version_compatible(Some("10.13.0"), Some(">=12.0.0")));
/// assert!(!is_version_compatible(None, None));
/// ```
pub fn is_version_compatible(version: Option<&str>, range: Option<&str>) -> bool {
    match (version, range) {
        (Some(version), Some(range)) if is_non_empty(Some(version)) && is_non_empty(Some(range)) => {
            constraint::satisfies(version, range)
        }
        _ => false,
    }
}

/// Ensure that the version satisfies the range.
///
/// ```
/// # use envcheck::{Error, check_version};
/// assert!(check_version(Some("1.0.0"), Some("1.0.0")).unwrap());
/// assert!(matches!(
///     check_version(Some("0.1.0"), Some("1.0.0")),
///     Err(Error::VersionMismatch { .. })
/// ));
/// assert!(matches!(
///     check_version(None, None),
///     Err(Error::InvalidArgument { .. })
/// ));
/// ```
pub fn check_version(version: Option<&str>, range: Option<&str>) -> Result<bool> {
    check_non_empty(version, "version")?;
    check_non_empty(range, "expected_version")?;

    let (version, range) = (version.unwrap_or_default(), range.unwrap_or_default());
    if !is_version_compatible(Some(version), Some(range)) {
        debug!("version '{version}' does not satisfy '{range}'");
        return Err(Error::version_mismatch(version, range));
    }
    Ok(true)
}
