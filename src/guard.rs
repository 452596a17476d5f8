//! Argument guards shared by every check.
//!
//! Each guard comes as a pair: a predicate that returns `bool`
//! and an assertion that returns `Ok(true)` or an error naming the argument.

use crate::{Error, Result};

/// Reports whether the value is present and is not an empty string.
///
/// ```
/// # use envcheck::is_non_empty;
/// assert!(is_non_empty(Some("x")));
/// assert!(!is_non_empty(Some("")));
/// assert!(!is_non_empty(None));
/// ```
pub fn is_non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

/// Ensure that the value is present and is not an empty string.
///
/// `name` identifies the argument in the error; it may be empty.
pub fn check_non_empty(value: Option<&str>, name: &str) -> Result<bool> {
    if !is_non_empty(value) {
        return Err(Error::invalid_argument(name));
    }
    Ok(true)
}

/// Reports whether the flag is present and `true`.
pub fn is_true(value: Option<bool>) -> bool {
    value == Some(true)
}

/// Ensure that the flag is present and `true`.
pub fn check_true(value: Option<bool>, name: &str) -> Result<bool> {
    if !is_true(value) {
        return Err(Error::NotTrue {
            name: name.to_string(),
        });
    }
    Ok(true)
}
