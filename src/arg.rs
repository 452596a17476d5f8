use std::borrow::Cow;

use crate::{Error, Result};

/// An argument to a convenience-tier check.
///
/// Convenience checks distinguish three states that a plain `Option` can't:
/// - [`Arg::Default`]: the caller did not say; the check resolves the value
///   from the host or the engines mapping at call time.
/// - [`Arg::Null`]: the caller explicitly has no value; the check has nothing to compare
///   and reports `false` instead of failing.
/// - [`Arg::Text`]: a value to check.
///
/// Values taken from untyped sources (such as a `package.json`) may also be
/// [`Arg::Invalid`], which every check rejects with [`Error::InvalidType`]
/// before any comparison is attempted.
///
/// ```
/// # use envcheck::Arg;
/// assert_eq!(Arg::from("1.0.0"), Arg::Text("1.0.0".into()));
/// assert_eq!(Arg::from(None::<&str>), Arg::Null);
/// assert_eq!(Arg::from(&serde_json::json!(8)), Arg::Invalid { found: "number" });
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Resolve the value from the check's default source.
    #[default]
    Default,

    /// No value.
    Null,

    /// A text value.
    Text(Cow<'a, str>),

    /// A value that is present but is not text.
    Invalid {
        /// The kind of value that was provided.
        found: &'static str,
    },
}

impl<'a> Arg<'a> {
    /// Reports whether the argument carries a value of any kind.
    pub fn is_present(&self) -> bool {
        matches!(self, Arg::Text(_) | Arg::Invalid { .. })
    }

    /// Replace [`Arg::Default`] with the value produced by `default`.
    /// Any other argument is returned unchanged.
    pub fn or_else(self, default: impl FnOnce() -> Arg<'a>) -> Arg<'a> {
        match self {
            Arg::Default => default(),
            other => other,
        }
    }

    /// Replace [`Arg::Default`] with [`Arg::Null`].
    pub fn or_null(self) -> Arg<'a> {
        self.or_else(|| Arg::Null)
    }

    /// Resolve the argument into text, or `None` if there is nothing to check.
    ///
    /// Unresolved defaults are treated as `None`.
    /// Fails with [`Error::InvalidType`] naming `name` if the argument is not text.
    pub fn into_text(self, name: &str) -> Result<Option<Cow<'a, str>>> {
        match self {
            Arg::Default | Arg::Null => Ok(None),
            Arg::Text(text) => Ok(Some(text)),
            Arg::Invalid { found } => Err(Error::not_a_string(name, found)),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Text(Cow::Borrowed(value))
    }
}

impl From<String> for Arg<'_> {
    fn from(value: String) -> Self {
        Arg::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Text(Cow::Borrowed(value.as_str()))
    }
}

impl<'a, T> From<Option<T>> for Arg<'a>
where
    T: Into<Arg<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Arg::Null)
    }
}

impl<'a> From<&'a serde_json::Value> for Arg<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Arg::Null,
            Value::String(s) => Arg::Text(Cow::Borrowed(s.as_str())),
            Value::Bool(_) => Arg::Invalid { found: "boolean" },
            Value::Number(_) => Arg::Invalid { found: "number" },
            Value::Array(_) => Arg::Invalid { found: "array" },
            Value::Object(_) => Arg::Invalid { found: "object" },
        }
    }
}
