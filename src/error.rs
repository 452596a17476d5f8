use std::path::PathBuf;

use thiserror::Error;

/// Shorthand for results returned by this library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Records all errors reported by this library.
///
/// Assertion-tier checks report their failures through the
/// `InvalidArgument`, `VersionMismatch` and `Not*` variants;
/// the remaining variants describe failures of the host or of the inputs it provides.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An argument was present but was not of the expected kind,
    /// for example an `engines` entry declared as a number.
    #[error("argument '{name}' must be a {expected}, got {found}")]
    InvalidType {
        /// The name of the argument.
        name: String,

        /// The kind of value that was expected.
        expected: &'static str,

        /// The kind of value that was provided.
        found: &'static str,
    },

    /// A required text argument was missing or empty.
    #[error("the string '{name}' must be not empty")]
    InvalidArgument {
        /// The name of the argument.
        name: String,
    },

    /// The version was well formed but did not satisfy the expected range.
    #[error("found version '{found}', but expected version '{expected}'")]
    VersionMismatch {
        /// The version that was checked.
        found: String,

        /// The range it was checked against.
        expected: String,
    },

    /// The environment variable is not defined.
    #[error("the environment variable '{name}' must be defined")]
    EnvVarUndefined {
        /// The name of the variable.
        name: String,
    },

    /// The mode variable is not set to production.
    #[error("the environment variable '{name}' must be 'production', got {found:?}")]
    NotProductionMode {
        /// The name of the mode variable.
        name: String,

        /// The value it currently holds, if any.
        found: Option<String>,
    },

    /// A boolean flag was not `true`.
    #[error("the flag '{name}' must be true")]
    NotTrue {
        /// The name of the flag.
        name: String,
    },

    /// The path is not an ES module.
    #[error("'{}' is not an ES module", path.display())]
    NotModule {
        /// The file or folder that was inspected.
        path: PathBuf,
    },

    /// The source file does not run in strict mode.
    #[error("'{}' does not run in strict mode", path.display())]
    NotStrictMode {
        /// The file that was inspected.
        path: PathBuf,
    },

    /// The range could not be parsed.
    #[error("parse range '{range}': {message}")]
    ParseRange {
        /// The range originally provided to the parser.
        range: String,

        /// Describes the parse failure.
        message: String,
    },

    /// The version could not be parsed.
    #[error("parse version '{version}': {source}")]
    ParseVersion {
        /// The version originally provided to the parser.
        version: String,

        /// The cause of the error.
        source: semver::Error,
    },

    /// A project manifest could not be parsed.
    #[error("parse manifest '{}': {source}", path.display())]
    ParseManifest {
        /// The manifest that was read.
        path: PathBuf,

        /// The cause of the error.
        source: serde_json::Error,
    },

    /// An `engines` mapping given as JSON text could not be parsed.
    #[error("parse engines: {source}")]
    ParseEngines {
        /// The cause of the error.
        source: serde_json::Error,
    },

    /// Reading from the filesystem failed.
    #[error("read '{}': {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,

        /// The cause of the error.
        source: std::io::Error,
    },

    /// The host does not provide this information.
    #[error("unsupported on this host: {what}")]
    Unsupported {
        /// The information that was requested.
        what: &'static str,
    },
}

impl Error {
    /// Create an [`Error::InvalidArgument`] error.
    pub fn invalid_argument(name: impl Into<String>) -> Self {
        Self::InvalidArgument { name: name.into() }
    }

    /// Create an [`Error::InvalidType`] error for a value expected to be a string.
    pub fn not_a_string(name: impl Into<String>, found: &'static str) -> Self {
        Self::InvalidType {
            name: name.into(),
            expected: "string",
            found,
        }
    }

    /// Create an [`Error::VersionMismatch`] error.
    pub fn version_mismatch(found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::VersionMismatch {
            found: found.into(),
            expected: expected.into(),
        }
    }

    /// Create an [`Error::Io`] error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Reports whether this error is a type error.
    /// Predicates surface only this kind of error.
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::InvalidType { .. })
    }
}
