//! # Version Ranges
//!
//! This module answers the single question the rest of the crate asks:
//! does a version satisfy a range?
//!
//! Version comparison itself is delegated to the [`semver`] crate.
//! What this module adds is the range dialect used by `package.json` `engines` fields,
//! which differs from Cargo's in a few important ways:
//!
//! - Comparators in a set are separated by whitespace (`>=8.9.0 <12.0.0`), not commas.
//! - Sets can be combined with `||`, and a range matches if any set matches.
//! - Hyphen ranges (`1.2.3 - 2.3.4`) are inclusive on both ends.
//! - A bare version (`1.0.0`) means "exactly this version", not "compatible with".
//! - Versions may carry a leading `v` (as printed by `node --version`).
//!
//! ## Core Components
//!
//! - [`Range`]: A parsed range, made of one [`semver::VersionReq`] per `||` alternative.
//! - [`parse_version`]: Parses a version the way the range dialect does.
//! - [`satisfies`]: The non-failing verdict used by the predicate tier.
//!
//! The dialect parser lives in [`npm`].

use derive_more::Display;
use semver::{Version, VersionReq};
use tracing::debug;

use crate::Error;

pub mod npm;

/// A parsed version range.
///
/// Each alternative is an AND of comparators;
/// the range is satisfied when any alternative is satisfied.
///
/// ```
/// # use envcheck::Range;
/// let range = Range::parse(">=8.9.0 <12.0.0 || ^14").unwrap();
/// assert!(range.satisfied_by(&envcheck::parse_version("10.13.0").unwrap()));
/// assert!(range.satisfied_by(&envcheck::parse_version("14.1.0").unwrap()));
/// assert!(!range.satisfied_by(&envcheck::parse_version("12.0.0").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{raw}")]
pub struct Range {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl Range {
    /// Parse a range in the `engines` dialect.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let alternatives = npm::parse(input)?;
        Ok(Self {
            raw: input.to_string(),
            alternatives,
        })
    }

    /// The range as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The comparator sets, one per `||` alternative.
    pub fn alternatives(&self) -> &[VersionReq] {
        &self.alternatives
    }

    /// Reports whether the version satisfies any alternative of the range.
    ///
    /// Prerelease versions only match an alternative that names a prerelease
    /// of the same `major.minor.patch`, as both `semver` and npm require.
    pub fn satisfied_by(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl std::str::FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a version, tolerating surrounding whitespace and a single leading `v`.
///
/// ```
/// # use envcheck::parse_version;
/// assert_eq!(parse_version("v18.17.0").unwrap(), semver::Version::new(18, 17, 0));
/// assert!(parse_version("18.17").is_err());
/// ```
pub fn parse_version(input: &str) -> Result<Version, Error> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).map_err(|source| Error::ParseVersion {
        version: input.to_string(),
        source,
    })
}

/// Reports whether the version satisfies the range.
///
/// Unparseable versions or ranges do not satisfy anything;
/// this function never fails.
#[tracing::instrument]
pub fn satisfies(version: &str, range: &str) -> bool {
    let version = match parse_version(version) {
        Ok(version) => version,
        Err(err) => {
            debug!("not satisfied: {err}");
            return false;
        }
    };
    match Range::parse(range) {
        Ok(range) => range.satisfied_by(&version),
        Err(err) => {
            debug!("not satisfied: {err}");
            false
        }
    }
}
