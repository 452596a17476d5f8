//! Project manifests (`package.json`).
//!
//! Only the fields this crate reads are modeled;
//! everything else in the manifest is ignored.

use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// The file name of a project manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// The fields of a `package.json` that checks depend on.
///
/// Values are kept untyped so that a wrongly typed field surfaces as
/// [`Error::InvalidType`] when it is used, rather than failing the whole parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    /// The module system declared for the folder (`"module"` or `"commonjs"`).
    #[serde(rename = "type", default)]
    pub module_type: Option<serde_json::Value>,

    /// Expected version ranges by engine name.
    #[serde(default)]
    pub engines: BTreeMap<String, serde_json::Value>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    /// `path` is only used to describe errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| Error::ParseManifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the manifest at `path`.
    #[tracing::instrument]
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::parse(&text, path)
    }
}

/// Find the manifest governing `start`: the `package.json` in `start`
/// or in the closest of its ancestors.
///
/// `start` may be a file or a directory. Relative paths are resolved against
/// the current directory first, so the search continues above it.
#[tracing::instrument]
pub fn find_nearest(start: &Path) -> Option<PathBuf> {
    let start = resolve(start);
    let found = start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file());
    debug!(?found, "nearest manifest");
    found
}

/// Make `path` absolute and drop `.` and `..` components without touching the filesystem.
///
/// An empty path is the current directory.
fn resolve(path: &Path) -> PathBuf {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute = std::path::absolute(path).unwrap_or_else(|err| {
        debug!("resolve '{}': {err}", path.display());
        path.to_path_buf()
    });

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
