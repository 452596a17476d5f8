use std::{collections::BTreeMap, path::Path};

use tracing::{debug, warn};

use crate::{
    Arg, Error, Result,
    manifest::{self, Manifest},
};

/// Expected version ranges by engine name, as declared in a manifest's `engines` field.
///
/// The mapping is read once and never changes afterwards.
/// Looking up an engine that is not declared yields [`Arg::Null`]:
/// there is nothing to check against, which is different from a failed check.
///
/// ```
/// # use envcheck::{Arg, Engines};
/// let engines = Engines::from_json(r#"{ "node": ">=8.9.0" }"#).unwrap();
/// assert_eq!(engines.get("node"), Arg::from(">=8.9.0"));
/// assert_eq!(engines.get("widget"), Arg::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engines(BTreeMap<String, serde_json::Value>);

impl Engines {
    /// Parse the mapping from the JSON text of an `engines` object.
    pub fn from_json(text: &str) -> Result<Self> {
        let parsed = serde_json::from_str(text).map_err(|source| Error::ParseEngines { source })?;
        Ok(Self(parsed))
    }

    /// Read the mapping from the manifest at `path`.
    pub fn from_manifest_path(path: &Path) -> Result<Self> {
        Manifest::read(path).map(Self::from)
    }

    /// Read the mapping from the manifest nearest to `start`.
    ///
    /// If there is no manifest the mapping is empty;
    /// a manifest that exists but can't be read is an error.
    pub fn discover(start: &Path) -> Result<Self> {
        match manifest::find_nearest(start) {
            Some(path) => Self::from_manifest_path(&path),
            None => {
                warn!("no {} found from '{}'", manifest::MANIFEST_FILE, start.display());
                Ok(Self::default())
            }
        }
    }

    /// Look up the expected range for an engine.
    pub fn get(&self, engine: &str) -> Arg<'_> {
        let found = self.0.get(engine).map(Arg::from).unwrap_or(Arg::Null);
        debug!(engine, ?found, "expected range");
        found
    }

    /// Iterate over the declared engine names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Reports whether no engines are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Manifest> for Engines {
    fn from(manifest: Manifest) -> Self {
        Self(manifest.engines)
    }
}

impl<K, V> FromIterator<(K, V)> for Engines
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
                .collect(),
        )
    }
}
