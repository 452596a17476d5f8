//! # Module Type Detection
//!
//! Classifies JavaScript files and folders as ES modules or CommonJS,
//! following the rules `node` applies when loading them:
//!
//! 1. A file extension that names a module system wins:
//!    `.mjs`/`.mts` are always ES modules and `.cjs`/`.cts` are always CommonJS.
//! 2. Otherwise the nearest `package.json` decides: `"type": "module"` means ES module,
//!    and any other value (or no value, or no manifest at all) means CommonJS.
//!
//! Rule 1 applies even when it contradicts rule 2:
//! an `.mjs` file inside a folder without a `type` field is still an ES module.

use std::path::Path;

use strum::{AsRefStr, Display, EnumString};
use tracing::warn;

use crate::{
    Error, Result,
    manifest::{self, Manifest},
};

/// The module system a file is loaded with.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr,
)]
pub enum ModuleKind {
    /// ECMAScript modules (`import`/`export`).
    #[strum(serialize = "module")]
    Module,

    /// CommonJS (`require`/`module.exports`); the default.
    #[default]
    #[strum(serialize = "commonjs")]
    CommonJs,
}

impl ModuleKind {
    /// The module system implied by a file extension, if the extension names one.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "mjs" | "mts" => Some(Self::Module),
            "cjs" | "cts" => Some(Self::CommonJs),
            _ => None,
        }
    }

    /// The module system declared by a manifest's `type` field.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        manifest
            .module_type
            .as_ref()
            .and_then(|kind| kind.as_str())
            .and_then(|kind| kind.parse().ok())
            .unwrap_or_default()
    }
}

/// The module system declared for a folder by its nearest manifest.
#[tracing::instrument]
pub fn folder_module_kind(folder: &Path) -> Result<ModuleKind> {
    match manifest::find_nearest(folder) {
        Some(path) => Manifest::read(&path).map(|m| ModuleKind::from_manifest(&m)),
        None => Ok(ModuleKind::default()),
    }
}

/// The module system a file is loaded with.
#[tracing::instrument]
pub fn file_module_kind(file: &Path) -> Result<ModuleKind> {
    let by_extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ModuleKind::from_extension);
    if let Some(kind) = by_extension {
        return Ok(kind);
    }

    let folder = file.parent().unwrap_or_else(|| Path::new("."));
    folder_module_kind(folder)
}

/// The module system for a path: [`folder_module_kind`] for directories,
/// [`file_module_kind`] for anything else.
pub fn module_kind(path: &Path) -> Result<ModuleKind> {
    if path.is_dir() {
        folder_module_kind(path)
    } else {
        file_module_kind(path)
    }
}

/// Reports whether the path is an ES module.
///
/// Detection failures, such as an unreadable manifest, report `false`.
pub fn is_module_type(path: &Path) -> bool {
    match module_kind(path) {
        Ok(kind) => kind == ModuleKind::Module,
        Err(err) => {
            warn!("detect module type of '{}': {err}", path.display());
            false
        }
    }
}

/// Ensure that the path is an ES module.
pub fn check_module_type(path: &Path) -> Result<bool> {
    match module_kind(path)? {
        ModuleKind::Module => Ok(true),
        ModuleKind::CommonJs => Err(Error::NotModule {
            path: path.to_path_buf(),
        }),
    }
}
