//! # Convenience Checks
//!
//! [`Checker`] binds the predicate and assertion tiers to specific subjects:
//! the runtime version, the tool version, environment variables, and the
//! production-mode flag.
//!
//! A checker only holds the [`Host`] it reads facts from and the [`Engines`]
//! mapping it reads expected ranges from; neither changes after construction,
//! and every check resolves its defaults at call time.
//!
//! ## Defaults
//!
//! Version checks take each argument as an [`Arg`]:
//!
//! | Check | `Arg::Default` version | `Arg::Default` expected |
//! |---|---|---|
//! | [`Checker::check_runtime_version`] | `host.runtime_version(runtime)` | `engines[runtime]` |
//! | [`Checker::check_tool_version`] | null | `engines[tool]` |
//! | [`Checker::check_engine_version`] | null | `engines[engine]` |
//!
//! When either argument resolves to null the check returns `Ok(false)`:
//! there is nothing to compare. A present but wrong version is still an error.
//!
//! ```
//! # use envcheck::{Arg, Checker, Engines, SystemHost};
//! let checker = Checker::builder()
//!     .host(SystemHost)
//!     .engines(Engines::from_iter([("node", ">=8.9.0")]))
//!     .build();
//!
//! assert!(checker.check_runtime_version("10.13.0", Arg::Default).unwrap());
//! assert!(checker.check_runtime_version("6.17.0", Arg::Default).is_err());
//! assert!(!checker.check_engine_version("widget", "1.0.0", Arg::Default).unwrap());
//! ```

use std::path::Path;

use bon::Builder;
use getset::Getters;
use tracing::debug;

use crate::{
    Arg, Engines, Error, Host, MemoryInfo, ProcessInfo, Result, SystemHost, check_non_empty,
    check_version, is_non_empty, is_version_compatible,
};

/// The default name of the runtime engine.
pub const DEFAULT_RUNTIME: &str = "node";

/// The default name of the package-manager engine.
pub const DEFAULT_TOOL: &str = "npm";

/// The default name of the variable that selects the environment mode.
pub const DEFAULT_MODE_VAR: &str = "NODE_ENV";

/// The mode value that denotes production.
pub const PRODUCTION: &str = "production";

/// Runs convenience checks against a host and an engines mapping.
#[derive(Debug, Clone, Builder, Getters)]
pub struct Checker<H> {
    /// Provides facts about the environment.
    #[getset(get = "pub")]
    host: H,

    /// Expected version ranges by engine name.
    #[builder(default)]
    #[getset(get = "pub")]
    engines: Engines,

    /// The engine name of the runtime.
    #[builder(into, default = DEFAULT_RUNTIME.to_string())]
    #[getset(get = "pub")]
    runtime: String,

    /// The engine name of the package manager.
    #[builder(into, default = DEFAULT_TOOL.to_string())]
    #[getset(get = "pub")]
    tool: String,

    /// The variable that selects the environment mode.
    #[builder(into, default = DEFAULT_MODE_VAR.to_string())]
    #[getset(get = "pub")]
    mode_var: String,
}

impl Checker<SystemHost> {
    /// A checker over the live system, using the engines declared by the
    /// manifest nearest to `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        let engines = Engines::discover(start)?;
        Ok(Self::builder().host(SystemHost).engines(engines).build())
    }
}

impl<H: Host> Checker<H> {
    /// Resolve a version check's arguments, or `None` if either is null.
    fn resolve<'a>(
        &'a self,
        engine: &str,
        version: Arg<'a>,
        expected: Arg<'a>,
    ) -> Result<Option<(String, String)>> {
        let version = version.into_text("version")?;
        let expected = expected
            .or_else(|| self.engines.get(engine))
            .into_text("expected_version")?;

        match (version, expected) {
            (Some(version), Some(expected)) => Ok(Some((version.into_owned(), expected.into_owned()))),
            (version, expected) => {
                debug!(engine, ?version, ?expected, "nothing to check");
                Ok(None)
            }
        }
    }

    /// Check a version against an engine's expected range.
    ///
    /// Both arguments default as described in the [module documentation](self),
    /// with the version defaulting to null.
    #[tracing::instrument(skip(self))]
    pub fn check_engine_version<'a>(
        &'a self,
        engine: &str,
        version: impl Into<Arg<'a>> + std::fmt::Debug,
        expected: impl Into<Arg<'a>> + std::fmt::Debug,
    ) -> Result<bool> {
        let version = version.into().or_null();
        match self.resolve(engine, version, expected.into())? {
            Some((version, expected)) => check_version(Some(&version), Some(&expected)),
            None => Ok(false),
        }
    }

    /// Reports whether a version satisfies an engine's expected range.
    ///
    /// Fails only if an argument is not text.
    pub fn is_engine_version_compatible<'a>(
        &'a self,
        engine: &str,
        version: impl Into<Arg<'a>>,
        expected: impl Into<Arg<'a>>,
    ) -> Result<bool> {
        let version = version.into().or_null();
        Ok(self
            .resolve(engine, version, expected.into())?
            .is_some_and(|(version, expected)| {
                is_version_compatible(Some(&version), Some(&expected))
            }))
    }

    /// Check the runtime version against its expected range.
    #[tracing::instrument(skip(self))]
    pub fn check_runtime_version<'a>(
        &'a self,
        version: impl Into<Arg<'a>> + std::fmt::Debug,
        expected: impl Into<Arg<'a>> + std::fmt::Debug,
    ) -> Result<bool> {
        let version = version.into().or_else(|| self.runtime_version().into());
        match self.resolve(&self.runtime, version, expected.into())? {
            Some((version, expected)) => check_version(Some(&version), Some(&expected)),
            None => Ok(false),
        }
    }

    /// Reports whether the runtime version satisfies its expected range.
    pub fn is_runtime_version_compatible<'a>(
        &'a self,
        version: impl Into<Arg<'a>>,
        expected: impl Into<Arg<'a>>,
    ) -> Result<bool> {
        let version = version.into().or_else(|| self.runtime_version().into());
        Ok(self
            .resolve(&self.runtime, version, expected.into())?
            .is_some_and(|(version, expected)| {
                is_version_compatible(Some(&version), Some(&expected))
            }))
    }

    /// Check the tool version against its expected range.
    ///
    /// The version defaults to null: pass [`Checker::tool_version`] to check the installed tool.
    pub fn check_tool_version<'a>(
        &'a self,
        version: impl Into<Arg<'a>> + std::fmt::Debug,
        expected: impl Into<Arg<'a>> + std::fmt::Debug,
    ) -> Result<bool> {
        self.check_engine_version(&self.tool, version, expected)
    }

    /// Reports whether the tool version satisfies its expected range.
    pub fn is_tool_version_compatible<'a>(
        &'a self,
        version: impl Into<Arg<'a>>,
        expected: impl Into<Arg<'a>>,
    ) -> Result<bool> {
        self.is_engine_version_compatible(&self.tool, version, expected)
    }

    /// The current runtime version, if it can be determined.
    pub fn runtime_version(&self) -> Option<String> {
        self.host.runtime_version(&self.runtime)
    }

    /// The current tool version, if it can be determined.
    ///
    /// Runs the tool in a child process on every call.
    pub fn tool_version(&self) -> Option<String> {
        self.host.tool_version(&self.tool)
    }

    /// The value of an environment variable.
    ///
    /// Fails with [`Error::InvalidType`] if the value is not valid UTF-8.
    pub fn get_env_var(&self, name: &str) -> Result<Option<String>> {
        self.host
            .env_var(name)
            .map(|value| {
                value
                    .into_string()
                    .map_err(|_| Error::not_a_string(name, "non-unicode value"))
            })
            .transpose()
    }

    /// Reports whether an environment variable is defined, even if empty.
    pub fn is_env_var_defined(&self, name: &str) -> bool {
        is_non_empty(Some(name)) && self.host.env_var(name).is_some()
    }

    /// Ensure that an environment variable is defined.
    pub fn check_env_var_defined(&self, name: &str) -> Result<bool> {
        check_non_empty(Some(name), "name")?;
        if !self.is_env_var_defined(name) {
            return Err(Error::EnvVarUndefined {
                name: name.to_string(),
            });
        }
        Ok(true)
    }

    /// The environment mode (the value of the mode variable), if set.
    pub fn get_mode(&self) -> Result<Option<String>> {
        self.get_env_var(&self.mode_var)
    }

    /// Reports whether the environment mode is production.
    pub fn is_production_mode(&self) -> bool {
        matches!(self.get_mode(), Ok(Some(mode)) if mode == PRODUCTION)
    }

    /// Ensure that the environment mode is production.
    pub fn check_production_mode(&self) -> Result<bool> {
        let mode = self.get_mode()?;
        if mode.as_deref() != Some(PRODUCTION) {
            return Err(Error::NotProductionMode {
                name: self.mode_var.clone(),
                found: mode,
            });
        }
        Ok(true)
    }

    /// The number of CPUs available to the process.
    pub fn available_cpu_count(&self) -> usize {
        self.host.cpu_count()
    }

    /// Total and free memory.
    pub fn memory_info(&self) -> Result<MemoryInfo> {
        self.host.memory()
    }

    /// The identity of the current process.
    pub fn process_info(&self) -> ProcessInfo {
        self.host.process_info()
    }
}
