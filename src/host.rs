//! # Host Facilities
//!
//! Everything the checks need to know about the running environment comes
//! through the [`Host`] trait: the runtime and tool versions, environment
//! variables, CPU count, memory, and process identity.
//!
//! [`SystemHost`] reads these from the live system. Runtime and tool versions
//! are obtained by running `<program> --version` (or `-version`) in a child process,
//! synchronously, once per call; nothing is cached.
//!
//! Tests substitute their own [`Host`] so that checks can be exercised against
//! fixed facts without mutating the process environment.

use std::{ffi::OsString, process::Command};

use getset::{CopyGetters, Getters};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Total and free system memory, in bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    /// Total physical memory.
    pub total: u64,

    /// Memory available for new allocations.
    pub free: u64,
}

/// Identifies the process running the checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Getters, CopyGetters)]
pub struct ProcessInfo {
    /// The host name of the machine.
    #[getset(get = "pub")]
    hostname: String,

    /// The process ID.
    #[getset(get_copy = "pub")]
    pid: u32,
}

impl ProcessInfo {
    /// Create process info from its parts.
    pub fn new(hostname: impl Into<String>, pid: u32) -> Self {
        Self {
            hostname: hostname.into(),
            pid,
        }
    }
}

/// Provides raw facts about the environment.
///
/// Implementations must not fail for missing facts: a runtime or tool that
/// can't be found is `None`, an unset variable is `None`.
pub trait Host {
    /// The version of the runtime named `runtime` (for example `node`),
    /// or `None` if it can't be determined.
    fn runtime_version(&self, runtime: &str) -> Option<String>;

    /// The version of the tool named `tool` (for example `npm`),
    /// or `None` if it can't be determined.
    fn tool_version(&self, tool: &str) -> Option<String>;

    /// The raw value of an environment variable.
    fn env_var(&self, name: &str) -> Option<OsString>;

    /// The number of CPUs available to the process; at least 1.
    fn cpu_count(&self) -> usize;

    /// Total and free memory.
    fn memory(&self) -> Result<MemoryInfo>;

    /// The identity of the current process.
    fn process_info(&self) -> ProcessInfo;
}

impl<H: Host + ?Sized> Host for &H {
    fn runtime_version(&self, runtime: &str) -> Option<String> {
        (**self).runtime_version(runtime)
    }

    fn tool_version(&self, tool: &str) -> Option<String> {
        (**self).tool_version(tool)
    }

    fn env_var(&self, name: &str) -> Option<OsString> {
        (**self).env_var(name)
    }

    fn cpu_count(&self) -> usize {
        (**self).cpu_count()
    }

    fn memory(&self) -> Result<MemoryInfo> {
        (**self).memory()
    }

    fn process_info(&self) -> ProcessInfo {
        (**self).process_info()
    }
}

/// Reads facts from the live system.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn runtime_version(&self, runtime: &str) -> Option<String> {
        command_output(runtime, "--version")
    }

    fn tool_version(&self, tool: &str) -> Option<String> {
        command_output(tool, "-version")
    }

    fn env_var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }

    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    fn memory(&self) -> Result<MemoryInfo> {
        read_meminfo()
    }

    fn process_info(&self) -> ProcessInfo {
        let hostname = hostname::get()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|err| {
                warn!("read host name: {err}");
                String::new()
            });
        ProcessInfo::new(hostname, std::process::id())
    }
}

/// Run `program arg` and return its standard output without trailing line terminators.
///
/// Any failure to run the program, a non-zero exit, or empty output is `None`.
#[tracing::instrument]
pub fn command_output(program: &str, arg: &str) -> Option<String> {
    let output = match Command::new(program).arg(arg).output() {
        Ok(output) => output,
        Err(err) => {
            debug!("run '{program} {arg}': {err}");
            return None;
        }
    };
    if !output.status.success() {
        debug!("'{program} {arg}' exited with {}", output.status);
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = trim_line_terminators(&stdout);
    if version.is_empty() {
        return None;
    }
    Some(version.to_string())
}

/// Remove every trailing `\r` and `\n`.
pub fn trim_line_terminators(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n'])
}

#[cfg(target_os = "linux")]
fn read_meminfo() -> Result<MemoryInfo> {
    const MEMINFO: &str = "/proc/meminfo";
    let text = std::fs::read_to_string(MEMINFO).map_err(|err| Error::io(MEMINFO, err))?;
    parse_meminfo(&text).ok_or(Error::Unsupported {
        what: "memory totals in /proc/meminfo",
    })
}

#[cfg(not(target_os = "linux"))]
fn read_meminfo() -> Result<MemoryInfo> {
    Err(Error::Unsupported {
        what: "memory totals",
    })
}

/// Parse `/proc/meminfo` content.
///
/// Free memory is `MemAvailable` when the kernel reports it, `MemFree` otherwise.
pub fn parse_meminfo(text: &str) -> Option<MemoryInfo> {
    let field = |name: &str| -> Option<u64> {
        text.lines().find_map(|line| {
            let rest = line.strip_prefix(name)?.strip_prefix(':')?;
            let kib = rest.trim().trim_end_matches("kB").trim().parse::<u64>().ok()?;
            kib.checked_mul(1024)
        })
    };

    let total = field("MemTotal")?;
    let free = field("MemAvailable").or_else(|| field("MemFree"))?;
    Some(MemoryInfo { total, free })
}
