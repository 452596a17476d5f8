use std::ffi::OsString;

use assert_matches::assert_matches;
use envcheck::{Arg, Checker, Engines, Error, Host, MemoryInfo, ProcessInfo, Result, SystemHost};

/// A host pinned to a single runtime version with an empty environment.
struct Pinned(&'static str);

impl Host for Pinned {
    fn runtime_version(&self, _: &str) -> Option<String> {
        Some(self.0.to_string())
    }

    fn tool_version(&self, _: &str) -> Option<String> {
        None
    }

    fn env_var(&self, _: &str) -> Option<OsString> {
        None
    }

    fn cpu_count(&self) -> usize {
        1
    }

    fn memory(&self) -> Result<MemoryInfo> {
        Err(Error::Unsupported { what: "memory" })
    }

    fn process_info(&self) -> ProcessInfo {
        ProcessInfo::new("pinned", 1)
    }
}

fn project(manifest: &str) -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("create temp dir");
    std::fs::write(root.path().join("package.json"), manifest).expect("write manifest");
    root
}

#[test]
fn engines_from_manifest() {
    let root = project(r#"{ "name": "app", "engines": { "node": ">=8.9.0 <12.0.0" } }"#);
    let checker = Checker::builder()
        .host(Pinned("v10.13.0"))
        .engines(Engines::discover(root.path()).expect("must discover"))
        .build();

    assert!(checker.check_runtime_version(Arg::Default, Arg::Default).expect("must check"));
    assert!(!checker.check_tool_version(Arg::Default, Arg::Default).expect("must check"));
    assert!(!checker.check_engine_version("widget", "1.0.0", Arg::Default).expect("must check"));
}

#[test]
fn runtime_outside_engines_range() {
    let root = project(r#"{ "engines": { "node": ">=12" } }"#);
    let checker = Checker::builder()
        .host(Pinned("v10.13.0"))
        .engines(Engines::discover(root.path()).expect("must discover"))
        .build();

    assert!(!checker.is_runtime_version_compatible(Arg::Default, Arg::Default).expect("must check"));
    let err = checker.check_runtime_version(Arg::Default, Arg::Default).expect_err("must fail");
    assert_eq!(err.to_string(), "found version 'v10.13.0', but expected version '>=12'");
}

#[test]
fn numeric_engine_range_is_type_error() {
    let root = project(r#"{ "engines": { "node": 12 } }"#);
    let checker = Checker::builder()
        .host(Pinned("12.0.0"))
        .engines(Engines::discover(root.path()).expect("must discover"))
        .build();

    assert_matches!(
        checker.is_runtime_version_compatible(Arg::Default, Arg::Default),
        Err(Error::InvalidType { found: "number", .. })
    );
}

#[test]
fn malformed_manifest_fails_discovery() {
    let root = project("{ not json");
    assert_matches!(Checker::discover(root.path()), Err(Error::ParseManifest { .. }));
}

#[test]
fn system_host_reads_process_environment() {
    let checker = Checker::builder().host(SystemHost).build();

    // PATH is set in every environment the tests run in.
    assert!(checker.is_env_var_defined("PATH"));
    assert!(checker.check_env_var_defined("PATH").expect("must check"));
    assert!(!checker.is_env_var_defined("ENVCHECK_SURELY_UNDEFINED_VARIABLE"));
    assert!(checker.available_cpu_count() >= 1);
    assert_eq!(checker.process_info().pid(), std::process::id());
}
