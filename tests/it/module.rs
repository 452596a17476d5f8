use std::path::Path;

use assert_matches::assert_matches;
use envcheck::{
    Engines, Error, ModuleKind, check_module_type, check_strict_mode, is_module_type, is_strict_mode,
    module_kind,
};

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dir");
    }
    std::fs::write(path, text).expect("write file");
}

#[test]
fn nested_packages_use_nearest_manifest() {
    let root = tempfile::tempdir().expect("create temp dir");
    write(&root.path().join("package.json"), r#"{ "type": "module" }"#);
    write(&root.path().join("legacy/package.json"), r#"{ "type": "commonjs" }"#);
    write(&root.path().join("src/index.js"), "export const a = 1");
    write(&root.path().join("legacy/index.js"), "module.exports = 1");

    assert_eq!(module_kind(&root.path().join("src/index.js")).expect("must detect"), ModuleKind::Module);
    assert!(is_module_type(&root.path().join("src")));
    assert!(!is_module_type(&root.path().join("legacy")));
    assert!(is_module_type(&root.path().join("legacy/entry.mjs")));

    assert!(check_module_type(&root.path().join("src/index.js")).expect("must check"));
    assert_matches!(
        check_module_type(&root.path().join("legacy/index.js")),
        Err(Error::NotModule { .. })
    );
}

#[test]
fn strict_mode_follows_module_type() {
    let root = tempfile::tempdir().expect("create temp dir");
    write(&root.path().join("package.json"), "{}");
    write(&root.path().join("esm.mjs"), "export default 1");
    write(&root.path().join("strict.js"), "/* header */\n'use strict';\nmodule.exports = 1");
    write(&root.path().join("sloppy.js"), "module.exports = 1\n'use strict'");

    assert!(is_strict_mode(&root.path().join("esm.mjs")));
    assert!(is_strict_mode(&root.path().join("strict.js")));
    assert!(!is_strict_mode(&root.path().join("sloppy.js")));
    assert_matches!(
        check_strict_mode(&root.path().join("sloppy.js")),
        Err(Error::NotStrictMode { .. })
    );
}

#[test]
fn relative_paths_resolve_from_current_dir() {
    let root = tempfile::tempdir().expect("create temp dir");
    write(
        &root.path().join("package.json"),
        r#"{ "type": "module", "engines": { "node": ">=8" } }"#,
    );
    write(&root.path().join("src/index.js"), "export default 1");

    let previous = std::env::current_dir().expect("read current dir");
    std::env::set_current_dir(root.path().join("src")).expect("enter project dir");
    let file_is_module = is_module_type(Path::new("index.js"));
    let folder_is_module = is_module_type(Path::new("."));
    let engines = Engines::discover(Path::new("."));
    std::env::set_current_dir(previous).expect("restore current dir");

    assert!(file_is_module);
    assert!(folder_is_module);
    let engines = engines.expect("must discover");
    assert_eq!(engines.get("node"), envcheck::Arg::from(">=8"));
}
