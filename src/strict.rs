//! # Strict Mode Detection
//!
//! JavaScript code runs in strict mode when it is an ES module,
//! or when its directive prologue contains a `"use strict"` directive.
//!
//! The directive prologue is the run of string-literal statements at the very
//! start of the source, before any other statement; comments and whitespace
//! may appear between them. A `"use strict"` anywhere else has no effect.

use std::path::Path;

use lazy_regex::regex;
use tracing::warn;

use crate::{Error, ModuleKind, Result, module};

/// Reports whether the source text starts with a `"use strict"` directive prologue.
///
/// ```
/// # use envcheck::is_strict_source;
/// assert!(is_strict_source("'use strict'\nmodule.exports = {}"));
/// assert!(is_strict_source("// header\n\"use asm\";\n\"use strict\";"));
/// assert!(!is_strict_source("const x = 1\n'use strict'"));
/// ```
pub fn is_strict_source(source: &str) -> bool {
    let trivia = regex!(r"^(?:\s+|//[^\n]*|/\*(?s:.*?)\*/)*");
    let directive = regex!(r#"^(?:'([^'\\\n]*(?:\\.[^'\\\n]*)*)'|"([^"\\\n]*(?:\\.[^"\\\n]*)*)")"#);
    let terminator = regex!(r"^[ \t]*(?:/\*(?s:.*?)\*/[ \t]*)*(?:;|\n|\r|//[^\n]*|$)");

    let mut rest = source.strip_prefix('\u{feff}').unwrap_or(source);
    if let Some(shebang) = rest.strip_prefix("#!") {
        rest = shebang.find('\n').map_or("", |end| &shebang[end..]);
    }

    loop {
        rest = &rest[trivia.find(rest).map_or(0, |m| m.end())..];
        let Some(captures) = directive.captures(rest) else {
            return false;
        };
        let Some(literal) = captures.get(0) else {
            return false;
        };
        let after = &rest[literal.end()..];
        let Some(end) = terminator.find(after) else {
            // The literal starts an expression (`'use strict'.length`), ending the prologue.
            return false;
        };

        let body = captures.get(1).or_else(|| captures.get(2));
        if body.is_some_and(|body| body.as_str() == "use strict") {
            return true;
        }
        rest = &after[end.end()..];
    }
}

/// Reports whether the file runs in strict mode.
#[tracing::instrument]
pub fn strict_mode(file: &Path) -> Result<bool> {
    if module::file_module_kind(file)? == ModuleKind::Module {
        return Ok(true);
    }
    let source = std::fs::read_to_string(file).map_err(|err| Error::io(file, err))?;
    Ok(is_strict_source(&source))
}

/// Reports whether the file runs in strict mode.
///
/// Files that can't be read report `false`.
pub fn is_strict_mode(file: &Path) -> bool {
    strict_mode(file).unwrap_or_else(|err| {
        warn!("detect strict mode of '{}': {err}", file.display());
        false
    })
}

/// Ensure that the file runs in strict mode.
pub fn check_strict_mode(file: &Path) -> Result<bool> {
    if !strict_mode(file)? {
        return Err(Error::NotStrictMode {
            path: file.to_path_buf(),
        });
    }
    Ok(true)
}
