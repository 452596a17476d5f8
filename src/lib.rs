#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod arg;
mod checker;
mod engines;
mod error;
mod guard;
mod strict;
mod version;

pub mod constraint;
pub mod host;
pub mod manifest;
pub mod module;

pub use arg::*;
pub use checker::*;
pub use engines::*;
pub use error::*;
pub use guard::*;
pub use strict::*;
pub use version::*;

pub use constraint::{Range, parse_version};
pub use host::{Host, MemoryInfo, ProcessInfo, SystemHost};
pub use module::{ModuleKind, check_module_type, is_module_type, module_kind};
