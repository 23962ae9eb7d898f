#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate anyhow;

extern crate nom;
extern crate nom_locate;

pub mod analyzer;
pub mod ast;
pub mod cmd;
pub mod emitter;
pub mod error;
pub mod reader;
pub mod repl;
pub mod settings;

pub use analyzer::{analyze, AnalysisResult, Status};
pub use ast::Node;
pub use emitter::{ast_to_code, json_to_code, node_to_code};

use directories::ProjectDirs;
use std::path::PathBuf;

pub const BABBLE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the interactive front end keeps its state. Falls back to `.babble` in the
/// working directory when the platform has no home directory.
pub fn babble_config_directory() -> PathBuf {
    match ProjectDirs::from("", "", "babble") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => PathBuf::from(".babble"),
    }
}

#[cfg(test)]
#[macro_use]
extern crate matches;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
