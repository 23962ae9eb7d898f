pub mod ast;
pub mod check;
pub mod code;
pub mod fmt;
pub mod repl;

use crate::ast::Node;
use crate::error::reporting::ErrorReporter;
use crate::error::Error;
use crate::reader::Reader;
use anyhow::Context;
use std::io::{self, Read};

/// Source text of `input`, where `-` stands for stdin.
pub fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to open {}", input))
    }
}

/// Read all forms of `source`, reporting reader errors against the source.
pub fn read_program(name: &str, source: &str, max_depth: usize) -> anyhow::Result<Vec<Node>> {
    match Reader::with_max_depth(max_depth).read(source) {
        Ok(forms) => Ok(forms),
        Err(e) => {
            ErrorReporter::new(name, source).report_error(&Error::from(e))?;
            Err(anyhow!("could not read {}", name))
        }
    }
}

/// Decode a JSON syntax tree, reporting decoding errors.
pub fn decode_program(name: &str, text: &str) -> anyhow::Result<Vec<Node>> {
    match crate::ast::json::from_str(text) {
        Ok(forms) => Ok(forms),
        Err(e) => {
            ErrorReporter::new(name, text).report_error(&Error::from(e))?;
            Err(anyhow!("could not decode {}", name))
        }
    }
}
