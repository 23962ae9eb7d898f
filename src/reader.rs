// Reader for babble source text
//
// Turns source text into the node model from `crate::ast`. The analyzer and emitter never
// call the reader themselves, but the round-trip laws of the emitter are stated in terms
// of it, and the command line front end uses it to accept source text.

pub mod atom;
pub mod collection;
pub mod depth;
pub mod parser;
pub mod whitespace;

use crate::ast::Node;
use nom::error::{VerboseError, VerboseErrorKind};
use nom::Err;
use parser::Input;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Default ceiling for nested forms. Deeper input is rejected before the recursive
/// descent starts.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{message} at {location}")]
    ParseError { message: String, location: Location },
    #[error("unexpected end of input at {0}")]
    IncompleteInput(Location),
    #[error("forms nested {depth} levels deep exceed the limit of {limit} at {location}")]
    NestingTooDeep {
        depth: usize,
        limit: usize,
        location: Location,
    },
}

impl Error {
    pub fn parse_error<M: Into<String>>(message: M, location: Location) -> Self {
        Error::ParseError {
            message: message.into(),
            location,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Error::ParseError { location, .. } => location,
            Error::IncompleteInput(location) => location,
            Error::NestingTooDeep { location, .. } => location,
        }
    }
}

/// Position inside the source text. Line and column are 1-based, the offset is in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    fn of(input: &Input) -> Self {
        Self::new(
            input.location_line() as usize,
            input.get_utf8_column(),
            input.location_offset(),
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

type NomError<'a> = VerboseError<Input<'a>>;

impl<'a> From<Err<NomError<'a>>> for Error {
    fn from(e: Err<NomError<'a>>) -> Error {
        match e {
            Err::Incomplete(_) => Error::IncompleteInput(Location::new(1, 1, 0)),
            Err::Failure(e) | Err::Error(e) => from_verbose_error(e),
        }
    }
}

// the first entry is the innermost failure and carries the most precise position
fn from_verbose_error(e: NomError) -> Error {
    let (input, kind) = match e.errors.first() {
        Some(entry) => entry,
        None => return Error::parse_error("invalid input", Location::new(1, 1, 0)),
    };
    let location = Location::of(input);
    let found = input.fragment().chars().next();

    let context = e.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(ctx) => Some(*ctx),
        _ => None,
    });

    match (kind, found) {
        (VerboseErrorKind::Char(expected), None) => Error::parse_error(
            format!("unexpected end of input, expected '{}'", expected),
            location,
        ),
        (_, None) => Error::IncompleteInput(location),
        (VerboseErrorKind::Char(expected), Some(c)) => {
            Error::parse_error(format!("expected '{}' but found '{}'", expected, c), location)
        }
        (_, Some(c)) => match context {
            Some(ctx) => Error::parse_error(format!("unexpected '{}' in {}", c, ctx), location),
            None => Error::parse_error(format!("unexpected '{}'", c), location),
        },
    }
}

#[derive(Debug, Clone)]
pub struct Reader {
    max_depth: usize,
}

impl Reader {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Read every top-level form of a program.
    pub fn read(&self, source: &str) -> Result<Vec<Node>> {
        depth::check(source, self.max_depth)?;
        parser::parse_program(Input::new(source))
    }

    /// Read a program that must consist of exactly one form.
    pub fn read_form(&self, source: &str) -> Result<Node> {
        let mut forms = self.read(source)?;

        match forms.len() {
            1 => Ok(forms.remove(0)),
            0 => Err(Error::IncompleteInput(Location::new(1, 1, 0))),
            n => Err(Error::parse_error(
                format!("expected a single form but found {}", n),
                Location::new(1, 1, 0),
            )),
        }
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a program with the default reader.
pub fn read(source: &str) -> Result<Vec<Node>> {
    Reader::new().read(source)
}
