use super::Error;
use crate::reader::{self, Location};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{self, SimpleFile};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use std::ops::Range;

/// Renders input errors against the source they came from.
pub struct ErrorReporter<'a> {
    file: SimpleFile<&'a str, &'a str>,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(name: &'a str, source: &'a str) -> Self {
        Self {
            file: SimpleFile::new(name, source),
        }
    }

    pub fn report_error(&self, e: &Error) -> Result<(), files::Error> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut writer = writer.lock();
        self.write_error(&mut writer, e)
    }

    pub fn write_error(&self, writer: &mut dyn WriteColor, e: &Error) -> Result<(), files::Error> {
        let config = term::Config::default();
        term::emit(writer, &config, &self.file, &self.diagnostic(e))
    }

    pub fn diagnostic(&self, e: &Error) -> Diagnostic<()> {
        match e {
            Error::IoError(e) => Diagnostic::error()
                .with_code("E000")
                .with_message(format!("{}", e)),
            Error::JsonError(e) => Diagnostic::error()
                .with_code("E020")
                .with_message("failed to decode syntax tree")
                .with_notes(vec![e.to_string()]),
            Error::ReadError(e) => self.read_diagnostic(e),
        }
    }

    fn read_diagnostic(&self, e: &reader::Error) -> Diagnostic<()> {
        use reader::Error::*;

        match e {
            IncompleteInput(location) => Diagnostic::error()
                .with_code("E010")
                .with_message("unexpected end of input")
                .with_labels(vec![self.label(location)]),
            ParseError { message, location } => Diagnostic::error()
                .with_code("E011")
                .with_message("failed to read input")
                .with_labels(vec![self.label(location).with_message(message)]),
            NestingTooDeep {
                depth,
                limit,
                location,
            } => Diagnostic::error()
                .with_code("E012")
                .with_message("forms are nested too deeply")
                .with_labels(vec![self
                    .label(location)
                    .with_message(format!("reaches depth {}", depth))])
                .with_notes(vec![format!("the reader accepts at most {} levels", limit)]),
        }
    }

    fn label(&self, location: &Location) -> Label<()> {
        Label::primary((), self.span(location))
    }

    // one character wide, clamped to the source
    fn span(&self, location: &Location) -> Range<usize> {
        let source = *self.file.source();
        let start = location.offset.min(source.len());
        let width = source[start..].chars().next().map_or(0, char::len_utf8);

        start..start + width
    }
}
