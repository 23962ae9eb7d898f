use super::{Error, Location, Result};
use std::iter::Peekable;
use std::str::CharIndices;

/// Scan the source for nesting deeper than `limit` before any recursive parsing happens.
///
/// Every opening delimiter counts as one level, and so does every reader prefix
/// (`'`, `` ` ``, `~`, `~@`, `@`, `^`, `#'`, `#_`, `#tag`) in front of a form. A prefix
/// holds its level until the forms it wraps are complete, `^` wraps two forms (the
/// metadata and the annotated form). String literals, comments and character literals
/// are skipped.
pub fn check(source: &str, limit: usize) -> Result<()> {
    let mut scanner = Scanner::new(limit);
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let location = Location::new(scanner.line, scanner.column, offset);
        scanner.advance(c);

        if scanner.in_string {
            match c {
                '\\' => scanner.skip(&mut chars),
                '"' => scanner.in_string = false,
                _ => (),
            }
            continue;
        }

        if scanner.in_comment {
            if c == '\n' {
                scanner.in_comment = false;
            }
            continue;
        }

        match c {
            '(' | '[' | '{' => scanner.open(location)?,
            ')' | ']' | '}' => scanner.close(),
            ';' => {
                scanner.in_comment = true;
                scanner.in_token = false;
            }
            '"' => {
                scanner.atom();
                scanner.in_string = true;
            }
            '\\' => {
                scanner.atom();
                scanner.skip(&mut chars);
            }
            c if c.is_whitespace() || c == ',' => scanner.in_token = false,
            _ if scanner.in_token => (),
            '\'' | '`' | '@' => scanner.prefix(1, location)?,
            '~' => {
                if let Some((_, '@')) = chars.peek() {
                    scanner.skip(&mut chars);
                }
                scanner.prefix(1, location)?
            }
            '^' => scanner.prefix(2, location)?,
            '#' => scanner.dispatch(&mut chars, location)?,
            _ => scanner.atom(),
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Frame {
    Delimiter,
    // a reader prefix and the number of forms it still waits for
    Prefix(usize),
}

struct Scanner {
    limit: usize,
    frames: Vec<Frame>,
    in_string: bool,
    in_comment: bool,
    in_token: bool,
    line: usize,
    column: usize,
}

impl Scanner {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            frames: Vec::new(),
            in_string: false,
            in_comment: false,
            in_token: false,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    // consume the next character without interpreting it
    fn skip(&mut self, chars: &mut Peekable<CharIndices>) {
        if let Some((_, c)) = chars.next() {
            self.advance(c);
        }
    }

    fn push(&mut self, frame: Frame, location: Location) -> Result<()> {
        self.frames.push(frame);
        self.in_token = false;

        let depth = self.frames.len();
        if depth > self.limit {
            Err(Error::NestingTooDeep {
                depth,
                limit: self.limit,
                location,
            })
        } else {
            Ok(())
        }
    }

    fn open(&mut self, location: Location) -> Result<()> {
        self.push(Frame::Delimiter, location)
    }

    fn prefix(&mut self, forms: usize, location: Location) -> Result<()> {
        self.push(Frame::Prefix(forms), location)
    }

    fn close(&mut self) {
        self.in_token = false;
        // unbalanced input is reported by the parser with a better message
        while let Some(frame) = self.frames.pop() {
            if frame == Frame::Delimiter {
                self.complete_form();
                return;
            }
        }
    }

    fn atom(&mut self) {
        self.in_token = true;
        self.complete_form();
    }

    // a form ended, release the prefixes that were waiting for it
    fn complete_form(&mut self) {
        while let Some(Frame::Prefix(remaining)) = self.frames.last_mut() {
            *remaining -= 1;
            if *remaining > 0 {
                return;
            }
            self.frames.pop();
        }
    }

    /// Forms starting with `#`
    fn dispatch(&mut self, chars: &mut Peekable<CharIndices>, location: Location) -> Result<()> {
        match chars.peek().map(|(_, c)| *c) {
            // set, anonymous function or regex, the next character takes care of it
            Some('{') | Some('(') | Some('"') => Ok(()),
            Some('\'') | Some('_') => {
                self.skip(chars);
                self.prefix(1, location)
            }
            // tagged literal, the tag name is not a form
            _ => {
                self.prefix(1, location)?;
                self.in_token = true;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Reader;
    use matches::assert_matches;

    #[test]
    fn test_flat_input_passes() {
        assert!(check("(+ 1 2) [3 4] {:a 5}", 1).is_ok());
        assert!(check("", 0).is_ok());
    }

    #[test]
    fn test_delimiters_count_as_levels() {
        assert!(check("(a (b (c)))", 3).is_ok());
        assert_matches!(
            check("(a (b (c (d))))", 3),
            Err(Error::NestingTooDeep { depth: 4, limit: 3, .. })
        );
    }

    #[test]
    fn test_prefixes_count_as_levels() {
        assert!(check("''x", 2).is_ok());
        assert_matches!(
            check("'''x", 2),
            Err(Error::NestingTooDeep { depth: 3, .. })
        );
        assert_matches!(
            check("'('x)", 2),
            Err(Error::NestingTooDeep { depth: 3, .. })
        );
        assert!(check("~@x ~@y", 1).is_ok());
    }

    #[test]
    fn test_prefixes_are_released_after_their_form() {
        assert!(check("'x 'y 'z '(a) @b #'c #_d #inst \"e\"", 2).is_ok());
        assert!(check("[^:a b ^:c d ^{:e f} g]", 3).is_ok());
    }

    #[test]
    fn test_dispatch_prefix_chains() {
        let discards = format!("{}x", "#_".repeat(300));
        let tags = format!("{}x", "#t ".repeat(300));
        let var_quotes = format!("{}x", "#'".repeat(300));

        for source in &[discards, tags, var_quotes] {
            assert_matches!(
                check(source, 256),
                Err(Error::NestingTooDeep { depth: 257, .. })
            );
        }
        assert!(check(&format!("{}x", "#_".repeat(10)), 10).is_ok());
    }

    #[test]
    fn test_metadata_chains() {
        assert!(check("^m ^n x", 2).is_ok());
        assert_matches!(
            check("^m ^n ^o x", 2),
            Err(Error::NestingTooDeep { depth: 3, .. })
        );
        assert_matches!(
            check(&format!("{}x", "^m ".repeat(300)), 256),
            Err(Error::NestingTooDeep { .. })
        );
    }

    #[test]
    fn test_reader_rejects_deep_prefix_chains() {
        let reader = Reader::with_max_depth(256);

        for source in &[
            format!("{}x", "#_".repeat(5000)),
            format!("{}x", "#t ".repeat(5000)),
            format!("{}x", "^m ".repeat(5000)),
        ] {
            assert_matches!(reader.read(source), Err(Error::NestingTooDeep { .. }));
        }
    }

    #[test]
    fn test_quote_inside_symbol_is_not_a_prefix() {
        assert!(check("(x' y')", 1).is_ok());
        assert!(check("(a#b c#)", 1).is_ok());
    }

    #[test]
    fn test_strings_comments_and_characters_are_skipped() {
        assert!(check("\"((((\\\"((((\"", 0).is_ok());
        assert!(check("[\"((((\\\"((((\"]", 1).is_ok());
        assert!(check("[1] ; ((((((\n[2]", 1).is_ok());
        assert!(check("[\\( \\[]", 1).is_ok());
        assert!(check("#\"((((\\\"((\"", 0).is_ok());
    }

    #[test]
    fn test_location_of_offending_form() {
        let err = check("[\n [[x]]]", 2).unwrap_err();

        assert_eq!(err.location().line, 2);
        assert_eq!(err.location().column, 3);
        assert_eq!(err.location().offset, 4);
    }
}
