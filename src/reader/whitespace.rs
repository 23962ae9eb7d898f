use nom::branch::alt;
use nom::bytes::complete::{is_not, take_while1};
use nom::character::complete::char;
use nom::combinator::opt;
use nom::error::context;
use nom::multi::many0;
use nom::sequence::preceded;

use super::parser::{unit, Input, ParseResult};

/// Whitespace and comments between forms. Commas count as whitespace.
#[inline]
pub fn parse_atmosphere(input: Input) -> ParseResult<()> {
    let atmosphere = alt((parse_white_space, parse_comment));
    unit(many0(atmosphere))(input)
}

#[inline]
pub fn parse_white_space(input: Input) -> ParseResult<()> {
    unit(take_while1(is_white_space))(input)
}

#[inline]
pub fn parse_comment(input: Input) -> ParseResult<()> {
    context(
        "comment",
        unit(preceded(char(';'), opt(is_not("\r\n")))),
    )(input)
}

#[inline]
pub fn is_white_space(c: char) -> bool {
    c.is_whitespace() || c == ','
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::reader::tests::*;

    #[test]
    fn test_read_comments() {
        assert_read_as(";foo bar\n true", Node::boolean(true));
        assert_read_as(
            "(1 ; one\n 2)",
            Node::list(vec![Node::number(1), Node::number(2)]),
        );
    }

    #[test]
    fn test_commas_are_white_space() {
        assert_read_as(
            "[1, 2 ,3]",
            Node::vector(vec![Node::number(1), Node::number(2), Node::number(3)]),
        );
    }
}
