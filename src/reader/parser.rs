use nom::branch::alt;
use nom::character::complete::char;
use nom::combinator::{all_consuming, cut, map, value};
use nom::error::{context, VerboseError};
use nom::multi::many0;
use nom::sequence::{pair, preceded, terminated};
use nom::IResult;
use nom_locate::LocatedSpan;

use crate::ast::Node;

use super::{atom, collection, whitespace};

pub type Input<'a> = LocatedSpan<&'a str>;

pub type ParseResult<'a, T> = IResult<Input<'a>, T, VerboseError<Input<'a>>>;

/// Parse all forms of a program. Trailing atmosphere is allowed, anything else is not.
pub fn parse_program(input: Input) -> super::Result<Vec<Node>> {
    let program = terminated(many0(parse_form), whitespace::parse_atmosphere);
    let (_, forms) = all_consuming(context("program", program))(input)?;
    Ok(forms)
}

// Parse a single form from input
pub fn parse_form(input: Input) -> ParseResult<Node> {
    let form = context(
        "form",
        alt((
            collection::parse,
            parse_dispatch,
            parse_prefixed,
            atom::parse,
        )),
    );
    preceded(whitespace::parse_atmosphere, form)(input)
}

/// Forms starting with `#`
#[inline]
fn parse_dispatch(input: Input) -> ParseResult<Node> {
    context(
        "dispatch form",
        alt((
            collection::parse_set,
            collection::parse_anonymous_function,
            atom::parse_regex,
            map(preceded(char('#'), prefixed(char('\''))), Node::var_quote),
            map(preceded(char('#'), prefixed(char('_'))), Node::discard),
            parse_tagged_literal,
        )),
    )(input)
}

#[inline]
fn parse_tagged_literal(input: Input) -> ParseResult<Node> {
    let tagged = pair(preceded(char('#'), atom::parse_tag), cut(parse_form));

    map(tagged, |(tag, form)| Node::tagged_literal(tag, form))(input)
}

/// Reader macros that wrap the form that follows them
#[inline]
fn parse_prefixed(input: Input) -> ParseResult<Node> {
    alt((
        map(prefixed(char('\'')), Node::quote),
        map(prefixed(char('`')), Node::syntax_quote),
        map(prefixed(preceded(char('~'), char('@'))), Node::unquote_splicing),
        map(prefixed(char('~')), Node::unquote),
        map(prefixed(char('@')), Node::deref),
        parse_meta,
    ))(input)
}

#[inline]
fn parse_meta(input: Input) -> ParseResult<Node> {
    let meta = preceded(char('^'), cut(pair(parse_form, parse_form)));

    map(meta, |(metadata, form)| Node::meta(metadata, form))(input)
}

// Helper that parses the prefix and then exactly one form
pub fn prefixed<'a, O, F>(prefix: F) -> impl FnMut(Input<'a>) -> ParseResult<'a, Node>
where
    F: FnMut(Input<'a>) -> ParseResult<'a, O>,
{
    preceded(unit(prefix), cut(parse_form))
}

#[inline]
pub fn unit<'a, O, F>(parser: F) -> impl FnMut(Input<'a>) -> ParseResult<'a, ()>
where
    F: FnMut(Input<'a>) -> ParseResult<'a, O>,
{
    value((), parser)
}
