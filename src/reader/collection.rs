use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::combinator::{cut, map, verify};
use nom::error::context;
use nom::multi::many0;
use nom::sequence::{preceded, terminated};
use nom::branch::alt;

use crate::ast::{MapEntry, Node};

use super::parser::{parse_form, Input, ParseResult};
use super::whitespace::parse_atmosphere;

#[inline]
pub fn parse(input: Input) -> ParseResult<Node> {
    alt((parse_list, parse_vector, parse_map))(input)
}

/// ```grammar
/// <list> -> ( <form>* )
/// ```
#[inline]
pub fn parse_list(input: Input) -> ParseResult<Node> {
    let list = context("list", delimited_forms(tag("("), ')'));
    map(list, |value| Node::List { value })(input)
}

/// ```grammar
/// <vector> -> [ <form>* ]
/// ```
#[inline]
pub fn parse_vector(input: Input) -> ParseResult<Node> {
    let vector = context("vector", delimited_forms(tag("["), ']'));
    map(vector, |value| Node::Vector { value })(input)
}

/// ```grammar
/// <set> -> #{ <form>* }
/// ```
#[inline]
pub fn parse_set(input: Input) -> ParseResult<Node> {
    let set = context("set", delimited_forms(tag("#{"), '}'));
    map(set, |value| Node::Set { value })(input)
}

/// ```grammar
/// <anonymous function> -> #( <form>* )
/// ```
#[inline]
pub fn parse_anonymous_function(input: Input) -> ParseResult<Node> {
    let function = context("anonymous function", delimited_forms(tag("#("), ')'));
    map(function, |value| Node::AnonymousFunction { value })(input)
}

/// ```grammar
/// <map> -> { (<form> <form>)* }
/// ```
#[inline]
pub fn parse_map(input: Input) -> ParseResult<Node> {
    let entries = preceded(
        char('{'),
        cut(terminated(
            context(
                "map with an even number of forms",
                verify(many0(parse_form), |forms: &Vec<Node>| forms.len() % 2 == 0),
            ),
            preceded(parse_atmosphere, char('}')),
        )),
    );

    map(context("map", entries), |forms| Node::Map {
        value: pair_up(forms),
    })(input)
}

fn pair_up(forms: Vec<Node>) -> Vec<MapEntry> {
    let mut entries = Vec::with_capacity(forms.len() / 2);
    let mut iter = forms.into_iter();

    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        entries.push(MapEntry::new(key, value));
    }

    entries
}

// Helper that parses the opening delimiter followed by forms up to the closing one.
// Once the opening delimiter matched, failures are not recoverable.
fn delimited_forms<'a, O, F>(
    open: F,
    close: char,
) -> impl FnMut(Input<'a>) -> ParseResult<'a, Vec<Node>>
where
    F: FnMut(Input<'a>) -> ParseResult<'a, O>,
{
    preceded(
        open,
        cut(terminated(
            many0(parse_form),
            preceded(parse_atmosphere, char(close)),
        )),
    )
}
