use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while, take_while1};
use nom::character::complete::{anychar, char, digit1, one_of};
use nom::combinator::{cut, map, map_res, not, opt, peek, recognize, value, verify};
use nom::error::context;
use nom::multi::{fold_many0, many0};
use nom::sequence::{pair, preceded, terminated, tuple};

use crate::ast::Node;

use super::parser::{Input, ParseResult};

pub const SYMBOL_SPECIAL_INITIAL: &str = "*+!-_?<>=/.&%$";
pub const SYMBOL_SPECIAL_SUBSEQUENT: &str = "#:'";

#[inline]
pub fn parse(input: Input) -> ParseResult<Node> {
    alt((
        context("number", parse_number),
        context("string", parse_string),
        context("character", parse_character),
        context("keyword", parse_keyword),
        context("symbol", parse_symbolic),
    ))(input)
}

//////////////////////////////
// Numbers
//////////////////////////////

/// ```grammar
/// <number> -> <ratio> | <float> | <integer>
/// <ratio>  -> <sign>? <digit>+ / <digit>+
/// <float>  -> <sign>? <digit>+ (. <digit>+)? (e <sign>? <digit>+)?
/// ```
#[inline]
pub fn parse_number(input: Input) -> ParseResult<Node> {
    let number = alt((parse_ratio, parse_float, parse_integer));
    terminated(number, not_followed_by_symbol_char)(input)
}

#[inline]
fn parse_ratio(input: Input) -> ParseResult<Node> {
    let ratio = recognize(tuple((opt(one_of("+-")), digit1, char('/'), digit1)));
    map(ratio, |s: Input| Node::ratio(*s.fragment()))(input)
}

#[inline]
fn parse_float(input: Input) -> ParseResult<Node> {
    let fraction = pair(char('.'), digit1);
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));
    let with_fraction = recognize(tuple((
        opt(one_of("+-")),
        digit1,
        fraction,
        opt(exponent),
    )));
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));
    let with_exponent = recognize(tuple((opt(one_of("+-")), digit1, exponent)));

    map_res(alt((with_fraction, with_exponent)), |s: Input| {
        s.fragment().parse::<f64>().map(Node::number)
    })(input)
}

#[inline]
fn parse_integer(input: Input) -> ParseResult<Node> {
    let integer = recognize(pair(opt(one_of("+-")), digit1));

    map_res(integer, |s: Input| {
        s.fragment().parse::<i64>().map(Node::number)
    })(input)
}

#[inline]
fn not_followed_by_symbol_char(input: Input) -> ParseResult<()> {
    not(peek(verify(anychar, |c| is_symbol_subsequent(*c))))(input)
}

//////////////////////////////
// Strings and regular expressions
//////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringElement<'a> {
    Literal(&'a str),
    EscapedChar(char),
}

pub fn parse_string(input: Input) -> ParseResult<Node> {
    let string_elements = fold_many0(
        parse_string_element,
        String::new(),
        |mut string, element| {
            match element {
                StringElement::Literal(s) => string.push_str(s),
                StringElement::EscapedChar(c) => string.push(c),
            }
            string
        },
    );

    let string_literal = preceded(char('"'), cut(terminated(string_elements, char('"'))));

    map(string_literal, |s: String| Node::string(s))(input)
}

fn parse_string_element(input: Input) -> ParseResult<StringElement> {
    alt((
        map(parse_string_escape, StringElement::EscapedChar),
        map(parse_string_literal, StringElement::Literal),
    ))(input)
}

fn parse_string_escape(input: Input) -> ParseResult<char> {
    context(
        "escaped character",
        preceded(
            char('\\'),
            alt((
                value('"', char('"')),
                value('\\', char('\\')),
                value('\n', char('n')),
                value('\r', char('r')),
                value('\t', char('t')),
                value('\0', char('0')),
            )),
        ),
    )(input)
}

#[inline]
fn parse_string_literal(input: Input) -> ParseResult<&str> {
    let (s, v) = is_not("\\\"")(input)?;
    Ok((s, *v.fragment()))
}

/// The pattern is kept verbatim, escapes included.
pub fn parse_regex(input: Input) -> ParseResult<Node> {
    let escaped = recognize(pair(char('\\'), anychar));
    let pattern = recognize(many0(alt((is_not("\\\""), escaped))));
    let regex = preceded(tag("#\""), cut(terminated(pattern, char('"'))));

    map(context("regex", regex), |s: Input| Node::regex(*s.fragment()))(input)
}

//////////////////////////////
// Characters
//////////////////////////////

/// ```grammar
/// <character> -> \ <character name> | \u <hex>{4} | \ <any char>
/// ```
pub fn parse_character(input: Input) -> ParseResult<Node> {
    let hex = || verify(anychar, |c: &char| c.is_ascii_hexdigit());
    let unicode = recognize(tuple((char('u'), hex(), hex(), hex(), hex())));
    let character = preceded(
        char('\\'),
        alt((parse_character_name, unicode, recognize(anychar))),
    );

    map(character, |s: Input| Node::character(*s.fragment()))(input)
}

#[inline]
fn parse_character_name(input: Input) -> ParseResult<Input> {
    let name = alt((
        tag("newline"),
        tag("space"),
        tag("tab"),
        tag("return"),
        tag("formfeed"),
        tag("backspace"),
    ));

    terminated(name, not_followed_by_symbol_char)(input)
}

//////////////////////////////
// Symbols and keywords
//////////////////////////////

/// ```grammar
/// <keyword> -> : :? <symbol char>+
/// ```
pub fn parse_keyword(input: Input) -> ParseResult<Node> {
    let keyword = recognize(tuple((
        char(':'),
        opt(char(':')),
        take_while1(is_symbol_subsequent),
    )));

    map(keyword, |s: Input| Node::keyword(*s.fragment()))(input)
}

/// Symbols, plus the literal names `nil`, `true` and `false`.
pub fn parse_symbolic(input: Input) -> ParseResult<Node> {
    map(parse_identifier, |name: Input| match *name.fragment() {
        "nil" => Node::nil(),
        "true" => Node::boolean(true),
        "false" => Node::boolean(false),
        other => Node::symbol(other),
    })(input)
}

/// Tag of a tagged literal, e.g. `inst` in `#inst "..."`
pub fn parse_tag(input: Input) -> ParseResult<String> {
    let tag_name = recognize(pair(
        verify(anychar, |c: &char| c.is_alphabetic()),
        take_while(is_symbol_subsequent),
    ));

    map(tag_name, |s: Input| s.fragment().to_string())(input)
}

#[inline]
fn parse_identifier(input: Input) -> ParseResult<Input> {
    recognize(pair(
        verify(anychar, |c: &char| is_symbol_initial(*c)),
        take_while(is_symbol_subsequent),
    ))(input)
}

#[inline]
pub fn is_symbol_initial(c: char) -> bool {
    c.is_alphabetic() || SYMBOL_SPECIAL_INITIAL.contains(c)
}

#[inline]
pub fn is_symbol_subsequent(c: char) -> bool {
    is_symbol_initial(c) || c.is_ascii_digit() || SYMBOL_SPECIAL_SUBSEQUENT.contains(c)
}
