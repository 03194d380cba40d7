//! Minimal literal grammar for snapshot files.
//!
//! Accepts mappings with string keys, sequences and single- or double-quoted
//! strings, separated by insignificant whitespace. Trailing commas are allowed.
//! Numbers, identifiers, prefixed strings and anything executable are rejected.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1, take_while_m_n},
    character::complete::{anychar, char, one_of},
    combinator::{cond, map, map_opt, opt, value},
    error::{ErrorKind, ParseError},
    multi::{fold_many0, separated_list0},
    sequence::{preceded, terminated},
    IResult, Parser,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_NESTING_DEPTH: usize = 32;

/// Parsed literal tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Str(String),
    List(Vec<LiteralValue>),
    /// Entries in source order; duplicate keys are preserved for the schema layer to reject.
    Map(Vec<(String, LiteralValue)>),
}

impl LiteralValue {
    /// Short kind name used in schema error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::List(_) => "sequence",
            Self::Map(_) => "mapping",
        }
    }
}

/// Grammar error with a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Display for LiteralError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line, self.column)
    }
}

impl Error for LiteralError {}

/// Parses exactly one literal value spanning the whole input.
pub fn parse_literal(input: &str) -> Result<LiteralValue, LiteralError> {
    match terminated(document, blank)(input) {
        Ok(("", value)) => Ok(value),
        Ok((rest, _)) => Err(locate(
            input,
            rest,
            "unexpected trailing characters after literal",
        )),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
            Err(locate(input, err.remaining, err.message))
        }
        Err(nom::Err::Incomplete(_)) => Err(locate(input, "", "unexpected end of input")),
    }
}

/// Returns `value` as a quoted literal.
#[cfg(test)]
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_quoted(&mut out, value);
    out
}

/// Appends `value` as a quoted literal.
///
/// Uses `'` unless the text contains `'` but no `"`. Backslashes, the chosen
/// quote and control characters are escaped; everything else is kept as-is.
pub fn write_quoted(out: &mut String, value: &str) {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Parser error carrying the unparsed remainder so it can be located.
#[derive(Debug)]
struct GrammarError<'a> {
    remaining: &'a str,
    message: String,
}

impl<'a> ParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self {
            remaining: input,
            message: format!("unexpected input ({kind:?})"),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, O> = IResult<&'a str, O, GrammarError<'a>>;

/// Piece of a string body between escapes.
#[derive(Debug, Clone, Copy)]
enum Fragment<'a> {
    Text(&'a str),
    Char(char),
    /// Unrecognized escapes are kept verbatim, backslash included.
    Unknown(char),
}

impl Fragment<'_> {
    fn push_onto(self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Char(c) => out.push(c),
            Self::Unknown(c) => {
                out.push('\\');
                out.push(c);
            }
        }
    }
}

fn failure<'a>(remaining: &'a str, message: impl Into<String>) -> nom::Err<GrammarError<'a>> {
    nom::Err::Failure(GrammarError {
        remaining,
        message: message.into(),
    })
}

/// Commits to `parser`: a soft error becomes a failure reported with `message`.
fn expect<'a, O, F>(message: &'static str, mut parser: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: Parser<&'a str, O, GrammarError<'a>>,
{
    move |input: &'a str| match parser.parse(input) {
        Err(nom::Err::Error(_)) => Err(failure(input, message)),
        other => other,
    }
}

fn locate(input: &str, remaining: &str, message: impl Into<String>) -> LiteralError {
    let consumed = &input[..input.len() - remaining.len()];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(index) => consumed[index + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    LiteralError {
        line,
        column,
        message: message.into(),
    }
}

fn blank(input: &str) -> PResult<'_, &str> {
    take_while(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c'))(input)
}

fn comma(input: &str) -> PResult<'_, char> {
    preceded(blank, char(','))(input)
}

fn document(input: &str) -> PResult<'_, LiteralValue> {
    literal(input, 0)
}

/// Any value, failing hard when none starts here.
fn literal<'a>(input: &'a str, depth: usize) -> PResult<'a, LiteralValue> {
    preceded(
        blank,
        alt((|i: &'a str| item(i, depth), unexpected_token)),
    )(input)
}

/// Any value, failing softly so enclosing lists can stop.
fn item<'a>(input: &'a str, depth: usize) -> PResult<'a, LiteralValue> {
    alt((
        |i: &'a str| mapping(i, depth),
        |i: &'a str| sequence(i, depth),
        map(string, LiteralValue::Str),
    ))(input)
}

fn unexpected_token(input: &str) -> PResult<'_, LiteralValue> {
    match input.chars().next() {
        Some(other) => Err(failure(input, format!("unexpected character `{other}`"))),
        None => Err(failure(input, "unexpected end of input")),
    }
}

fn nested(opening: &str, depth: usize) -> Result<usize, nom::Err<GrammarError<'_>>> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(failure(
            opening,
            format!("literal nesting deeper than {MAX_NESTING_DEPTH} levels"),
        ));
    }
    Ok(depth + 1)
}

fn mapping<'a>(input: &'a str, depth: usize) -> PResult<'a, LiteralValue> {
    let (rest, _) = char('{')(input)?;
    let depth = nested(input, depth)?;
    let (rest, entries) = separated_list0(comma, |i: &'a str| entry(i, depth))(rest)?;
    let (rest, _) = cond(!entries.is_empty(), opt(comma))(rest)?;
    let (rest, _) = preceded(
        blank,
        expect("expected quoted key, `,` or `}` in mapping", char('}')),
    )(rest)?;
    Ok((rest, LiteralValue::Map(entries)))
}

fn entry<'a>(input: &'a str, depth: usize) -> PResult<'a, (String, LiteralValue)> {
    let (rest, key) = preceded(blank, string)(input)?;
    let (rest, _) = preceded(blank, expect("expected `:` after mapping key", char(':')))(rest)?;
    let (rest, value) = literal(rest, depth)?;
    Ok((rest, (key, value)))
}

fn sequence<'a>(input: &'a str, depth: usize) -> PResult<'a, LiteralValue> {
    let (rest, _) = char('[')(input)?;
    let depth = nested(input, depth)?;
    let (rest, items) =
        separated_list0(comma, preceded(blank, |i: &'a str| item(i, depth)))(rest)?;
    let (rest, _) = cond(!items.is_empty(), opt(comma))(rest)?;
    let (rest, _) = preceded(
        blank,
        expect("expected value, `,` or `]` in sequence", char(']')),
    )(rest)?;
    Ok((rest, LiteralValue::List(items)))
}

fn string(input: &str) -> PResult<'_, String> {
    alt((quoted('\''), quoted('"')))(input)
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> PResult<'a, String> {
    move |input: &'a str| {
        let (rest, _) = char(quote)(input)?;
        let (rest, text) = fold_many0(
            |i: &'a str| fragment(i, quote),
            String::new,
            |mut text, piece: Fragment<'a>| {
                piece.push_onto(&mut text);
                text
            },
        )(rest)?;
        let (rest, _) = closing_quote(rest, quote)?;
        Ok((rest, text))
    }
}

fn fragment(input: &str, quote: char) -> PResult<'_, Fragment<'_>> {
    alt((
        map(
            take_while1(move |c: char| c != quote && !matches!(c, '\\' | '\n' | '\r')),
            Fragment::Text,
        ),
        escape,
    ))(input)
}

fn closing_quote(input: &str, quote: char) -> PResult<'_, char> {
    match input.chars().next() {
        Some(c) if c == quote => char(quote)(input),
        Some('\n' | '\r') => Err(failure(input, "unescaped line break inside string")),
        _ => Err(failure(input, "unterminated string")),
    }
}

fn escape(input: &str) -> PResult<'_, Fragment<'_>> {
    preceded(
        char('\\'),
        alt((
            // Line continuation.
            value(Fragment::Text(""), alt((tag("\r\n"), tag("\n"), tag("\r")))),
            map(simple_escape, Fragment::Char),
            map(
                preceded(char('x'), expect("invalid `\\x` escape", code_point(2))),
                Fragment::Char,
            ),
            map(
                preceded(char('u'), expect("invalid `\\u` escape", code_point(4))),
                Fragment::Char,
            ),
            map(
                preceded(char('U'), expect("invalid `\\U` escape", code_point(8))),
                Fragment::Char,
            ),
            map(octal, Fragment::Char),
            map(anychar, Fragment::Unknown),
        )),
    )(input)
}

fn simple_escape(input: &str) -> PResult<'_, char> {
    alt((
        one_of("\\'\""),
        value('\x07', char('a')),
        value('\x08', char('b')),
        value('\x0c', char('f')),
        value('\n', char('n')),
        value('\r', char('r')),
        value('\t', char('t')),
        value('\x0b', char('v')),
    ))(input)
}

fn code_point<'a>(digits: usize) -> impl FnMut(&'a str) -> PResult<'a, char> {
    map_opt(
        take_while_m_n(digits, digits, |c: char| c.is_ascii_hexdigit()),
        |hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
    )
}

fn octal(input: &str) -> PResult<'_, char> {
    map_opt(take_while_m_n(1, 3, |c: char| c.is_digit(8)), |digits: &str| {
        u32::from_str_radix(digits, 8).ok().and_then(char::from_u32)
    })(input)
}
