use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::parser::{ErrorCode, Nothing, Parsed, Parser, Skip, Status, Value};
use crate::predicates;

/// Empty always succeeds without consuming anything. It is the default separator of sequences and
/// repetitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

pub fn empty() -> Empty {
    Empty
}

impl<'a> Parser<'a> for Empty {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, _end: Cursor<'a>) -> Status<'a> {
        Parsed::success(at, Nothing)
    }
}

/// Literal matches a fixed string, optionally ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
    ignore_case: bool,
}

impl Literal {
    pub fn new<S: AsRef<str>>(s: S) -> Literal {
        Literal {
            text: s.as_ref().to_owned(),
            ignore_case: false,
        }
    }

    pub fn ignore_case<S: AsRef<str>>(s: S) -> Literal {
        Literal {
            text: s.as_ref().to_owned(),
            ignore_case: true,
        }
    }
}

pub fn lit<S: AsRef<str>>(s: S) -> Literal {
    Literal::new(s)
}

pub fn ci_lit<S: AsRef<str>>(s: S) -> Literal {
    Literal::ignore_case(s)
}

impl<'a> Parser<'a> for Literal {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        let want = self.text.as_bytes();
        let have = at.rest(end).as_bytes();
        if have.len() < want.len() {
            return Parsed::failure(at, ErrorCode::UnexpectedEof);
        }
        let head = &have[..want.len()];
        let matched = if self.ignore_case {
            head.eq_ignore_ascii_case(want)
        } else {
            head == want
        };
        if matched {
            Parsed::success(at.advance(want.len()), Nothing)
        } else {
            Parsed::failure(at, ErrorCode::ExpectedString)
        }
    }
}

/// CharLiteral matches exactly one given character.
#[derive(Debug, Clone, Copy)]
pub struct CharLiteral(char);

pub fn lit_char(c: char) -> CharLiteral {
    CharLiteral(c)
}

impl<'a> Parser<'a> for CharLiteral {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        match at.next_char(end) {
            None => Parsed::failure(at, ErrorCode::UnexpectedEof),
            Some((c, next)) if c == self.0 => Parsed::success(next, Nothing),
            Some(_) => Parsed::failure(at, ErrorCode::UnexpectedChar),
        }
    }
}

/// CharIf yields the next character if it satisfies a predicate.
#[derive(Clone, Copy)]
pub struct CharIf<F>(F);

pub type CharClass = CharIf<fn(&char) -> bool>;

impl<F: Fn(&char) -> bool> CharIf<F> {
    pub fn new(f: F) -> CharIf<F> {
        CharIf(f)
    }
}

pub fn char_if<F: Fn(&char) -> bool>(f: F) -> CharIf<F> {
    CharIf(f)
}

/// Any one character out of `set`.
pub fn char_from<S: AsRef<str>>(set: S) -> CharIf<impl Fn(&char) -> bool + Clone> {
    let set = set.as_ref().to_owned();
    CharIf(move |c: &char| set.contains(*c))
}

fn anything(_: &char) -> bool {
    true
}

pub fn any_char() -> CharClass {
    CharIf(anything as fn(&char) -> bool)
}

pub fn digit() -> CharClass {
    CharIf(predicates::is_digit as fn(&char) -> bool)
}

pub fn space() -> CharClass {
    CharIf(predicates::is_space as fn(&char) -> bool)
}

/// Whitespace other than line breaks.
pub fn lspace() -> CharClass {
    CharIf(predicates::is_line_space as fn(&char) -> bool)
}

impl<'a, F: Fn(&char) -> bool> Parser<'a> for CharIf<F> {
    type Output = char;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, char> {
        match at.next_char(end) {
            None => Parsed::failure(at, ErrorCode::UnexpectedEof),
            Some((c, next)) if (self.0)(&c) => Parsed::success(next, c),
            Some(_) => Parsed::failure(at, ErrorCode::UnexpectedChar),
        }
    }
}

/// Eof succeeds only at the end of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eof;

pub fn eof() -> Eof {
    Eof
}

impl<'a> Parser<'a> for Eof {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        if at.at_end(end) {
            Parsed::success(at, Nothing)
        } else {
            Parsed::failure(at, ErrorCode::ExpectedEof)
        }
    }
}

/// Eol consumes one line ending: `\n`, `\r`, `\n\r` or `\r\n`. The end of input counts as a line
/// ending too, without consuming anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eol;

pub fn eol() -> Eol {
    Eol
}

impl<'a> Parser<'a> for Eol {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        let (first, next) = match at.next_char(end) {
            None => return Parsed::success(at, Nothing),
            Some(cn) => cn,
        };
        let pair = match first {
            '\n' => '\r',
            '\r' => '\n',
            _ => return Parsed::failure(at, ErrorCode::ExpectedEndOfLine),
        };
        match next.next_char(end) {
            Some((c, after)) if c == pair => Parsed::success(after, Nothing),
            _ => Parsed::success(next, Nothing),
        }
    }
}

/// Fail never succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fail;

pub fn fail() -> Fail {
    Fail
}

impl<'a> Parser<'a> for Fail {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, _end: Cursor<'a>) -> Status<'a> {
        Parsed::failure(at, ErrorCode::AlwaysFail)
    }
}

/// FailAs never succeeds, but claims to produce a `T`. Useful as a placeholder alternative.
pub struct FailAs<T>(PhantomData<fn() -> T>);

pub fn fail_as<T>() -> FailAs<T> {
    FailAs(PhantomData)
}

impl<T> Clone for FailAs<T> {
    fn clone(&self) -> Self {
        FailAs(PhantomData)
    }
}

impl<'a, T> Parser<'a> for FailAs<T> {
    type Output = T;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, _end: Cursor<'a>) -> Parsed<'a, T> {
        Parsed::failure(at, ErrorCode::AlwaysFail)
    }
}
