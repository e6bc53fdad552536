use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::parser::{ErrorCode, Kind, Nothing, Parsed, Parser, Skip, Status, Value};
use crate::primitives::{char_from, CharIf, Empty};

/// RepeatSpec specifies how often a parser may be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatSpec {
    /// Any is equivalent to Min(0).
    Any,
    Min(usize),
    Max(usize),
    /// Between(min, max), both inclusive.
    Between(usize, usize),
    Exactly(usize),
}

impl RepeatSpec {
    /// The (min, max) pair this spec stands for. Panics if `Between` has min > max.
    pub fn bounds(self) -> (usize, usize) {
        match self {
            RepeatSpec::Any => (0, usize::MAX),
            RepeatSpec::Min(min) => (min, usize::MAX),
            RepeatSpec::Max(max) => (0, max),
            RepeatSpec::Between(min, max) => {
                assert!(min <= max, "bad repetition bounds {}..={}", min, max);
                (min, max)
            }
            RepeatSpec::Exactly(n) => (n, n),
        }
    }
}

/// Repeat applies a parser repeatedly, optionally with a separator skip between the elements. It
/// stops at the maximum count or at the first failing separator or element, and then succeeds
/// behind the last accepted element if the minimum count was reached. Otherwise it fails with
/// `TooFew`.
///
/// Repeating a value parser yields a `Vec`, repeating a skip is a skip.
///
/// An element that succeeds without consuming input is accepted once and ends the repetition.
#[derive(Clone)]
pub struct Repeat<P, W = Empty> {
    inner: P,
    sep: W,
    min: usize,
    max: usize,
}

impl<P> Repeat<P, Empty> {
    pub fn new(p: P, spec: RepeatSpec) -> Repeat<P, Empty> {
        Repeat::with_separator(p, Empty, spec)
    }
}

impl<P, W> Repeat<P, W> {
    pub fn with_separator(p: P, sep: W, spec: RepeatSpec) -> Repeat<P, W> {
        let (min, max) = spec.bounds();
        Repeat {
            inner: p,
            sep,
            min,
            max,
        }
    }

    /// Collect the elements into `C` instead of a `Vec`, e.g. characters into a `String`.
    pub fn collect<C>(self) -> CollectInto<Self, C> {
        CollectInto {
            repeat: self,
            _c: PhantomData,
        }
    }

    fn drive<'a, F>(&self, at: Cursor<'a>, end: Cursor<'a>, mut sink: F) -> Status<'a>
    where
        P: Parser<'a>,
        W: Parser<'a, Kind = Skip>,
        F: FnMut(P::Output),
    {
        let mut cursor = at;
        let mut count = 0;
        while count < self.max {
            let mut next = cursor;
            if count > 0 {
                let s = self.sep.parse(cursor, end);
                if s.is_err() {
                    break;
                }
                next = s.cursor();
            }
            match self.inner.parse(next, end).into_parts() {
                (c, Ok(v)) => {
                    sink(v);
                    count += 1;
                    let stalled = c == cursor;
                    cursor = c;
                    // A stalled element keeps matching; stop once the minimum is reached.
                    if stalled && count >= self.min {
                        break;
                    }
                }
                (_, Err(_)) => break,
            }
        }
        if count < self.min {
            Parsed::failure(cursor, ErrorCode::TooFew)
        } else {
            Parsed::success(cursor, Nothing)
        }
    }
}

pub fn repeat<'a, P: Parser<'a>>(p: P, spec: RepeatSpec) -> Repeat<P, Empty> {
    Repeat::new(p, spec)
}

/// Repetition with `sep` between the elements, e.g. whitespace or a comma.
pub fn repeat_ws<'a, P: Parser<'a>, W: Parser<'a, Kind = Skip>>(
    p: P,
    sep: W,
    spec: RepeatSpec,
) -> Repeat<P, W> {
    Repeat::with_separator(p, sep, spec)
}

impl<'a, P: Parser<'a>, W: Parser<'a, Kind = Skip>> Parser<'a> for Repeat<P, W> {
    type Output = <P::Kind as Kind>::Many<P::Output>;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let mut many = <P::Kind as Kind>::many();
        let r = self.drive(at, end, |v| <P::Kind as Kind>::push(&mut many, v));
        r.map(|_| many)
    }
}

/// Parsers that can add their results to an existing container.
pub trait ParseInto<'a, C> {
    /// Parse and extend `out` with the results. After a failure `out` may contain the elements
    /// accepted before it.
    fn parse_into(&self, at: Cursor<'a>, end: Cursor<'a>, out: &mut C) -> Status<'a>;
}

impl<'a, C, P, W> ParseInto<'a, C> for Repeat<P, W>
where
    P: Parser<'a>,
    W: Parser<'a, Kind = Skip>,
    C: Extend<P::Output>,
{
    fn parse_into(&self, at: Cursor<'a>, end: Cursor<'a>, out: &mut C) -> Status<'a> {
        self.drive(at, end, |v| out.extend(std::iter::once(v)))
    }
}

/// CollectInto runs a repetition into a fresh container of type `C`.
pub struct CollectInto<R, C> {
    repeat: R,
    _c: PhantomData<fn() -> C>,
}

impl<R: Clone, C> Clone for CollectInto<R, C> {
    fn clone(&self) -> Self {
        CollectInto {
            repeat: self.repeat.clone(),
            _c: PhantomData,
        }
    }
}

impl<'a, R: ParseInto<'a, C>, C: Default> Parser<'a> for CollectInto<R, C> {
    type Output = C;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, C> {
        let mut out = C::default();
        let r = self.repeat.parse_into(at, end, &mut out);
        r.map(|_| out)
    }
}

/// string_of consumes characters from `set` and returns them as a string. Use the RepeatSpec to
/// constrain the length.
pub fn string_of<S: AsRef<str>>(
    set: S,
    spec: RepeatSpec,
) -> CollectInto<Repeat<CharIf<impl Fn(&char) -> bool + Clone>>, String> {
    Repeat::new(char_from(set), spec).collect()
}

/// string_none_of consumes characters not in `set` and returns them as a string.
pub fn string_none_of<S: AsRef<str>>(
    set: S,
    spec: RepeatSpec,
) -> CollectInto<Repeat<CharIf<impl Fn(&char) -> bool + Clone>>, String> {
    let set = set.as_ref().to_owned();
    Repeat::new(CharIf::new(move |c: &char| !set.contains(*c)), spec).collect()
}
