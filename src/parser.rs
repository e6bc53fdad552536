use std::fmt;

use thiserror::Error;

use crate::alternative::Alternative;
use crate::combinators::{Cast, Check, Ignore, Map, Maybe, Raw, To, Transform};
use crate::cursor::Cursor;
use crate::primitives::Empty;
use crate::repeat::{Repeat, RepeatSpec};
use crate::sequence::{Homogeneous, ToVec};

/// Why a parse failed. Deliberately flat: a code and the cursor in `Parsed` are all a failure
/// carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    #[error("unknown error")]
    Unknown,
    /// Input is over.
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("expected end of input")]
    ExpectedEof,
    #[error("expected character")]
    ExpectedChar,
    #[error("expected string")]
    ExpectedString,
    /// A value was parsed but rejected, e.g. by `check`.
    #[error("expected type")]
    ExpectedType,
    #[error("expected end of line")]
    ExpectedEndOfLine,
    #[error("symbol not found")]
    SymbolNotFound,
    /// A negative lookahead matched.
    #[error("symbol not expected")]
    SymbolNotExpected,
    #[error("always fail")]
    AlwaysFail,
    /// A repetition stopped before reaching its minimum.
    #[error("too few repetitions")]
    TooFew,
    #[error("numeric underflow")]
    Underflow,
    #[error("numeric overflow")]
    Overflow,
}

/// Returned when asking a failed `Parsed` for its value. This is a bug in the calling code, not a
/// parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bad parse result access: parse failed with {code} at {offset}")]
pub struct BadParseAccess {
    pub code: ErrorCode,
    pub offset: usize,
}

/// The payload of a parser that only advances the cursor. Such parsers are called skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nothing;

/// Parsed is the outcome of every parse attempt: a cursor and either a value or an error code.
///
/// On success the cursor points behind the consumed input. On failure it points to the furthest
/// position reached, which is what `Alternative` uses to pick the most informative failure.
#[derive(Clone, PartialEq)]
pub struct Parsed<'a, T> {
    cursor: Cursor<'a>,
    outcome: Result<T, ErrorCode>,
}

/// The result of a skip.
pub type Status<'a> = Parsed<'a, Nothing>;

impl<'a, T> Parsed<'a, T> {
    pub fn success(cursor: Cursor<'a>, value: T) -> Parsed<'a, T> {
        Parsed {
            cursor,
            outcome: Ok(value),
        }
    }

    pub fn failure(cursor: Cursor<'a>, code: ErrorCode) -> Parsed<'a, T> {
        Parsed {
            cursor,
            outcome: Err(code),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }

    /// The error code, or None for a success.
    pub fn error(&self) -> Option<ErrorCode> {
        self.outcome.as_ref().err().copied()
    }

    /// The value of a successful parse.
    pub fn value(&self) -> Result<&T, BadParseAccess> {
        self.outcome.as_ref().map_err(|&code| BadParseAccess {
            code,
            offset: self.cursor.index(),
        })
    }

    pub fn into_value(self) -> Result<T, BadParseAccess> {
        let offset = self.cursor.index();
        self.outcome
            .map_err(|code| BadParseAccess { code, offset })
    }

    pub fn outcome(&self) -> Result<&T, ErrorCode> {
        self.outcome.as_ref().map_err(|&code| code)
    }

    pub fn into_parts(self) -> (Cursor<'a>, Result<T, ErrorCode>) {
        (self.cursor, self.outcome)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<'a, U> {
        Parsed {
            cursor: self.cursor,
            outcome: self.outcome.map(f),
        }
    }

    /// Forget the value, keeping only cursor and success.
    pub fn status(self) -> Status<'a> {
        self.map(|_| Nothing)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Parsed<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            Ok(v) => write!(f, "Ok({:?}) at {}", v, self.cursor.index()),
            Err(e) => write!(f, "Err({:?}) at {}", e, self.cursor.index()),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Skip {}
    impl Sealed for super::Value {}
}

/// Kind tells combinators at compile time whether a parser carries a payload. It decides the
/// output types of `Maybe`, `Repeat` and `Sequence`.
pub trait Kind: sealed::Sealed + 'static {
    /// What repeating a parser of this kind with payload `T` yields.
    type Many<T>;
    /// What making a parser of this kind with payload `T` optional yields.
    type Optional<T>;

    fn many<T>() -> Self::Many<T>;
    fn push<T>(many: &mut Self::Many<T>, value: T);
    fn some<T>(value: T) -> Self::Optional<T>;
    fn none<T>() -> Self::Optional<T>;
}

/// Kind of parsers producing `Nothing`.
#[derive(Debug)]
pub enum Skip {}

/// Kind of parsers producing a value.
#[derive(Debug)]
pub enum Value {}

impl Kind for Skip {
    type Many<T> = Nothing;
    type Optional<T> = Nothing;

    fn many<T>() -> Nothing {
        Nothing
    }
    fn push<T>(_: &mut Nothing, _: T) {}
    fn some<T>(_: T) -> Nothing {
        Nothing
    }
    fn none<T>() -> Nothing {
        Nothing
    }
}

impl Kind for Value {
    type Many<T> = Vec<T>;
    type Optional<T> = Option<T>;

    fn many<T>() -> Vec<T> {
        Vec::new()
    }
    fn push<T>(many: &mut Vec<T>, value: T) {
        many.push(value)
    }
    fn some<T>(value: T) -> Option<T> {
        Some(value)
    }
    fn none<T>() -> Option<T> {
        None
    }
}

pub trait Parser<'a> {
    type Output;
    type Kind: Kind;

    /// parse looks at the input between `at` and `end` and returns the cursor behind what it
    /// consumed together with a value, or the furthest cursor it reached and an error code. It
    /// must not read past `end`.
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output>;

    /// Parse from the start of `src`.
    fn parse_str(&self, src: &'a str) -> Parsed<'a, Self::Output>
    where
        Self: Sized,
    {
        let (b, e) = Cursor::span(src);
        self.parse(b, e)
    }

    /// apply transforms the result of this parser using a Transform combinator. A failing `f`
    /// fails the parser at the end of the consumed input.
    fn apply<R2, F: Fn(Self::Output) -> Result<R2, ErrorCode>>(self, f: F) -> Transform<Self, F>
    where
        Self: Sized,
    {
        Transform::new(self, f)
    }

    fn map<R2, F: Fn(Self::Output) -> R2>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map::new(self, f)
    }

    /// Yield a clone of `value` whenever this parser succeeds. Mostly used on skips.
    fn to<T: Clone>(self, value: T) -> To<Self, T>
    where
        Self: Sized,
    {
        To::new(self, value)
    }

    /// Convert the output into `R`. Sequences use this to build a record from their tuple.
    fn cast<R>(self) -> Cast<Self, R>
    where
        Self: Sized,
        Self::Output: Into<R>,
    {
        Cast::new(self)
    }

    fn check<F: Fn(&Self::Output) -> bool>(self, f: F) -> Check<Self, F>
    where
        Self: Sized,
    {
        Check::new(self, f)
    }

    fn skip(self) -> Ignore<Self>
    where
        Self: Sized,
    {
        Ignore::new(self)
    }

    fn opt(self) -> Maybe<Self>
    where
        Self: Sized,
    {
        Maybe::new(self)
    }

    fn repeat(self, spec: RepeatSpec) -> Repeat<Self, Empty>
    where
        Self: Sized,
    {
        Repeat::new(self, spec)
    }

    /// Yield the text consumed by this parser.
    fn raw(self) -> Raw<Self>
    where
        Self: Sized,
    {
        Raw::new(self)
    }

    /// Collect the items of a homogeneous tuple output into a `Vec`.
    fn to_vec(self) -> ToVec<Self>
    where
        Self: Sized,
        Self::Output: Homogeneous,
    {
        ToVec::new(self)
    }

    /// Try `other` if this parser fails.
    fn or<P: Parser<'a, Output = Self::Output, Kind = Self::Kind>>(
        self,
        other: P,
    ) -> Alternative<(Self, P), Self::Output>
    where
        Self: Sized,
    {
        Alternative::new((self, other))
    }

    fn by_ref(&self) -> ByRef<'_, Self>
    where
        Self: Sized,
    {
        ByRef(self)
    }

    /// Erase the parser's type, e.g. to store parsers of different shapes side by side.
    fn boxed<'p>(self) -> Boxed<'a, 'p, Self::Output, Self::Kind>
    where
        Self: Sized + Send + Sync + 'p,
    {
        Boxed(Box::new(self))
    }
}

/// Functions and closures of the right shape are value parsers. Wrap them in `skip()` to use them
/// as skips.
impl<'a, T, F> Parser<'a> for F
where
    F: Fn(Cursor<'a>, Cursor<'a>) -> Parsed<'a, T>,
{
    type Output = T;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, T> {
        self(at, end)
    }
}

/// Pin a closure to the parser shape. Closures passed around without an expected signature
/// don't get their lifetimes inferred; this helper provides one.
pub fn parser_fn<'a, T, F>(f: F) -> F
where
    F: Fn(Cursor<'a>, Cursor<'a>) -> Parsed<'a, T>,
{
    f
}

/// A borrowed parser, so one parser object can take part in several combinators.
pub struct ByRef<'p, P>(&'p P);

impl<'a, 'p, P: Parser<'a>> Parser<'a> for ByRef<'p, P> {
    type Output = P::Output;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        self.0.parse(at, end)
    }
}

pub struct Boxed<'a, 'p, T, K>(Box<dyn Parser<'a, Output = T, Kind = K> + Send + Sync + 'p>);

impl<'a, 'p, T, K: Kind> Parser<'a> for Boxed<'a, 'p, T, K> {
    type Output = T;
    type Kind = K;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, T> {
        self.0.parse(at, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::lit;

    fn two<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, u8> {
        match at.rest(end).strip_prefix("two") {
            Some(_) => Parsed::success(at.advance(3), 2),
            None => Parsed::failure(at, ErrorCode::ExpectedString),
        }
    }

    #[test]
    fn test_fn_is_parser() {
        assert_eq!(Ok(&2), two.parse_str("two").value());
        let r = two.parse_str("three");
        assert_eq!(Some(ErrorCode::ExpectedString), r.error());
        assert_eq!(
            Err(BadParseAccess {
                code: ErrorCode::ExpectedString,
                offset: 0
            }),
            r.into_value()
        );
    }

    #[test]
    fn test_bad_access_display() {
        let (b, _) = Cursor::span("x");
        let r: Parsed<u8> = Parsed::failure(b.advance(1), ErrorCode::Overflow);
        assert_eq!(
            "bad parse result access: parse failed with numeric overflow at 1",
            r.value().unwrap_err().to_string()
        );
    }

    #[test]
    fn test_boxed_and_by_ref() {
        let p = lit("ab");
        let both = crate::sequence::seq((p.by_ref(), p.by_ref()));
        assert_eq!(4, both.parse_str("abab").cursor().index());

        let parsers: Vec<Boxed<u8, Value>> = vec![two.boxed(), two.map(|x| x * 2).boxed()];
        let got: Vec<u8> = parsers
            .iter()
            .map(|p| *p.parse_str("two").value().unwrap())
            .collect();
        assert_eq!(vec![2, 4], got);
    }

    #[test]
    fn test_status_drops_value() {
        let r = two.parse_str("two").status();
        assert_eq!(Ok(&Nothing), r.value());
        assert_eq!(3, r.cursor().index());
    }
}
