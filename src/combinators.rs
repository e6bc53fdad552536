use std::marker::PhantomData;
use std::sync::OnceLock;

use crate::cursor::Cursor;
use crate::parser::{ErrorCode, Kind, Nothing, Parsed, Parser, Skip, Status, Value};
use crate::primitives::{empty, Empty};

/// Transform applies a function (which may fail) to the result of a parser. Transform only
/// succeeds if the applied function succeeds, too. A failure is reported at the end of the input
/// consumed by the inner parser.
#[derive(Clone)]
pub struct Transform<P, F> {
    f: F,
    p: P,
}

impl<P, F> Transform<P, F> {
    /// Create a new Transform parser using f.
    pub fn new(p: P, f: F) -> Transform<P, F> {
        Transform { f, p }
    }
}

impl<'a, R2, P: Parser<'a>, F: Fn(P::Output) -> Result<R2, ErrorCode>> Parser<'a>
    for Transform<P, F>
{
    type Output = R2;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, R2> {
        let (cursor, outcome) = self.p.parse(at, end).into_parts();
        match outcome.and_then(&self.f) {
            Ok(v) => Parsed::success(cursor, v),
            Err(e) => Parsed::failure(cursor, e),
        }
    }
}

/// Map applies an infallible function to the result of a parser.
#[derive(Clone)]
pub struct Map<P, F> {
    f: F,
    p: P,
}

impl<P, F> Map<P, F> {
    pub fn new(p: P, f: F) -> Map<P, F> {
        Map { f, p }
    }
}

impl<'a, R2, P: Parser<'a>, F: Fn(P::Output) -> R2> Parser<'a> for Map<P, F> {
    type Output = R2;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, R2> {
        self.p.parse(at, end).map(&self.f)
    }
}

/// To yields a fixed value whenever the inner parser succeeds.
#[derive(Clone)]
pub struct To<P, T> {
    p: P,
    value: T,
}

impl<P, T> To<P, T> {
    pub fn new(p: P, value: T) -> To<P, T> {
        To { p, value }
    }
}

impl<'a, P: Parser<'a>, T: Clone> Parser<'a> for To<P, T> {
    type Output = T;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, T> {
        self.p.parse(at, end).map(|_| self.value.clone())
    }
}

/// Cast converts the result of a parser into `R`.
pub struct Cast<P, R> {
    p: P,
    _r: PhantomData<fn() -> R>,
}

impl<P, R> Cast<P, R> {
    pub fn new(p: P) -> Cast<P, R> {
        Cast { p, _r: PhantomData }
    }
}

impl<'a, P: Parser<'a>, R> Parser<'a> for Cast<P, R>
where
    P::Output: Into<R>,
{
    type Output = R;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, R> {
        self.p.parse(at, end).map(Into::into)
    }
}

/// Check runs a predicate on the value of a successful parse. If it doesn't hold, the parse fails
/// with `ExpectedType` at the cursor the inner parser reached.
#[derive(Clone)]
pub struct Check<P, F> {
    p: P,
    f: F,
}

impl<P, F> Check<P, F> {
    pub fn new(p: P, f: F) -> Check<P, F> {
        Check { p, f }
    }
}

pub fn check<'a, P: Parser<'a>, F: Fn(&P::Output) -> bool>(p: P, f: F) -> Check<P, F> {
    Check::new(p, f)
}

impl<'a, P: Parser<'a>, F: Fn(&P::Output) -> bool> Parser<'a> for Check<P, F> {
    type Output = P::Output;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let r = self.p.parse(at, end);
        let rejected = matches!(r.outcome(), Ok(v) if !(self.f)(v));
        if rejected {
            return Parsed::failure(r.cursor(), ErrorCode::ExpectedType);
        }
        r
    }
}

/// Ignore ignores the result of an inner parser, turning it into a skip. Useful if consumed
/// input should not be processed further, and simplifies types in combined parsers.
#[derive(Clone)]
pub struct Ignore<Inner> {
    inner: Inner,
}

impl<Inner> Ignore<Inner> {
    pub fn new(p: Inner) -> Ignore<Inner> {
        Ignore { inner: p }
    }
}

pub fn skip<'a, P: Parser<'a>>(p: P) -> Ignore<P> {
    Ignore::new(p)
}

impl<'a, P: Parser<'a>> Parser<'a> for Ignore<P> {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        self.inner.parse(at, end).status()
    }
}

/// Maybe is a combinator returning Option<T> for a parser returning T, meaning it does not stop
/// parsing if an optional input was not encountered. It never fails. A skip stays a skip.
#[derive(Clone)]
pub struct Maybe<Inner> {
    inner: Inner,
}

impl<Inner> Maybe<Inner> {
    pub fn new(p: Inner) -> Maybe<Inner> {
        Maybe { inner: p }
    }
}

pub fn opt<'a, P: Parser<'a>>(p: P) -> Maybe<P> {
    Maybe::new(p)
}

impl<'a, P: Parser<'a>> Parser<'a> for Maybe<P> {
    type Output = <P::Kind as Kind>::Optional<P::Output>;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match self.inner.parse(at, end).into_parts() {
            (cursor, Ok(v)) => Parsed::success(cursor, <P::Kind as Kind>::some(v)),
            (_, Err(_)) => Parsed::success(at, <P::Kind as Kind>::none()),
        }
    }
}

/// And parses `p` only where `must` matches. `must` is only a lookahead: `p` starts at the same
/// cursor as `must` did.
#[derive(Clone)]
pub struct And<M, P> {
    must: M,
    p: P,
}

impl<M, P> And<M, P> {
    pub fn new(must: M, p: P) -> And<M, P> {
        And { must, p }
    }
}

pub fn and_p<'a, M: Parser<'a>, P: Parser<'a>>(must: M, p: P) -> And<M, P> {
    And::new(must, p)
}

/// Succeed without consuming anything where `must` matches.
pub fn lookahead<'a, M: Parser<'a>>(must: M) -> And<M, Empty> {
    And::new(must, empty())
}

impl<'a, M: Parser<'a>, P: Parser<'a>> Parser<'a> for And<M, P> {
    type Output = P::Output;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let probe = self.must.parse(at, end);
        if probe.is_err() {
            return Parsed::failure(probe.cursor(), ErrorCode::SymbolNotFound);
        }
        self.p.parse(at, end)
    }
}

/// Not parses `p` only where `non` does not match.
#[derive(Clone)]
pub struct Not<N, P> {
    non: N,
    p: P,
}

impl<N, P> Not<N, P> {
    pub fn new(non: N, p: P) -> Not<N, P> {
        Not { non, p }
    }
}

pub fn not_p<'a, N: Parser<'a>, P: Parser<'a>>(non: N, p: P) -> Not<N, P> {
    Not::new(non, p)
}

/// Succeed without consuming anything where `non` does not match.
pub fn reject<'a, N: Parser<'a>>(non: N) -> Not<N, Empty> {
    Not::new(non, empty())
}

impl<'a, N: Parser<'a>, P: Parser<'a>> Parser<'a> for Not<N, P> {
    type Output = P::Output;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        if self.non.parse(at, end).is_ok() {
            return Parsed::failure(at, ErrorCode::SymbolNotExpected);
        }
        self.p.parse(at, end)
    }
}

/// Emit always succeeds with a clone of its value, consuming nothing.
#[derive(Debug, Clone)]
pub struct Emit<T>(T);

pub fn emit<T: Clone>(value: T) -> Emit<T> {
    Emit(value)
}

impl<'a, T: Clone> Parser<'a> for Emit<T> {
    type Output = T;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, _end: Cursor<'a>) -> Parsed<'a, T> {
        Parsed::success(at, self.0.clone())
    }
}

/// When runs the inner parser if it was enabled at construction, and fails otherwise.
#[derive(Clone)]
pub struct When<P> {
    allow: bool,
    p: P,
}

pub fn when<'a, P: Parser<'a>>(allow: bool, p: P) -> When<P> {
    When { allow, p }
}

impl<'a, P: Parser<'a>> Parser<'a> for When<P> {
    type Output = P::Output;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        if self.allow {
            self.p.parse(at, end)
        } else {
            Parsed::failure(at, ErrorCode::AlwaysFail)
        }
    }
}

/// Raw yields the slice of input consumed by the inner parser.
#[derive(Clone)]
pub struct Raw<P>(P);

impl<P> Raw<P> {
    pub fn new(p: P) -> Raw<P> {
        Raw(p)
    }
}

pub fn raw<'a, P: Parser<'a>>(p: P) -> Raw<P> {
    Raw(p)
}

impl<'a, P: Parser<'a>> Parser<'a> for Raw<P> {
    type Output = &'a str;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, &'a str> {
        let r = self.0.parse(at, end);
        let cursor = r.cursor();
        r.map(|_| at.text_to(cursor))
    }
}

/// Lazy is a helper for a typical situation where you have an `Alternative` or a `Sequence` and
/// don't want to construct an expensive parser unless it is actually needed. For example:
///
/// ```ignore
/// // Let's say dict is really expensive! the first ones not as much
/// let p = choice((number(), string(), atom(), dict()));
/// ```
///
/// Then you can wrap the `dict` parser constructor in a `Lazy` parser. Then it will only be
/// constructed if the `Alternative` actually needs a `dict` parser:
///
/// ```ignore
/// let p = choice((number(), string(), atom(), Lazy::new(dict)));
/// ```
///
/// `Lazy` caches the constructed parser, meaning `f` will be called at most once, even if the
/// parser is shared between threads.
pub struct Lazy<P, F: Fn() -> P> {
    f: F,
    cell: OnceLock<P>,
}

impl<P, F: Fn() -> P> Lazy<P, F> {
    /// Create a new instance of `Lazy`:
    ///
    /// ```ignore
    /// let l = Lazy::new(|| some_expensive_function());
    /// ```
    pub fn new(f: F) -> Lazy<P, F> {
        Lazy {
            f,
            cell: OnceLock::new(),
        }
    }
}

impl<'a, P: Parser<'a>, F: Fn() -> P> Parser<'a> for Lazy<P, F> {
    type Output = P::Output;
    type Kind = P::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        self.cell.get_or_init(&self.f).parse(at, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alternative::choice;
    use crate::predicates::{is_alnum, is_alpha};
    use crate::primitives::*;
    use crate::repeat::RepeatSpec;
    use crate::sequence::seq;
    use std::cell::Cell;

    #[test]
    fn test_opt_never_fails() {
        let p = opt(digit());
        let r = p.parse_str("7x");
        assert_eq!(Ok(&Some('7')), r.value());
        assert_eq!(1, r.cursor().index());
        let r = p.parse_str("x7");
        assert_eq!(Ok(&None), r.value());
        assert_eq!(0, r.cursor().index());

        // A skip stays a skip.
        let p = lit("ab").opt();
        let r: Status = p.parse_str("abc");
        assert_eq!(2, r.cursor().index());
        assert!(p.parse_str("").is_ok());
    }

    #[test]
    fn test_and_is_lookahead() {
        let p = and_p(lit("ab"), any_char());
        let r = p.parse_str("abc");
        assert_eq!(Ok(&'a'), r.value());
        assert_eq!(1, r.cursor().index());

        let r = p.parse_str("ax");
        assert_eq!(Some(ErrorCode::SymbolNotFound), r.error());
        assert_eq!(0, r.cursor().index());

        // The failure is reported where `must` stopped.
        let p = and_p(seq((lit("a"), lit("b"))), any_char());
        let r = p.parse_str("ax");
        assert_eq!(Some(ErrorCode::SymbolNotFound), r.error());
        assert_eq!(1, r.cursor().index());

        assert_eq!(0, lookahead(lit("x")).parse_str("xy").cursor().index());
    }

    #[test]
    fn test_not() {
        let keyword = seq((lit("if"), reject(char_if(is_alnum))));
        let ident = not_p(keyword, char_if(is_alpha).repeat(RepeatSpec::Min(1)).raw());
        let r = ident.parse_str("if");
        assert_eq!(Some(ErrorCode::SymbolNotExpected), r.error());
        assert_eq!(0, r.cursor().index());
        assert_eq!(Ok(&"iffy"), ident.parse_str("iffy").value());
        assert_eq!(Ok(&"fi"), ident.parse_str("fi (").value());
    }

    #[test]
    fn test_check() {
        let even = check(digit(), |c| c.to_digit(10).map_or(false, |d| d % 2 == 0));
        assert_eq!(Ok(&'4'), even.parse_str("4").value());
        let r = even.parse_str("5");
        assert_eq!(Some(ErrorCode::ExpectedType), r.error());
        assert_eq!(1, r.cursor().index());
    }

    #[test]
    fn test_transform() {
        let p = digit().apply(|c| match c {
            '0' => Err(ErrorCode::ExpectedType),
            c => Ok(c as u8 - b'0'),
        });
        assert_eq!(Ok(&7), p.parse_str("7").value());
        let r = p.parse_str("0");
        assert_eq!(Some(ErrorCode::ExpectedType), r.error());
        assert_eq!(1, r.cursor().index());

        assert_eq!(Ok(&true), lit("yes").to(true).parse_str("yes").value());
        assert_eq!(Ok(&55u32), digit().cast::<u32>().parse_str("7").value());
    }

    #[test]
    fn test_emit_when_raw() {
        assert_eq!(Ok(&42), emit(42).parse_str("").value());
        assert!(when(true, lit("a")).parse_str("a").is_ok());
        assert_eq!(
            Some(ErrorCode::AlwaysFail),
            when(false, lit("a")).parse_str("a").error()
        );
        let number = raw(seq((opt(lit("-")), digit().repeat(RepeatSpec::Min(1)))));
        assert_eq!(Ok(&"-123"), number.parse_str("-123 4").value());
    }

    #[test]
    fn test_lazy() {
        let p = choice((
            digit(),
            Lazy::new(|| -> CharClass {
                panic!("lazy should not run this function!");
            }),
        ));
        assert_eq!(Ok(&'1'), p.parse_str("123").value());
    }

    #[test]
    fn test_lazy_builds_once() {
        let built = Cell::new(0);
        let p = Lazy::new(|| {
            built.set(built.get() + 1);
            lit("a")
        });
        let p = choice((lit("b"), p));
        assert!(p.parse_str("a").is_ok());
        assert!(p.parse_str("a").is_ok());
        assert_eq!(1, built.get());
    }
}
