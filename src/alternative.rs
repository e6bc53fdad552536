//! Ordered choice. The alternatives are tried in order from the same position and the first one
//! to succeed wins. If all of them fail, the failure that got furthest into the input is reported;
//! among equally far failures the earliest alternative wins.

use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::parser::{ErrorCode, Kind, Parsed, Parser, Value};

/// Tracks the most advanced failure seen so far.
struct Furthest<'a> {
    best: Option<(Cursor<'a>, ErrorCode)>,
}

impl<'a> Furthest<'a> {
    fn new() -> Furthest<'a> {
        Furthest { best: None }
    }

    fn offer(&mut self, cursor: Cursor<'a>, code: ErrorCode) {
        match self.best {
            Some((c, _)) if cursor <= c => (),
            _ => self.best = Some((cursor, code)),
        }
    }

    fn failure<T>(self, at: Cursor<'a>) -> Parsed<'a, T> {
        match self.best {
            Some((cursor, code)) => Parsed::failure(cursor, code),
            None => Parsed::failure(at, ErrorCode::Unknown),
        }
    }
}

/// Alternative tries the parsers of a tuple in order. All of them must be of the same kind, and
/// their results are converted into `R`.
pub struct Alternative<T, R> {
    parsers: T,
    _r: PhantomData<fn() -> R>,
}

impl<T, R> Alternative<T, R> {
    pub fn new(tuple: T) -> Alternative<T, R> {
        Alternative {
            parsers: tuple,
            _r: PhantomData,
        }
    }
}

impl<T: Clone, R> Clone for Alternative<T, R> {
    fn clone(&self) -> Self {
        Alternative::new(self.parsers.clone())
    }
}

/// Tuples of parsers. `First` is the output of the first one, which is the default result type of
/// `choice`.
pub trait Alternatives<'a> {
    type First;
}

macro_rules! alt_impl {
    ( ( $($ptype:ident/$ix:tt),* ) ) => {
        impl<'a, P0: Parser<'a>, $($ptype,)*> Alternatives<'a> for (P0, $($ptype,)*) {
            type First = P0::Output;
        }

        impl<'a, R, K: Kind, P0: Parser<'a, Kind = K>, $($ptype: Parser<'a, Kind = K>,)*> Parser<'a>
            for Alternative<(P0, $($ptype,)*), R>
        where
            <P0 as Parser<'a>>::Output: Into<R>,
            $( <$ptype as Parser<'a>>::Output: Into<R>, )*
        {
            type Output = R;
            type Kind = K;
            fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, R> {
                let mut furthest = Furthest::new();
                match self.parsers.0.parse(at, end).into_parts() {
                    (cursor, Ok(v)) => return Parsed::success(cursor, v.into()),
                    (cursor, Err(e)) => furthest.offer(cursor, e),
                }
                $(
                    match self.parsers.$ix.parse(at, end).into_parts() {
                        (cursor, Ok(v)) => return Parsed::success(cursor, v.into()),
                        (cursor, Err(e)) => furthest.offer(cursor, e),
                    }
                )*
                furthest.failure(at)
            }
        }
    }
}

alt_impl!(());
alt_impl!((P1 / 1));
alt_impl!((P1 / 1, P2 / 2));
alt_impl!((P1 / 1, P2 / 2, P3 / 3));
alt_impl!((P1 / 1, P2 / 2, P3 / 3, P4 / 4));
alt_impl!((P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5));
alt_impl!((P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5, P6 / 6));
alt_impl!((P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5, P6 / 6, P7 / 7));
alt_impl!((
    P1 / 1,
    P2 / 2,
    P3 / 3,
    P4 / 4,
    P5 / 5,
    P6 / 6,
    P7 / 7,
    P8 / 8
));
alt_impl!((
    P1 / 1,
    P2 / 2,
    P3 / 3,
    P4 / 4,
    P5 / 5,
    P6 / 6,
    P7 / 7,
    P8 / 8,
    P9 / 9
));

/// Choice between the parsers in `tuple`, yielding the first parser's result type. The other
/// alternatives must convert into it.
pub fn choice<'a, T: Alternatives<'a>>(tuple: T) -> Alternative<T, T::First> {
    Alternative::new(tuple)
}

/// Choice yielding `R`, for alternatives whose results are different types convertible into `R`.
pub fn choice_as<R, T>(tuple: T) -> Alternative<T, R> {
    Alternative::new(tuple)
}

/// OneOf tries its parsers like Alternative, but yields a tagged union of their results. The
/// alternatives may be of different kinds and are not required to convert into a common type.
pub struct OneOf<T>(T);

pub fn one_of<T>(tuple: T) -> OneOf<T> {
    OneOf(tuple)
}

macro_rules! one_of_enum {
    ( $name:ident : $($var:ident),+ ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name<$($var),+> {
            $( $var($var), )+
        }
    }
}

one_of_enum!(OneOf2: A, B);
one_of_enum!(OneOf3: A, B, C);
one_of_enum!(OneOf4: A, B, C, D);
one_of_enum!(OneOf5: A, B, C, D, E);

macro_rules! one_of_impl {
    ( $name:ident : $($ptype:ident/$ix:tt/$var:ident),+ ) => {
        impl<'a, $($ptype: Parser<'a, Kind = Value>,)+> Parser<'a> for OneOf<($($ptype,)+)> {
            type Output = $name<$(<$ptype as Parser<'a>>::Output),+>;
            type Kind = Value;
            fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
                let mut furthest = Furthest::new();
                $(
                    match self.0.$ix.parse(at, end).into_parts() {
                        (cursor, Ok(v)) => return Parsed::success(cursor, $name::$var(v)),
                        (cursor, Err(e)) => furthest.offer(cursor, e),
                    }
                )+
                furthest.failure(at)
            }
        }
    }
}

one_of_impl!(OneOf2: P0 / 0 / A, P1 / 1 / B);
one_of_impl!(OneOf3: P0 / 0 / A, P1 / 1 / B, P2 / 2 / C);
one_of_impl!(OneOf4: P0 / 0 / A, P1 / 1 / B, P2 / 2 / C, P3 / 3 / D);
one_of_impl!(OneOf5: P0 / 0 / A, P1 / 1 / B, P2 / 2 / C, P3 / 3 / D, P4 / 4 / E);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Nothing, Status};
    use crate::primitives::*;
    use crate::repeat::RepeatSpec;
    use crate::sequence::seq;

    #[test]
    fn test_ordered() {
        let p = choice((lit("ab").to(1), lit("abc").to(2), lit("x").to(3)));
        let r = p.parse_str("abc");
        assert_eq!(Ok(&1), r.value());
        assert_eq!(2, r.cursor().index());
        assert_eq!(Ok(&3), p.parse_str("x").value());
    }

    #[test]
    fn test_furthest_failure() {
        let p = choice((seq((lit("a"), lit("x"))), seq((lit("a"), lit("b"), lit("c")))));
        let r = p.parse_str("abd");
        assert_eq!(Some(ErrorCode::ExpectedString), r.error());
        assert_eq!(2, r.cursor().index());

        // Equally far: the first alternative's failure is reported.
        let p = choice((lit("x"), lit_char('y')));
        let r = p.parse_str("z");
        assert_eq!(Some(ErrorCode::ExpectedString), r.error());
        assert_eq!(0, r.cursor().index());
        let p = choice((lit_char('y'), lit("x")));
        assert_eq!(Some(ErrorCode::UnexpectedChar), p.parse_str("z").error());
    }

    #[test]
    fn test_skip_choice() {
        let sign = choice((lit("+"), lit("-")));
        let r: Status = sign.parse_str("-1");
        assert_eq!(Ok(&Nothing), r.value());
        assert_eq!(1, r.cursor().index());
        let signs = sign.repeat(RepeatSpec::Any);
        assert_eq!(3, signs.parse_str("+-+1").cursor().index());
    }

    #[test]
    fn test_choice_as() {
        let p = choice_as::<u64, _>((lit("small").to(7u8), lit("big").to(1u32 << 20)));
        assert_eq!(Ok(&7u64), p.parse_str("small").value());
        assert_eq!(Ok(&(1u64 << 20)), p.parse_str("big").value());
    }

    #[test]
    fn test_or() {
        let p = lit("yes").to(true).or(lit("no").to(false));
        assert_eq!(Ok(&true), p.parse_str("yes").value());
        assert_eq!(Ok(&false), p.parse_str("no").value());
        assert!(p.parse_str("maybe").is_err());
    }

    #[test]
    fn test_one_of() {
        let p = one_of((digit(), lit("x").to(10u8), lit("y").to("why")));
        assert_eq!(Ok(&OneOf3::A('4')), p.parse_str("4").value());
        assert_eq!(Ok(&OneOf3::B(10)), p.parse_str("x").value());
        assert_eq!(Ok(&OneOf3::C("why")), p.parse_str("y").value());
        assert_eq!(Some(ErrorCode::UnexpectedChar), p.parse_str("z").error());
    }
}
