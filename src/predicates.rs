//! Predicates for `char_if` and `check`, and combinators building new predicates out of old ones.
//! A predicate is any `Fn(&T) -> bool`.
//!
//! ```
//! use pegcomb::predicates::{in_range, negate, when_any};
//! use pegcomb::primitives::char_if;
//! use pegcomb::Parser;
//!
//! let ident_start = char_if(when_any((in_range('a', 'z'), in_range('A', 'Z'), |c: &char| *c == '_')));
//! assert!(ident_start.parse_str("_x").is_ok());
//! let not_digit = char_if(negate(in_range('0', '9')));
//! assert!(not_digit.parse_str("7").is_err());
//! ```

/// A fixed set of predicates over `T`, implemented for tuples of up to eight predicates.
pub trait PredicateSet<T: ?Sized> {
    fn any(&self, v: &T) -> bool;
    fn all(&self, v: &T) -> bool;
}

macro_rules! predicate_set_impl {
    ( $($ptype:ident/$ix:tt),+ ) => {
        impl<T: ?Sized, $($ptype: Fn(&T) -> bool,)+> PredicateSet<T> for ($($ptype,)+) {
            fn any(&self, v: &T) -> bool {
                $( (self.$ix)(v) )||+
            }
            fn all(&self, v: &T) -> bool {
                $( (self.$ix)(v) )&&+
            }
        }
    }
}

predicate_set_impl!(P0 / 0);
predicate_set_impl!(P0 / 0, P1 / 1);
predicate_set_impl!(P0 / 0, P1 / 1, P2 / 2);
predicate_set_impl!(P0 / 0, P1 / 1, P2 / 2, P3 / 3);
predicate_set_impl!(P0 / 0, P1 / 1, P2 / 2, P3 / 3, P4 / 4);
predicate_set_impl!(P0 / 0, P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5);
predicate_set_impl!(P0 / 0, P1 / 1, P2 / 2, P3 / 3, P4 / 4, P5 / 5, P6 / 6);
predicate_set_impl!(
    P0 / 0,
    P1 / 1,
    P2 / 2,
    P3 / 3,
    P4 / 4,
    P5 / 5,
    P6 / 6,
    P7 / 7
);

/// True if any predicate in the tuple holds.
pub fn when_any<T: ?Sized, S: PredicateSet<T>>(set: S) -> impl Fn(&T) -> bool + Clone
where
    S: Clone,
{
    move |v: &T| set.any(v)
}

/// True if every predicate in the tuple holds.
pub fn when_all<T: ?Sized, S: PredicateSet<T>>(set: S) -> impl Fn(&T) -> bool + Clone
where
    S: Clone,
{
    move |v: &T| set.all(v)
}

/// True if the value equals one of `values`.
pub fn equals<T: PartialEq + Clone, const N: usize>(values: [T; N]) -> impl Fn(&T) -> bool + Clone {
    move |v: &T| values.iter().any(|x| x == v)
}

/// True if the value equals none of `values`.
pub fn not_equals<T: PartialEq + Clone, const N: usize>(
    values: [T; N],
) -> impl Fn(&T) -> bool + Clone {
    move |v: &T| values.iter().all(|x| x != v)
}

pub fn negate<T: ?Sized, P: Fn(&T) -> bool + Clone>(p: P) -> impl Fn(&T) -> bool + Clone {
    move |v: &T| !p(v)
}

/// True for `lo <= v <= hi`.
pub fn in_range<T: PartialOrd + Clone>(lo: T, hi: T) -> impl Fn(&T) -> bool + Clone {
    move |v: &T| *v >= lo && *v <= hi
}

pub fn is_digit(c: &char) -> bool {
    c.is_ascii_digit()
}

pub fn is_alpha(c: &char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_alnum(c: &char) -> bool {
    c.is_ascii_alphanumeric()
}

/// ASCII whitespace, including line breaks and vertical tab.
pub fn is_space(c: &char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// ASCII whitespace without line breaks.
pub fn is_line_space(c: &char) -> bool {
    matches!(c, ' ' | '\t' | '\x0b' | '\x0c')
}

/// Predicate for digits of the given radix (2 to 36), accepting both letter cases.
///
/// Panics if `radix` is out of range.
pub fn is_radix_char(radix: u32) -> impl Fn(&char) -> bool + Clone + Copy {
    assert!((2..=36).contains(&radix), "unsupported radix {}", radix);
    move |c: &char| c.is_digit(radix)
}
