//! Sequencing. A `Sequence` runs its parsers one after the other and fails as soon as one of
//! them fails. Its output type is computed from the kinds of its elements:
//!
//!   * only skips: the sequence is a skip itself;
//!   * one value parser: the sequence yields that value, unwrapped;
//!   * several value parsers: the sequence yields a tuple of their values (at most eight).
//!
//! Use `cast()` to turn the tuple into a type implementing `From<tuple>`, or `to_vec()` if all
//! values have the same type.
//!
//! ```
//! use pegcomb::primitives::{digit, lit};
//! use pegcomb::{seq, Parser};
//!
//! let pair = seq((lit("("), digit(), lit(","), digit(), lit(")")));
//! assert_eq!(Ok(&('1', '2')), pair.parse_str("(1,2)").value());
//!
//! let date = seq((digit(), digit(), lit("-"), digit(), digit())).to_vec();
//! assert_eq!(Ok(&vec!['0', '3', '1', '7']), date.parse_str("03-17").value());
//! ```

use crate::cursor::Cursor;
use crate::parser::{Kind, Nothing, Parsed, Parser, Skip, Value};
use crate::primitives::Empty;

/// Appending a value to a tuple.
pub trait Push<T> {
    type Pushed;
    fn push(self, value: T) -> Self::Pushed;
}

macro_rules! push_impl {
    ( $($t:ident),* ) => {
        impl<$($t,)* Z> Push<Z> for ($($t,)*) {
            type Pushed = ($($t,)* Z,);
            #[allow(non_snake_case)]
            fn push(self, z: Z) -> Self::Pushed {
                let ($($t,)*) = self;
                ($($t,)* z,)
            }
        }
    }
}

push_impl!();
push_impl!(A);
push_impl!(A, B);
push_impl!(A, B, C);
push_impl!(A, B, C, D);
push_impl!(A, B, C, D, E);
push_impl!(A, B, C, D, E, F);
push_impl!(A, B, C, D, E, F, G);

/// Turning the collected tuple into the sequence's output.
pub trait Finish {
    type Output;
    type Kind: Kind;
    fn finish(self) -> Self::Output;
}

impl Finish for () {
    type Output = Nothing;
    type Kind = Skip;
    fn finish(self) -> Nothing {
        Nothing
    }
}

impl<A> Finish for (A,) {
    type Output = A;
    type Kind = Value;
    fn finish(self) -> A {
        self.0
    }
}

macro_rules! finish_impl {
    ( $($t:ident),+ ) => {
        impl<$($t),+> Finish for ($($t,)+) {
            type Output = Self;
            type Kind = Value;
            fn finish(self) -> Self {
                self
            }
        }
    }
}

finish_impl!(A, B);
finish_impl!(A, B, C);
finish_impl!(A, B, C, D);
finish_impl!(A, B, C, D, E);
finish_impl!(A, B, C, D, E, F);
finish_impl!(A, B, C, D, E, F, G);
finish_impl!(A, B, C, D, E, F, G, H);

/// How a parser of some kind adds its result to the values collected so far: skips add nothing,
/// value parsers push their value.
pub trait Collect<Acc, T> {
    type Out;
    fn collect(acc: Acc, value: T) -> Self::Out;
}

impl<Acc, T> Collect<Acc, T> for Skip {
    type Out = Acc;
    fn collect(acc: Acc, _: T) -> Acc {
        acc
    }
}

impl<Acc: Push<T>, T> Collect<Acc, T> for Value {
    type Out = Acc::Pushed;
    fn collect(acc: Acc, value: T) -> Acc::Pushed {
        acc.push(value)
    }
}

/// The head of a chain of sequenced parsers.
#[derive(Debug, Clone, Copy)]
pub struct Start;

/// One element of a chain of sequenced parsers, following `prev`.
#[derive(Debug, Clone)]
pub struct Link<Prev, P> {
    prev: Prev,
    p: P,
}

/// A chain of parsers run one after the other, separated by a skip.
pub trait Chain<'a> {
    /// Tuple of the values collected so far.
    type Acc;
    /// Number of parsers in the chain.
    const LEN: usize;

    fn run<W: Parser<'a>>(&self, at: Cursor<'a>, end: Cursor<'a>, sep: &W) -> Parsed<'a, Self::Acc>;
}

impl<'a> Chain<'a> for Start {
    type Acc = ();
    const LEN: usize = 0;

    fn run<W: Parser<'a>>(&self, at: Cursor<'a>, _end: Cursor<'a>, _sep: &W) -> Parsed<'a, ()> {
        Parsed::success(at, ())
    }
}

impl<'a, Prev, P> Chain<'a> for Link<Prev, P>
where
    Prev: Chain<'a>,
    P: Parser<'a>,
    P::Kind: Collect<Prev::Acc, P::Output>,
{
    type Acc = <P::Kind as Collect<Prev::Acc, P::Output>>::Out;
    const LEN: usize = Prev::LEN + 1;

    fn run<W: Parser<'a>>(&self, at: Cursor<'a>, end: Cursor<'a>, sep: &W) -> Parsed<'a, Self::Acc> {
        let (mut cursor, acc) = match self.prev.run(at, end, sep).into_parts() {
            (cursor, Ok(acc)) => (cursor, acc),
            (cursor, Err(e)) => return Parsed::failure(cursor, e),
        };
        if Prev::LEN > 0 {
            let s = sep.parse(cursor, end);
            if let Some(e) = s.error() {
                return Parsed::failure(s.cursor(), e);
            }
            cursor = s.cursor();
        }
        match self.p.parse(cursor, end).into_parts() {
            (cursor, Ok(v)) => Parsed::success(
                cursor,
                <P::Kind as Collect<Prev::Acc, P::Output>>::collect(acc, v),
            ),
            (cursor, Err(e)) => Parsed::failure(cursor, e),
        }
    }
}

/// Tuples of parsers that can be turned into a chain.
pub trait IntoChain {
    type Chain;
    fn into_chain(self) -> Self::Chain;
}

macro_rules! chain_type {
    ( $acc:ty ; ) => { $acc };
    ( $acc:ty ; $head:ident $(, $tail:ident)* ) => { chain_type!(Link<$acc, $head> ; $($tail),*) };
}

macro_rules! chain_value {
    ( $acc:expr ; ) => { $acc };
    ( $acc:expr ; $head:ident $(, $tail:ident)* ) => {
        chain_value!(Link { prev: $acc, p: $head } ; $($tail),*)
    };
}

/// Macro for implementing IntoChain for tuples. Not for public use.
macro_rules! chain_impl {
    ( $($ptype:ident),* ) => {
        impl<$($ptype,)*> IntoChain for ($($ptype,)*) {
            type Chain = chain_type!(Start ; $($ptype),*);
            #[allow(non_snake_case, clippy::unused_unit)]
            fn into_chain(self) -> Self::Chain {
                let ($($ptype,)*) = self;
                chain_value!(Start ; $($ptype),*)
            }
        }
    }
}

chain_impl!();
chain_impl!(P0);
chain_impl!(P0, P1);
chain_impl!(P0, P1, P2);
chain_impl!(P0, P1, P2, P3);
chain_impl!(P0, P1, P2, P3, P4);
chain_impl!(P0, P1, P2, P3, P4, P5);
chain_impl!(P0, P1, P2, P3, P4, P5, P6);
chain_impl!(P0, P1, P2, P3, P4, P5, P6, P7);
chain_impl!(P0, P1, P2, P3, P4, P5, P6, P7, P8);
chain_impl!(P0, P1, P2, P3, P4, P5, P6, P7, P8, P9);
chain_impl!(P0, P1, P2, P3, P4, P5, P6, P7, P8, P9, P10);
chain_impl!(P0, P1, P2, P3, P4, P5, P6, P7, P8, P9, P10, P11);

/// Sequence concatenates parsers and only succeeds if all of them do. Between two parsers it runs
/// the separator `W`, which must be a skip; `Empty` by default.
#[derive(Clone)]
pub struct Sequence<C, W = Empty> {
    chain: C,
    sep: W,
}

impl<C> Sequence<C> {
    pub fn new<T: IntoChain<Chain = C>>(tuple: T) -> Sequence<C> {
        Sequence {
            chain: tuple.into_chain(),
            sep: Empty,
        }
    }
}

impl<C, W> Sequence<C, W> {
    /// Sequence separated by `sep`, typically whitespace.
    pub fn with_separator<T: IntoChain<Chain = C>>(sep: W, tuple: T) -> Sequence<C, W> {
        Sequence {
            chain: tuple.into_chain(),
            sep,
        }
    }

    /// Append another parser.
    pub fn then<P>(self, p: P) -> Sequence<Link<C, P>, W> {
        Sequence {
            chain: Link {
                prev: self.chain,
                p,
            },
            sep: self.sep,
        }
    }
}

pub fn seq<T: IntoChain>(tuple: T) -> Sequence<T::Chain> {
    Sequence::new(tuple)
}

pub fn seq_ws<W, T: IntoChain>(sep: W, tuple: T) -> Sequence<T::Chain, W> {
    Sequence::with_separator(sep, tuple)
}

impl<'a, C, W> Parser<'a> for Sequence<C, W>
where
    C: Chain<'a>,
    C::Acc: Finish,
    W: Parser<'a, Kind = Skip>,
{
    type Output = <C::Acc as Finish>::Output;
    type Kind = <C::Acc as Finish>::Kind;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        self.chain.run(at, end, &self.sep).map(Finish::finish)
    }
}

/// Tuples whose members all have the same type.
pub trait Homogeneous {
    type Item;
    fn into_vec(self) -> Vec<Self::Item>;
}

macro_rules! homogeneous_impl {
    ( @item $v:ident ) => { T };
    ( $($v:ident),+ ) => {
        impl<T> Homogeneous for ($(homogeneous_impl!(@item $v),)+) {
            type Item = T;
            fn into_vec(self) -> Vec<T> {
                let ($($v,)+) = self;
                vec![$($v),+]
            }
        }
    }
}

homogeneous_impl!(a, b);
homogeneous_impl!(a, b, c);
homogeneous_impl!(a, b, c, d);
homogeneous_impl!(a, b, c, d, e);
homogeneous_impl!(a, b, c, d, e, f);
homogeneous_impl!(a, b, c, d, e, f, g);
homogeneous_impl!(a, b, c, d, e, f, g, h);

/// ToVec collects a homogeneous tuple result into a `Vec`.
pub struct ToVec<P>(P);

impl<P> ToVec<P> {
    pub fn new(p: P) -> ToVec<P> {
        ToVec(p)
    }
}

impl<'a, P: Parser<'a>> Parser<'a> for ToVec<P>
where
    P::Output: Homogeneous,
{
    type Output = Vec<<P::Output as Homogeneous>::Item>;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Self::Output> {
        self.0.parse(at, end).map(Homogeneous::into_vec)
    }
}
