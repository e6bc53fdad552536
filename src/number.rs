//! Parsers for booleans, integers and floating point numbers.
//!
//! Integer and real parsers are configured with builder methods; the defaults accept what one
//! would expect from a programming language literal.
//!
//! ```
//! use pegcomb::number::{IntParser, RealParser};
//! use pegcomb::Parser;
//!
//! let hex = IntParser::<u32>::new().radix(16);
//! assert_eq!(Ok(&0xbeef), hex.parse_str("beef").value());
//! assert_eq!(Ok(&-0.125), RealParser::<f64>::new().parse_str("-1.25e-1").value());
//! ```

use std::marker::PhantomData;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::alternative::choice;
use crate::combinators::{not_p, reject, when};
use crate::cursor::Cursor;
use crate::parser::{parser_fn, ErrorCode, Nothing, Parsed, Parser, Skip, Status, Value};
use crate::predicates::is_radix_char;
use crate::primitives::{char_if, ci_lit, digit, empty, lit_char};
use crate::repeat::RepeatSpec;
use crate::sequence::seq;
use crate::symbol::SymbolsCi;

/// Parse a boolean: `0`, `1`, or `false`/`true` in any case.
pub fn parse_bool<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, bool> {
    choice((
        lit_char('0').to(false),
        lit_char('1').to(true),
        ci_lit("false").to(false),
        ci_lit("true").to(true),
    ))
    .parse(at, end)
}

/// Which signs a number may start with. As a parser, a sign policy is a skip consuming the
/// accepted sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    /// No sign accepted.
    None,
    /// An optional `-`.
    Minus,
    /// An optional `-` or `+`.
    Allowed,
    /// Either `-` or `+` must be present.
    Required,
}

impl<'a> Parser<'a> for SignPolicy {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        match self {
            SignPolicy::None => empty().parse(at, end),
            SignPolicy::Minus => choice((lit_char('-'), empty())).parse(at, end),
            SignPolicy::Allowed => choice((lit_char('-'), lit_char('+'), empty())).parse(at, end),
            SignPolicy::Required => choice((lit_char('-'), lit_char('+'))).parse(at, end),
        }
    }
}

/// Primitive integer types.
pub trait Integer: Sized {
    const SIGNED: bool;
    fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseIntError>;
}

macro_rules! integer_impl {
    ( $signed:expr ; $($t:ty),+ ) => {
        $(
            impl Integer for $t {
                const SIGNED: bool = $signed;
                fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseIntError> {
                    <$t>::from_str_radix(src, radix)
                }
            }
        )+
    }
}

integer_impl!(true; i8, i16, i32, i64, i128, isize);
integer_impl!(false; u8, u16, u32, u64, u128, usize);

/// IntParser parses an integer of type `T`: an optional sign followed by a run of digits.
///
/// A value that does not fit into `T` fails with `Overflow` (or `Underflow` for negative values)
/// behind the digits.
pub struct IntParser<T> {
    radix: u32,
    sign: SignPolicy,
    min_digits: usize,
    max_digits: usize,
    _t: PhantomData<fn() -> T>,
}

impl<T> Clone for IntParser<T> {
    fn clone(&self) -> Self {
        IntParser {
            radix: self.radix,
            sign: self.sign,
            min_digits: self.min_digits,
            max_digits: self.max_digits,
            _t: PhantomData,
        }
    }
}

impl<T: Integer> IntParser<T> {
    /// Decimal, any number of digits, signs allowed for signed types only.
    pub fn new() -> IntParser<T> {
        IntParser {
            radix: 10,
            sign: if T::SIGNED {
                SignPolicy::Allowed
            } else {
                SignPolicy::None
            },
            min_digits: 1,
            max_digits: usize::MAX,
            _t: PhantomData,
        }
    }

    /// Panics if `radix` is not in 2..=36.
    pub fn radix(mut self, radix: u32) -> IntParser<T> {
        assert!((2..=36).contains(&radix), "unsupported radix {}", radix);
        self.radix = radix;
        self
    }

    pub fn sign(mut self, sign: SignPolicy) -> IntParser<T> {
        self.sign = sign;
        self
    }

    /// Accept between `min` and `max` digits. Panics unless `0 < min <= max`.
    pub fn digits(mut self, min: usize, max: usize) -> IntParser<T> {
        assert!(min > 0 && min <= max, "bad digit count {}..={}", min, max);
        self.min_digits = min;
        self.max_digits = max;
        self
    }
}

impl<T: Integer> Default for IntParser<T> {
    fn default() -> Self {
        IntParser::new()
    }
}

/// A decimal integer parser with default settings.
pub fn int<T: Integer>() -> IntParser<T> {
    IntParser::new()
}

impl<'a, T: Integer> Parser<'a> for IntParser<T> {
    type Output = T;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, T> {
        let digits = char_if(is_radix_char(self.radix))
            .skip()
            .repeat(RepeatSpec::Between(self.min_digits, self.max_digits));
        let (cursor, image) = match seq((self.sign, digits)).raw().parse(at, end).into_parts() {
            (cursor, Ok(image)) => (cursor, image),
            (cursor, Err(e)) => return Parsed::failure(cursor, e),
        };
        let image = image.strip_prefix('+').unwrap_or(image);
        match T::from_str_radix(image, self.radix) {
            Ok(v) => Parsed::success(cursor, v),
            Err(e) => {
                let code = match e.kind() {
                    IntErrorKind::NegOverflow => ErrorCode::Underflow,
                    // A negative number for an unsigned type.
                    _ if image.starts_with('-') => ErrorCode::Underflow,
                    _ => ErrorCode::Overflow,
                };
                Parsed::failure(cursor, code)
            }
        }
    }
}

/// Whether a real number may or must contain a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalPoint {
    Allow,
    Require,
}

/// Whether a real number may or must have an exponent (`e` or `E`, optional sign, digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpPolicy {
    None,
    Allowed,
    Required,
}

/// Whether `inf` and `nan` (in any case, optionally signed) are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfNanPolicy {
    None,
    Allowed,
}

/// Primitive floating point types.
pub trait Float: FromStr + Copy {
    const INFINITY: Self;
    const NEG_INFINITY: Self;
    const NAN: Self;
    fn is_infinite(self) -> bool;
    fn is_zero(self) -> bool;
}

macro_rules! float_impl {
    ( $($t:ident),+ ) => {
        $(
            impl Float for $t {
                const INFINITY: Self = $t::INFINITY;
                const NEG_INFINITY: Self = $t::NEG_INFINITY;
                const NAN: Self = $t::NAN;
                fn is_infinite(self) -> bool {
                    $t::is_infinite(self)
                }
                fn is_zero(self) -> bool {
                    self == 0.0
                }
            }
        )+
    }
}

float_impl!(f32, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfNan {
    Nan,
    Inf,
    MinusInf,
}

impl InfNan {
    fn value<F: Float>(self) -> F {
        match self {
            InfNan::Nan => F::NAN,
            InfNan::Inf => F::INFINITY,
            InfNan::MinusInf => F::NEG_INFINITY,
        }
    }
}

lazy_static! {
    static ref INF_NAN: SymbolsCi<InfNan> = SymbolsCi::new(vec![
        ("nan", InfNan::Nan),
        ("inf", InfNan::Inf),
        ("+nan", InfNan::Nan),
        ("+inf", InfNan::Inf),
        ("-nan", InfNan::Nan),
        ("-inf", InfNan::MinusInf),
    ]);
}

/// RealParser parses a floating point number of type `F`.
///
/// The mantissa must contain at least one digit, so a lone `.` is not a number. Values out of
/// range fail with `Overflow` behind the number.
pub struct RealParser<F> {
    sign: SignPolicy,
    point: DecimalPoint,
    exp: ExpPolicy,
    inf_nan: InfNanPolicy,
    digits: (usize, usize),
    decimals: (usize, usize),
    _f: PhantomData<fn() -> F>,
}

impl<F> Clone for RealParser<F> {
    fn clone(&self) -> Self {
        RealParser {
            sign: self.sign,
            point: self.point,
            exp: self.exp,
            inf_nan: self.inf_nan,
            digits: self.digits,
            decimals: self.decimals,
            _f: PhantomData,
        }
    }
}

impl<F: Float> RealParser<F> {
    /// Signs, decimal point, exponent, inf and nan allowed; any number of digits.
    pub fn new() -> RealParser<F> {
        RealParser {
            sign: SignPolicy::Allowed,
            point: DecimalPoint::Allow,
            exp: ExpPolicy::Allowed,
            inf_nan: InfNanPolicy::Allowed,
            digits: (0, usize::MAX),
            decimals: (0, usize::MAX),
            _f: PhantomData,
        }
    }

    pub fn sign(mut self, sign: SignPolicy) -> RealParser<F> {
        self.sign = sign;
        self
    }

    pub fn point(mut self, point: DecimalPoint) -> RealParser<F> {
        self.point = point;
        self
    }

    pub fn exponent(mut self, exp: ExpPolicy) -> RealParser<F> {
        self.exp = exp;
        self
    }

    pub fn inf_nan(mut self, inf_nan: InfNanPolicy) -> RealParser<F> {
        self.inf_nan = inf_nan;
        self
    }

    /// Digits before the decimal point. Panics if `min > max`.
    pub fn digits(mut self, min: usize, max: usize) -> RealParser<F> {
        assert!(min <= max, "bad digit count {}..={}", min, max);
        self.digits = (min, max);
        self
    }

    /// Digits after the decimal point. A minimum above zero requires the point. Panics if
    /// `min > max`.
    pub fn decimals(mut self, min: usize, max: usize) -> RealParser<F> {
        assert!(min <= max, "bad decimal count {}..={}", min, max);
        self.decimals = (min, max);
        self
    }

    fn parse_number<'a>(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, F> {
        let digits = |(min, max)| digit().skip().repeat(RepeatSpec::Between(min, max));
        let point_required = self.point == DecimalPoint::Require || self.decimals.0 > 0;
        let fraction = seq((lit_char('.'), digits(self.decimals)));
        let exponent = seq((
            choice((lit_char('e'), lit_char('E'))),
            SignPolicy::Allowed,
            digit().skip().repeat(RepeatSpec::Min(1)),
        ));
        let image = seq((
            self.sign,
            digits(self.digits),
            choice((fraction, when(!point_required, empty()))),
            choice((
                when(self.exp != ExpPolicy::None, exponent),
                when(self.exp != ExpPolicy::Required, empty()),
            )),
        ))
        .raw();
        let lone_point = seq((self.sign, lit_char('.'), reject(digit())));

        let (cursor, image) = match not_p(lone_point, image).parse(at, end).into_parts() {
            (cursor, Ok(image)) => (cursor, image),
            (cursor, Err(e)) => return Parsed::failure(cursor, e),
        };
        let mantissa = image.split(|c: char| c == 'e' || c == 'E').next().unwrap_or("");
        if !mantissa.bytes().any(|b| b.is_ascii_digit()) {
            let code = if at.at_end(end) {
                ErrorCode::UnexpectedEof
            } else {
                ErrorCode::UnexpectedChar
            };
            return Parsed::failure(at, code);
        }
        match image.strip_prefix('+').unwrap_or(image).parse::<F>() {
            Ok(v) if v.is_infinite() => Parsed::failure(cursor, ErrorCode::Overflow),
            // Too small for F: rounded to zero although a digit is nonzero.
            Ok(v) if v.is_zero() && mantissa.bytes().any(|b| (b'1'..=b'9').contains(&b)) => {
                Parsed::failure(cursor, ErrorCode::Overflow)
            }
            Ok(v) => Parsed::success(cursor, v),
            Err(_) => Parsed::failure(at, ErrorCode::ExpectedType),
        }
    }
}

impl<F: Float> Default for RealParser<F> {
    fn default() -> Self {
        RealParser::new()
    }
}

/// A real number parser with default settings.
pub fn real<F: Float>() -> RealParser<F> {
    RealParser::new()
}

impl<'a, F: Float> Parser<'a> for RealParser<F> {
    type Output = F;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, F> {
        let number = parser_fn(|at, end| self.parse_number(at, end));
        let inf_nan = when(self.inf_nan == InfNanPolicy::Allowed, INF_NAN.by_ref())
            .map(InfNan::value::<F>);
        choice((number, inf_nan)).parse(at, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::lit;

    #[test]
    fn test_bool() {
        for (s, b) in &[("0", false), ("1", true), ("TRUE", true), ("False", false)] {
            assert_eq!(Ok(b), parse_bool.parse_str(s).value());
        }
        assert!(parse_bool.parse_str("2").is_err());
        assert!(parse_bool.parse_str("yes").is_err());
    }

    #[test]
    fn test_int() {
        let r = int::<i32>().parse_str("-123x");
        assert_eq!(Ok(&-123), r.value());
        assert_eq!(4, r.cursor().index());
        assert_eq!(Ok(&42), int::<i64>().parse_str("+42").value());
        assert_eq!(Ok(&7u8), int::<u8>().parse_str("007").value());

        // Unsigned parsers take no sign by default.
        let r = int::<u32>().parse_str("-5");
        assert_eq!(Some(ErrorCode::TooFew), r.error());
        assert_eq!(0, r.cursor().index());
        assert!(int::<u32>().parse_str("+5").is_err());
    }

    #[test]
    fn test_parse_int() {
        let p = seq((int::<i64>(), lit(" "), int::<i64>()));
        assert_eq!(Ok(&(-1252, 353)), p.parse_str("-1252 353").value());
    }

    #[test]
    fn test_int_overflow() {
        let r = int::<i32>().parse_str("99999999999 rest");
        assert_eq!(Some(ErrorCode::Overflow), r.error());
        assert_eq!(11, r.cursor().index());

        let r = int::<u8>().parse_str("256");
        assert_eq!(Some(ErrorCode::Overflow), r.error());
        assert_eq!(3, r.cursor().index());

        let r = int::<i8>().parse_str("-129");
        assert_eq!(Some(ErrorCode::Underflow), r.error());
        assert_eq!(4, r.cursor().index());
        assert_eq!(Ok(&-128i8), int::<i8>().parse_str("-128").value());

        let r = int::<u16>().sign(SignPolicy::Minus).parse_str("-1");
        assert_eq!(Some(ErrorCode::Underflow), r.error());
    }

    #[test]
    fn test_int_options() {
        let hex = IntParser::<u32>::new().radix(16);
        assert_eq!(Ok(&255), hex.parse_str("ff").value());
        let r = hex.parse_str("FFg");
        assert_eq!(Ok(&255), r.value());
        assert_eq!(2, r.cursor().index());

        let bin = IntParser::<u8>::new().radix(2);
        assert_eq!(Ok(&5), bin.parse_str("1012").value());

        let three = IntParser::<u32>::new().digits(2, 3);
        let r = three.parse_str("12345");
        assert_eq!(Ok(&123), r.value());
        assert_eq!(3, r.cursor().index());
        assert_eq!(Some(ErrorCode::TooFew), three.parse_str("1").error());

        let signed = IntParser::<i32>::new().sign(SignPolicy::Required);
        assert!(signed.parse_str("5").is_err());
        assert_eq!(Ok(&5), signed.parse_str("+5").value());
        let minus = IntParser::<i32>::new().sign(SignPolicy::Minus);
        assert!(minus.parse_str("+5").is_err());
        assert_eq!(Ok(&-5), minus.parse_str("-5").value());
    }

    #[test]
    #[should_panic]
    fn test_int_bad_digits() {
        let _ = IntParser::<u32>::new().digits(0, 3);
    }

    #[test]
    fn test_real() {
        let p = real::<f64>();
        assert_eq!(Ok(&3.25), p.parse_str("3.25").value());
        assert_eq!(Ok(&-1500.0), p.parse_str("-1.5e3").value());
        assert_eq!(Ok(&-0.5), p.parse_str("-.5").value());
        assert_eq!(Ok(&5.0), p.parse_str("5.").value());
        assert_eq!(Ok(&0.25f32), real::<f32>().parse_str("+.25").value());

        let r = p.parse_str("1e");
        assert_eq!(Ok(&1.0), r.value());
        assert_eq!(1, r.cursor().index());

        assert_eq!(
            Some(ErrorCode::SymbolNotExpected),
            p.parse_str(".").error()
        );
        assert!(p.parse_str("-").is_err());
        assert!(p.parse_str("x").is_err());
        assert!(p.parse_str("").is_err());
    }

    #[test]
    fn test_real_inf_nan() {
        let p = real::<f64>();
        assert_eq!(Ok(&f64::INFINITY), p.parse_str("inf").value());
        assert_eq!(Ok(&f64::NEG_INFINITY), p.parse_str("-INF").value());
        assert!(p.parse_str("NaN").value().map(|v| v.is_nan()).unwrap_or(false));

        let r = p.parse_str("1e400");
        assert_eq!(Some(ErrorCode::Overflow), r.error());
        assert_eq!(5, r.cursor().index());
        let r = p.parse_str("-1e-400");
        assert_eq!(Some(ErrorCode::Overflow), r.error());
        assert_eq!(7, r.cursor().index());
        assert_eq!(Ok(&0.0), p.parse_str("0.000e-400").value());

        let strict = real::<f64>().inf_nan(InfNanPolicy::None);
        assert!(strict.parse_str("inf").is_err());
    }

    #[test]
    fn test_real_options() {
        let point = real::<f64>().point(DecimalPoint::Require);
        assert!(point.parse_str("12").is_err());
        assert_eq!(Ok(&12.0), point.parse_str("12.0").value());

        let cents = real::<f64>().decimals(2, 2);
        let r = cents.parse_str("1.234");
        assert_eq!(Ok(&1.23), r.value());
        assert_eq!(4, r.cursor().index());
        assert!(cents.parse_str("1").is_err());

        let exp = real::<f64>().exponent(ExpPolicy::Required);
        assert!(exp.parse_str("1.5").is_err());
        assert_eq!(Ok(&150.0), exp.parse_str("1.5E2").value());

        let no_exp = real::<f64>().exponent(ExpPolicy::None);
        let r = no_exp.parse_str("1e5");
        assert_eq!(Ok(&1.0), r.value());
        assert_eq!(1, r.cursor().index());

        let unsigned = real::<f64>().sign(SignPolicy::None);
        assert!(unsigned.parse_str("-1.0").is_err());
    }
}
