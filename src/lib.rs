//! pegcomb is a PEG-style parser combinator library over in-memory text. Parsers are plain values
//! (or functions) that are combined into bigger parsers; the result type of a combined parser is
//! computed at compile time from the parts.
//!
//! You will notice two kinds of parsers that however differ only in minor aspects:
//!
//!   * Ones starting with a capital letter are `struct`s (such as `IntParser`, `Sequence`). You
//!     can create them using `ParserName::new()`, or a specialized constructor method.
//!   * Ones starting with a lower case letter (and in snake case, such as `string_of`). Those are
//!     functions returning `Parser` objects combined from one or more elementary parsers.
//!
//! Every parser is either a *skip*, which only advances over the input, or a *value parser*
//! producing a result. Skips disappear from the results of sequences, so a sequence of a literal,
//! a number and another literal simply yields the number.
//!
//! Note that not all primitives and combinators are exported at the crate level! Only "important"
//! ones are.
//!
//! Here's a short example of how to use it:
//!
//! ```
//! use pegcomb::primitives::lit_char;
//! use pegcomb::whitespace::textspace;
//! use pegcomb::{choice, real, seq, string_of, Parser, RepeatSpec};
//!
//! // Goal: Parse the string between the parentheses, and then the float.
//! let some_string = choice((
//!     lit_char('x').to("xyz".to_string()),
//!     string_of("abcde12345", RepeatSpec::Min(1)),
//! ));
//! let in_parens = seq((lit_char('('), some_string, lit_char(')')));
//! let line = seq((in_parens, textspace(), real::<f64>()));
//!
//! let r = line.parse_str("(a1b3c4) -1.25e-1");
//! assert_eq!(Ok(&("a1b3c4".to_string(), -0.125)), r.value());
//! ```
//!
//! Parsers are built once and can be used any number of times, also from several threads.

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub mod alternative;
pub mod combinators;
pub mod cursor;
pub mod number;
pub mod parser;
pub mod predicates;
pub mod primitives;
pub mod repeat;
pub mod run;
pub mod sequence;
pub mod symbol;
pub mod whitespace;

pub use alternative::{choice, choice_as, one_of, Alternative};
pub use combinators::{and_p, not_p, opt, Lazy, Maybe, Transform};
pub use cursor::{Cursor, Source};
pub use number::{int, parse_bool, real, IntParser, RealParser};
pub use parser::{parser_fn, BadParseAccess, ErrorCode, Nothing, Parsed, Parser, Status};
pub use repeat::{repeat, repeat_ws, string_none_of, string_of, Repeat, RepeatSpec};
pub use run::{do_parse, Report};
pub use sequence::{seq, seq_ws, Sequence};
pub use symbol::{DuplicateSymbol, Symbols, SymbolsCi};
