use std::mem;

use crate::cursor::Cursor;
use crate::parser::{ErrorCode, Parser};

/// The outcome of running a parser over a whole input with `do_parse`.
#[derive(Debug, Clone, PartialEq)]
pub enum Report<'a, T> {
    /// The parser succeeded and consumed all input.
    Full(T),
    /// The parser succeeded, but left `rest` unconsumed.
    Partial { value: T, rest: &'a str },
    /// The parser failed with `code` at byte `offset`; `rest` is the input from there on.
    Failed {
        code: ErrorCode,
        offset: usize,
        rest: &'a str,
    },
}

impl<'a, T> Report<'a, T> {
    pub fn is_full(&self) -> bool {
        matches!(self, Report::Full(_))
    }

    /// The value of a full or partial match.
    pub fn value(&self) -> Option<&T> {
        match self {
            Report::Full(v) | Report::Partial { value: v, .. } => Some(v),
            Report::Failed { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Report::Full(v) | Report::Partial { value: v, .. } => Some(v),
            Report::Failed { .. } => None,
        }
    }
}

/// Run `parser` once from the start of `src` and report how much of it was matched.
pub fn do_parse<'a, P: Parser<'a>>(src: &'a str, parser: &P) -> Report<'a, P::Output> {
    log_debug!(
        "parsing {} bytes with a parser of {} bytes",
        src.len(),
        mem::size_of_val(parser)
    );
    let (b, e) = Cursor::span(src);
    let (cursor, outcome) = parser.parse(b, e).into_parts();
    let report = match outcome {
        Ok(value) if cursor.at_end(e) => Report::Full(value),
        Ok(value) => Report::Partial {
            value,
            rest: cursor.rest(e),
        },
        Err(code) => Report::Failed {
            code,
            offset: cursor.index(),
            rest: cursor.rest(e),
        },
    };
    match &report {
        Report::Full(_) => log_debug!("full match"),
        Report::Partial { rest, .. } => log_debug!("partial match, {} bytes left", rest.len()),
        Report::Failed { code, offset, .. } => log_debug!("failed at {}: {}", offset, code),
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::int;
    use crate::primitives::lit;
    use crate::sequence::seq;
    use crate::whitespace::spaced_lit;

    #[test]
    fn test_reports() {
        let sum = seq((int::<i32>(), spaced_lit('+'), int::<i32>())).map(|(a, b)| a + b);
        assert_eq!(Report::Full(5), do_parse("2 + 3", &sum));
        assert_eq!(
            Report::Partial {
                value: 5,
                rest: "; 1"
            },
            do_parse("2+3; 1", &sum)
        );
        assert_eq!(
            Report::Failed {
                code: ErrorCode::TooFew,
                offset: 2,
                rest: "x"
            },
            do_parse("2+x", &sum)
        );
        assert_eq!(Some(&5), do_parse("2+3", &sum).value());
        assert!(do_parse("2+3", &sum).is_full());
    }

    #[test]
    fn test_skip_report() {
        let greeting = lit("hello");
        assert!(do_parse("hello", &greeting).is_full());
        assert_eq!(None, do_parse("help", &greeting).into_value());
    }
}
