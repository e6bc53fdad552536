use crate::combinators::Ignore;
use crate::cursor::Cursor;
use crate::parser::{Nothing, Parsed, Parser, Skip, Status};
use crate::primitives::{lit_char, lspace, space, CharClass};
use crate::repeat::{Repeat, RepeatSpec};

/// A skip over a run of whitespace characters, possibly empty.
pub type Whitespace = Repeat<Ignore<CharClass>>;

/// Skip any whitespace, including line breaks. Never fails.
pub fn textspace() -> Whitespace {
    space().skip().repeat(RepeatSpec::Any)
}

/// Skip spaces and tabs, but stop at line breaks. Never fails.
pub fn linespace() -> Whitespace {
    lspace().skip().repeat(RepeatSpec::Any)
}

/// SpacedLit matches a character with optional whitespace on both sides. A whitespace character
/// matches any amount of whitespace, including none.
#[derive(Clone)]
pub struct SpacedLit {
    c: char,
    space: Whitespace,
}

pub fn spaced_lit(c: char) -> SpacedLit {
    SpacedLit {
        c,
        space: textspace(),
    }
}

impl<'a> Parser<'a> for SpacedLit {
    type Output = Nothing;
    type Kind = Skip;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Status<'a> {
        let before = self.space.parse(at, end).cursor();
        if self.c.is_ascii_whitespace() {
            return Parsed::success(before, Nothing);
        }
        let r = lit_char(self.c).parse(before, end);
        if r.is_err() {
            return r;
        }
        self.space.parse(r.cursor(), end)
    }
}
