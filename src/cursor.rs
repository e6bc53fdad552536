use std::cmp::Ordering;
use std::fmt;
use std::io;

struct UTF8Reader<R: io::Read>(utf8reader::UTF8Reader<R>);

impl<R: io::Read> Iterator for UTF8Reader<R> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.0.next() {
                None => return None,
                Some(Err(_)) => continue,
                Some(Ok(c)) => return Some(c),
            }
        }
    }
}

/// Source owns a fully materialized input text. Parsers never see it directly; they work on the
/// `Cursor`s handed out by `span()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Source {
    text: String,
}

impl Source {
    /// Initialize Source from a string.
    pub fn new<S: Into<String>>(s: S) -> Source {
        Source { text: s.into() }
    }

    /// Read a UTF-8 encoded source to its end. Undecodable sequences are skipped.
    pub fn from_reader<R: io::Read>(r: R) -> Source {
        Source {
            text: UTF8Reader(utf8reader::UTF8Reader::new(r)).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Start and end cursor of the whole text.
    pub fn span(&self) -> (Cursor<'_>, Cursor<'_>) {
        Cursor::span(&self.text)
    }
}

/// Cursor marks a position in an input buffer. It is a cheap, non-owning view that only ever moves
/// forward; backtracking is done by holding on to an older copy.
///
/// Cursors compare by their offset. Comparing cursors into different buffers is meaningless.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor at the start of `src`.
    pub fn new(src: &'a str) -> Cursor<'a> {
        Cursor { src, pos: 0 }
    }

    /// Start and end cursor for `src`.
    pub fn span(src: &'a str) -> (Cursor<'a>, Cursor<'a>) {
        (Cursor { src, pos: 0 }, Cursor { src, pos: src.len() })
    }

    /// Byte offset into the input.
    pub fn index(&self) -> usize {
        self.pos
    }

    /// The whole input this cursor points into.
    pub fn source(&self) -> &'a str {
        self.src
    }

    /// True if there is no input left before `end`.
    pub fn at_end(&self, end: Cursor<'a>) -> bool {
        self.pos >= end.pos
    }

    /// Number of bytes left before `end`.
    pub fn remaining(&self, end: Cursor<'a>) -> usize {
        end.pos.saturating_sub(self.pos)
    }

    /// The text between this cursor and `end`.
    pub fn rest(&self, end: Cursor<'a>) -> &'a str {
        self.text_to(end)
    }

    /// The text between this cursor and a later cursor `other`.
    pub fn text_to(&self, other: Cursor<'a>) -> &'a str {
        if other.pos <= self.pos {
            return "";
        }
        self.src.get(self.pos..other.pos).unwrap_or("")
    }

    /// Return next character in input without advancing.
    pub fn peek(&self, end: Cursor<'a>) -> Option<char> {
        self.rest(end).chars().next()
    }

    /// Return the next character and the cursor behind it.
    pub fn next_char(self, end: Cursor<'a>) -> Option<(char, Cursor<'a>)> {
        self.peek(end).map(|c| (c, self.advance(c.len_utf8())))
    }

    /// Move forward by `bytes`. Callers only advance over text they have inspected.
    pub fn advance(self, bytes: usize) -> Cursor<'a> {
        Cursor {
            src: self.src,
            pos: self.pos + bytes,
        }
    }

    /// Move forward by up to `n` characters, stopping at `end`.
    pub fn take(self, end: Cursor<'a>, n: usize) -> Cursor<'a> {
        let bytes: usize = self.rest(end).chars().take(n).map(char::len_utf8).sum();
        self.advance(bytes)
    }
}

impl<'a> PartialEq for Cursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<'a> Eq for Cursor<'a> {}

impl<'a> PartialOrd for Cursor<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Ord for Cursor<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl<'a> fmt::Debug for Cursor<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cursor({})", self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let (b, e) = Cursor::span("Hello");
        assert_eq!(Some('H'), b.peek(e));
        let (c, rest) = b.next_char(e).unwrap();
        assert_eq!('H', c);
        assert_eq!("ello", rest.rest(e));
        assert!(b < rest);
        // Holding on to the old cursor is all backtracking needs.
        assert_eq!("Hello", b.rest(e));
        assert!(rest.take(e, 10).at_end(e));
    }

    #[test]
    fn test_end_bounds_reads() {
        let src = "abcdef";
        let b = Cursor::new(src);
        let e = b.advance(3);
        assert_eq!("abc", b.rest(e));
        assert_eq!(3, b.remaining(e));
        assert_eq!(None, e.peek(e));
        assert_eq!("", e.text_to(b));
    }

    #[test]
    fn test_utf8_stream() {
        let s = "Hüðslþ".to_owned();
        let src = Source::from_reader(s.as_bytes());
        assert_eq!("Hüðslþ", src.as_str());
        let (b, e) = src.span();
        let b = b.take(e, 1);
        assert_eq!("üð", b.text_to(b.take(e, 2)));
    }
}
