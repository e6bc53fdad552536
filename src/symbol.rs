//! Symbol tables map a fixed set of keywords to values and match the longest keyword at the
//! current position.
//!
//! ```
//! use pegcomb::{Parser, Symbols};
//!
//! let ops = Symbols::new(vec![("<", 1), ("<=", 2), ("<<", 3)]);
//! assert_eq!(Ok(&2), ops.parse_str("<=x").value());
//! assert_eq!(Ok(&1), ops.parse_str("< x").value());
//! ```

use std::cmp::Ordering;
use std::marker::PhantomData;

use thiserror::Error;

use crate::cursor::Cursor;
use crate::parser::{ErrorCode, Parsed, Parser, Value};

/// Returned when a symbol table is built with the same key twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate symbol {key:?}")]
pub struct DuplicateSymbol {
    pub key: String,
}

/// The ordering (and thereby the notion of equality) of symbol table keys.
pub trait KeyOrder {
    fn compare(a: &[u8], b: &[u8]) -> Ordering;

    /// Whether `text` starts with `key`.
    fn is_prefix(key: &[u8], text: &[u8]) -> bool {
        text.len() >= key.len() && Self::compare(key, &text[..key.len()]) == Ordering::Equal
    }
}

/// Keys compare byte by byte.
#[derive(Debug)]
pub enum ByteOrder {}

/// Keys compare ignoring ASCII case.
#[derive(Debug)]
pub enum CaseInsensitive {}

impl KeyOrder for ByteOrder {
    fn compare(a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }
}

impl KeyOrder for CaseInsensitive {
    fn compare(a: &[u8], b: &[u8]) -> Ordering {
        a.iter()
            .map(u8::to_ascii_lowercase)
            .cmp(b.iter().map(u8::to_ascii_lowercase))
    }
}

/// SymbolTable yields a clone of the value of the longest key found at the current position.
pub struct SymbolTable<V, O = ByteOrder> {
    entries: Vec<(String, V)>,
    _order: PhantomData<O>,
}

pub type Symbols<V> = SymbolTable<V, ByteOrder>;
pub type SymbolsCi<V> = SymbolTable<V, CaseInsensitive>;

impl<V, O: KeyOrder> SymbolTable<V, O> {
    pub fn try_new<I, S>(entries: I) -> Result<SymbolTable<V, O>, DuplicateSymbol>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, V)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        entries.sort_by(|a, b| O::compare(a.0.as_bytes(), b.0.as_bytes()));
        if let Some(w) = entries
            .windows(2)
            .find(|w| O::compare(w[0].0.as_bytes(), w[1].0.as_bytes()) == Ordering::Equal)
        {
            return Err(DuplicateSymbol {
                key: w[1].0.clone(),
            });
        }
        log_debug!("built symbol table with {} entries", entries.len());
        Ok(SymbolTable {
            entries,
            _order: PhantomData,
        })
    }

    /// Like `try_new`, but panics on duplicate keys.
    pub fn new<I, S>(entries: I) -> SymbolTable<V, O>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
    {
        match SymbolTable::try_new(entries) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry matching at the start of `text`.
    pub fn lookup(&self, text: &str) -> Option<&(String, V)> {
        let first = text.chars().next()?;
        let mut buf = [0; 4];
        let first = first.encode_utf8(&mut buf).as_bytes();
        let text = text.as_bytes();

        let lo = self
            .entries
            .partition_point(|(k, _)| O::compare(k.as_bytes(), first) == Ordering::Less);
        let candidates = &self.entries[lo..];
        let hi = candidates
            .partition_point(|(k, _)| O::compare(k.as_bytes(), text) != Ordering::Greater);
        candidates[..hi]
            .iter()
            .rev()
            .find(|(k, _)| O::is_prefix(k.as_bytes(), text))
    }
}

impl<'a, V: Clone, O: KeyOrder> Parser<'a> for SymbolTable<V, O> {
    type Output = V;
    type Kind = Value;
    fn parse(&self, at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, V> {
        match self.lookup(at.rest(end)) {
            Some((key, value)) => Parsed::success(at.advance(key.len()), value.clone()),
            None => Parsed::failure(at, ErrorCode::SymbolNotFound),
        }
    }
}
