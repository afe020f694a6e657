//! Locations of DDL statements and their parts.
//!
//! A [`Span`] never crosses a line. Errors print it as `line:col`, which is
//! all a statement needs to be found again in a migration script.

use std::fmt;

/// A single-line run of DDL source.
///
/// Ordering compares the start position first, so the earliest span sorts
/// lowest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Column just past the last byte.
    #[inline]
    pub fn end_col(&self) -> u32 {
        self.col + self.len
    }

    /// The span covering both operands.
    ///
    /// When they sit on different lines the earlier one wins, so a clause
    /// continued on the next line is reported where it starts.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        let (first, second) = if self <= other { (self, other) } else { (other, self) };
        if first.line != second.line {
            return first;
        }
        let end = first.end_col().max(second.end_col());
        Span::new(first.line, first.col, end - first.col)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.line, self.col, self.len)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
