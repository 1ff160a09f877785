// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::ops::Range;

/// A half-open `[start, end)` byte range into the original source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl Interval {
    /// Constructs a new interval.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Interval { start, end }
    }

    /// Constructs an empty interval at `pos`.
    #[inline]
    pub fn empty(pos: usize) -> Self {
        Interval { start: pos, end: pos }
    }

    /// Returns the interval length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Checks that the interval has a zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Checks that `other` lies completely inside the current interval.
    pub fn contains(&self, other: Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns the interval as a `Range`, suitable for slicing the source text.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Interval {
    fn from(range: Range<usize>) -> Self {
        Interval::new(range.start, range.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A position in a text, with 1-based row and column.
///
/// Columns are counted in characters, not bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextPos {
    #[allow(missing_docs)]
    pub row: u32,
    #[allow(missing_docs)]
    pub col: u32,
}

impl TextPos {
    /// Constructs a new `TextPos`.
    pub fn new(row: u32, col: u32) -> Self {
        TextPos { row, col }
    }
}

impl fmt::Display for TextPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Converts a byte offset into a row/column position.
///
/// Offsets past the end of the text are clamped to the end.
pub fn text_pos(text: &str, offset: usize) -> TextPos {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &text[..offset];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;

    TextPos::new(row as u32, col as u32)
}
