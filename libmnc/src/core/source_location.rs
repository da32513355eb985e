// Copyright 2025-2026 Neil Henderson
//
//! The `source_location` module defines the [SourceLocation] type, which represents the location and span of a token
//! in the source code.

use std::fmt;

/// The location and span of a token in the source text.
///
/// Offsets and lengths count characters, not bytes, so that a caret line lines up under Cyrillic source text.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub offset: u32,
    pub length: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pos: {}, len: {}", self.offset, self.length)
    }
}

impl SourceLocation {
    /// Creates a new source location for the given character offset and length in characters.
    pub fn new(offset: usize, length: usize) -> Self {
        debug_assert!(offset <= u32::MAX as usize && length <= u32::MAX as usize);
        Self { offset: offset as u32, length: length as u32 }
    }

    /// Creates a new source location which indicates a 'null' / no value.
    pub fn none() -> Self {
        Self { offset: 0, length: 0 }
    }

    /// Is this the 'null' location?
    pub fn is_none(&self) -> bool {
        self.length == 0
    }

    /// The offset one past the last character in the span.
    pub fn end(&self) -> u32 {
        self.offset + self.length
    }

    /// Merges this and the `other` location into a new location, taking the union of the two.
    pub fn merge_with(self, other: SourceLocation) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }

        let start = std::cmp::min(self.offset, other.offset);
        let end = std::cmp::max(self.end(), other.end());

        Self { offset: start, length: end - start }
    }
}
