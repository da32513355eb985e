// Copyright 2025-2026 Neil Henderson
//
//! The `source_file` module defines [SourceFile], the source text that accompanies the AST for diagnostic rendering.

use crate::core::SourceLocation;

/// A source file's name and text.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    name: String,
    chars: Vec<char>,
}

/// The source line containing a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The 1-based line number.
    pub line_no: usize,

    /// The line's text without its newline.
    pub text: String,

    /// The 0-based column, in characters, of the location within the line.
    pub column: usize,
}

impl SourceFile {
    /// Creates a source file from its name and text.
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self { name: name.into(), chars: text.chars().collect() }
    }

    /// The file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finds the line containing the start of the given location.
    ///
    /// A location past the end of the text resolves to the last line.
    pub fn line_at(&self, loc: SourceLocation) -> SourceLine {
        let offset = std::cmp::min(loc.offset as usize, self.chars.len());

        let line_start = self.chars[..offset].iter().rposition(|&c| c == '\n').map(|pos| pos + 1).unwrap_or(0);
        let line_end =
            self.chars[offset..].iter().position(|&c| c == '\n').map(|pos| offset + pos).unwrap_or(self.chars.len());

        let line_no = 1 + self.chars[..line_start].iter().filter(|&&c| c == '\n').count();
        let text = self.chars[line_start..line_end].iter().collect();

        SourceLine { line_no, text, column: offset - line_start }
    }
}
