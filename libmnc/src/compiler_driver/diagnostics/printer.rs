// Copyright 2025-2026 Neil Henderson
//
//! The `printer` module defines functionality for printing diagnostics.

use std::io::{Result, Write};

use super::super::{CompileError, SourceFile};
use super::error::SemanticError;

/// Prints compiler errors.
///
/// A semantic error is printed with its source line and a caret span:
///
/// ```text
/// [Семантик шинжилгээ] 3-р мөрөнд алдаа гарлаа:
///     зарла x: тоо = 2;
///           ^
/// Алдааны мессеж: хувьсагч 'x' нь давхардсан байна
/// ```
#[derive(Debug)]
pub struct Printer<W: Write> {
    buffer: W,
    terse: bool,
}

impl<W: Write> Printer<W> {
    /// Creates a new diagnostic printer that writes to the given `buffer`.
    pub fn new(buffer: W) -> Self {
        Self { buffer, terse: false }
    }

    /// Sets whether to print in terse mode, which omits the source line and caret span.
    pub fn set_terse(&mut self, terse: bool) {
        self.terse = terse;
    }

    /// Prints the error.
    pub fn print(&mut self, error: &CompileError, source: &SourceFile) -> Result<()> {
        match error {
            CompileError::Semantic(err) => self.print_semantic_error(err, source)?,
            CompileError::Internal(err) => writeln!(self.buffer, "{err}")?,
            CompileError::Io(err) => writeln!(self.buffer, "{err}")?,
        }

        self.buffer.flush()
    }

    fn print_semantic_error(&mut self, err: &SemanticError, source: &SourceFile) -> Result<()> {
        let line = source.line_at(err.loc);

        if self.terse {
            return writeln!(self.buffer, "[{}] {}-р мөр: {}", SemanticError::MODULE, line.line_no, err);
        }

        let carets = std::cmp::max(err.loc.length as usize, 1);

        writeln!(self.buffer, "[{}] {}-р мөрөнд алдаа гарлаа:", SemanticError::MODULE, line.line_no)?;
        writeln!(self.buffer, "{}", line.text)?;
        writeln!(self.buffer, "{}{}", " ".repeat(line.column), "^".repeat(carets))?;
        writeln!(self.buffer, "Алдааны мессеж: {err}")
    }
}

/// Renders the error into a string, in the same format as [Printer::print].
pub fn render(error: &CompileError, source: &SourceFile) -> String {
    let mut buffer = Vec::new();
    let mut printer = Printer::new(&mut buffer);
    // Writing into a Vec cannot fail.
    _ = printer.print(error, source);
    String::from_utf8_lossy(&buffer).into_owned()
}
