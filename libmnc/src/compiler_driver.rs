// Copyright 2025-2026 Neil Henderson
//
//! The `compiler_driver` module defines the functions and types which orchestrate the different compilation stages.

pub mod options;
pub mod toolchain;

mod diagnostics;
mod driver;
mod source_file;


use thiserror::Error;

pub use diagnostics::error::{SemanticError, SemanticErrorKind};
pub use diagnostics::printer::{Printer, render};
pub use driver::{CompileContext, CompilerOutput, Driver};
pub use source_file::SourceFile;

use crate::core::InternalError;

/// An error returned by a compiler stage.
///
/// Any error aborts the whole compilation; no stage runs on the output of a failed stage.
#[derive(Debug, Error)]
pub enum CompileError {
    /// An error in the user's program.
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// An inconsistency between compiler stages.
    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The result type of every compiler stage.
pub type CompileResult<T> = Result<T, CompileError>;

impl CompileError {
    /// Is this an error in the user's program (as opposed to an internal or I/O error)?
    pub fn is_semantic(&self) -> bool {
        matches!(self, CompileError::Semantic(_))
    }

    /// The semantic error, if this is one.
    pub fn as_semantic(&self) -> Option<&SemanticError> {
        match self {
            CompileError::Semantic(err) => Some(err),
            _ => None,
        }
    }
}
