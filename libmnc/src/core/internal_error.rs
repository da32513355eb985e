// Copyright 2025-2026 Neil Henderson
//
//! The `internal_error` module defines [InternalError], which reports an inconsistency between compiler stages.
//!
//! An internal error is always a bug in an earlier stage and is never shown to the user with a source excerpt.

use std::fmt;

use thiserror::Error;

/// The compiler stage that detected an internal error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Resolver,
    LoopLabeler,
    TypeChecker,
    IrGen,
    InstructionSelection,
    SlotAssignment,
    Fixup,
    Emit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolver => write!(f, "resolver"),
            Stage::LoopLabeler => write!(f, "loop labeler"),
            Stage::TypeChecker => write!(f, "type checker"),
            Stage::IrGen => write!(f, "IR generation"),
            Stage::InstructionSelection => write!(f, "instruction selection"),
            Stage::SlotAssignment => write!(f, "slot assignment"),
            Stage::Fixup => write!(f, "instruction fixup"),
            Stage::Emit => write!(f, "emit"),
        }
    }
}

/// An Internal Compiler Error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("ICE in {stage}: unexpected {detail}")]
    UnexpectedNode { stage: Stage, detail: String },

    #[error("ICE in {stage}: symbol '{name}' not found in symbol table")]
    MissingSymbol { stage: Stage, name: String },

    #[error("ICE: frame size of function '{0}' is already set")]
    FrameSizeAlreadySet(String),

    #[error("ICE: pseudo operand '{0}' should have been replaced")]
    PseudoAfterSlotAssignment(String),

    #[error("ICE: no transliteration for character '{0}'")]
    UntranslatableCharacter(char),
}

impl InternalError {
    /// Creates an `UnexpectedNode` error for the given stage.
    pub fn unexpected(stage: Stage, detail: impl Into<String>) -> Self {
        Self::UnexpectedNode { stage, detail: detail.into() }
    }

    /// Creates a `MissingSymbol` error for the given stage.
    pub fn missing_symbol(stage: Stage, name: &str) -> Self {
        Self::MissingSymbol { stage, name: name.to_string() }
    }
}
