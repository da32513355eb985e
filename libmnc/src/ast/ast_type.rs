// Copyright 2025-2026 Neil Henderson
//
//! The `ast_type` module defines [AstType], the type annotations written in the source.

use std::fmt;

use crate::core::Type;

/// A type annotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AstType {
    /// `тоо`
    Int,
    /// `64тоо`
    Long,
    /// `хоосон`
    Void,
    String,
}

impl AstType {
    /// Resolves the annotation to a [Type].
    ///
    /// `хоосон` functions still leave a value in the return register, so `Void` resolves to `Int32`.
    pub fn resolve(&self) -> Type {
        match self {
            AstType::Int | AstType::Void => Type::Int32,
            AstType::Long => Type::Int64,
            AstType::String => Type::String,
        }
    }
}

impl fmt::Display for AstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstType::Int => write!(f, "тоо"),
            AstType::Long => write!(f, "64тоо"),
            AstType::Void => write!(f, "хоосон"),
            AstType::String => write!(f, "мөр"),
        }
    }
}
