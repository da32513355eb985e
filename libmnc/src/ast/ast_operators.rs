// Copyright 2025-2026 Neil Henderson
//
//! The `ast_operators` module defines the unary and binary operators.

use std::fmt;

/// Unary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AstUnaryOp {
    Negate,
    Complement,
    LogicalNot,
}

/// Binary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AstBinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    LogicalAnd,
    LogicalOr,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
}

impl AstBinaryOp {
    /// Is the operator one of the relational or equality operators?
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            AstBinaryOp::EqualTo
                | AstBinaryOp::NotEqualTo
                | AstBinaryOp::LessThan
                | AstBinaryOp::LessThanOrEqualTo
                | AstBinaryOp::GreaterThan
                | AstBinaryOp::GreaterThanOrEqualTo
        )
    }

    /// Is the operator `&&` or `||`?
    pub fn is_logical(&self) -> bool {
        matches!(self, AstBinaryOp::LogicalAnd | AstBinaryOp::LogicalOr)
    }
}

impl fmt::Display for AstUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstUnaryOp::Negate => write!(f, "-"),
            AstUnaryOp::Complement => write!(f, "~"),
            AstUnaryOp::LogicalNot => write!(f, "!"),
        }
    }
}

#[rustfmt::skip]
impl fmt::Display for AstBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstBinaryOp::Add                  => write!(f, "+"),
            AstBinaryOp::Subtract             => write!(f, "-"),
            AstBinaryOp::Multiply             => write!(f, "*"),
            AstBinaryOp::Divide               => write!(f, "/"),
            AstBinaryOp::Remainder            => write!(f, "%"),
            AstBinaryOp::LogicalAnd           => write!(f, "&&"),
            AstBinaryOp::LogicalOr            => write!(f, "||"),
            AstBinaryOp::EqualTo              => write!(f, "=="),
            AstBinaryOp::NotEqualTo           => write!(f, "!="),
            AstBinaryOp::LessThan             => write!(f, "<"),
            AstBinaryOp::LessThanOrEqualTo    => write!(f, "<="),
            AstBinaryOp::GreaterThan          => write!(f, ">"),
            AstBinaryOp::GreaterThanOrEqualTo => write!(f, ">="),
        }
    }
}
