// Copyright 2025-2026 Neil Henderson
//
//! The `ast_expression` module defines [AstExpression] and its kinds.

use std::fmt;

use crate::core::{SourceLocation, Type};

use super::{AstBinaryOp, AstUnaryOp};

/// An expression, its source location, and its resolved type once the type checker has run.
#[derive(Debug, Clone, PartialEq)]
pub struct AstExpression {
    pub kind: AstExpressionKind,
    pub loc: SourceLocation,
    pub ty: Option<Type>,
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum AstExpressionKind {
    Constant(AstConstant),
    String(String),
    Var(String),
    Unary {
        op: AstUnaryOp,
        expr: Box<AstExpression>,
    },
    Binary {
        op: AstBinaryOp,
        left: Box<AstExpression>,
        right: Box<AstExpression>,
    },
    Assignment {
        lhs: Box<AstExpression>,
        rhs: Box<AstExpression>,
    },
    Conditional {
        condition: Box<AstExpression>,
        then_expr: Box<AstExpression>,
        else_expr: Box<AstExpression>,
    },
    Call {
        name: String,
        args: Vec<AstExpression>,
    },
    /// `start..end`. As a value it evaluates to the number of elements, `end - start + 1`.
    Range {
        start: Box<AstExpression>,
        end: Box<AstExpression>,
    },
    /// Only inserted by the type checker, for implicit conversions between integer widths.
    Cast {
        target: Type,
        expr: Box<AstExpression>,
    },
}

/// An integer literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AstConstant {
    Int(i32),
    Long(i64),
}

impl AstExpression {
    /// Creates an untyped expression of the given kind.
    pub fn new(kind: AstExpressionKind, loc: SourceLocation) -> Self {
        Self { kind, loc, ty: None }
    }

    pub fn int(value: i32, loc: SourceLocation) -> Self {
        Self::new(AstExpressionKind::Constant(AstConstant::Int(value)), loc)
    }

    pub fn long(value: i64, loc: SourceLocation) -> Self {
        Self::new(AstExpressionKind::Constant(AstConstant::Long(value)), loc)
    }

    pub fn string(value: impl Into<String>, loc: SourceLocation) -> Self {
        Self::new(AstExpressionKind::String(value.into()), loc)
    }

    pub fn var(name: impl Into<String>, loc: SourceLocation) -> Self {
        Self::new(AstExpressionKind::Var(name.into()), loc)
    }

    pub fn unary(op: AstUnaryOp, expr: AstExpression, loc: SourceLocation) -> Self {
        let loc = loc.merge_with(expr.loc);
        Self::new(AstExpressionKind::Unary { op, expr: Box::new(expr) }, loc)
    }

    pub fn binary(op: AstBinaryOp, left: AstExpression, right: AstExpression) -> Self {
        let loc = left.loc.merge_with(right.loc);
        Self::new(AstExpressionKind::Binary { op, left: Box::new(left), right: Box::new(right) }, loc)
    }

    pub fn assign(lhs: AstExpression, rhs: AstExpression) -> Self {
        let loc = lhs.loc.merge_with(rhs.loc);
        Self::new(AstExpressionKind::Assignment { lhs: Box::new(lhs), rhs: Box::new(rhs) }, loc)
    }

    pub fn conditional(condition: AstExpression, then_expr: AstExpression, else_expr: AstExpression) -> Self {
        let loc = condition.loc.merge_with(else_expr.loc);
        Self::new(
            AstExpressionKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            loc,
        )
    }

    pub fn call(name: impl Into<String>, args: Vec<AstExpression>, loc: SourceLocation) -> Self {
        Self::new(AstExpressionKind::Call { name: name.into(), args }, loc)
    }

    pub fn range(start: AstExpression, end: AstExpression) -> Self {
        let loc = start.loc.merge_with(end.loc);
        Self::new(AstExpressionKind::Range { start: Box::new(start), end: Box::new(end) }, loc)
    }

    /// Wraps `expr` in a typed cast to `target`.
    pub fn cast(target: Type, expr: AstExpression) -> Self {
        let loc = expr.loc;
        Self { kind: AstExpressionKind::Cast { target: target.clone(), expr: Box::new(expr) }, loc, ty: Some(target) }
    }

    /// Is the expression a plain variable reference?
    pub fn is_var(&self) -> bool {
        matches!(self.kind, AstExpressionKind::Var(_))
    }
}

impl fmt::Display for AstConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstConstant::Int(value) => write!(f, "{value}"),
            AstConstant::Long(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for AstExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AstExpressionKind::Constant(constant) => write!(f, "{constant}"),
            AstExpressionKind::String(value) => write!(f, "\"{value}\""),
            AstExpressionKind::Var(name) => write!(f, "{name}"),
            AstExpressionKind::Unary { op, expr } => write!(f, "{op}{expr}"),
            AstExpressionKind::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            AstExpressionKind::Assignment { lhs, rhs } => write!(f, "{lhs} = {rhs}"),
            AstExpressionKind::Conditional { condition, then_expr, else_expr } => {
                write!(f, "{condition} ? {then_expr} : {else_expr}")
            }
            AstExpressionKind::Call { name, args } => {
                write!(f, "{name}(")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            AstExpressionKind::Range { start, end } => write!(f, "{start}..{end}"),
            AstExpressionKind::Cast { expr, .. } => write!(f, "{expr}"),
        }
    }
}
