// Copyright 2025-2026 Neil Henderson
//
//! The `checker` module defines `TypeChecker`, which holds mutable state necessary for type checking.

use crate::ast::{AstConstant, AstExpression, AstExpressionKind, AstUnaryOp};
use crate::compiler_driver::{CompileError, CompileResult, SemanticError, SemanticErrorKind};
use crate::core::{SourceLocation, Type};

use super::super::symbol_table::SymbolTable;

/// The Type Checker holds mutable state necessary for type checking.
#[derive(Debug, Default)]
pub struct TypeChecker {
    pub symbols: SymbolTable,
    current_return_type: Option<Type>,
}

impl TypeChecker {
    /// Creates a new Type Checker with an empty Symbol Table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the type checker and returns its Symbol Table.
    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    /// Sets the return type of the function whose body is being checked.
    pub fn set_current_return_type(&mut self, return_type: Option<Type>) {
        self.current_return_type = return_type;
    }

    /// The return type of the function whose body is being checked.
    pub fn current_return_type(&self) -> Option<&Type> {
        self.current_return_type.as_ref()
    }
}

/// Converts the expression to the target type by wrapping it in a `Cast`, unless it already has that type.
///
/// Only integer widths convert into each other. A string never converts to or from an integer.
pub fn convert_to(expr: &mut AstExpression, target: &Type) -> CompileResult<()> {
    match &expr.ty {
        Some(ty) if ty == target => return Ok(()),
        Some(ty) if !ty.is_integer() || !target.is_integer() => {
            let kind = SemanticErrorKind::IncompatibleTypes { expected: target.clone(), found: ty.clone() };
            return Err(semantic_error(kind, expr.loc));
        }
        _ => (),
    }

    let placeholder = AstExpression::int(0, expr.loc);
    let inner = std::mem::replace(expr, placeholder);
    *expr = AstExpression::cast(target.clone(), inner);
    Ok(())
}

/// Fails unless the type checked expression has an integer type.
pub fn require_integer(expr: &AstExpression) -> CompileResult<()> {
    match &expr.ty {
        Some(ty) if !ty.is_integer() => {
            let kind = SemanticErrorKind::IncompatibleTypes { expected: Type::Int32, found: ty.clone() };
            Err(semantic_error(kind, expr.loc))
        }
        _ => Ok(()),
    }
}

/// Evaluates a static variable's initializer, which must be an integer constant (optionally negated or cast).
pub fn evaluate_constant(expr: &AstExpression) -> Option<i64> {
    match &expr.kind {
        AstExpressionKind::Constant(AstConstant::Int(value)) => Some(*value as i64),
        AstExpressionKind::Constant(AstConstant::Long(value)) => Some(*value),
        AstExpressionKind::Unary { op: AstUnaryOp::Negate, expr } => evaluate_constant(expr).map(i64::wrapping_neg),
        AstExpressionKind::Unary { op: AstUnaryOp::Complement, expr } => evaluate_constant(expr).map(|value| !value),
        AstExpressionKind::Cast { target, expr } => evaluate_constant(expr).map(|value| truncate_to(value, target)),
        _ => None,
    }
}

/// Truncates a constant to the width of the given type.
pub fn truncate_to(value: i64, ty: &Type) -> i64 {
    match ty {
        Type::Int32 => value as i32 as i64,
        _ => value,
    }
}

/// Makes a semantic error.
pub fn semantic_error(kind: SemanticErrorKind, loc: SourceLocation) -> CompileError {
    SemanticError::new(kind, loc).into()
}
