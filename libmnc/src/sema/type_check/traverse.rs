// Copyright 2025-2026 Neil Henderson
//
//! The `traverse` module type checks the statements and expressions in a function body.

use crate::ast::{
    AstBlock, AstBlockItem, AstConstant, AstDeclaration, AstExpression, AstExpressionKind, AstStatement, AstUnaryOp,
};
use crate::compiler_driver::{CompileResult, SemanticErrorKind};
use crate::core::{InternalError, Stage, Type};

use super::super::symbol_table::Symbol;
use super::checker::{TypeChecker, convert_to, require_integer, semantic_error};
use super::declarations;

/// Type checks the items of a block.
pub fn typecheck_block(block: &mut AstBlock, chk: &mut TypeChecker) -> CompileResult<()> {
    for item in &mut block.0 {
        match item {
            AstBlockItem::Statement(stmt) => typecheck_statement(stmt, chk)?,
            AstBlockItem::Declaration(AstDeclaration::Variable(var_decl)) => {
                declarations::typecheck_local_variable(var_decl, chk)?
            }
            AstBlockItem::Declaration(AstDeclaration::Function(function)) => {
                return Err(InternalError::unexpected(
                    Stage::TypeChecker,
                    format!("function declaration '{}' in a block", function.ident.name),
                )
                .into());
            }
        }
    }

    Ok(())
}

fn typecheck_statement(stmt: &mut AstStatement, chk: &mut TypeChecker) -> CompileResult<()> {
    match stmt {
        AstStatement::Expression(expr) => typecheck_expression(expr, chk)?,

        AstStatement::Return { expr, .. } => {
            if let Some(expr) = expr {
                typecheck_expression(expr, chk)?;

                if let Some(return_type) = chk.current_return_type().cloned() {
                    convert_to(expr, &return_type)?;
                }
            }
        }

        AstStatement::If { condition, then_stmt, else_stmt } => {
            typecheck_expression(condition, chk)?;
            typecheck_statement(then_stmt, chk)?;
            if let Some(else_stmt) = else_stmt {
                typecheck_statement(else_stmt, chk)?;
            }
        }

        AstStatement::Compound(block) => typecheck_block(block, chk)?,

        AstStatement::While { condition, body, .. } => {
            typecheck_expression(condition, chk)?;
            typecheck_block(body, chk)?;
        }

        AstStatement::Loop { var, expr, body, .. } => {
            typecheck_expression(expr, chk)?;

            if let Some(var) = var {
                // The loop variable counts through the range, so it has the range's type.
                let var_type = match &expr.kind {
                    AstExpressionKind::Range { .. } => expr_type(expr)?,
                    _ => Type::Int32,
                };
                chk.symbols.add(&var.name, Symbol::local(var_type));
            }

            typecheck_block(body, chk)?;
        }

        AstStatement::Break { .. } | AstStatement::Continue { .. } | AstStatement::Null => (),
    }

    Ok(())
}

/// Type checks an expression and annotates it, and all of its sub-expressions, with their types.
pub fn typecheck_expression(expr: &mut AstExpression, chk: &mut TypeChecker) -> CompileResult<()> {
    let loc = expr.loc;

    let ty = match &mut expr.kind {
        AstExpressionKind::Constant(AstConstant::Int(_)) => Type::Int32,
        AstExpressionKind::Constant(AstConstant::Long(_)) => Type::Int64,

        AstExpressionKind::String(_) => Type::String,

        AstExpressionKind::Var(name) => {
            let Some(symbol) = chk.symbols.get(name) else {
                return Err(InternalError::missing_symbol(Stage::TypeChecker, name).into());
            };

            if symbol.is_function() {
                return Err(semantic_error(SemanticErrorKind::WrongKind(name.clone()), loc));
            }

            symbol.ty.clone()
        }

        AstExpressionKind::Unary { op, expr: operand } => {
            typecheck_expression(operand, chk)?;

            match op {
                AstUnaryOp::LogicalNot => Type::Int32,
                AstUnaryOp::Negate | AstUnaryOp::Complement => {
                    require_integer(operand)?;
                    expr_type(operand)?
                }
            }
        }

        AstExpressionKind::Binary { op, left, right } => {
            typecheck_expression(left, chk)?;
            typecheck_expression(right, chk)?;

            // Each operand of `&&` and `||` is tested against zero in its own width.
            if op.is_logical() {
                Type::Int32
            } else {
                let common = Type::common_type(&expr_type(left)?, &expr_type(right)?);
                convert_to(left, &common)?;
                convert_to(right, &common)?;

                // Strings can be compared, but only integers take part in arithmetic.
                if op.is_relational() {
                    Type::Int32
                } else {
                    require_integer(left)?;
                    common
                }
            }
        }

        AstExpressionKind::Assignment { lhs, rhs } => {
            typecheck_expression(lhs, chk)?;
            typecheck_expression(rhs, chk)?;

            let lhs_type = expr_type(lhs)?;
            convert_to(rhs, &lhs_type)?;
            lhs_type
        }

        AstExpressionKind::Conditional { condition, then_expr, else_expr } => {
            typecheck_expression(condition, chk)?;
            typecheck_expression(then_expr, chk)?;
            typecheck_expression(else_expr, chk)?;

            let common = Type::common_type(&expr_type(then_expr)?, &expr_type(else_expr)?);
            convert_to(then_expr, &common)?;
            convert_to(else_expr, &common)?;
            common
        }

        AstExpressionKind::Call { name, args } => {
            let Some(symbol) = chk.symbols.get(name) else {
                return Err(semantic_error(SemanticErrorKind::UndeclaredFunction(name.clone()), loc));
            };

            let Type::Function { params, return_type } = &symbol.ty else {
                return Err(semantic_error(SemanticErrorKind::NotAFunction(name.clone()), loc));
            };

            if params.len() != args.len() {
                let kind =
                    SemanticErrorKind::ArityMismatch { name: name.clone(), expected: params.len(), found: args.len() };
                return Err(semantic_error(kind, loc));
            }

            let params = params.clone();
            let return_type = return_type.as_ref().clone();

            for (arg, param_type) in args.iter_mut().zip(&params) {
                typecheck_expression(arg, chk)?;
                convert_to(arg, param_type)?;
            }

            return_type
        }

        AstExpressionKind::Range { start, end } => {
            typecheck_expression(start, chk)?;
            typecheck_expression(end, chk)?;

            let common = Type::common_type(&expr_type(start)?, &expr_type(end)?);
            convert_to(start, &common)?;
            convert_to(end, &common)?;
            require_integer(start)?;
            common
        }

        AstExpressionKind::Cast { target, expr: operand } => {
            typecheck_expression(operand, chk)?;
            target.clone()
        }
    };

    expr.ty = Some(ty);
    Ok(())
}

/// The type of an already type checked expression.
fn expr_type(expr: &AstExpression) -> CompileResult<Type> {
    match &expr.ty {
        Some(ty) => Ok(ty.clone()),
        None => Err(InternalError::unexpected(Stage::TypeChecker, format!("untyped expression '{expr}'")).into()),
    }
}
