// Copyright 2025-2026 Neil Henderson
//
//! The `expr` module translates expressions into IR instructions, returning the value that holds each result.

use crate::ast::{AstConstant, AstExpression, AstExpressionKind, AstUnaryOp};
use crate::compiler_driver::CompileResult;
use crate::core::{InternalError, Stage, Type};

use super::super::{TackyBinaryOp, TackyConstant, TackyInstruction, TackyUnaryOp, TackyValue};
use super::TackyTranslator;
use super::binary_expr;

/// Translates an expression and returns the value holding its result.
pub fn translate_expression(
    translator: &mut TackyTranslator,
    expr: &AstExpression,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<TackyValue> {
    match &expr.kind {
        AstExpressionKind::Constant(AstConstant::Int(value)) => Ok(TackyValue::Constant(TackyConstant::Int32(*value))),
        AstExpressionKind::Constant(AstConstant::Long(value)) => Ok(TackyValue::Constant(TackyConstant::Int64(*value))),

        AstExpressionKind::String(text) => Ok(TackyValue::StringConstant(text.clone())),

        AstExpressionKind::Var(name) => Ok(TackyValue::var(name)),

        AstExpressionKind::Unary { op, expr: operand } => {
            let src = translate_expression(translator, operand, instructions)?;
            let dst = translator.make_temp_variable(expression_type(expr)?);

            instructions.push(TackyInstruction::Unary { op: translate_unary_operator(op), src, dst: dst.clone() });
            Ok(dst)
        }

        AstExpressionKind::Binary { op, left, right } => {
            binary_expr::translate_binary_operation(translator, expr, op, left, right, instructions)
        }

        AstExpressionKind::Assignment { lhs, rhs } => translate_assignment(translator, lhs, rhs, instructions),

        AstExpressionKind::Conditional { condition, then_expr, else_expr } => {
            let else_label = translator.make_label("cond_else");
            let end_label = translator.make_label("cond_end");
            let dst = translator.make_temp_variable(expression_type(expr)?);

            let condition_value = translate_expression(translator, condition, instructions)?;
            instructions.push(TackyInstruction::JumpIfZero { condition: condition_value, target: else_label.clone() });

            let then_value = translate_expression(translator, then_expr, instructions)?;
            instructions.push(TackyInstruction::Copy { src: then_value, dst: dst.clone() });
            instructions.push(TackyInstruction::Jump { target: end_label.clone() });

            instructions.push(TackyInstruction::Label { id: else_label });
            let else_value = translate_expression(translator, else_expr, instructions)?;
            instructions.push(TackyInstruction::Copy { src: else_value, dst: dst.clone() });

            instructions.push(TackyInstruction::Label { id: end_label });
            Ok(dst)
        }

        AstExpressionKind::Call { name, args } => {
            // Arguments are evaluated left to right.
            let args = args
                .iter()
                .map(|arg| translate_expression(translator, arg, instructions))
                .collect::<CompileResult<Vec<_>>>()?;

            let dst = translator.make_temp_variable(expression_type(expr)?);
            instructions.push(TackyInstruction::FunctionCall { name: name.clone(), args, dst: dst.clone() });
            Ok(dst)
        }

        AstExpressionKind::Range { start, end } => {
            let start_value = translate_expression(translator, start, instructions)?;
            let end_value = translate_expression(translator, end, instructions)?;

            // A range's value is its element count, `end - start + 1`.
            let ty = expression_type(expr)?;
            let dst = translator.make_temp_variable(ty.clone());
            instructions.push(TackyInstruction::Binary {
                op: TackyBinaryOp::Subtract,
                src1: end_value,
                src2: start_value,
                dst: dst.clone(),
            });
            instructions.push(TackyInstruction::Binary {
                op: TackyBinaryOp::Add,
                src1: dst.clone(),
                src2: TackyValue::constant_of_type(1, &ty),
                dst: dst.clone(),
            });
            Ok(dst)
        }

        AstExpressionKind::Cast { target, expr: operand } => translate_cast(translator, target, operand, instructions),
    }
}

fn translate_assignment(
    translator: &mut TackyTranslator,
    lhs: &AstExpression,
    rhs: &AstExpression,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<TackyValue> {
    let AstExpressionKind::Var(name) = &lhs.kind else {
        return Err(InternalError::unexpected(Stage::IrGen, format!("assignment to '{lhs}'")).into());
    };

    let rhs_value = translate_expression(translator, rhs, instructions)?;

    let dst = TackyValue::var(name);
    instructions.push(TackyInstruction::Copy { src: rhs_value, dst: dst.clone() });
    Ok(dst)
}

fn translate_cast(
    translator: &mut TackyTranslator,
    target: &Type,
    operand: &AstExpression,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<TackyValue> {
    let src = translate_expression(translator, operand, instructions)?;

    match (expression_type(operand)?, target) {
        (Type::Int32, Type::Int64) => {
            let dst = translator.make_temp_variable(Type::Int64);
            instructions.push(TackyInstruction::SignExtend { src, dst: dst.clone() });
            Ok(dst)
        }

        (Type::Int64, Type::Int32) => {
            let dst = translator.make_temp_variable(Type::Int32);
            instructions.push(TackyInstruction::Truncate { src, dst: dst.clone() });
            Ok(dst)
        }

        // Same width
        _ => Ok(src),
    }
}

/// The type the type checker annotated the expression with.
pub fn expression_type(expr: &AstExpression) -> CompileResult<Type> {
    match &expr.ty {
        Some(ty) => Ok(ty.clone()),
        None => Err(InternalError::unexpected(Stage::IrGen, format!("untyped expression '{expr}'")).into()),
    }
}

fn translate_unary_operator(op: &AstUnaryOp) -> TackyUnaryOp {
    match op {
        AstUnaryOp::Negate => TackyUnaryOp::Negate,
        AstUnaryOp::Complement => TackyUnaryOp::Complement,
        AstUnaryOp::LogicalNot => TackyUnaryOp::LogicalNot,
    }
}
