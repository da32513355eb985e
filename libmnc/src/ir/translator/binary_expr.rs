// Copyright 2025-2026 Neil Henderson
//
//! The `binary_expr` module translates binary operations, including the short-circuiting logical operators.

use crate::ast::{AstBinaryOp, AstExpression};
use crate::compiler_driver::CompileResult;
use crate::core::Type;

use super::super::{TackyBinaryOp, TackyInstruction, TackyValue};
use super::TackyTranslator;
use super::expr;

/// Translates a binary operation.
pub fn translate_binary_operation(
    translator: &mut TackyTranslator,
    expr: &AstExpression,
    op: &AstBinaryOp,
    left: &AstExpression,
    right: &AstExpression,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<TackyValue> {
    #[rustfmt::skip]
    let op = match op {
        AstBinaryOp::LogicalAnd            => return translate_logical_and(translator, left, right, instructions),
        AstBinaryOp::LogicalOr             => return translate_logical_or(translator, left, right, instructions),
        AstBinaryOp::Add                   => TackyBinaryOp::Add,
        AstBinaryOp::Subtract              => TackyBinaryOp::Subtract,
        AstBinaryOp::Multiply              => TackyBinaryOp::Multiply,
        AstBinaryOp::Divide                => TackyBinaryOp::Divide,
        AstBinaryOp::Remainder             => TackyBinaryOp::Remainder,
        AstBinaryOp::EqualTo               => TackyBinaryOp::EqualTo,
        AstBinaryOp::NotEqualTo            => TackyBinaryOp::NotEqualTo,
        AstBinaryOp::LessThan              => TackyBinaryOp::LessThan,
        AstBinaryOp::LessThanOrEqualTo     => TackyBinaryOp::LessThanOrEqualTo,
        AstBinaryOp::GreaterThan           => TackyBinaryOp::GreaterThan,
        AstBinaryOp::GreaterThanOrEqualTo  => TackyBinaryOp::GreaterThanOrEqualTo,
    };

    let src1 = expr::translate_expression(translator, left, instructions)?;
    let src2 = expr::translate_expression(translator, right, instructions)?;
    let dst = translator.make_temp_variable(expr::expression_type(expr)?);

    instructions.push(TackyInstruction::Binary { op, src1, src2, dst: dst.clone() });
    Ok(dst)
}

fn translate_logical_and(
    translator: &mut TackyTranslator,
    left: &AstExpression,
    right: &AstExpression,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<TackyValue> {
    let false_label = translator.make_label("and_false");
    let end_label = translator.make_label("and_end");

    // LogicalAnd evaluates to `тоо` 1 or 0.
    let dst = translator.make_temp_variable(Type::Int32);

    let left_value = expr::translate_expression(translator, left, instructions)?;
    instructions.push(TackyInstruction::JumpIfZero { condition: left_value, target: false_label.clone() });

    let right_value = expr::translate_expression(translator, right, instructions)?;
    instructions.push(TackyInstruction::JumpIfZero { condition: right_value, target: false_label.clone() });

    instructions.push(TackyInstruction::Copy { src: TackyValue::int32(1), dst: dst.clone() });
    instructions.push(TackyInstruction::Jump { target: end_label.clone() });

    instructions.push(TackyInstruction::Label { id: false_label });
    instructions.push(TackyInstruction::Copy { src: TackyValue::int32(0), dst: dst.clone() });

    instructions.push(TackyInstruction::Label { id: end_label });
    Ok(dst)
}

fn translate_logical_or(
    translator: &mut TackyTranslator,
    left: &AstExpression,
    right: &AstExpression,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<TackyValue> {
    let true_label = translator.make_label("or_true");
    let end_label = translator.make_label("or_end");

    let dst = translator.make_temp_variable(Type::Int32);

    let left_value = expr::translate_expression(translator, left, instructions)?;
    instructions.push(TackyInstruction::JumpIfNotZero { condition: left_value, target: true_label.clone() });

    let right_value = expr::translate_expression(translator, right, instructions)?;
    instructions.push(TackyInstruction::JumpIfNotZero { condition: right_value, target: true_label.clone() });

    instructions.push(TackyInstruction::Copy { src: TackyValue::int32(0), dst: dst.clone() });
    instructions.push(TackyInstruction::Jump { target: end_label.clone() });

    instructions.push(TackyInstruction::Label { id: true_label });
    instructions.push(TackyInstruction::Copy { src: TackyValue::int32(1), dst: dst.clone() });

    instructions.push(TackyInstruction::Label { id: end_label });
    Ok(dst)
}
