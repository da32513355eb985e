// Copyright 2025-2026 Neil Henderson
//
//! The `unary_instr` module provides functionality to generate x86_64 instructions for unary operations.

use super::super::ast::{AsmInstruction, AsmOperand, AsmUnaryOp, ConditionalCode};
use super::Generator;

use crate::compiler_driver::CompileResult;
use crate::ir::{TackyUnaryOp, TackyValue};

/// Generates the instructions for a unary operation.
pub fn generate_unary_operation(
    op: &TackyUnaryOp,
    src: &TackyValue,
    dst: &TackyValue,
    asm: &mut Vec<AsmInstruction>,
    generator: &Generator,
) -> CompileResult<()> {
    let src_asm_type = generator.value_type(src)?;
    let dst_asm_type = generator.value_type(dst)?;

    let src_operand = generator.translate_value_to_operand(src);
    let dst_operand = generator.translate_value_to_operand(dst);

    let op = match op {
        TackyUnaryOp::Negate => AsmUnaryOp::Neg,
        TackyUnaryOp::Complement => AsmUnaryOp::Not,

        // `!x` is `x == 0`
        TackyUnaryOp::LogicalNot => {
            asm.push(AsmInstruction::Cmp { asm_type: src_asm_type, op1: AsmOperand::Imm(0), op2: src_operand });
            asm.push(AsmInstruction::Mov { asm_type: dst_asm_type, src: AsmOperand::Imm(0), dst: dst_operand.clone() });
            asm.push(AsmInstruction::SetCC { cond_code: ConditionalCode::E, operand: dst_operand });
            return Ok(());
        }
    };

    asm.push(AsmInstruction::Mov { asm_type: src_asm_type, src: src_operand, dst: dst_operand.clone() });
    asm.push(AsmInstruction::Unary { op, asm_type: src_asm_type, operand: dst_operand });

    Ok(())
}
