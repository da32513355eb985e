// Copyright 2025-2026 Neil Henderson
//
//! The `binary_instr` module provides functionality to generate x86_64 instructions for binary operations.

use super::super::ast::{AsmBinaryOp, AsmInstruction, AsmOperand, AsmType, ConditionalCode};
use super::super::registers::HwRegister;
use super::Generator;

use crate::compiler_driver::CompileResult;
use crate::ir::{TackyBinaryOp, TackyValue};

/// Generates the instructions for a binary operation.
pub fn generate_binary_operation(
    op: &TackyBinaryOp,
    src1: &TackyValue,
    src2: &TackyValue,
    dst: &TackyValue,
    asm: &mut Vec<AsmInstruction>,
    generator: &Generator,
) -> CompileResult<()> {
    let src_asm_type = generator.value_type(src1)?;

    let src1_operand = generator.translate_value_to_operand(src1);
    let src2_operand = generator.translate_value_to_operand(src2);
    let dst_operand = generator.translate_value_to_operand(dst);

    if let Some(op) = translate_ir_binary_op_to_asm(op) {
        asm.push(AsmInstruction::Mov { asm_type: src_asm_type, src: src1_operand, dst: dst_operand.clone() });
        asm.push(AsmInstruction::Binary { op, asm_type: src_asm_type, src: src2_operand, dst: dst_operand });
    } else if let Some(cond_code) = translate_ir_relational_op_to_condition_code(op) {
        let dst_asm_type = generator.value_type(dst)?;

        // The operands are flipped because `cmp` subtracts its first operand from its second. Our IR has
        // operands in source order, so `dst = gt a, b` becomes `cmp b, a` followed by `setg`.
        asm.push(AsmInstruction::Cmp { asm_type: src_asm_type, op1: src2_operand, op2: src1_operand });
        asm.push(AsmInstruction::Mov { asm_type: dst_asm_type, src: AsmOperand::Imm(0), dst: dst_operand.clone() });
        asm.push(AsmInstruction::SetCC { cond_code, operand: dst_operand });
    } else {
        let return_remainder = *op == TackyBinaryOp::Remainder;
        translate_division(src_asm_type, src1_operand, src2_operand, dst_operand, return_remainder, asm);
    }

    Ok(())
}

fn translate_division(
    asm_type: AsmType,
    dividend: AsmOperand,
    divisor: AsmOperand,
    dst: AsmOperand,
    return_remainder: bool,
    asm_instructions: &mut Vec<AsmInstruction>,
) {
    let rax_reg = AsmOperand::Reg(HwRegister::AX);
    let rdx_reg = AsmOperand::Reg(HwRegister::DX);

    // Move the dividend into RAX
    asm_instructions.push(AsmInstruction::Mov { asm_type, src: dividend, dst: rax_reg.clone() });

    // Sign extend into EDX:EAX (or RDX:RAX)
    asm_instructions.push(AsmInstruction::Cdq { asm_type });
    asm_instructions.push(AsmInstruction::IDiv { asm_type, operand: divisor });

    // The remainder is in RDX and the quotient is in RAX.
    let result = if return_remainder { rdx_reg } else { rax_reg };
    asm_instructions.push(AsmInstruction::Mov { asm_type, src: result, dst });
}

#[rustfmt::skip]
fn translate_ir_relational_op_to_condition_code(op: &TackyBinaryOp) -> Option<ConditionalCode> {
    match op {
        TackyBinaryOp::EqualTo              => Some(ConditionalCode::E),
        TackyBinaryOp::NotEqualTo           => Some(ConditionalCode::NE),
        TackyBinaryOp::LessThan             => Some(ConditionalCode::L),
        TackyBinaryOp::LessThanOrEqualTo    => Some(ConditionalCode::LE),
        TackyBinaryOp::GreaterThan          => Some(ConditionalCode::G),
        TackyBinaryOp::GreaterThanOrEqualTo => Some(ConditionalCode::GE),

        TackyBinaryOp::Add
        | TackyBinaryOp::Subtract
        | TackyBinaryOp::Multiply
        | TackyBinaryOp::Divide
        | TackyBinaryOp::Remainder          => None,
    }
}

/// The two-operand instruction for an arithmetic operator. Division and remainder go through `idiv` instead.
#[rustfmt::skip]
fn translate_ir_binary_op_to_asm(op: &TackyBinaryOp) -> Option<AsmBinaryOp> {
    match op {
        TackyBinaryOp::Add      => Some(AsmBinaryOp::Add),
        TackyBinaryOp::Subtract => Some(AsmBinaryOp::Sub),
        TackyBinaryOp::Multiply => Some(AsmBinaryOp::Mul),
        _                       => None,
    }
}
