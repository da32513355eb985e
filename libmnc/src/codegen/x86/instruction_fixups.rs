// Copyright 2025-2026 Neil Henderson
//
//! The `instruction_fixups` module allocates each function's stack frame and rewrites instructions whose operands
//! are not encodable.
//!
//! R10 is the scratch register for source operands and R11 for destination operands.

use std::mem;

use super::ast::{AsmBinaryOp, AsmFunction, AsmInstruction, AsmOperand, AsmRoot, AsmType};
use super::generate::round_up_to_multiple_of_16;
use super::registers::HwRegister;
use super::symbols::AsmSymbolTable;

use crate::compiler_driver::CompileResult;
use crate::core::{InternalError, Stage};

/// Allocates the stack frame of, and legalizes the instructions of, every function in the program.
pub fn fixup_program(root: &mut AsmRoot, symbols: &AsmSymbolTable) -> CompileResult<()> {
    for function in &mut root.functions {
        let Some(frame_size) = symbols.frame_size(&function.name) else {
            return Err(InternalError::missing_symbol(Stage::Fixup, &function.name).into());
        };

        allocate_stack_space(function, frame_size);
        rewrite_instructions(function)?;
    }

    Ok(())
}

fn allocate_stack_space(function: &mut AsmFunction, frame_size: i32) {
    // The stack pointer needs to stay 16-byte aligned.
    let bytes_to_allocate = round_up_to_multiple_of_16(frame_size);

    function.instructions.insert(
        0,
        AsmInstruction::Binary {
            op: AsmBinaryOp::Sub,
            asm_type: AsmType::QuadWord,
            src: AsmOperand::Imm(bytes_to_allocate as i64),
            dst: AsmOperand::Reg(HwRegister::SP),
        },
    );
}

/// Rewrites the function's instructions so that every operand combination is encodable.
pub fn rewrite_instructions(function: &mut AsmFunction) -> CompileResult<()> {
    let instructions = mem::take(&mut function.instructions);
    let mut fixed = Vec::with_capacity(instructions.len());

    for instr in instructions {
        check_no_pseudo_operands(&instr)?;

        let instr = load_string_literal_operands(instr, &mut fixed);

        match instr {
            AsmInstruction::Mov { .. } => fixed.extend(fixup_mov_immediate(instr)),
            AsmInstruction::MovSx { .. } => fixed.extend(fixup_movsx(instr)),
            AsmInstruction::Cmp { .. } => fixed.extend(fixup_cmp(instr)),
            AsmInstruction::Push(_) => fixed.extend(fixup_push(instr)),
            AsmInstruction::IDiv { operand: AsmOperand::Imm(_), .. } => fixed.extend(fixup_division_immediate(instr)),
            AsmInstruction::Binary { .. } => fixed.extend(fixup_integer_binary_operation(instr)),
            _ => fixed.push(instr),
        }
    }

    function.instructions = fixup_instructions_with_two_operand_memory_address(fixed);
    Ok(())
}

fn check_no_pseudo_operands(instr: &AsmInstruction) -> Result<(), InternalError> {
    let pseudo = match instr {
        AsmInstruction::Mov { src, dst, .. }
        | AsmInstruction::MovSx { src, dst }
        | AsmInstruction::Binary { src, dst, .. } => [src, dst].into_iter().find(|op| op.is_pseudo()),
        AsmInstruction::Cmp { op1, op2, .. } => [op1, op2].into_iter().find(|op| op.is_pseudo()),
        AsmInstruction::Unary { operand, .. }
        | AsmInstruction::IDiv { operand, .. }
        | AsmInstruction::SetCC { operand, .. }
        | AsmInstruction::Push(operand) => Some(operand).filter(|op| op.is_pseudo()),
        _ => None,
    };

    match pseudo {
        Some(AsmOperand::Pseudo(name)) => Err(InternalError::PseudoAfterSlotAssignment(name.clone())),
        _ => Ok(()),
    }
}

/// A string literal operand stands for the literal's address, which only `mov` (emitted as `lea`) can compute.
/// Every other instruction gets the address loaded into a scratch register first.
fn load_string_literal_operands(instr: AsmInstruction, out: &mut Vec<AsmInstruction>) -> AsmInstruction {
    let mut load_address = |operand: AsmOperand, scratch: HwRegister| match operand {
        AsmOperand::StringLiteral(_) => {
            let reg_operand = AsmOperand::Reg(scratch);
            out.push(AsmInstruction::Mov { asm_type: AsmType::QuadWord, src: operand, dst: reg_operand.clone() });
            reg_operand
        }
        _ => operand,
    };

    match instr {
        AsmInstruction::Cmp { asm_type, op1, op2 } => {
            let op1 = load_address(op1, HwRegister::R10);
            let op2 = load_address(op2, HwRegister::R11);
            AsmInstruction::Cmp { asm_type, op1, op2 }
        }

        AsmInstruction::Binary { op, asm_type, src, dst } => {
            let src = load_address(src, HwRegister::R10);
            AsmInstruction::Binary { op, asm_type, src, dst }
        }

        AsmInstruction::IDiv { asm_type, operand } => {
            let operand = load_address(operand, HwRegister::R10);
            AsmInstruction::IDiv { asm_type, operand }
        }

        _ => instr,
    }
}

/// `mov`
///
/// Constraints
/// - A QuadWord immediate which doesn't fit in a DoubleWord must go through a register.
/// - A LongWord immediate is truncated to its low 32 bits.
fn fixup_mov_immediate(instr: AsmInstruction) -> Vec<AsmInstruction> {
    let mut out = Vec::with_capacity(2); // At most we'll need 2 instructions

    let AsmInstruction::Mov { asm_type, src, dst } = instr else {
        return vec![instr];
    };

    match src {
        AsmOperand::Imm(value) if src.is_large_immediate() && asm_type == AsmType::LongWord => {
            let src = AsmOperand::Imm((value as i32) as i64);
            out.push(AsmInstruction::Mov { asm_type, src, dst });
        }

        AsmOperand::Imm(_) if src.is_large_immediate() => {
            let r10_operand = AsmOperand::Reg(HwRegister::R10);
            out.push(AsmInstruction::Mov { asm_type, src, dst: r10_operand.clone() });
            out.push(AsmInstruction::Mov { asm_type, src: r10_operand, dst });
        }

        _ => out.push(AsmInstruction::Mov { asm_type, src, dst }),
    }

    out
}

/// `movsx`
///
/// Constraints
/// - The source operand cannot be an immediate.
/// - The destination operand must be a register.
fn fixup_movsx(instr: AsmInstruction) -> Vec<AsmInstruction> {
    let mut out = Vec::with_capacity(3); // At most we'll need 3 instructions

    let AsmInstruction::MovSx { src, dst } = instr else {
        return vec![instr];
    };

    let src = if src.is_immediate() {
        let r10_operand = AsmOperand::Reg(HwRegister::R10);
        out.push(AsmInstruction::Mov { asm_type: AsmType::LongWord, src, dst: r10_operand.clone() });
        r10_operand
    } else {
        src
    };

    if dst.is_memory_address() {
        let r11_operand = AsmOperand::Reg(HwRegister::R11);
        out.push(AsmInstruction::MovSx { src, dst: r11_operand.clone() });
        out.push(AsmInstruction::Mov { asm_type: AsmType::QuadWord, src: r11_operand, dst });
    } else {
        out.push(AsmInstruction::MovSx { src, dst });
    }

    out
}

/// `cmp`
///
/// Constraints (in AT&T syntax)
/// - If the first operand is an immediate, it must fit inside a DoubleWord.
/// - The second operand cannot be an immediate.
///
/// E.g. in AT&T syntax: `cmp $5, %rax` is fine, but `cmp %rax, $5` is not.
fn fixup_cmp(instr: AsmInstruction) -> Vec<AsmInstruction> {
    let mut out = Vec::with_capacity(3); // At most we'll need 3 instructions

    let AsmInstruction::Cmp { asm_type, op1, op2 } = instr else {
        return vec![instr];
    };

    let op1 = if op1.is_large_immediate() {
        let r10_operand = AsmOperand::Reg(HwRegister::R10);
        out.push(AsmInstruction::Mov { asm_type, src: op1, dst: r10_operand.clone() });
        r10_operand
    } else {
        op1
    };

    let op2 = if op2.is_immediate() {
        let r11_operand = AsmOperand::Reg(HwRegister::R11);
        out.push(AsmInstruction::Mov { asm_type, src: op2, dst: r11_operand.clone() });
        r11_operand
    } else {
        op2
    };

    out.push(AsmInstruction::Cmp { asm_type, op1, op2 });

    out
}

/// `push`
///
/// Constraints
/// - If the operand is an immediate, it must fit inside a DoubleWord.
fn fixup_push(instr: AsmInstruction) -> Vec<AsmInstruction> {
    let AsmInstruction::Push(operand) = instr else {
        return vec![instr];
    };

    if operand.is_large_immediate() {
        let r10_operand = AsmOperand::Reg(HwRegister::R10);
        vec![
            AsmInstruction::Mov { asm_type: AsmType::QuadWord, src: operand, dst: r10_operand.clone() },
            AsmInstruction::Push(r10_operand),
        ]
    } else {
        vec![AsmInstruction::Push(operand)]
    }
}

/// `idiv`
///
/// Constraints
/// - The operand cannot be an immediate.
fn fixup_division_immediate(instr: AsmInstruction) -> Vec<AsmInstruction> {
    let AsmInstruction::IDiv { asm_type, operand } = instr else {
        return vec![instr];
    };

    let r10_operand = AsmOperand::Reg(HwRegister::R10);

    vec![
        AsmInstruction::Mov { asm_type, src: operand, dst: r10_operand.clone() },
        AsmInstruction::IDiv { asm_type, operand: r10_operand },
    ]
}

/// Integer binary operations
///
/// Constraints
/// - If the source operand is an immediate, it must fit inside a DoubleWord.
/// - `imul`'s destination operand must be a register.
fn fixup_integer_binary_operation(instr: AsmInstruction) -> Vec<AsmInstruction> {
    let mut out = Vec::with_capacity(4); // At most we'll need 4 instructions

    let AsmInstruction::Binary { op, asm_type, src, dst } = instr else {
        return vec![instr];
    };

    let src = if asm_type == AsmType::QuadWord && src.is_large_immediate() {
        let r10_operand = AsmOperand::Reg(HwRegister::R10);
        out.push(AsmInstruction::Mov { asm_type, src, dst: r10_operand.clone() });
        r10_operand
    } else {
        src
    };

    if op == AsmBinaryOp::Mul && !dst.is_hw_register() {
        let r11_operand = AsmOperand::Reg(HwRegister::R11);

        out.push(AsmInstruction::Mov { asm_type, src: dst.clone(), dst: r11_operand.clone() });
        out.push(AsmInstruction::Binary { op, asm_type, src, dst: r11_operand.clone() });
        out.push(AsmInstruction::Mov { asm_type, src: r11_operand, dst });
    } else {
        out.push(AsmInstruction::Binary { op, asm_type, src, dst });
    }

    out
}

fn fixup_instructions_with_two_operand_memory_address(instructions: Vec<AsmInstruction>) -> Vec<AsmInstruction> {
    // Copies an operand into R10 and returns the register operand along with the `mov`.
    let mov_operand_to_tmp = |asm_type: AsmType, operand: AsmOperand| -> (AsmOperand, AsmInstruction) {
        let tmp_operand = AsmOperand::Reg(HwRegister::R10);
        let mov = AsmInstruction::Mov { asm_type, src: operand, dst: tmp_operand.clone() };
        (tmp_operand, mov)
    };

    // `MovSx` is handled above, because its `dst` cannot be a memory address.
    let mut out = Vec::with_capacity(instructions.len());

    for instr in instructions {
        match instr {
            AsmInstruction::Mov { asm_type, src, dst } if both_operands_are_memory_addresses(&src, &dst) => {
                let (tmp_operand, mov_to_tmp) = mov_operand_to_tmp(asm_type, src);
                out.push(mov_to_tmp);
                out.push(AsmInstruction::Mov { asm_type, src: tmp_operand, dst });
            }

            AsmInstruction::Cmp { asm_type, op1, op2 } if both_operands_are_memory_addresses(&op1, &op2) => {
                let (tmp_operand, mov_to_tmp) = mov_operand_to_tmp(asm_type, op1);
                out.push(mov_to_tmp);
                out.push(AsmInstruction::Cmp { asm_type, op1: tmp_operand, op2 });
            }

            AsmInstruction::Binary { op, asm_type, src, dst } if both_operands_are_memory_addresses(&src, &dst) => {
                let (tmp_operand, mov_to_tmp) = mov_operand_to_tmp(asm_type, src);
                out.push(mov_to_tmp);
                out.push(AsmInstruction::Binary { op, asm_type, src: tmp_operand, dst });
            }

            _ => out.push(instr),
        }
    }

    out
}

fn both_operands_are_memory_addresses(operand1: &AsmOperand, operand2: &AsmOperand) -> bool {
    operand1.is_memory_address() && operand2.is_memory_address()
}
