// Copyright 2025-2026 Neil Henderson
//
//! The `functions` module provides functionality to handle x86_64 function parameters and arguments.

use super::super::ast::{AsmBinaryOp, AsmInstruction, AsmOperand, AsmType};
use super::super::registers::HwRegister;
use super::Generator;

use crate::compiler_driver::CompileResult;
use crate::core::{InternalError, Stage};
use crate::ir::TackyValue;

const FIRST_STACK_PARAM_BYTE_OFFSET: i32 = 16;
const PARAM_BYTE_SIZE: i32 = 8;

/// Copies function parameters from calling-convention HW registers or the stack into pseudo-registers.
pub fn copy_params_into_pseudo_registers(
    params: &[String],
    asm_instructions: &mut Vec<AsmInstruction>,
    generator: &Generator,
) -> CompileResult<()> {
    for (index, unique_name) in params.iter().enumerate() {
        let Some(symbol) = generator.symbols.get(unique_name) else {
            return Err(InternalError::missing_symbol(Stage::InstructionSelection, unique_name).into());
        };

        let asm_type = AsmType::try_from(&symbol.ty)?;
        let src = classify_param(index);

        asm_instructions.push(AsmInstruction::Mov { asm_type, src, dst: AsmOperand::Pseudo(unique_name.clone()) });
    }

    Ok(())
}

/// Generates the instructions for a call to the given function.
pub fn generate_function_call(
    name: &str,
    args: &[TackyValue],
    dst: &TackyValue,
    asm: &mut Vec<AsmInstruction>,
    generator: &Generator,
) -> CompileResult<()> {
    if !generator.symbols.get(name).is_some_and(|symbol| symbol.is_function()) {
        return Err(InternalError::missing_symbol(Stage::InstructionSelection, name).into());
    }

    let (args_reg, args_stack) = args.split_at(args.len().min(6));

    // All args pushed onto the stack are 8 bytes, so an odd count needs 8 bytes of padding to keep the stack
    // pointer 16-byte aligned at the call.
    let stack_padding = if args_stack.len() % 2 == 0 { 0 } else { 8 };

    if stack_padding != 0 {
        asm.push(AsmInstruction::Binary {
            op: AsmBinaryOp::Sub,
            asm_type: AsmType::QuadWord,
            src: AsmOperand::Imm(stack_padding),
            dst: AsmOperand::Reg(HwRegister::SP),
        });
    }

    // Copy the args into the appropriate registers
    for (index, value) in args_reg.iter().enumerate() {
        let asm_type = generator.value_type(value)?;
        let src = generator.translate_value_to_operand(value);

        asm.push(AsmInstruction::Mov { asm_type, src, dst: classify_param(index) });
    }

    // Pass any remaining args on the stack as 8-byte values by pushing them in reverse order
    for value in args_stack.iter().rev() {
        let asm_type = generator.value_type(value)?;
        let arg_operand = generator.translate_value_to_operand(value);

        match arg_operand {
            AsmOperand::Imm(_) | AsmOperand::Reg(_) => asm.push(AsmInstruction::Push(arg_operand)),

            AsmOperand::Pseudo(_) if asm_type == AsmType::QuadWord => asm.push(AsmInstruction::Push(arg_operand)),

            // A LongWord is widened through RAX; a string literal's address must be loaded before it's pushed.
            _ => {
                let rax = AsmOperand::Reg(HwRegister::AX);
                asm.push(AsmInstruction::Mov { asm_type, src: arg_operand, dst: rax.clone() });
                asm.push(AsmInstruction::Push(rax));
            }
        }
    }

    asm.push(AsmInstruction::Call(name.to_string()));

    // Deallocate any stack space we created to restore the stack pointer
    let bytes_to_free = PARAM_BYTE_SIZE as i64 * args_stack.len() as i64 + stack_padding;
    if bytes_to_free != 0 {
        asm.push(AsmInstruction::Binary {
            op: AsmBinaryOp::Add,
            asm_type: AsmType::QuadWord,
            src: AsmOperand::Imm(bytes_to_free),
            dst: AsmOperand::Reg(HwRegister::SP),
        });
    }

    // Copy the function's return value out of RAX.
    let asm_type = generator.value_type(dst)?;
    let dst = generator.translate_value_to_operand(dst);
    asm.push(AsmInstruction::Mov { asm_type, src: AsmOperand::Reg(HwRegister::AX), dst });

    Ok(())
}

/// The location of the parameter at `index`: one of the six argument registers, then the caller's stack frame.
fn classify_param(index: usize) -> AsmOperand {
    match HwRegister::integer_argument(index) {
        Some(reg) => AsmOperand::Reg(reg),
        None => AsmOperand::Stack(FIRST_STACK_PARAM_BYTE_OFFSET + PARAM_BYTE_SIZE * (index as i32 - 6)),
    }
}
