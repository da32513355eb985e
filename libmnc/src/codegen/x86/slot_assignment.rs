// Copyright 2025-2026 Neil Henderson
//
//! The `slot_assignment` module replaces pseudo operands with storage.
//!
//! A pseudo for a variable with static storage becomes a RIP-relative `Data` operand. Every other pseudo gets a
//! naturally aligned slot below `%rbp`, and the size of the resulting stack frame is recorded in the
//! [AsmSymbolTable].

use rustc_hash::FxHashMap;

use super::ast::{AsmFunction, AsmInstruction, AsmOperand, AsmRoot};
use super::generate::align_stack_addr;
use super::symbols::{AsmSymbol, AsmSymbolTable};

use crate::compiler_driver::CompileResult;
use crate::core::{InternalError, Stage};

/// Replaces the pseudo operands in every function of the program.
pub fn assign_stack_slots(root: &mut AsmRoot, symbols: &mut AsmSymbolTable) -> CompileResult<()> {
    for function in &mut root.functions {
        let frame_size = replace_pseudo_registers(function, symbols)?;
        symbols.set_frame_size(&function.name, frame_size)?;
    }

    Ok(())
}

/// Replaces the pseudo operands in one function and returns the number of bytes its stack slots need.
fn replace_pseudo_registers(function: &mut AsmFunction, symbols: &AsmSymbolTable) -> CompileResult<i32> {
    let mut stack_addr = 0;
    let mut pseudo_stack_map = FxHashMap::default();

    for instr in &mut function.instructions {
        match instr {
            AsmInstruction::Mov { src, dst, .. }
            | AsmInstruction::MovSx { src, dst }
            | AsmInstruction::Binary { src, dst, .. } => {
                stack_addr = replace_pseudo_register(stack_addr, src, symbols, &mut pseudo_stack_map)?;
                stack_addr = replace_pseudo_register(stack_addr, dst, symbols, &mut pseudo_stack_map)?;
            }

            AsmInstruction::Cmp { op1, op2, .. } => {
                stack_addr = replace_pseudo_register(stack_addr, op1, symbols, &mut pseudo_stack_map)?;
                stack_addr = replace_pseudo_register(stack_addr, op2, symbols, &mut pseudo_stack_map)?;
            }

            AsmInstruction::Unary { operand, .. }
            | AsmInstruction::IDiv { operand, .. }
            | AsmInstruction::SetCC { operand, .. }
            | AsmInstruction::Push(operand) => {
                stack_addr = replace_pseudo_register(stack_addr, operand, symbols, &mut pseudo_stack_map)?;
            }

            AsmInstruction::Cdq { .. }
            | AsmInstruction::Jmp { .. }
            | AsmInstruction::JmpCC { .. }
            | AsmInstruction::Label { .. }
            | AsmInstruction::Call(_)
            | AsmInstruction::Ret => (),
        }
    }

    Ok(stack_addr.abs())
}

fn replace_pseudo_register(
    stack_addr: i32,
    operand: &mut AsmOperand,
    symbols: &AsmSymbolTable,
    pseudo_stack_map: &mut FxHashMap<String, i32>,
) -> Result<i32, InternalError> {
    let AsmOperand::Pseudo(name) = operand else {
        return Ok(stack_addr);
    };

    let Some(AsmSymbol::Object { asm_type, is_static }) = symbols.get(name) else {
        return Err(InternalError::missing_symbol(Stage::SlotAssignment, name));
    };

    // Static storage lives in the data section, so it takes no stack space.
    if *is_static {
        *operand = AsmOperand::Data(name.clone());
        return Ok(stack_addr);
    }

    if let Some(existing_stack_addr) = pseudo_stack_map.get(name) {
        *operand = AsmOperand::Stack(*existing_stack_addr);
        return Ok(stack_addr);
    }

    let variable_size = asm_type.size_bytes() as i32;
    let variable_alignment = asm_type.alignment_bytes() as i32;

    let relative_stack_addr = align_stack_addr(stack_addr, variable_alignment) - variable_size;
    pseudo_stack_map.insert(name.clone(), relative_stack_addr);

    *operand = AsmOperand::Stack(relative_stack_addr);

    Ok(relative_stack_addr)
}
