// Copyright 2025-2026 Neil Henderson
//
//! The `generate` module provides x86_64 instruction selection to the parent codegen module.
//!
//! Every variable is left as a pseudo operand; slot assignment gives them storage afterwards.
//! R10 and R11 are reserved for the fixup pass and are never produced here.

mod binary_instr;
mod functions;
mod unary_instr;

use super::ast::*;
use super::registers::HwRegister;
use super::symbols::AsmSymbolTable;

use crate::compiler_driver::CompileResult;
use crate::core::{InternalError, Stage};
use crate::ir::{TackyConstant, TackyFunction, TackyInstruction, TackyLabel, TackyRoot, TackyValue};
use crate::sema::symbol_table::SymbolTable;

/// The x86_64 instruction selector which lowers the Tacky IR into an x86_64 AST.
pub struct Generator<'a> {
    pub symbols: &'a SymbolTable,
}

impl<'a> Generator<'a> {
    /// Creates a new generator which reads variable widths from the front end's symbol table.
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// Transforms an IR value into an `AsmOperand`.
    pub fn translate_value_to_operand(&self, value: &TackyValue) -> AsmOperand {
        match value {
            TackyValue::Constant(TackyConstant::Int32(value)) => AsmOperand::Imm(*value as i64),
            TackyValue::Constant(TackyConstant::Int64(value)) => AsmOperand::Imm(*value),
            TackyValue::StringConstant(text) => AsmOperand::StringLiteral(text.clone()),
            TackyValue::Variable(name) => AsmOperand::Pseudo(name.clone()),
        }
    }

    /// The assembly type of an IR value. Constants carry their own width; variables are looked up.
    pub fn value_type(&self, value: &TackyValue) -> CompileResult<AsmType> {
        match value {
            TackyValue::Constant(TackyConstant::Int32(_)) => Ok(AsmType::LongWord),
            TackyValue::Constant(TackyConstant::Int64(_)) => Ok(AsmType::QuadWord),
            TackyValue::StringConstant(_) => Ok(AsmType::QuadWord),
            TackyValue::Variable(name) => {
                let Some(symbol) = self.symbols.get(name) else {
                    return Err(InternalError::missing_symbol(Stage::InstructionSelection, name).into());
                };
                Ok(AsmType::try_from(&symbol.ty)?)
            }
        }
    }
}

/// Generates an x86_64 assembly AST of the given IR, along with the back-end symbol table.
pub fn generate(tacky: &TackyRoot, symbols: &SymbolTable) -> CompileResult<(AsmRoot, AsmSymbolTable)> {
    let generator = Generator::new(symbols);

    let functions = tacky
        .functions
        .iter()
        .map(|function| generate_asm_function(function, &generator))
        .collect::<CompileResult<Vec<_>>>()?;

    let statics = tacky
        .statics
        .iter()
        .map(|variable| {
            Ok(AsmStaticVariable {
                name: variable.name.clone(),
                is_global: variable.is_global,
                asm_type: AsmType::try_from(&variable.ty)?,
                init: variable.init,
            })
        })
        .collect::<Result<Vec<_>, InternalError>>()?;

    let externs = tacky.externs.iter().map(|ext| ext.name.clone()).collect();

    // Transform the front end's symbol table into the back-end `AsmSymbolTable`.
    let asm_symbols = AsmSymbolTable::from_frontend_symbols(symbols)?;

    Ok((AsmRoot { functions, statics, externs }, asm_symbols))
}

fn generate_asm_function(function: &TackyFunction, generator: &Generator) -> CompileResult<AsmFunction> {
    let mut asm_instructions = Vec::new();

    // Copy function parameters from calling-convention HW registers into pseudo-registers
    functions::copy_params_into_pseudo_registers(&function.params, &mut asm_instructions, generator)?;

    generate_asm_instructions(&function.instructions, &mut asm_instructions, generator)?;

    Ok(AsmFunction { name: function.name.clone(), is_global: function.is_global, instructions: asm_instructions })
}

fn generate_asm_instructions(
    tacky_instructions: &[TackyInstruction],
    asm_instructions: &mut Vec<AsmInstruction>,
    generator: &Generator,
) -> CompileResult<()> {
    for instr in tacky_instructions {
        match instr {
            TackyInstruction::Return(value) => {
                let asm_type = generator.value_type(value)?;
                let src = generator.translate_value_to_operand(value);

                asm_instructions.push(AsmInstruction::Mov { asm_type, src, dst: AsmOperand::Reg(HwRegister::AX) });
                asm_instructions.push(AsmInstruction::Ret);
            }

            TackyInstruction::SignExtend { src, dst } => {
                let src = generator.translate_value_to_operand(src);
                let dst = generator.translate_value_to_operand(dst);

                asm_instructions.push(AsmInstruction::MovSx { src, dst });
            }

            TackyInstruction::Truncate { src, dst } => {
                let src = generator.translate_value_to_operand(src);
                let dst = generator.translate_value_to_operand(dst);

                asm_instructions.push(AsmInstruction::Mov { asm_type: AsmType::LongWord, src, dst });
            }

            TackyInstruction::Unary { op, src, dst } => {
                unary_instr::generate_unary_operation(op, src, dst, asm_instructions, generator)?;
            }

            TackyInstruction::Binary { op, src1, src2, dst } => {
                binary_instr::generate_binary_operation(op, src1, src2, dst, asm_instructions, generator)?;
            }

            TackyInstruction::Copy { src, dst } => {
                // The destination's slot decides how many bytes are written.
                let asm_type = generator.value_type(dst)?;
                let src = generator.translate_value_to_operand(src);
                let dst = generator.translate_value_to_operand(dst);

                asm_instructions.push(AsmInstruction::Mov { asm_type, src, dst });
            }

            TackyInstruction::Jump { target } => {
                asm_instructions.push(AsmInstruction::Jmp { target: label_name(target) });
            }

            TackyInstruction::JumpIfZero { condition, target } => {
                generate_conditional_jump(ConditionalCode::E, condition, target, asm_instructions, generator)?;
            }

            TackyInstruction::JumpIfNotZero { condition, target } => {
                generate_conditional_jump(ConditionalCode::NE, condition, target, asm_instructions, generator)?;
            }

            TackyInstruction::Label { id } => {
                asm_instructions.push(AsmInstruction::Label { id: label_name(id) });
            }

            TackyInstruction::FunctionCall { name, args, dst } => {
                functions::generate_function_call(name, args, dst, asm_instructions, generator)?;
            }
        }
    }

    Ok(())
}

/// Compares the condition with zero and jumps if the comparison satisfies `cond_code`.
fn generate_conditional_jump(
    cond_code: ConditionalCode,
    condition: &TackyValue,
    target: &TackyLabel,
    asm_instructions: &mut Vec<AsmInstruction>,
    generator: &Generator,
) -> CompileResult<()> {
    let asm_type = generator.value_type(condition)?;
    let op2 = generator.translate_value_to_operand(condition);

    asm_instructions.push(AsmInstruction::Cmp { asm_type, op1: AsmOperand::Imm(0), op2 });
    asm_instructions.push(AsmInstruction::JmpCC { cond_code, target: label_name(target) });
    Ok(())
}

fn label_name(label: &TackyLabel) -> AsmLabelName {
    AsmLabelName(label.as_str().to_string())
}

/// Rounds a stack frame size up to the next multiple of 16.
pub(super) fn round_up_to_multiple_of_16(x: i32) -> i32 {
    (x + 15) & !15
}

/// Aligns a (zero or negative) stack address away from zero to the given alignment.
pub(super) fn align_stack_addr(stack_addr: i32, alignment: i32) -> i32 {
    stack_addr - stack_addr.rem_euclid(alignment)
}
