// Copyright 2025-2026 Neil Henderson
//
//! The `printer` module renders the abstract assembly as text, for the `print_asm` option and trace logging.
//!
//! Registers are printed by their 64-bit name and pseudo operands by their variable name, so the listing can be
//! printed at any stage of code generation.

use std::fmt;

use super::ast::*;

/// Prints the assembly AST to a string.
pub fn print(root: &AsmRoot) -> String {
    AsmListing(root).to_string()
}

struct AsmListing<'a>(&'a AsmRoot);

impl fmt::Display for AsmListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.0;

        for name in &root.externs {
            writeln!(f, "extern {name}")?;
        }
        if !root.externs.is_empty() {
            writeln!(f)?;
        }

        for function in &root.functions {
            let vis = if function.is_global { "global " } else { "" };
            writeln!(f, "{vis}function {}:", function.name)?;

            for instr in &function.instructions {
                print_instruction(f, instr)?;
            }
            writeln!(f)?;
        }

        for variable in &root.statics {
            let vis = if variable.is_global { "global " } else { "" };
            writeln!(f, "{vis}static {}: {} = {}", variable.name, variable.asm_type, variable.init)?;
        }

        Ok(())
    }
}

fn print_instruction(f: &mut fmt::Formatter<'_>, instr: &AsmInstruction) -> fmt::Result {
    match instr {
        AsmInstruction::Mov { asm_type, src, dst } => writeln!(f, "  mov{} {src}, {dst}", asm_type.asm_operand_str()),
        AsmInstruction::MovSx { src, dst } => writeln!(f, "  movslq {src}, {dst}"),
        AsmInstruction::Unary { op, asm_type, operand } => {
            let op = match op {
                AsmUnaryOp::Neg => "neg",
                AsmUnaryOp::Not => "not",
            };
            writeln!(f, "  {op}{} {operand}", asm_type.asm_operand_str())
        }
        AsmInstruction::Binary { op, asm_type, src, dst } => {
            let op = match op {
                AsmBinaryOp::Add => "add",
                AsmBinaryOp::Sub => "sub",
                AsmBinaryOp::Mul => "imul",
            };
            writeln!(f, "  {op}{} {src}, {dst}", asm_type.asm_operand_str())
        }
        AsmInstruction::Cmp { asm_type, op1, op2 } => writeln!(f, "  cmp{} {op1}, {op2}", asm_type.asm_operand_str()),
        AsmInstruction::IDiv { asm_type, operand } => writeln!(f, "  idiv{} {operand}", asm_type.asm_operand_str()),
        AsmInstruction::Cdq { asm_type: AsmType::LongWord } => writeln!(f, "  cdq"),
        AsmInstruction::Cdq { asm_type: AsmType::QuadWord } => writeln!(f, "  cqo"),
        AsmInstruction::Jmp { target } => writeln!(f, "  jmp {target}"),
        AsmInstruction::JmpCC { cond_code, target } => writeln!(f, "  j{cond_code} {target}"),
        AsmInstruction::SetCC { cond_code, operand } => writeln!(f, "  set{cond_code} {operand}"),
        AsmInstruction::Label { id } => writeln!(f, "{id}:"),
        AsmInstruction::Push(operand) => writeln!(f, "  pushq {operand}"),
        AsmInstruction::Call(name) => writeln!(f, "  call {name}"),
        AsmInstruction::Ret => writeln!(f, "  ret"),
    }
}
