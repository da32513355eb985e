// Copyright 2025-2026 Neil Henderson
//
//! The `file_writer` module provides functionality to write x86_64 assembly text.

use std::io::{Result, Write};

use rustc_hash::FxHashSet;

use super::ast::{AsmBinaryOp, AsmInstruction, AsmLabelName, AsmOperand, AsmType, AsmUnaryOp, ConditionalCode};
use super::string_pool::StringPool;

use crate::compiler_driver::CompileResult;
use crate::compiler_driver::options::TargetOs;
use crate::core::InternalError;

const INDENT: &str = "    ";

/// Section directives.
pub enum AsmSectionDirective {
    Bss,
    Data,
    Text,
}

/// An x86_64 assembly writer.
///
/// String literal operands are interned into the [StringPool] as they're written, so that the pool lists exactly the
/// strings the code refers to.
pub struct AsmFileWriter<'a, W: Write> {
    writer: W,
    target_os: TargetOs,
    string_pool: &'a StringPool,
    external_functions: FxHashSet<String>,
}

impl<'a, W: Write> AsmFileWriter<'a, W> {
    /// Creates a new writer for the given target.
    pub fn new(writer: W, target_os: TargetOs, string_pool: &'a StringPool) -> Self {
        Self { writer, target_os, string_pool, external_functions: FxHashSet::default() }
    }

    /// The target operating system.
    pub fn target_os(&self) -> TargetOs {
        self.target_os
    }

    /// The string pool which string literal operands are interned into.
    pub fn string_pool(&self) -> &'a StringPool {
        self.string_pool
    }

    /// Records the functions which are defined outside this program.
    pub fn set_external_functions<'n>(&mut self, names: impl IntoIterator<Item = &'n String>) {
        self.external_functions = names.into_iter().cloned().collect();
    }

    /// Writes a section directive.
    pub fn write_section_directive(&mut self, directive: AsmSectionDirective) -> Result<()> {
        match directive {
            AsmSectionDirective::Bss => self.writeln_with_indent(".bss"),
            AsmSectionDirective::Data => self.writeln_with_indent(".data"),
            AsmSectionDirective::Text => self.writeln_with_indent(".text"),
        }
    }

    /// Writes a `.balign` directive to align on the given byte `alignment` boundary.
    pub fn write_byte_alignment_directive(&mut self, alignment: usize) -> Result<()> {
        writeln!(self.writer, "{INDENT}.balign {alignment}")
    }

    /// Writes a `.zero` directive which reserves `byte_count` zeroed bytes.
    pub fn write_zero_directive(&mut self, byte_count: usize) -> Result<()> {
        writeln!(self.writer, "{INDENT}.zero {byte_count}")
    }

    /// Writes a data definition directive for a value of the given type.
    pub fn write_data_definition_directive(&mut self, asm_type: AsmType, value: i64) -> Result<()> {
        match asm_type {
            AsmType::LongWord => writeln!(self.writer, "{INDENT}.long {}", value as i32),
            AsmType::QuadWord => writeln!(self.writer, "{INDENT}.quad {value}"),
        }
    }

    /// Writes a global directive for the given symbol name.
    pub fn write_global_directive(&mut self, symbol_name: &str) -> Result<()> {
        writeln!(self.writer, "{INDENT}.globl {}", self.make_asm_identifier(symbol_name))
    }

    /// Writes an extern directive for the given symbol name.
    pub fn write_extern_directive(&mut self, symbol_name: &str) -> Result<()> {
        writeln!(self.writer, "{INDENT}.extern {}", self.make_asm_identifier(symbol_name))
    }

    /// Writes a label for a symbol.
    ///
    /// The `symbol_name` argument should _NOT_ include the `:` character.
    ///
    /// If the symbol should be global then call `write_global_directive` before calling this function.
    pub fn write_symbol_label(&mut self, symbol_name: &str) -> Result<()> {
        debug_assert!(!symbol_name.contains(':'));
        writeln!(self.writer, "{}:", self.make_asm_identifier(symbol_name))
    }

    /// Writes a label for a local symbol.
    ///
    /// A local label has an "L" (macOS) or ".L" (Linux) prefix.
    /// Local symbols are defined and used within the assembler, but they are not saved in object files.
    pub fn write_local_symbol_label(&mut self, label: &AsmLabelName) -> Result<()> {
        writeln!(self.writer, "{}:", self.make_asm_local_symbol_label(&label.0))
    }

    /// Writes a pooled string literal as a NUL-terminated `.asciz` directive.
    pub fn write_string_literal(&mut self, id: usize, text: &str) -> Result<()> {
        let label = self.make_string_literal_label(id);
        writeln!(self.writer, "{label}:")?;
        writeln!(self.writer, "{INDENT}.asciz \"{}\"", escape_string_literal(text))
    }

    /// Writes an instruction.
    pub fn write_instruction(&mut self, instr: &AsmInstruction) -> CompileResult<()> {
        match instr {
            // A string literal operand is an address, which has to be computed.
            AsmInstruction::Mov { src: src @ AsmOperand::StringLiteral(_), dst, .. } => {
                self.write_binary_instruction("leaq", src, dst, AsmType::QuadWord.size_bytes())?
            }

            AsmInstruction::Mov { asm_type, src, dst } => {
                self.write_binary_instruction(&make_asm_instr("mov", asm_type), src, dst, asm_type.size_bytes())?
            }

            AsmInstruction::MovSx { src, dst } => {
                let src = self.asm_operand_to_string(src, AsmType::LongWord.size_bytes())?;
                let dst = self.asm_operand_to_string(dst, AsmType::QuadWord.size_bytes())?;
                writeln!(self.writer, "{INDENT}movslq {src}, {dst}")?
            }

            AsmInstruction::Cmp { asm_type, op1, op2 } => {
                self.write_binary_instruction(&make_asm_instr("cmp", asm_type), op1, op2, asm_type.size_bytes())?
            }

            AsmInstruction::IDiv { asm_type, operand } => {
                self.write_unary_instruction(&make_asm_instr("idiv", asm_type), operand, asm_type.size_bytes())?
            }

            AsmInstruction::Unary { op, asm_type, operand } => {
                self.write_unary_instruction(&asm_instr_for_unary_op(op, asm_type), operand, asm_type.size_bytes())?
            }

            AsmInstruction::Binary { op, asm_type, src, dst } => self.write_binary_instruction(
                &asm_instr_for_binary_op(op, asm_type),
                src,
                dst,
                asm_type.size_bytes(),
            )?,

            AsmInstruction::Push(operand) => {
                self.write_unary_instruction("pushq", operand, AsmType::QuadWord.size_bytes())?
            }

            AsmInstruction::Cdq { asm_type } => match asm_type {
                AsmType::LongWord => self.write_nullary_instruction("cdq")?,
                AsmType::QuadWord => self.write_nullary_instruction("cqo")?,
            },

            AsmInstruction::Jmp { target } => {
                let target = self.make_asm_local_symbol_label(&target.0);
                self.writeln_with_indent(&format!("jmp {target}"))?
            }

            AsmInstruction::JmpCC { cond_code, target } => {
                let target = self.make_asm_local_symbol_label(&target.0);
                self.writeln_with_indent(&format!("{} {target}", make_asm_conditional_jmp(cond_code)))?
            }

            // Conditional SET instructions only take 8-bit operands.
            AsmInstruction::SetCC { cond_code, operand } => {
                let operand = self.asm_operand_to_string(operand, 1)?;
                self.writeln_with_indent(&format!("{} {operand}", make_asm_conditional_set(cond_code)))?
            }

            AsmInstruction::Label { id } => self.write_local_symbol_label(id)?,

            AsmInstruction::Call(identifier) => {
                let function_name = match self.target_os {
                    TargetOs::Darwin => format!("_{identifier}"),

                    // On Linux a function defined outside this program may live in a shared library, so the call
                    // goes through the Procedure Linkage Table. For a static link "@PLT" has no effect.
                    TargetOs::Linux if self.external_functions.contains(identifier) => format!("{identifier}@PLT"),
                    TargetOs::Linux => identifier.to_string(),
                };

                self.writeln_with_indent(&format!("call {function_name}"))?
            }

            AsmInstruction::Ret => {
                self.writeln_with_indent("movq %rbp, %rsp")?;
                self.writeln_with_indent("popq %rbp")?;
                self.write_nullary_instruction("ret")?;
            }
        }

        Ok(())
    }

    /// Writes the given string as a line with indentation.
    pub fn writeln_with_indent(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{INDENT}{line}")
    }

    /// Writes a blank line.
    pub fn write_blank_line(&mut self) -> Result<()> {
        writeln!(self.writer)
    }

    /// Flushes the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// The assembler identifier of a symbol; Darwin prefixes an underscore.
    pub fn make_asm_identifier(&self, identifier: &str) -> String {
        match self.target_os {
            TargetOs::Darwin => format!("_{identifier}"),
            TargetOs::Linux => identifier.to_string(),
        }
    }

    fn make_asm_local_symbol_label(&self, identifier: &str) -> String {
        match self.target_os {
            TargetOs::Darwin => format!("L{identifier}"),
            TargetOs::Linux => format!(".L{identifier}"),
        }
    }

    fn make_string_literal_label(&self, id: usize) -> String {
        self.make_asm_local_symbol_label(&format!("C{id}"))
    }

    fn write_nullary_instruction(&mut self, instr: &str) -> Result<()> {
        writeln!(self.writer, "{INDENT}{instr}")
    }

    fn write_unary_instruction(&mut self, instr: &str, operand: &AsmOperand, size_bytes: usize) -> CompileResult<()> {
        let operand = self.asm_operand_to_string(operand, size_bytes)?;
        writeln!(self.writer, "{INDENT}{instr} {operand}")?;
        Ok(())
    }

    fn write_binary_instruction(
        &mut self,
        instr: &str,
        operand1: &AsmOperand,
        operand2: &AsmOperand,
        size_bytes: usize,
    ) -> CompileResult<()> {
        let operand1 = self.asm_operand_to_string(operand1, size_bytes)?;
        let operand2 = self.asm_operand_to_string(operand2, size_bytes)?;
        writeln!(self.writer, "{INDENT}{instr} {operand1}, {operand2}")?;
        Ok(())
    }

    fn asm_operand_to_string(
        &self,
        operand: &AsmOperand,
        size_bytes: usize,
    ) -> std::result::Result<String, InternalError> {
        let operand = match operand {
            AsmOperand::Imm(int) => format!("${int}"),

            AsmOperand::Reg(hw_register) => format!("%{}", hw_register.name(size_bytes)),

            AsmOperand::Stack(relative) => format!("{relative}(%rbp)"),

            AsmOperand::Data(name) => format!("{}(%rip)", self.make_asm_identifier(name)),

            AsmOperand::StringLiteral(text) => {
                let id = self.string_pool.intern(text);
                format!("{}(%rip)", self.make_string_literal_label(id))
            }

            AsmOperand::Pseudo(name) => return Err(InternalError::PseudoAfterSlotAssignment(name.clone())),
        };

        Ok(operand)
    }
}

/// Escapes a string for an `.asciz` directive. Bytes outside printable ASCII are written as octal escapes.
fn escape_string_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for byte in text.bytes() {
        match byte {
            b'"' => escaped.push_str("\\\""),
            b'\\' => escaped.push_str("\\\\"),
            b'\n' => escaped.push_str("\\n"),
            b'\t' => escaped.push_str("\\t"),
            0x20..=0x7e => escaped.push(byte as char),
            _ => escaped.push_str(&format!("\\{byte:03o}")),
        }
    }

    escaped
}

fn make_asm_instr(instr_base: &str, asm_type: &AsmType) -> String {
    format!("{instr_base}{}", asm_type.asm_operand_str())
}

fn asm_instr_for_unary_op(op: &AsmUnaryOp, asm_type: &AsmType) -> String {
    match op {
        AsmUnaryOp::Neg => make_asm_instr("neg", asm_type),
        AsmUnaryOp::Not => make_asm_instr("not", asm_type),
    }
}

fn asm_instr_for_binary_op(op: &AsmBinaryOp, asm_type: &AsmType) -> String {
    match op {
        AsmBinaryOp::Add => make_asm_instr("add", asm_type),
        AsmBinaryOp::Sub => make_asm_instr("sub", asm_type),
        AsmBinaryOp::Mul => make_asm_instr("imul", asm_type),
    }
}

#[rustfmt::skip]
fn make_asm_conditional_jmp(cond_code: &ConditionalCode) -> &'static str {
    match cond_code {
        ConditionalCode::E   => "je",
        ConditionalCode::NE  => "jne",
        ConditionalCode::L   => "jl",
        ConditionalCode::LE  => "jle",
        ConditionalCode::G   => "jg",
        ConditionalCode::GE  => "jge",
    }
}

#[rustfmt::skip]
fn make_asm_conditional_set(cond_code: &ConditionalCode) -> &'static str {
    match cond_code {
        ConditionalCode::E   => "sete",
        ConditionalCode::NE  => "setne",
        ConditionalCode::L   => "setl",
        ConditionalCode::LE  => "setle",
        ConditionalCode::G   => "setg",
        ConditionalCode::GE  => "setge",
    }
}
