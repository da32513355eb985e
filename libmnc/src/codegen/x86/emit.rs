// Copyright 2025-2026 Neil Henderson
//
//! The `emit` module provides x86_64 assembly emission functionality to the parent codegen module.

use std::io::{Result, Write};

use super::ast::*;
use super::file_writer::{AsmFileWriter, AsmSectionDirective};

use crate::compiler_driver::CompileResult;
use crate::compiler_driver::options::TargetOs;

/// The transliterated name of the program's entry function `үндсэн`.
pub const ENTRY_FUNCTION_NAME: &str = "wndsen";

/// Emits the x86_64 assembly code for the given (transliterated) program.
///
/// The entry stub is written when `emit_entry_stub` is set and the program defines the entry function.
pub fn emit_program<W: Write>(
    asm_root: &AsmRoot,
    writer: &mut AsmFileWriter<'_, W>,
    emit_entry_stub: bool,
) -> CompileResult<()> {
    writer.set_external_functions(&asm_root.externs);

    for name in &asm_root.externs {
        writer.write_extern_directive(name)?;
    }

    for function in asm_root.functions.iter().filter(|function| function.is_global) {
        writer.write_global_directive(&function.name)?;
    }

    writer.write_blank_line()?;

    let defines_entry = asm_root.functions.iter().any(|function| function.name == ENTRY_FUNCTION_NAME);
    if emit_entry_stub && defines_entry {
        emit_entry_stub_function(writer)?;
    }

    for function in &asm_root.functions {
        emit_asm_function(writer, function)?;
    }

    for static_var in &asm_root.statics {
        emit_asm_static_variable(writer, static_var)?;
    }

    emit_string_pool(writer)?;

    if writer.target_os() == TargetOs::Linux {
        emit_asm_nonexecutable_stack(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the process entry point, which calls the entry function and exits with its return value.
fn emit_entry_stub_function<W: Write>(writer: &mut AsmFileWriter<'_, W>) -> Result<()> {
    writer.write_section_directive(AsmSectionDirective::Text)?;

    // `main` is spelled `_main` on Darwin, which is the entry point the linker is given.
    writer.write_global_directive("main")?;
    writer.write_symbol_label("main")?;

    let entry = writer.make_asm_identifier(ENTRY_FUNCTION_NAME);
    writer.writeln_with_indent(&format!("call {entry}"))?;

    match writer.target_os() {
        TargetOs::Linux => {
            writer.writeln_with_indent("movq %rax, %rdi")?;
            writer.writeln_with_indent("movq $60, %rax")?; // exit
            writer.writeln_with_indent("syscall")?;
        }
        TargetOs::Darwin => writer.writeln_with_indent("ret")?,
    }

    writer.write_blank_line()
}

fn emit_asm_function<W: Write>(writer: &mut AsmFileWriter<'_, W>, function: &AsmFunction) -> CompileResult<()> {
    writer.write_section_directive(AsmSectionDirective::Text)?;
    writer.write_symbol_label(&function.name)?;

    // Prologue
    writer.writeln_with_indent("pushq %rbp")?;
    writer.writeln_with_indent("movq %rsp, %rbp")?;

    for instr in &function.instructions {
        writer.write_instruction(instr)?;
    }

    writer.write_blank_line()?;

    Ok(())
}

fn emit_asm_static_variable<W: Write>(writer: &mut AsmFileWriter<'_, W>, static_var: &AsmStaticVariable) -> Result<()> {
    let variable_name = &static_var.name;

    if static_var.is_global {
        writer.write_global_directive(variable_name)?;
    }

    // Section is either .bss or .data depending on whether the static variable's value is zero.
    let bss = static_var.init == 0;
    if bss {
        writer.write_section_directive(AsmSectionDirective::Bss)?;
    } else {
        writer.write_section_directive(AsmSectionDirective::Data)?;
    }

    writer.write_byte_alignment_directive(static_var.asm_type.alignment_bytes())?;
    writer.write_symbol_label(variable_name)?;

    if bss {
        writer.write_zero_directive(static_var.asm_type.size_bytes())?;
    } else {
        writer.write_data_definition_directive(static_var.asm_type, static_var.init)?;
    }

    writer.write_blank_line()
}

fn emit_string_pool<W: Write>(writer: &mut AsmFileWriter<'_, W>) -> Result<()> {
    let strings = writer.string_pool().entries();
    if strings.is_empty() {
        return Ok(());
    }

    writer.write_section_directive(AsmSectionDirective::Data)?;

    for (id, text) in strings {
        writer.write_string_literal(id, &text)?;
    }

    writer.write_blank_line()
}

fn emit_asm_nonexecutable_stack<W: Write>(writer: &mut AsmFileWriter<'_, W>) -> Result<()> {
    writer.writeln_with_indent(".section .note.GNU-stack,\"\",@progbits")
}
