// Copyright 2025-2026 Neil Henderson
//
//! The `printer` module renders the IR as text, for the `print_ir` option and trace logging.

use std::fmt;

use super::*;

/// Prints the IR to a string.
pub fn print(root: &TackyRoot) -> String {
    IrListing(root).to_string()
}

struct IrListing<'a>(&'a TackyRoot);

impl fmt::Display for IrListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.0;

        for ext in &root.externs {
            writeln!(f, "declare extern @{}", ext.name)?;
        }
        if !root.externs.is_empty() {
            writeln!(f)?;
        }

        for function in &root.functions {
            print_function(f, function)?;
        }

        for variable in &root.statics {
            let vis = linkage(variable.is_global);
            writeln!(f, "define {vis} symbol @{}: {} = {}", variable.name, variable.ty, variable.init)?;
        }

        Ok(())
    }
}

fn print_function(f: &mut fmt::Formatter<'_>, function: &TackyFunction) -> fmt::Result {
    write!(f, "define {} symbol @{}(", linkage(function.is_global), function.name)?;
    write_list(f, &function.params)?;
    writeln!(f, ") {{")?;

    for instr in &function.instructions {
        print_instruction(f, instr)?;
    }

    writeln!(f, "}}")?;
    writeln!(f)
}

fn print_instruction(f: &mut fmt::Formatter<'_>, instr: &TackyInstruction) -> fmt::Result {
    match instr {
        TackyInstruction::Return(value) => writeln!(f, "  ret {value}"),
        TackyInstruction::SignExtend { src, dst } => writeln!(f, "  {dst} = sign-ex {src}"),
        TackyInstruction::Truncate { src, dst } => writeln!(f, "  {dst} = trunc {src}"),
        TackyInstruction::Unary { op, src, dst } => writeln!(f, "  {dst} = {op} {src}"),
        TackyInstruction::Binary { op, src1, src2, dst } => writeln!(f, "  {dst} = {op} {src1}, {src2}"),
        TackyInstruction::Copy { src, dst } => writeln!(f, "  {dst} = {src}"),
        TackyInstruction::Jump { target } => writeln!(f, "  jmp {target}"),
        TackyInstruction::JumpIfZero { condition, target } => writeln!(f, "  if ({condition} == 0) jmp {target}"),
        TackyInstruction::JumpIfNotZero { condition, target } => writeln!(f, "  if ({condition} != 0) jmp {target}"),
        TackyInstruction::Label { id } => writeln!(f, "{id}:"),
        TackyInstruction::FunctionCall { name, args, dst } => {
            write!(f, "  {dst} = call @{name}(")?;
            write_list(f, args)?;
            writeln!(f, ")")
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn linkage(is_global: bool) -> &'static str {
    if is_global { "pub" } else { "internal" }
}
