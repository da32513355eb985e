// Copyright 2025-2026 Neil Henderson
//
//! The `transliterate` module maps the Cyrillic identifiers of a program onto ASCII so that the assembler and
//! linker accept them. For example `үндсэн` becomes `wndsen`.

use super::ast::{AsmInstruction, AsmLabelName, AsmOperand, AsmRoot};
use crate::compiler_driver::CompileResult;
use crate::core::InternalError;

/// Transliterates every function name, static variable, label, call target and extern of the program.
pub fn transliterate_program(root: &mut AsmRoot) -> CompileResult<()> {
    for function in &mut root.functions {
        function.name = transliterate(&function.name)?;

        for instr in &mut function.instructions {
            transliterate_instruction(instr)?;
        }
    }

    for variable in &mut root.statics {
        variable.name = transliterate(&variable.name)?;
    }

    for ext in &mut root.externs {
        *ext = transliterate(ext)?;
    }

    Ok(())
}

fn transliterate_instruction(instr: &mut AsmInstruction) -> Result<(), InternalError> {
    match instr {
        AsmInstruction::Jmp { target } | AsmInstruction::JmpCC { target, .. } => transliterate_label(target),
        AsmInstruction::Label { id } => transliterate_label(id),
        AsmInstruction::Call(name) => {
            *name = transliterate(name)?;
            Ok(())
        }

        AsmInstruction::Mov { src, dst, .. }
        | AsmInstruction::MovSx { src, dst }
        | AsmInstruction::Binary { src, dst, .. } => {
            transliterate_operand(src)?;
            transliterate_operand(dst)
        }
        AsmInstruction::Cmp { op1, op2, .. } => {
            transliterate_operand(op1)?;
            transliterate_operand(op2)
        }
        AsmInstruction::Unary { operand, .. }
        | AsmInstruction::IDiv { operand, .. }
        | AsmInstruction::SetCC { operand, .. }
        | AsmInstruction::Push(operand) => transliterate_operand(operand),

        AsmInstruction::Cdq { .. } | AsmInstruction::Ret => Ok(()),
    }
}

fn transliterate_label(label: &mut AsmLabelName) -> Result<(), InternalError> {
    label.0 = transliterate(&label.0)?;
    Ok(())
}

// String literals keep their text; they're escaped at emission.
fn transliterate_operand(operand: &mut AsmOperand) -> Result<(), InternalError> {
    if let AsmOperand::Data(name) = operand {
        *name = transliterate(name)?;
    }
    Ok(())
}

/// Transliterates an identifier.
///
/// ASCII letters, digits, `.`, `_` and space pass through unchanged. Any other character without a mapping is an
/// internal error, since the parser only accepts Cyrillic and ASCII identifiers.
pub fn transliterate(identifier: &str) -> Result<String, InternalError> {
    let mut out = String::with_capacity(identifier.len());

    for ch in identifier.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | ' ') {
            out.push(ch);
            continue;
        }

        let lower = ch.to_lowercase().next().unwrap_or(ch);
        let Some(latin) = cyrillic_to_latin(lower) else {
            return Err(InternalError::UntranslatableCharacter(ch));
        };
        out.push_str(latin);
    }

    Ok(out)
}

#[rustfmt::skip]
fn cyrillic_to_latin(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",   'б' => "b",   'в' => "v",   'г' => "g",
        'д' => "d",   'е' => "ye",  'ё' => "yo",  'ж' => "j",
        'з' => "z",   'и' => "i",   'й' => "hi",  'к' => "k",
        'л' => "l",   'м' => "m",   'н' => "n",   'о' => "o",
        'ө' => "q",   'п' => "p",   'р' => "r",   'с' => "s",
        'т' => "t",   'у' => "u",   'ү' => "w",   'ф' => "f",
        'х' => "h",   'ц' => "ts",  'ч' => "ch",  'ш' => "sh",
        'щ' => "shc", 'ъ' => "qi",  'ы' => "yi",  'ь' => "zi",
        'э' => "e",   'ю' => "yu",  'я' => "ya",
        _ => return None,
    };

    Some(latin)
}
