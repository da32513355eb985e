// Copyright 2025-2026 Neil Henderson

use crate::compiler_driver::CompileError;
use crate::core::{InternalError, Type};
use crate::ir::{TackyInstruction, TackyValue};
use crate::sema::symbol_table::{StaticInit, Symbol};

use super::super::ast::{AsmInstruction, AsmOperand, AsmType};
use super::super::registers::HwRegister;
use super::super::{generate, slot_assignment};
use super::{function, program, symbols};

fn copy(src: &str, dst: &str) -> TackyInstruction {
    TackyInstruction::Copy { src: TackyValue::var(src), dst: TackyValue::var(dst) }
}

#[test]
fn same_pseudo_reuses_its_slot() {
    let tacky = program(vec![function("f", &[], vec![copy("a", "b"), copy("b", "a")])], &[]);
    let table = symbols(&[("f", 0, true)], &[("a", Type::Int32), ("b", Type::Int32)]);

    let (mut asm, mut asm_symbols) = generate(&tacky, &table).unwrap();
    slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols).unwrap();

    assert_eq!(
        asm.functions[0].instructions,
        vec![
            AsmInstruction::Mov { asm_type: AsmType::LongWord, src: AsmOperand::Stack(-4), dst: AsmOperand::Stack(-8) },
            AsmInstruction::Mov { asm_type: AsmType::LongWord, src: AsmOperand::Stack(-8), dst: AsmOperand::Stack(-4) },
        ]
    );
    assert_eq!(asm_symbols.frame_size("f"), Some(8));
}

#[test]
fn slots_are_naturally_aligned() {
    let tacky = program(vec![function("f", &[], vec![copy("small", "small"), copy("wide", "wide")])], &[]);
    let table = symbols(&[("f", 0, true)], &[("small", Type::Int32), ("wide", Type::Int64)]);

    let (mut asm, mut asm_symbols) = generate(&tacky, &table).unwrap();
    slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols).unwrap();

    let instructions = &asm.functions[0].instructions;
    assert!(matches!(&instructions[0], AsmInstruction::Mov { dst: AsmOperand::Stack(-4), .. }));
    assert!(matches!(&instructions[1], AsmInstruction::Mov { dst: AsmOperand::Stack(-16), .. }));
    assert_eq!(asm_symbols.frame_size("f"), Some(16));
}

#[test]
fn static_variable_becomes_data_operand() {
    let tacky = program(vec![function("f", &[], vec![TackyInstruction::Return(TackyValue::var("count.0"))])], &[]);
    let mut table = symbols(&[("f", 0, true)], &[]);
    table.add("count.0", Symbol::static_var(Type::Int32, StaticInit::Initial(3), false));

    let (mut asm, mut asm_symbols) = generate(&tacky, &table).unwrap();
    slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols).unwrap();

    assert_eq!(
        asm.functions[0].instructions[0],
        AsmInstruction::Mov {
            asm_type: AsmType::LongWord,
            src: AsmOperand::Data("count.0".to_string()),
            dst: AsmOperand::Reg(HwRegister::AX)
        }
    );
    assert_eq!(asm_symbols.frame_size("f"), Some(0));
}

#[test]
fn frame_size_is_set_only_once() {
    let tacky = program(vec![function("f", &[], vec![copy("a", "a")])], &[]);
    let table = symbols(&[("f", 0, true)], &[("a", Type::Int32)]);

    let (mut asm, mut asm_symbols) = generate(&tacky, &table).unwrap();
    slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols).unwrap();

    let err = slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols).unwrap_err();
    assert!(matches!(err, CompileError::Internal(InternalError::FrameSizeAlreadySet(ref name)) if name == "f"));
}

#[test]
fn pseudo_without_symbol_is_an_internal_error() {
    let tacky = program(vec![function("f", &[], vec![copy("a", "a")])], &[]);
    let table = symbols(&[("f", 0, true)], &[("a", Type::Int32)]);

    let (mut asm, mut asm_symbols) = generate(&tacky, &table).unwrap();
    asm.functions[0].instructions.push(AsmInstruction::Push(AsmOperand::Pseudo("ghost".to_string())));

    let err = slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols).unwrap_err();
    assert!(matches!(err, CompileError::Internal(InternalError::MissingSymbol { ref name, .. }) if name == "ghost"));
}
