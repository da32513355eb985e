// Copyright 2025-2026 Neil Henderson
//
//! The `x86` module contains the codegen functionality for the `x86_64` System V ABI.
//!
//! The stages run in this order:
//! 1. [generate] selects instructions, leaving every variable as a pseudo operand.
//! 2. [slot_assignment] replaces pseudo operands with stack slots or RIP-relative data operands.
//! 3. [instruction_fixups] allocates the stack frame and rewrites illegal operand combinations.
//! 4. [transliterate] maps Cyrillic identifiers onto ASCII.
//! 5. [emit] writes the assembly text.

pub mod emit;
pub mod instruction_fixups;
pub mod printer;
pub mod slot_assignment;
pub mod transliterate;

mod ast;
mod file_writer;
mod generate;
mod registers;
mod string_pool;
mod symbols;


pub use ast::{
    AsmBinaryOp, AsmFunction, AsmInstruction, AsmLabelName, AsmOperand, AsmRoot, AsmStaticVariable, AsmType,
    AsmUnaryOp, ConditionalCode,
};
pub use file_writer::AsmFileWriter;
pub use generate::generate;
pub use registers::HwRegister;
pub use string_pool::StringPool;
pub use symbols::{AsmSymbol, AsmSymbolTable};
