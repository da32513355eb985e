// Copyright 2025-2026 Neil Henderson
//
//! The `ir` module is responsible for lowering the type checked AST into a three-address code intermediate
//! representation (IR).

mod label_maker;
pub mod printer;
mod tacky;
mod translator;


use crate::ast::AstRoot;
use crate::compiler_driver::CompileResult;
use crate::sema::symbol_table::SymbolTable;

pub use label_maker::LabelMaker;
pub use tacky::{
    TackyBinaryOp, TackyConstant, TackyExtern, TackyFunction, TackyInstruction, TackyLabel, TackyRoot,
    TackyStaticVariable, TackyUnaryOp, TackyValue,
};

/// Translates the type checked AST into IR.
///
/// Every temporary the translation creates is added to `symbols` so that instruction selection can look up its width.
pub fn translate(ast: &AstRoot, symbols: &mut SymbolTable) -> CompileResult<TackyRoot> {
    let mut translator = translator::TackyTranslator::new(symbols);
    translator::translate_ast_to_ir(&mut translator, ast)
}
