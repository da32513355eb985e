// Copyright 2025-2026 Neil Henderson
//
//! The `sema` module is responsible for semantic analysis of the AST produced by the parser.
//!
//! Semantic analysis runs three passes over the AST, each of which mutates it in place:
//! 1. [resolve]: rename every variable to a unique name and validate scoping rules.
//! 2. [loop_labels]: give every loop an id and attach it to the `break`/`continue` statements inside the loop.
//! 3. [type_check]: build the Symbol Table, annotate expressions with their types and insert implicit casts.

pub mod loop_labels;
pub mod resolve;
pub mod symbol_table;
pub mod type_check;


use log::debug;

use crate::ast::AstRoot;
use crate::compiler_driver::CompileResult;

use symbol_table::SymbolTable;

/// Analyzes the AST for semantic errors and returns the Symbol Table of the checked program.
///
/// The first error stops the analysis.
pub fn analyze(ast: &mut AstRoot) -> CompileResult<SymbolTable> {
    resolve::resolve_program(ast)?;
    debug!("sema: identifiers resolved");

    loop_labels::label_loops(ast)?;
    debug!("sema: loops labelled");

    type_check::type_check(ast)
}
