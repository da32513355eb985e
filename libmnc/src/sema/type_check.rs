// Copyright 2025-2026 Neil Henderson
//
//! The `type_check` module defines the final part of the semantic analysis stage, which is type checking.
//! This involves the following tasks:
//! - build symbols:   Build the Symbol Table of every function, variable and parameter and its [Type].
//! - type annotation: Annotate every expression in the AST with its [Type], and add implicit casts where the
//!   operands of an expression have different widths.
//! - type validation: Return an error for invalid uses of functions and variables, and for calls with the wrong
//!   number of arguments.
//!
//! [Type]: crate::core::Type

mod checker;
mod declarations;
mod traverse;

use crate::ast::{AstDeclaration, AstRoot};
use crate::compiler_driver::CompileResult;

use super::symbol_table::SymbolTable;

pub use checker::TypeChecker;

/// Type checks the AST in a single pass over the top-level declarations in source order, and returns the
/// Symbol Table.
pub fn type_check(ast: &mut AstRoot) -> CompileResult<SymbolTable> {
    let mut chk = TypeChecker::new();

    for decl in &mut ast.0 {
        match decl {
            AstDeclaration::Function(function) => declarations::typecheck_function(function, &mut chk)?,
            AstDeclaration::Variable(var_decl) => declarations::typecheck_file_scope_variable(var_decl, &mut chk)?,
        }
    }

    Ok(chk.into_symbols())
}
