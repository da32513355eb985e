// Copyright 2025-2026 Neil Henderson
//
//! The `declarations` module type checks function and variable declarations and records them in the
//! Symbol Table.

use crate::ast::{AstExpression, AstFunction, AstStorageClass, AstVariableDeclaration};
use crate::compiler_driver::{CompileResult, SemanticErrorKind};
use crate::core::Type;

use super::super::symbol_table::{StaticInit, Symbol, SymbolAttributes};
use super::checker::{TypeChecker, convert_to, evaluate_constant, semantic_error, truncate_to};
use super::traverse;

/// Type checks a function declaration and, if it has one, its body.
pub fn typecheck_function(function: &mut AstFunction, chk: &mut TypeChecker) -> CompileResult<()> {
    let name = &function.ident.name;
    let loc = function.ident.loc;

    let param_types: Vec<Type> = function.params.iter().map(|param| param.param_type.resolve()).collect();
    let return_type = function.return_type.resolve();
    let fn_type = Type::function(param_types.clone(), return_type.clone());

    let has_body = function.has_body();
    let mut is_defined = has_body;
    let mut is_global = function.is_public || function.is_extern;

    if let Some(prior) = chk.symbols.get(name) {
        let SymbolAttributes::Function { is_defined: prior_defined, is_global: prior_global } = prior.attrs else {
            return Err(semantic_error(SemanticErrorKind::RedeclaredAsDifferentKind(name.clone()), loc));
        };

        if prior_defined && has_body {
            return Err(semantic_error(SemanticErrorKind::DuplicateFunctionDefinition(name.clone()), loc));
        }

        let expected = prior.ty.arity().unwrap_or_default();
        if expected != param_types.len() {
            let kind = SemanticErrorKind::ArityMismatch { name: name.clone(), expected, found: param_types.len() };
            return Err(semantic_error(kind, loc));
        }

        if prior.ty != fn_type {
            return Err(semantic_error(SemanticErrorKind::RedeclaredAsDifferentKind(name.clone()), loc));
        }

        is_defined |= prior_defined;
        is_global |= prior_global;
    }

    if function.is_extern {
        is_defined = false;
    }

    chk.symbols.add(name, Symbol::function(fn_type, is_defined, is_global));

    // Parameters are registered even for a declaration without a body, since their types make up the function type.
    for (param, ty) in function.params.iter().zip(param_types) {
        chk.symbols.add(&param.ident.name, Symbol::local(ty));
    }

    if let Some(body) = &mut function.body {
        chk.set_current_return_type(Some(return_type));
        traverse::typecheck_block(body, chk)?;
        chk.set_current_return_type(None);
    }

    Ok(())
}

/// Type checks a variable declared at file scope. File scope variables have static storage.
pub fn typecheck_file_scope_variable(var_decl: &mut AstVariableDeclaration, chk: &mut TypeChecker) -> CompileResult<()> {
    let name = var_decl.ident.name.clone();
    let loc = var_decl.ident.loc;
    let ty = var_decl.declared_type.resolve();
    let is_extern = var_decl.is_extern();

    let mut init = match &mut var_decl.init {
        Some(expr) => StaticInit::Initial(static_initializer(expr, &ty, &name, chk)?),
        None if is_extern => StaticInit::NoInitializer,
        None => StaticInit::Tentative,
    };

    let mut is_global = var_decl.storage != Some(AstStorageClass::Static);

    if let Some(prior) = chk.symbols.get(&name) {
        let SymbolAttributes::Static { init: prior_init, is_global: prior_global } = prior.attrs else {
            return Err(semantic_error(SemanticErrorKind::RedeclaredAsDifferentKind(name), loc));
        };

        if prior.ty != ty {
            return Err(semantic_error(SemanticErrorKind::RedeclaredAsDifferentKind(name), loc));
        }

        if is_extern {
            is_global = prior_global;
        }

        init = match (prior_init, init) {
            (StaticInit::Initial(_), StaticInit::Initial(_)) => {
                return Err(semantic_error(SemanticErrorKind::DuplicateVariable(name), loc));
            }
            (StaticInit::Initial(value), _) | (_, StaticInit::Initial(value)) => StaticInit::Initial(value),
            (StaticInit::Tentative, _) | (_, StaticInit::Tentative) => StaticInit::Tentative,
            _ => StaticInit::NoInitializer,
        };
    }

    chk.symbols.add(&name, Symbol::static_var(ty, init, is_global));
    Ok(())
}

/// Type checks a variable declared inside a function body.
pub fn typecheck_local_variable(var_decl: &mut AstVariableDeclaration, chk: &mut TypeChecker) -> CompileResult<()> {
    let name = var_decl.ident.name.clone();
    let loc = var_decl.ident.loc;
    let ty = var_decl.declared_type.resolve();

    match var_decl.storage {
        Some(AstStorageClass::Extern) => {
            if var_decl.init.is_some() {
                return Err(semantic_error(SemanticErrorKind::ExternWithInitializer(name), loc));
            }

            match chk.symbols.get(&name) {
                Some(prior) if prior.is_function() || prior.ty != ty => {
                    return Err(semantic_error(SemanticErrorKind::RedeclaredAsDifferentKind(name), loc));
                }
                Some(_) => (),
                None => chk.symbols.add(&name, Symbol::static_var(ty, StaticInit::NoInitializer, true)),
            }
        }

        Some(AstStorageClass::Static) => {
            let value = match &mut var_decl.init {
                Some(expr) => static_initializer(expr, &ty, &name, chk)?,
                None => 0,
            };
            chk.symbols.add(&name, Symbol::static_var(ty, StaticInit::Initial(value), false));
        }

        None => {
            chk.symbols.add(&name, Symbol::local(ty.clone()));

            if let Some(init) = &mut var_decl.init {
                traverse::typecheck_expression(init, chk)?;
                convert_to(init, &ty)?;
            }
        }
    }

    Ok(())
}

/// Type checks a static variable's initializer and evaluates it to a constant of the variable's width.
fn static_initializer(
    expr: &mut AstExpression,
    ty: &Type,
    name: &str,
    chk: &mut TypeChecker,
) -> CompileResult<i64> {
    let Some(value) = evaluate_constant(expr) else {
        return Err(semantic_error(SemanticErrorKind::NonConstantInitializer(name.to_string()), expr.loc));
    };

    traverse::typecheck_expression(expr, chk)?;
    convert_to(expr, ty)?;

    Ok(truncate_to(value, ty))
}
