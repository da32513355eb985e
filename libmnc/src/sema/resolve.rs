// Copyright 2025-2026 Neil Henderson
//
//! The `resolve` module renames every variable to a unique name and validates the scoping rules.
//!
//! Each scope owns a map from declared names to [DeclaredIdentifier]s. Entering a nested scope copies the enclosing
//! map with `from_current_scope` cleared, so a declaration in the nested scope shadows without disturbing the
//! enclosing scope.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{
    AstBlock, AstBlockItem, AstDeclaration, AstExpression, AstExpressionKind, AstFunction, AstIdentifier, AstRoot,
    AstStatement, AstVariableDeclaration,
};
use crate::compiler_driver::{CompileError, CompileResult, SemanticError, SemanticErrorKind};
use crate::core::SourceLocation;

/// An identifier's unique name, and whether it was declared in the current scope and has linkage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredIdentifier {
    pub unique_name: String,
    pub from_current_scope: bool,
    pub has_linkage: bool,
}

type IdentifierMap = FxHashMap<String, DeclaredIdentifier>;

/// Resolves every identifier in the program, rewriting variable names in place to their unique names.
pub fn resolve_program(ast: &mut AstRoot) -> CompileResult<()> {
    let mut resolver = IdentifierResolver::default();
    let mut file_scope = IdentifierMap::default();

    for decl in &mut ast.0 {
        match decl {
            AstDeclaration::Function(function) => resolver.resolve_function(function, &mut file_scope)?,
            AstDeclaration::Variable(var_decl) => resolver.resolve_file_scope_variable(var_decl, &mut file_scope)?,
        }
    }

    Ok(())
}

/// The identifier resolver tracks the state shared across all scopes of one compilation.
#[derive(Debug, Default)]
struct IdentifierResolver {
    next_unique_id: usize,
    defined_functions: FxHashSet<String>,
}

impl IdentifierResolver {
    fn resolve_function(&mut self, function: &mut AstFunction, scope: &mut IdentifierMap) -> CompileResult<()> {
        let name = function.ident.name.clone();

        if function.has_body() && !self.defined_functions.insert(name.clone()) {
            return Err(error(SemanticErrorKind::DuplicateFunctionDefinition(name), function.ident.loc));
        }

        _ = scope.insert(
            name.clone(),
            DeclaredIdentifier { unique_name: name, from_current_scope: true, has_linkage: true },
        );

        // Parameters and the top-level items of the body share one scope.
        let mut inner = copy_for_nested_scope(scope);

        for param in &mut function.params {
            let unique_name = self.declare_local(&param.ident, &mut inner)?;
            param.ident.name = unique_name;
        }

        if let Some(body) = &mut function.body {
            self.resolve_block_items(body, &mut inner)?;
        }

        Ok(())
    }

    fn resolve_file_scope_variable(
        &mut self,
        var_decl: &mut AstVariableDeclaration,
        scope: &mut IdentifierMap,
    ) -> CompileResult<()> {
        let name = var_decl.ident.name.clone();

        _ = scope.insert(
            name.clone(),
            DeclaredIdentifier { unique_name: name, from_current_scope: true, has_linkage: true },
        );

        if let Some(init) = &mut var_decl.init {
            self.resolve_expression(init, scope)?;
        }

        Ok(())
    }

    fn resolve_local_variable(
        &mut self,
        var_decl: &mut AstVariableDeclaration,
        scope: &mut IdentifierMap,
    ) -> CompileResult<()> {
        let ident = &var_decl.ident;

        if var_decl.is_extern() {
            // An extern declaration refers to the file scope variable, so it keeps its name. It may only
            // redeclare an identifier in the same scope if that identifier also has linkage.
            if let Some(existing) = scope.get(&ident.name)
                && existing.from_current_scope
                && !existing.has_linkage
            {
                return Err(error(SemanticErrorKind::DuplicateVariable(ident.name.clone()), ident.loc));
            }

            _ = scope.insert(
                ident.name.clone(),
                DeclaredIdentifier { unique_name: ident.name.clone(), from_current_scope: true, has_linkage: true },
            );

            return Ok(());
        }

        let unique_name = self.declare_local(ident, scope)?;
        var_decl.ident.name = unique_name;

        if let Some(init) = &mut var_decl.init {
            self.resolve_expression(init, scope)?;
        }

        Ok(())
    }

    /// Declares a parameter or local variable without linkage in the given scope and returns its unique name.
    fn declare_local(&mut self, ident: &AstIdentifier, scope: &mut IdentifierMap) -> CompileResult<String> {
        if let Some(existing) = scope.get(&ident.name)
            && existing.from_current_scope
        {
            return Err(error(SemanticErrorKind::DuplicateVariable(ident.name.clone()), ident.loc));
        }

        let unique_name = self.make_unique_name(&ident.name);

        _ = scope.insert(
            ident.name.clone(),
            DeclaredIdentifier { unique_name: unique_name.clone(), from_current_scope: true, has_linkage: false },
        );

        Ok(unique_name)
    }

    fn resolve_block_items(&mut self, block: &mut AstBlock, scope: &mut IdentifierMap) -> CompileResult<()> {
        for item in &mut block.0 {
            match item {
                AstBlockItem::Statement(stmt) => self.resolve_statement(stmt, scope)?,

                AstBlockItem::Declaration(AstDeclaration::Variable(var_decl)) => {
                    self.resolve_local_variable(var_decl, scope)?
                }

                AstBlockItem::Declaration(AstDeclaration::Function(function)) => {
                    let kind = SemanticErrorKind::FunctionInsideFunction(function.ident.name.clone());
                    return Err(error(kind, function.ident.loc));
                }
            }
        }

        Ok(())
    }

    fn resolve_statement(&mut self, stmt: &mut AstStatement, scope: &mut IdentifierMap) -> CompileResult<()> {
        match stmt {
            AstStatement::Expression(expr) => self.resolve_expression(expr, scope),

            AstStatement::Return { expr, .. } => match expr {
                Some(expr) => self.resolve_expression(expr, scope),
                None => Ok(()),
            },

            AstStatement::If { condition, then_stmt, else_stmt } => {
                self.resolve_expression(condition, scope)?;
                self.resolve_statement(then_stmt, scope)?;
                if let Some(else_stmt) = else_stmt {
                    self.resolve_statement(else_stmt, scope)?;
                }
                Ok(())
            }

            AstStatement::Compound(block) => {
                let mut inner = copy_for_nested_scope(scope);
                self.resolve_block_items(block, &mut inner)
            }

            AstStatement::While { condition, body, .. } => {
                self.resolve_expression(condition, scope)?;
                let mut inner = copy_for_nested_scope(scope);
                self.resolve_block_items(body, &mut inner)
            }

            AstStatement::Loop { var, expr, body, .. } => {
                // The range is evaluated in the enclosing scope, before the loop variable exists.
                self.resolve_expression(expr, scope)?;

                let mut inner = copy_for_nested_scope(scope);
                if let Some(var) = var {
                    let unique_name = self.declare_local(var, &mut inner)?;
                    var.name = unique_name;
                }

                self.resolve_block_items(body, &mut inner)
            }

            AstStatement::Break { .. } | AstStatement::Continue { .. } | AstStatement::Null => Ok(()),
        }
    }

    fn resolve_expression(&mut self, expr: &mut AstExpression, scope: &IdentifierMap) -> CompileResult<()> {
        let loc = expr.loc;

        match &mut expr.kind {
            AstExpressionKind::Constant(_) | AstExpressionKind::String(_) => Ok(()),

            AstExpressionKind::Var(name) => {
                let Some(decl) = scope.get(name.as_str()) else {
                    return Err(error(SemanticErrorKind::UndeclaredVariable(name.clone()), loc));
                };
                *name = decl.unique_name.clone();
                Ok(())
            }

            AstExpressionKind::Unary { expr, .. } => self.resolve_expression(expr, scope),

            AstExpressionKind::Binary { left, right, .. } => {
                self.resolve_expression(left, scope)?;
                self.resolve_expression(right, scope)
            }

            AstExpressionKind::Assignment { lhs, rhs } => {
                if !lhs.is_var() {
                    return Err(error(SemanticErrorKind::InvalidAssignmentTarget(lhs.to_string()), lhs.loc));
                }
                self.resolve_expression(lhs, scope)?;
                self.resolve_expression(rhs, scope)
            }

            AstExpressionKind::Conditional { condition, then_expr, else_expr } => {
                self.resolve_expression(condition, scope)?;
                self.resolve_expression(then_expr, scope)?;
                self.resolve_expression(else_expr, scope)
            }

            AstExpressionKind::Call { name, args } => {
                let Some(decl) = scope.get(name.as_str()) else {
                    return Err(error(SemanticErrorKind::UndeclaredFunction(name.clone()), loc));
                };
                *name = decl.unique_name.clone();

                for arg in args {
                    self.resolve_expression(arg, scope)?;
                }
                Ok(())
            }

            AstExpressionKind::Range { start, end } => {
                self.resolve_expression(start, scope)?;
                self.resolve_expression(end, scope)
            }

            AstExpressionKind::Cast { expr, .. } => self.resolve_expression(expr, scope),
        }
    }

    /// Makes a unique identifier name.
    fn make_unique_name(&mut self, name: &str) -> String {
        let id = self.next_unique_id;
        self.next_unique_id += 1;
        format!("{name}.{id}")
    }
}

fn copy_for_nested_scope(scope: &IdentifierMap) -> IdentifierMap {
    scope
        .iter()
        .map(|(name, decl)| (name.clone(), DeclaredIdentifier { from_current_scope: false, ..decl.clone() }))
        .collect()
}

fn error(kind: SemanticErrorKind, loc: SourceLocation) -> CompileError {
    SemanticError::new(kind, loc).into()
}
