// Copyright 2025-2026 Neil Henderson
//
//! The `translator` module defines the various functions to translate from the type checked AST into the IR.

mod binary_expr;
mod expr;

use crate::ast::{AstBlock, AstBlockItem, AstDeclaration, AstExpression, AstExpressionKind, AstFunction, AstRoot};
use crate::ast::{AstIdentifier, AstStatement, AstVariableDeclaration};
use crate::compiler_driver::CompileResult;
use crate::core::{InternalError, Stage, Type};
use crate::sema::symbol_table::{StaticInit, Symbol, SymbolAttributes, SymbolTable};

use super::label_maker::LabelMaker;
use super::{
    TackyBinaryOp, TackyExtern, TackyFunction, TackyInstruction, TackyLabel, TackyRoot, TackyStaticVariable, TackyValue,
};

/// The translator manages state for translation from the AST to the IR.
pub struct TackyTranslator<'a> {
    pub symbols: &'a mut SymbolTable,
    next_temp_variable_id: usize,
    label_maker: LabelMaker,
}

impl<'a> TackyTranslator<'a> {
    /// Creates a new IR translator that registers its temporaries in the given symbol table.
    pub fn new(symbols: &'a mut SymbolTable) -> Self {
        Self { symbols, next_temp_variable_id: 0, label_maker: LabelMaker::new() }
    }

    /// Creates a temp variable `tmp.<n>` of the given type.
    ///
    /// The temp is added to the symbol table because instruction selection queries the width of every variable.
    pub fn make_temp_variable(&mut self, ty: Type) -> TackyValue {
        let name = format!("tmp.{}", self.next_temp_variable_id);
        self.next_temp_variable_id += 1;

        self.symbols.add(&name, Symbol::local(ty));
        TackyValue::Variable(name)
    }

    /// Creates a unique label.
    pub fn make_label(&mut self, prefix: &str) -> TackyLabel {
        self.label_maker.make_label(prefix)
    }
}

/// Translates the type checked AST into the IR.
pub fn translate_ast_to_ir(translator: &mut TackyTranslator, ast: &AstRoot) -> CompileResult<TackyRoot> {
    let mut root = TackyRoot::default();

    for decl in &ast.0 {
        let AstDeclaration::Function(function) = decl else {
            // File scope variables are collected from the symbol table below.
            continue;
        };

        if function.has_body() {
            root.functions.push(translate_function(translator, function)?);
        } else if function.is_extern && !root.externs.iter().any(|ext| ext.name == function.ident.name) {
            root.externs.push(TackyExtern { name: function.ident.name.clone() });
        }
    }

    root.statics = static_variables(&*translator.symbols);

    Ok(root)
}

/// Collects the variables with static storage that this compilation defines, in declaration order.
fn static_variables(symbols: &SymbolTable) -> Vec<TackyStaticVariable> {
    symbols
        .iter()
        .filter_map(|(name, symbol)| {
            let SymbolAttributes::Static { init, is_global } = symbol.attrs else {
                return None;
            };

            let init = match init {
                StaticInit::Initial(value) => value,
                StaticInit::Tentative => 0,
                StaticInit::NoInitializer => return None,
            };

            Some(TackyStaticVariable { name: name.to_string(), is_global, ty: symbol.ty.clone(), init })
        })
        .collect()
}

fn translate_function(translator: &mut TackyTranslator, function: &AstFunction) -> CompileResult<TackyFunction> {
    let name = &function.ident.name;

    let Some(body) = &function.body else {
        return Err(InternalError::unexpected(Stage::IrGen, format!("function '{name}' has no body")).into());
    };

    let is_global = match translator.symbols.get(name) {
        Some(Symbol { attrs: SymbolAttributes::Function { is_global, .. }, .. }) => *is_global,
        Some(_) => return Err(InternalError::unexpected(Stage::IrGen, format!("'{name}' is not a function")).into()),
        None => return Err(InternalError::missing_symbol(Stage::IrGen, name).into()),
    };

    let mut instructions = Vec::new();
    translate_block(translator, body, &mut instructions)?;

    // Control must return to the caller even if the body never says so.
    if !block_contains_return(body) {
        instructions.push(TackyInstruction::Return(TackyValue::int32(0)));
    }

    let params = function.params.iter().map(|param| param.ident.name.clone()).collect();

    Ok(TackyFunction { name: name.clone(), is_global, params, instructions })
}

fn translate_block(
    translator: &mut TackyTranslator,
    block: &AstBlock,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<()> {
    for item in &block.0 {
        match item {
            AstBlockItem::Statement(stmt) => translate_statement(translator, stmt, instructions)?,

            AstBlockItem::Declaration(AstDeclaration::Variable(var_decl)) => {
                // Static and extern locals live in the data section and are never copied into at runtime.
                if var_decl.storage.is_none() {
                    translate_var_declaration(translator, var_decl, instructions)?;
                }
            }

            AstBlockItem::Declaration(AstDeclaration::Function(function)) => {
                return Err(InternalError::unexpected(
                    Stage::IrGen,
                    format!("function declaration '{}' in a block", function.ident.name),
                )
                .into());
            }
        }
    }

    Ok(())
}

fn translate_statement(
    translator: &mut TackyTranslator,
    stmt: &AstStatement,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<()> {
    match stmt {
        AstStatement::Expression(expr) => {
            _ = expr::translate_expression(translator, expr, instructions)?;
        }

        AstStatement::Return { expr, .. } => {
            let value = match expr {
                Some(expr) => expr::translate_expression(translator, expr, instructions)?,
                None => TackyValue::int32(0),
            };
            instructions.push(TackyInstruction::Return(value));
        }

        AstStatement::If { condition, then_stmt, else_stmt } => {
            translate_if_statement(translator, condition, then_stmt, else_stmt.as_deref(), instructions)?
        }

        AstStatement::Compound(block) => translate_block(translator, block, instructions)?,

        AstStatement::While { condition, body, loop_id } => {
            let loop_id = expect_loop_id(loop_id.as_deref(), "while")?;
            translate_while_statement(translator, "while_start", loop_id, condition, body, instructions)?
        }

        AstStatement::Loop { var, expr, body, loop_id } => {
            let loop_id = expect_loop_id(loop_id.as_deref(), "loop")?;

            match (var, &expr.kind) {
                (Some(var), AstExpressionKind::Range { start, end }) => {
                    translate_range_loop(translator, loop_id, var, start, end, body, instructions)?
                }
                _ => translate_while_statement(translator, "loop_start", loop_id, expr, body, instructions)?,
            }
        }

        AstStatement::Break { loop_id, .. } => {
            let loop_id = expect_loop_id(loop_id.as_deref(), "break")?;
            instructions.push(TackyInstruction::Jump { target: LabelMaker::break_label(loop_id) });
        }

        AstStatement::Continue { loop_id, .. } => {
            let loop_id = expect_loop_id(loop_id.as_deref(), "continue")?;
            instructions.push(TackyInstruction::Jump { target: LabelMaker::continue_label(loop_id) });
        }

        AstStatement::Null => (),
    }

    Ok(())
}

fn translate_if_statement(
    translator: &mut TackyTranslator,
    condition: &AstExpression,
    then_stmt: &AstStatement,
    else_stmt: Option<&AstStatement>,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<()> {
    let Some(else_stmt) = else_stmt else {
        let end_label = translator.make_label("if_end");

        let condition_value = expr::translate_expression(translator, condition, instructions)?;
        instructions.push(TackyInstruction::JumpIfZero { condition: condition_value, target: end_label.clone() });

        translate_statement(translator, then_stmt, instructions)?;

        instructions.push(TackyInstruction::Label { id: end_label });
        return Ok(());
    };

    let else_label = translator.make_label("if_else");
    let end_label = translator.make_label("if_end");

    let condition_value = expr::translate_expression(translator, condition, instructions)?;
    instructions.push(TackyInstruction::JumpIfZero { condition: condition_value, target: else_label.clone() });

    // Then clause
    translate_statement(translator, then_stmt, instructions)?;
    instructions.push(TackyInstruction::Jump { target: end_label.clone() });

    // Else clause
    instructions.push(TackyInstruction::Label { id: else_label });
    translate_statement(translator, else_stmt, instructions)?;

    instructions.push(TackyInstruction::Label { id: end_label });
    Ok(())
}

fn translate_while_statement(
    translator: &mut TackyTranslator,
    start_prefix: &str,
    loop_id: &str,
    condition: &AstExpression,
    body: &AstBlock,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<()> {
    let start_label = translator.make_label(start_prefix);
    let continue_label = LabelMaker::continue_label(loop_id);
    let break_label = LabelMaker::break_label(loop_id);

    instructions.push(TackyInstruction::Label { id: start_label.clone() });

    // If false, jump to the break label
    let condition_value = expr::translate_expression(translator, condition, instructions)?;
    instructions.push(TackyInstruction::JumpIfZero { condition: condition_value, target: break_label.clone() });

    translate_block(translator, body, instructions)?;

    instructions.push(TackyInstruction::Label { id: continue_label });
    instructions.push(TackyInstruction::Jump { target: start_label });

    instructions.push(TackyInstruction::Label { id: break_label });
    Ok(())
}

fn translate_range_loop(
    translator: &mut TackyTranslator,
    loop_id: &str,
    var: &AstIdentifier,
    start: &AstExpression,
    end: &AstExpression,
    body: &AstBlock,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<()> {
    let start_label = translator.make_label("loop_start");
    let continue_label = LabelMaker::continue_label(loop_id);
    let break_label = LabelMaker::break_label(loop_id);

    let loop_var = TackyValue::var(&var.name);
    let Some(var_type) = translator.symbols.get(&var.name).map(|symbol| symbol.ty.clone()) else {
        return Err(InternalError::missing_symbol(Stage::IrGen, &var.name).into());
    };

    let start_value = expr::translate_expression(translator, start, instructions)?;
    instructions.push(TackyInstruction::Copy { src: start_value, dst: loop_var.clone() });

    instructions.push(TackyInstruction::Label { id: start_label.clone() });

    // The upper bound is evaluated again on every iteration.
    let end_value = expr::translate_expression(translator, end, instructions)?;
    let in_range = translator.make_temp_variable(Type::Int32);
    instructions.push(TackyInstruction::Binary {
        op: TackyBinaryOp::LessThanOrEqualTo,
        src1: loop_var.clone(),
        src2: end_value,
        dst: in_range.clone(),
    });
    instructions.push(TackyInstruction::JumpIfZero { condition: in_range, target: break_label.clone() });

    translate_block(translator, body, instructions)?;

    instructions.push(TackyInstruction::Label { id: continue_label });
    instructions.push(TackyInstruction::Binary {
        op: TackyBinaryOp::Add,
        src1: loop_var.clone(),
        src2: TackyValue::constant_of_type(1, &var_type),
        dst: loop_var,
    });
    instructions.push(TackyInstruction::Jump { target: start_label });

    instructions.push(TackyInstruction::Label { id: break_label });
    Ok(())
}

fn translate_var_declaration(
    translator: &mut TackyTranslator,
    var_decl: &AstVariableDeclaration,
    instructions: &mut Vec<TackyInstruction>,
) -> CompileResult<()> {
    if let Some(init) = &var_decl.init {
        let init_value = expr::translate_expression(translator, init, instructions)?;
        instructions.push(TackyInstruction::Copy { src: init_value, dst: TackyValue::var(&var_decl.ident.name) });
    }
    Ok(())
}

fn expect_loop_id<'s>(loop_id: Option<&'s str>, stmt: &str) -> CompileResult<&'s str> {
    loop_id.ok_or_else(|| InternalError::unexpected(Stage::IrGen, format!("'{stmt}' statement without a loop id")).into())
}

/// Does the block contain a `Return` statement anywhere, including in nested statements?
fn block_contains_return(block: &AstBlock) -> bool {
    block.0.iter().any(|item| match item {
        AstBlockItem::Statement(stmt) => statement_contains_return(stmt),
        AstBlockItem::Declaration(_) => false,
    })
}

fn statement_contains_return(stmt: &AstStatement) -> bool {
    match stmt {
        AstStatement::Return { .. } => true,
        AstStatement::If { then_stmt, else_stmt, .. } => {
            statement_contains_return(then_stmt) || else_stmt.as_deref().is_some_and(statement_contains_return)
        }
        AstStatement::Compound(body) | AstStatement::While { body, .. } | AstStatement::Loop { body, .. } => {
            block_contains_return(body)
        }
        AstStatement::Expression(_) | AstStatement::Break { .. } | AstStatement::Continue { .. } | AstStatement::Null => {
            false
        }
    }
}
