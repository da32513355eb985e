// Copyright 2025-2026 Neil Henderson
//
//! The `loop_labels` module gives every loop a unique id and attaches the id of the innermost enclosing loop to
//! each `break` and `continue` statement.

use crate::ast::{AstBlock, AstBlockItem, AstDeclaration, AstLoopId, AstRoot, AstStatement};
use crate::compiler_driver::{CompileResult, SemanticError, SemanticErrorKind};

/// Labels the loops in every function definition.
///
/// Returns an error for the first `break` or `continue` that is not inside a loop.
pub fn label_loops(ast: &mut AstRoot) -> CompileResult<()> {
    let mut labeler = LoopLabeler::default();

    for decl in &mut ast.0 {
        if let AstDeclaration::Function(function) = decl
            && let Some(body) = &mut function.body
        {
            labeler.label_block(body, None)?;
        }
    }

    Ok(())
}

#[derive(Debug, Default)]
struct LoopLabeler {
    next_loop_id: usize,
}

impl LoopLabeler {
    fn label_block(&mut self, block: &mut AstBlock, current: Option<&AstLoopId>) -> CompileResult<()> {
        for item in &mut block.0 {
            if let AstBlockItem::Statement(stmt) = item {
                self.label_statement(stmt, current)?;
            }
        }
        Ok(())
    }

    fn label_statement(&mut self, stmt: &mut AstStatement, current: Option<&AstLoopId>) -> CompileResult<()> {
        match stmt {
            AstStatement::While { body, loop_id, .. } => {
                let id = self.make_loop_id("while");
                self.label_block(body, Some(&id))?;
                *loop_id = Some(id);
            }

            AstStatement::Loop { body, loop_id, .. } => {
                let id = self.make_loop_id("loop");
                self.label_block(body, Some(&id))?;
                *loop_id = Some(id);
            }

            AstStatement::Break { loc, loop_id } => match current {
                Some(id) => *loop_id = Some(id.clone()),
                None => return Err(SemanticError::new(SemanticErrorKind::OutsideLoopBreak, *loc).into()),
            },

            AstStatement::Continue { loc, loop_id } => match current {
                Some(id) => *loop_id = Some(id.clone()),
                None => return Err(SemanticError::new(SemanticErrorKind::OutsideLoopContinue, *loc).into()),
            },

            AstStatement::If { then_stmt, else_stmt, .. } => {
                self.label_statement(then_stmt, current)?;
                if let Some(else_stmt) = else_stmt {
                    self.label_statement(else_stmt, current)?;
                }
            }

            AstStatement::Compound(block) => self.label_block(block, current)?,

            AstStatement::Expression(_) | AstStatement::Return { .. } | AstStatement::Null => (),
        }

        Ok(())
    }

    fn make_loop_id(&mut self, prefix: &str) -> AstLoopId {
        let id = self.next_loop_id;
        self.next_loop_id += 1;
        format!("{prefix}.{id}")
    }
}
