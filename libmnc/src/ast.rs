// Copyright 2025-2026 Neil Henderson
//
//! The `ast` module defines the abstract syntax tree produced by the front end, which is the input to the middle and
//! back end.
//!
//! The tree is mutated in place by the semantic analysis passes: identifiers are renamed to their unique names, loops
//! receive their loop ids, and every expression is annotated with its resolved [Type](crate::core::Type).

mod ast_expression;
mod ast_identifier;
mod ast_operators;
mod ast_type;


pub use self::ast_expression::*;
pub use self::ast_identifier::*;
pub use self::ast_operators::*;
pub use self::ast_type::*;

use crate::core::SourceLocation;

/// The root of the AST, representing the top level of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct AstRoot(pub Vec<AstDeclaration>);

/// A declaration introduces a name and is either a function or a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum AstDeclaration {
    Function(AstFunction),
    Variable(AstVariableDeclaration),
}

/// A function declaration with optional definition.
///
/// `extern функц` declarations never have a body.
#[derive(Debug, Clone, PartialEq)]
pub struct AstFunction {
    pub ident: AstIdentifier,
    pub params: Vec<AstParam>,
    pub return_type: AstType,
    pub body: Option<AstBlock>,
    pub is_public: bool,
    pub is_extern: bool,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AstParam {
    pub ident: AstIdentifier,
    pub param_type: AstType,
}

/// A variable declaration (`зарла`), with an optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct AstVariableDeclaration {
    pub ident: AstIdentifier,
    pub declared_type: AstType,
    pub init: Option<AstExpression>,
    pub storage: Option<AstStorageClass>,
}

/// A storage class specifier on a variable declaration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AstStorageClass {
    Extern,
    Static,
}

/// A block of statements and declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AstBlock(pub Vec<AstBlockItem>);

/// An item in a block.
#[derive(Debug, Clone, PartialEq)]
pub enum AstBlockItem {
    Statement(AstStatement),
    Declaration(AstDeclaration),
}

/// A unique id assigned to a loop by the loop labeler, e.g. `while.3`.
pub type AstLoopId = String;

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AstStatement {
    Expression(AstExpression),
    Return {
        expr: Option<AstExpression>,
        loc: SourceLocation,
    },
    If {
        condition: AstExpression,
        then_stmt: Box<AstStatement>,
        else_stmt: Option<Box<AstStatement>>,
    },
    Compound(AstBlock),
    /// `давтах cond { body }`
    While {
        condition: AstExpression,
        body: AstBlock,
        loop_id: Option<AstLoopId>,
    },
    /// `давт var: start..end { body }`, or `давт expr { body }` without a loop variable.
    Loop {
        var: Option<AstIdentifier>,
        expr: AstExpression,
        body: AstBlock,
        loop_id: Option<AstLoopId>,
    },
    Break {
        loc: SourceLocation,
        loop_id: Option<AstLoopId>,
    },
    Continue {
        loc: SourceLocation,
        loop_id: Option<AstLoopId>,
    },
    Null,
}

impl AstFunction {
    /// Creates a function declaration with the given body, or a forward declaration if `body` is `None`.
    pub fn new(ident: AstIdentifier, params: Vec<AstParam>, return_type: AstType, body: Option<AstBlock>) -> Self {
        Self { ident, params, return_type, body, is_public: false, is_extern: false }
    }

    /// Creates an `extern` function declaration.
    pub fn new_extern(ident: AstIdentifier, params: Vec<AstParam>, return_type: AstType) -> Self {
        Self { ident, params, return_type, body: None, is_public: false, is_extern: true }
    }

    /// Does the function have a body?
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl AstParam {
    /// Creates an `тоо` parameter.
    pub fn int(ident: AstIdentifier) -> Self {
        Self { ident, param_type: AstType::Int }
    }
}

impl AstVariableDeclaration {
    /// Creates a local variable declaration without storage class.
    pub fn new(ident: AstIdentifier, declared_type: AstType, init: Option<AstExpression>) -> Self {
        Self { ident, declared_type, init, storage: None }
    }

    /// Is this an `extern` declaration?
    pub fn is_extern(&self) -> bool {
        self.storage == Some(AstStorageClass::Extern)
    }
}

impl AstBlock {
    /// Creates a block containing only statements.
    pub fn from_statements(stmts: Vec<AstStatement>) -> Self {
        Self(stmts.into_iter().map(AstBlockItem::Statement).collect())
    }
}

impl AstStatement {
    /// Creates a `буц` statement.
    pub fn ret(expr: AstExpression) -> Self {
        let loc = expr.loc;
        AstStatement::Return { expr: Some(expr), loc }
    }

    /// Creates a `давтах` statement.
    pub fn while_loop(condition: AstExpression, body: AstBlock) -> Self {
        AstStatement::While { condition, body, loop_id: None }
    }

    /// Creates a `давт` range loop over `var`.
    pub fn range_loop(var: AstIdentifier, range: AstExpression, body: AstBlock) -> Self {
        AstStatement::Loop { var: Some(var), expr: range, body, loop_id: None }
    }

    /// Creates a `зогс` statement.
    pub fn brk(loc: SourceLocation) -> Self {
        AstStatement::Break { loc, loop_id: None }
    }

    /// Creates an `үргэлжлүүл` statement.
    pub fn cont(loc: SourceLocation) -> Self {
        AstStatement::Continue { loc, loop_id: None }
    }
}
