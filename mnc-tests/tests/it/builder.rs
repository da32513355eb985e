// Copyright 2025-2026 Neil Henderson

//! Shorthand for building the ASTs which the integration tests compile.
//!
//! Nodes built here have no source location unless a test gives one explicitly.

use libmnc::ast::*;
use libmnc::core::SourceLocation;

pub fn none() -> SourceLocation {
    SourceLocation::none()
}

pub fn ident(name: &str) -> AstIdentifier {
    AstIdentifier::new(name, none())
}

/// An identifier spanning its name at the given character offset.
pub fn ident_at(name: &str, offset: usize) -> AstIdentifier {
    AstIdentifier::new(name, SourceLocation::new(offset, name.chars().count()))
}

pub fn int(value: i32) -> AstExpression {
    AstExpression::int(value, none())
}

pub fn long(value: i64) -> AstExpression {
    AstExpression::long(value, none())
}

pub fn string(text: &str) -> AstExpression {
    AstExpression::string(text, none())
}

pub fn var(name: &str) -> AstExpression {
    AstExpression::var(name, none())
}

pub fn binary(op: AstBinaryOp, left: AstExpression, right: AstExpression) -> AstExpression {
    AstExpression::binary(op, left, right)
}

pub fn unary(op: AstUnaryOp, expr: AstExpression) -> AstExpression {
    AstExpression::unary(op, expr, none())
}

pub fn assign(name: &str, value: AstExpression) -> AstBlockItem {
    stmt(AstStatement::Expression(AstExpression::assign(var(name), value)))
}

pub fn call(name: &str, args: Vec<AstExpression>) -> AstExpression {
    AstExpression::call(name, args, none())
}

pub fn stmt(stmt: AstStatement) -> AstBlockItem {
    AstBlockItem::Statement(stmt)
}

pub fn ret(expr: AstExpression) -> AstBlockItem {
    stmt(AstStatement::ret(expr))
}

pub fn declare(name: &str, ty: AstType, init: Option<AstExpression>) -> AstBlockItem {
    AstBlockItem::Declaration(AstDeclaration::Variable(AstVariableDeclaration::new(ident(name), ty, init)))
}

pub fn declare_int(name: &str, init: i32) -> AstBlockItem {
    declare(name, AstType::Int, Some(int(init)))
}

pub fn if_then(condition: AstExpression, then_items: Vec<AstBlockItem>, else_items: Option<Vec<AstBlockItem>>) -> AstBlockItem {
    stmt(AstStatement::If {
        condition,
        then_stmt: Box::new(AstStatement::Compound(AstBlock(then_items))),
        else_stmt: else_items.map(|items| Box::new(AstStatement::Compound(AstBlock(items)))),
    })
}

pub fn while_loop(condition: AstExpression, body: Vec<AstBlockItem>) -> AstBlockItem {
    stmt(AstStatement::while_loop(condition, AstBlock(body)))
}

pub fn range_loop(name: &str, start: AstExpression, end: AstExpression, body: Vec<AstBlockItem>) -> AstBlockItem {
    stmt(AstStatement::range_loop(ident(name), AstExpression::range(start, end), AstBlock(body)))
}

pub fn brk() -> AstBlockItem {
    stmt(AstStatement::brk(none()))
}

pub fn cont() -> AstBlockItem {
    stmt(AstStatement::cont(none()))
}

/// A function with `тоо` parameters and return type.
pub fn function(name: &str, params: &[&str], body: Vec<AstBlockItem>) -> AstDeclaration {
    let params = params.iter().map(|param| AstParam::int(ident(param))).collect();
    AstDeclaration::Function(AstFunction::new(ident(name), params, AstType::Int, Some(AstBlock(body))))
}

/// The entry function `үндсэн`.
pub fn entry(body: Vec<AstBlockItem>) -> AstDeclaration {
    function("үндсэн", &[], body)
}

pub fn extern_function(name: &str, param_types: &[AstType]) -> AstDeclaration {
    let params =
        param_types.iter().enumerate().map(|(idx, ty)| AstParam { ident: ident(&format!("p{idx}")), param_type: *ty });
    AstDeclaration::Function(AstFunction::new_extern(ident(name), params.collect(), AstType::Int))
}

pub fn global(name: &str, ty: AstType, init: Option<AstExpression>, storage: Option<AstStorageClass>) -> AstDeclaration {
    AstDeclaration::Variable(AstVariableDeclaration { ident: ident(name), declared_type: ty, init, storage })
}

pub fn program(decls: Vec<AstDeclaration>) -> AstRoot {
    AstRoot(decls)
}
