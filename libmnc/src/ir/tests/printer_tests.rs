// Copyright 2025-2026 Neil Henderson

use crate::ast::{AstBinaryOp, AstDeclaration, AstExpression, AstFunction, AstStatement, AstType};

use super::super::printer::print;
use super::{function, ident, int, lower, stmt, var};

#[test]
fn prints_function_listing() {
    let sum = AstExpression::binary(AstBinaryOp::Add, var("a"), int(2));
    let (root, _) = lower(vec![function("f", &["a"], vec![stmt(AstStatement::ret(sum))])]);

    let expected = "\
define internal symbol @f(a.0) {
  tmp.0 = add a.0, 2
  ret tmp.0
}

";
    assert_eq!(print(&root), expected);
}

#[test]
fn prints_externs_first() {
    let ext = AstDeclaration::Function(AstFunction::new_extern(ident("хэвлэ"), vec![], AstType::Int));
    let (root, _) = lower(vec![ext, function("f", &[], vec![stmt(AstStatement::ret(int(0)))])]);

    let listing = print(&root);
    assert!(listing.starts_with("declare extern @хэвлэ\n\n"));
    assert!(listing.contains("define internal symbol @f() {\n  ret 0\n}\n"));
}
