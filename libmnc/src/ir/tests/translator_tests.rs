// Copyright 2025-2026 Neil Henderson

use crate::ast::{
    AstBinaryOp, AstBlock, AstBlockItem, AstDeclaration, AstExpression, AstFunction, AstStatement, AstStorageClass,
    AstType, AstVariableDeclaration,
};
use crate::core::{SourceLocation, Type};
use crate::sema::symbol_table::SymbolAttributes;

use super::super::{
    TackyBinaryOp, TackyConstant, TackyExtern, TackyInstruction, TackyLabel, TackyStaticVariable, TackyValue,
};
use super::{function, ident, int, lower, stmt, var};

fn label(name: &str) -> TackyLabel {
    TackyLabel(name.to_string())
}

fn declare(name: &str, ty: AstType, init: Option<AstExpression>) -> AstBlockItem {
    AstBlockItem::Declaration(AstDeclaration::Variable(AstVariableDeclaration::new(ident(name), ty, init)))
}

#[test]
fn return_constant() {
    let (root, _) = lower(vec![function("үндсэн", &[], vec![stmt(AstStatement::ret(int(5)))])]);

    assert_eq!(root.functions.len(), 1);
    assert_eq!(root.functions[0].name, "үндсэн");
    assert_eq!(root.functions[0].instructions, vec![TackyInstruction::Return(TackyValue::int32(5))]);
}

#[test]
fn function_without_return_gets_return_zero() {
    let (root, _) = lower(vec![function("f", &[], vec![stmt(AstStatement::Expression(int(1)))])]);

    assert_eq!(root.functions[0].instructions, vec![TackyInstruction::Return(TackyValue::int32(0))]);
}

#[test]
fn while_loop_emits_one_label_triple() {
    let condition = AstExpression::binary(AstBinaryOp::LessThan, var("x"), int(3));
    let increment = AstExpression::assign(var("x"), AstExpression::binary(AstBinaryOp::Add, var("x"), int(1)));
    let body = AstBlock::from_statements(vec![AstStatement::Expression(increment)]);

    let (root, _) = lower(vec![function(
        "f",
        &[],
        vec![declare("x", AstType::Int, Some(int(0))), stmt(AstStatement::while_loop(condition, body))],
    )]);

    let expected = vec![
        TackyInstruction::Copy { src: TackyValue::int32(0), dst: TackyValue::var("x.0") },
        TackyInstruction::Label { id: label("while_start.0") },
        TackyInstruction::Binary {
            op: TackyBinaryOp::LessThan,
            src1: TackyValue::var("x.0"),
            src2: TackyValue::int32(3),
            dst: TackyValue::var("tmp.0"),
        },
        TackyInstruction::JumpIfZero { condition: TackyValue::var("tmp.0"), target: label("break.while.0") },
        TackyInstruction::Binary {
            op: TackyBinaryOp::Add,
            src1: TackyValue::var("x.0"),
            src2: TackyValue::int32(1),
            dst: TackyValue::var("tmp.1"),
        },
        TackyInstruction::Copy { src: TackyValue::var("tmp.1"), dst: TackyValue::var("x.0") },
        TackyInstruction::Label { id: label("continue.while.0") },
        TackyInstruction::Jump { target: label("while_start.0") },
        TackyInstruction::Label { id: label("break.while.0") },
        TackyInstruction::Return(TackyValue::int32(0)),
    ];

    assert_eq!(root.functions[0].instructions, expected);
}

#[test]
fn range_loop_reevaluates_bound_and_increments() {
    let range = AstExpression::range(int(1), var("n"));
    let body = AstBlock::from_statements(vec![AstStatement::brk(SourceLocation::none())]);

    let (root, _) = lower(vec![function("f", &["n"], vec![stmt(AstStatement::range_loop(ident("i"), range, body))])]);

    let expected = vec![
        TackyInstruction::Copy { src: TackyValue::int32(1), dst: TackyValue::var("i.1") },
        TackyInstruction::Label { id: label("loop_start.0") },
        TackyInstruction::Binary {
            op: TackyBinaryOp::LessThanOrEqualTo,
            src1: TackyValue::var("i.1"),
            src2: TackyValue::var("n.0"),
            dst: TackyValue::var("tmp.0"),
        },
        TackyInstruction::JumpIfZero { condition: TackyValue::var("tmp.0"), target: label("break.loop.0") },
        TackyInstruction::Jump { target: label("break.loop.0") },
        TackyInstruction::Label { id: label("continue.loop.0") },
        TackyInstruction::Binary {
            op: TackyBinaryOp::Add,
            src1: TackyValue::var("i.1"),
            src2: TackyValue::int32(1),
            dst: TackyValue::var("i.1"),
        },
        TackyInstruction::Jump { target: label("loop_start.0") },
        TackyInstruction::Label { id: label("break.loop.0") },
        TackyInstruction::Return(TackyValue::int32(0)),
    ];

    assert_eq!(root.functions[0].params, vec!["n.0".to_string()]);
    assert_eq!(root.functions[0].instructions, expected);
}

#[test]
fn logical_and_short_circuits() {
    let and = AstExpression::binary(AstBinaryOp::LogicalAnd, var("a"), var("b"));
    let (root, _) = lower(vec![function("f", &["a", "b"], vec![stmt(AstStatement::ret(and))])]);

    let expected = vec![
        TackyInstruction::JumpIfZero { condition: TackyValue::var("a.0"), target: label("and_false.0") },
        TackyInstruction::JumpIfZero { condition: TackyValue::var("b.1"), target: label("and_false.0") },
        TackyInstruction::Copy { src: TackyValue::int32(1), dst: TackyValue::var("tmp.0") },
        TackyInstruction::Jump { target: label("and_end.1") },
        TackyInstruction::Label { id: label("and_false.0") },
        TackyInstruction::Copy { src: TackyValue::int32(0), dst: TackyValue::var("tmp.0") },
        TackyInstruction::Label { id: label("and_end.1") },
        TackyInstruction::Return(TackyValue::var("tmp.0")),
    ];

    assert_eq!(root.functions[0].instructions, expected);
}

#[test]
fn logical_or_jumps_on_non_zero() {
    let or = AstExpression::binary(AstBinaryOp::LogicalOr, var("a"), int(0));
    let (root, _) = lower(vec![function("f", &["a"], vec![stmt(AstStatement::ret(or))])]);

    let instructions = &root.functions[0].instructions;
    assert_eq!(
        instructions[0],
        TackyInstruction::JumpIfNotZero { condition: TackyValue::var("a.0"), target: label("or_true.0") }
    );
    assert_eq!(instructions[2], TackyInstruction::Copy { src: TackyValue::int32(0), dst: TackyValue::var("tmp.0") });
    assert_eq!(instructions[4], TackyInstruction::Label { id: label("or_true.0") });
}

#[test]
fn if_else_labels() {
    let if_else = AstStatement::If {
        condition: var("a"),
        then_stmt: Box::new(AstStatement::ret(int(1))),
        else_stmt: Some(Box::new(AstStatement::ret(int(2)))),
    };
    let (root, _) = lower(vec![function("f", &["a"], vec![stmt(if_else)])]);

    let expected = vec![
        TackyInstruction::JumpIfZero { condition: TackyValue::var("a.0"), target: label("if_else.0") },
        TackyInstruction::Return(TackyValue::int32(1)),
        TackyInstruction::Jump { target: label("if_end.1") },
        TackyInstruction::Label { id: label("if_else.0") },
        TackyInstruction::Return(TackyValue::int32(2)),
        TackyInstruction::Label { id: label("if_end.1") },
    ];

    // A return in either branch counts, so no trailing return is added.
    assert_eq!(root.functions[0].instructions, expected);
}

#[test]
fn widening_initializer_is_sign_extended() {
    let (root, symbols) = lower(vec![function("f", &[], vec![declare("x", AstType::Long, Some(int(5)))])]);

    let instructions = &root.functions[0].instructions;
    assert_eq!(instructions[0], TackyInstruction::SignExtend { src: TackyValue::int32(5), dst: TackyValue::var("tmp.0") });
    assert_eq!(instructions[1], TackyInstruction::Copy { src: TackyValue::var("tmp.0"), dst: TackyValue::var("x.0") });

    // Temporaries are registered with their type.
    assert_eq!(symbols.get("tmp.0").unwrap().ty, Type::Int64);
    assert_eq!(symbols.get("tmp.0").unwrap().attrs, SymbolAttributes::Local);
}

#[test]
fn narrowing_return_is_truncated() {
    let long = AstExpression::long(7, SourceLocation::none());
    let (root, symbols) = lower(vec![function("f", &[], vec![stmt(AstStatement::ret(long))])]);

    let instructions = &root.functions[0].instructions;
    assert_eq!(
        instructions[0],
        TackyInstruction::Truncate {
            src: TackyValue::Constant(TackyConstant::Int64(7)),
            dst: TackyValue::var("tmp.0")
        }
    );
    assert_eq!(symbols.get("tmp.0").unwrap().ty, Type::Int32);
}

#[test]
fn call_evaluates_arguments_in_order() {
    let callee = AstDeclaration::Function(AstFunction::new_extern(
        ident("хэвлэ"),
        vec![crate::ast::AstParam::int(ident("a")), crate::ast::AstParam::int(ident("b"))],
        AstType::Int,
    ));
    let call = AstExpression::call(
        "хэвлэ",
        vec![AstExpression::binary(AstBinaryOp::Multiply, int(2), int(3)), int(4)],
        SourceLocation::none(),
    );

    let (root, _) = lower(vec![callee, function("f", &[], vec![stmt(AstStatement::Expression(call))])]);

    assert_eq!(root.externs, vec![TackyExtern { name: "хэвлэ".to_string() }]);

    let instructions = &root.functions[0].instructions;
    assert!(matches!(instructions[0], TackyInstruction::Binary { op: TackyBinaryOp::Multiply, .. }));
    assert_eq!(
        instructions[1],
        TackyInstruction::FunctionCall {
            name: "хэвлэ".to_string(),
            args: vec![TackyValue::var("tmp.0"), TackyValue::int32(4)],
            dst: TackyValue::var("tmp.1"),
        }
    );
}

#[test]
fn static_variables_are_collected_without_copies() {
    let mut counter = AstVariableDeclaration::new(ident("c"), AstType::Int, Some(int(3)));
    counter.storage = Some(AstStorageClass::Static);
    let global = AstVariableDeclaration::new(ident("g"), AstType::Long, None);

    let (root, _) = lower(vec![
        AstDeclaration::Variable(global),
        function("f", &[], vec![AstBlockItem::Declaration(AstDeclaration::Variable(counter))]),
    ]);

    assert_eq!(root.functions[0].instructions, vec![TackyInstruction::Return(TackyValue::int32(0))]);
    assert_eq!(
        root.statics,
        vec![
            TackyStaticVariable { name: "g".to_string(), is_global: true, ty: Type::Int64, init: 0 },
            TackyStaticVariable { name: "c.0".to_string(), is_global: false, ty: Type::Int32, init: 3 },
        ]
    );
}

#[test]
fn bodiless_declaration_produces_nothing() {
    let decl = AstDeclaration::Function(AstFunction::new(ident("g"), vec![], AstType::Int, None));
    let (root, _) = lower(vec![decl]);

    assert!(root.functions.is_empty());
    assert!(root.externs.is_empty());
}
