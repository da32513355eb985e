// Copyright 2025-2026 Neil Henderson

//! Integration tests that expect the compiler to reject ill-formed programs with a semantic error.

use libmnc::ast::{
    AstBlock, AstBlockItem, AstDeclaration, AstExpression, AstRoot, AstStatement, AstStorageClass, AstType,
    AstVariableDeclaration,
};
use libmnc::compiler_driver::options::{DriverFlag, DriverOptions, TargetOs};
use libmnc::compiler_driver::{Driver, SemanticErrorKind, SourceFile, render};
use libmnc::core::Type;

use super::builder::*;

/// Compiles the program and returns the kind of semantic error it fails with.
fn compile_and_expect_error(ast: AstRoot) -> SemanticErrorKind {
    let driver = Driver::new(DriverOptions::for_target(TargetOs::Linux));

    let err = driver.compile(ast).expect_err("expected the program to be rejected");
    let Some(semantic) = err.as_semantic() else {
        panic!("expected a semantic error, got {err}");
    };
    semantic.kind.clone()
}

#[test]
fn duplicate_variable() {
    let ast = program(vec![entry(vec![declare_int("x", 1), declare_int("x", 2), ret(var("x"))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::DuplicateVariable("x".to_string()));
}

#[test]
fn duplicate_function_definition() {
    let ast = program(vec![function("f", &[], vec![ret(int(1))]), function("f", &[], vec![ret(int(2))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::DuplicateFunctionDefinition("f".to_string()));
}

#[test]
fn undeclared_variable() {
    let ast = program(vec![entry(vec![ret(var("y"))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::UndeclaredVariable("y".to_string()));
}

#[test]
fn variable_used_outside_its_scope() {
    let ast = program(vec![entry(vec![if_then(int(1), vec![declare_int("inner", 1)], None), ret(var("inner"))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::UndeclaredVariable("inner".to_string()));
}

#[test]
fn undeclared_function() {
    let ast = program(vec![entry(vec![ret(call("g", vec![]))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::UndeclaredFunction("g".to_string()));
}

#[test]
fn invalid_assignment_target() {
    let assignment = AstExpression::assign(int(3), int(4));
    let ast = program(vec![entry(vec![stmt(AstStatement::Expression(assignment)), ret(int(0))])]);

    assert!(matches!(compile_and_expect_error(ast), SemanticErrorKind::InvalidAssignmentTarget(_)));
}

#[test]
fn call_with_wrong_argument_count() {
    let f = function("f", &["a", "b"], vec![ret(var("a"))]);
    let ast = program(vec![f, entry(vec![ret(call("f", vec![int(1)]))])]);

    assert_eq!(
        compile_and_expect_error(ast),
        SemanticErrorKind::ArityMismatch { name: "f".to_string(), expected: 2, found: 1 }
    );
}

#[test]
fn function_used_as_variable() {
    let f = function("f", &[], vec![ret(int(1))]);
    let ast = program(vec![f, entry(vec![ret(var("f"))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::WrongKind("f".to_string()));
}

#[test]
fn variable_called_as_function() {
    let ast = program(vec![global("g", AstType::Int, Some(int(1)), None), entry(vec![ret(call("g", vec![]))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::NotAFunction("g".to_string()));
}

#[test]
fn function_redeclared_as_variable() {
    let ast = program(vec![function("f", &[], vec![ret(int(1))]), global("f", AstType::Int, None, None)]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::RedeclaredAsDifferentKind("f".to_string()));
}

#[test]
fn non_constant_file_scope_initializer() {
    let ast = program(vec![
        global("a", AstType::Int, Some(int(1)), None),
        global("b", AstType::Int, Some(var("a")), None),
        entry(vec![ret(int(0))]),
    ]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::NonConstantInitializer("b".to_string()));
}

#[test]
fn string_stored_in_integer_variable() {
    let f = function("f", &[], vec![declare("x", AstType::Int, Some(string("abc"))), ret(int(0))]);
    let main_body = vec![declare_int("y", 7), stmt(AstStatement::Expression(call("f", vec![]))), ret(var("y"))];
    let ast = program(vec![f, entry(main_body)]);

    assert_eq!(
        compile_and_expect_error(ast),
        SemanticErrorKind::IncompatibleTypes { expected: Type::Int32, found: Type::String }
    );
}

#[test]
fn string_assigned_to_integer_variable() {
    let ast = program(vec![entry(vec![declare_int("x", 0), assign("x", string("abc")), ret(var("x"))])]);

    assert_eq!(
        compile_and_expect_error(ast),
        SemanticErrorKind::IncompatibleTypes { expected: Type::Int32, found: Type::String }
    );
}

#[test]
fn block_scope_extern_with_initializer() {
    let decl = AstVariableDeclaration {
        ident: ident("гадна"),
        declared_type: AstType::Int,
        init: Some(int(1)),
        storage: Some(AstStorageClass::Extern),
    };
    let ast = program(vec![entry(vec![AstBlockItem::Declaration(AstDeclaration::Variable(decl)), ret(int(0))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::ExternWithInitializer("гадна".to_string()));
}

#[test]
fn nested_function_definition() {
    let AstDeclaration::Function(inner) = function("дотор", &[], vec![ret(int(1))]) else { unreachable!() };
    let nested = AstBlockItem::Declaration(AstDeclaration::Function(inner));
    let ast = program(vec![entry(vec![nested, ret(int(0))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::FunctionInsideFunction("дотор".to_string()));
}

#[test]
fn break_outside_loop() {
    let ast = program(vec![entry(vec![brk(), ret(int(0))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::OutsideLoopBreak);
}

#[test]
fn continue_outside_loop() {
    let in_block = stmt(AstStatement::Compound(AstBlock(vec![cont()])));
    let ast = program(vec![entry(vec![in_block, ret(int(0))])]);

    assert_eq!(compile_and_expect_error(ast), SemanticErrorKind::OutsideLoopContinue);
}

/// The character offset of the `nth` occurrence of `needle` in `text`.
fn char_offset(text: &str, needle: &str, nth: usize) -> usize {
    let (byte_offset, _) = text.match_indices(needle).nth(nth).expect("needle not found");
    text[..byte_offset].chars().count()
}

const DUPLICATE_SOURCE: &str = "функц үндсэн() {\n    зарла x: тоо = 1;\n    зарла x: тоо = 2;\n    буц x;\n}\n";

fn duplicate_program() -> AstRoot {
    let decl = |nth| {
        let ident = ident_at("x", char_offset(DUPLICATE_SOURCE, "x", nth));
        AstBlockItem::Declaration(AstDeclaration::Variable(AstVariableDeclaration::new(ident, AstType::Int, Some(int(1)))))
    };

    program(vec![entry(vec![decl(0), decl(1), ret(var("x"))])])
}

#[test]
fn diagnostic_shows_source_line_and_caret() {
    let driver = Driver::new(DriverOptions::for_target(TargetOs::Linux));
    let source = SourceFile::new("давхар.mn", DUPLICATE_SOURCE);

    let err = driver.compile(duplicate_program()).unwrap_err();

    assert_eq!(
        render(&err, &source),
        "[Семантик шинжилгээ] 3-р мөрөнд алдаа гарлаа:\n    зарла x: тоо = 2;\n          ^\nАлдааны мессеж: хувьсагч 'x' нь давхардсан байна\n"
    );
}

#[test]
fn terse_diagnostic() {
    let mut driver = Driver::new(DriverOptions::for_target(TargetOs::Linux));
    driver.set_flag(DriverFlag::PRINT_TERSE);
    let source = SourceFile::new("давхар.mn", DUPLICATE_SOURCE);

    let err = driver.compile(duplicate_program()).unwrap_err();

    let mut buffer = Vec::new();
    driver.print_error_to_buffer(&err, &source, &mut buffer);

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "[Семантик шинжилгээ] 3-р мөр: хувьсагч 'x' нь давхардсан байна\n"
    );
}

#[test]
fn failed_compilation_writes_no_file() {
    let path = std::env::temp_dir().join(format!("mnc_{}_rejected.s", std::process::id()));
    let driver = Driver::new(DriverOptions::for_target(TargetOs::Linux));

    let result = driver.compile_to_file(program(vec![entry(vec![ret(var("missing"))])]), &path);

    assert!(result.is_err_and(|err| err.is_semantic()));
    assert!(!path.exists());
}
