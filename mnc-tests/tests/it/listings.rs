// Copyright 2025-2026 Neil Henderson

//! Integration tests for the IR and abstract assembly listings.

use libmnc::ast::{AstBinaryOp, AstRoot, AstType};
use libmnc::compiler_driver::options::{DriverOptions, TargetOs};
use libmnc::compiler_driver::{CompilerOutput, Driver};

use super::builder::*;

fn sum_loop_program() -> AstRoot {
    let body = vec![
        declare_int("n", 0),
        while_loop(
            binary(AstBinaryOp::LessThan, var("n"), int(3)),
            vec![assign("n", binary(AstBinaryOp::Add, var("n"), int(1)))],
        ),
        ret(var("n")),
    ];
    program(vec![extern_function("хэвлэ", &[AstType::String]), entry(body)])
}

#[test]
fn ir_listing() {
    let options = DriverOptions { print_ir: true, ..DriverOptions::for_target(TargetOs::Linux) };
    let output = Driver::new(options).compile(sum_loop_program()).unwrap();

    let CompilerOutput::IrListing(text) = output else { panic!("expected an IR listing") };

    assert!(text.starts_with("declare extern @хэвлэ\n"));
    assert!(text.contains("define internal symbol @үндсэн() {"));
    assert!(text.contains("while_start.0:"));
    assert!(text.contains("if (tmp.0 == 0) jmp break.while.0"));
    assert!(text.contains("continue.while.0:"));
    assert!(text.contains("  jmp while_start.0"));
}

#[test]
fn asm_listing_is_legalized_but_not_transliterated() {
    let options = DriverOptions { print_asm: true, ..DriverOptions::for_target(TargetOs::Linux) };
    let output = Driver::new(options).compile(sum_loop_program()).unwrap();

    let CompilerOutput::AsmListing(text) = output else { panic!("expected an asm listing") };

    assert!(text.contains("extern хэвлэ"));
    assert!(text.contains("function үндсэн:"));
    assert!(text.contains("  subq $16, %rsp"));
    assert!(!text.contains("tmp."));
}
