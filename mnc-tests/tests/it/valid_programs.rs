// Copyright 2025-2026 Neil Henderson

//! Integration tests that compile well-formed programs and check the emitted assembly.
//!
//! On an x86-64 Linux host, setting `MNC_RUN_EXECUTABLES` also assembles and links each program and checks the exit
//! code of the resulting executable.

use libmnc::ast::{AstBinaryOp, AstRoot, AstStorageClass, AstType, AstUnaryOp};
use libmnc::compiler_driver::options::{DriverOptions, TargetOs};
use libmnc::compiler_driver::{CompilerOutput, Driver};

use super::builder::*;

fn compile(ast: AstRoot, target_os: TargetOs) -> String {
    let driver = Driver::new(DriverOptions::for_target(target_os));

    match driver.compile(ast) {
        Ok(CompilerOutput::Assembly(text)) => text,
        Ok(other) => panic!("expected assembly, got {other:?}"),
        Err(err) => panic!("compilation failed: {err}"),
    }
}

/// The emitted lines, with indentation removed.
fn lines(asm: &str) -> Vec<&str> {
    asm.lines().map(str::trim).collect()
}

/// The stack frame allocation of every function in the listing, which directly follows the prologue.
///
/// Other `subq` lines, such as the padding before a call, are not frame allocations.
fn frame_allocations(asm: &str) -> Vec<i64> {
    lines(asm)
        .windows(2)
        .filter(|pair| pair[0] == "movq %rsp, %rbp")
        .filter_map(|pair| pair[1].strip_prefix("subq $")?.strip_suffix(", %rsp")?.parse().ok())
        .collect()
}

/// Compiles for Linux, checks the assembly is well formed, and runs it when enabled.
fn compile_and_run(ast: AstRoot, expected_exit_code: i32) -> String {
    let asm = compile(ast, TargetOs::Linux);

    assert!(frame_allocations(&asm).iter().all(|bytes| bytes % 16 == 0), "{asm}");
    assert!(!asm.contains("tmp."), "pseudo operand left in\n{asm}");

    run::run_if_enabled(&asm, expected_exit_code);
    asm
}

#[test]
fn return_constant() {
    let asm = compile_and_run(program(vec![entry(vec![ret(int(5))])]), 5);

    let lines = lines(&asm);
    assert!(lines.contains(&"wndsen:"));
    assert!(lines.contains(&"movl $5, %eax"));
    assert!(lines.contains(&"call wndsen"));
    assert_eq!(lines.last(), Some(&".section .note.GNU-stack,\"\",@progbits"));
}

#[test]
fn darwin_output() {
    let asm = compile(program(vec![entry(vec![ret(int(5))])]), TargetOs::Darwin);

    let lines = lines(&asm);
    assert!(lines.contains(&"_main:"));
    assert!(lines.contains(&"call _wndsen"));
    assert!(lines.contains(&"_wndsen:"));
    assert!(!asm.contains("GNU-stack"));
}

#[test]
fn arithmetic_and_unary_operators() {
    // (-(7) + ~0 * 3) % 4 + 10 / 3 = (-7 - 3) % 4 + 3 = -2 + 3
    let expr = binary(
        AstBinaryOp::Add,
        binary(
            AstBinaryOp::Remainder,
            binary(
                AstBinaryOp::Add,
                unary(AstUnaryOp::Negate, int(7)),
                binary(AstBinaryOp::Multiply, unary(AstUnaryOp::Complement, int(0)), int(3)),
            ),
            int(4),
        ),
        binary(AstBinaryOp::Divide, int(10), int(3)),
    );

    let asm = compile_and_run(program(vec![entry(vec![ret(expr)])]), 1);

    assert!(asm.contains("idivl"));
    assert!(asm.contains("cdq"));
    assert!(asm.contains("imull"));
    assert!(asm.contains("negl"));
    assert!(asm.contains("notl"));
}

#[test]
fn long_arithmetic_uses_quadwords() {
    let body = vec![
        declare("big", AstType::Long, Some(long(5_000_000_000))),
        assign("big", binary(AstBinaryOp::Divide, var("big"), long(1_000_000_000))),
        ret(var("big")),
    ];
    let asm = compile_and_run(program(vec![entry(body)]), 5);

    // A 64-bit immediate only moves into a register.
    assert!(asm.contains("movq $5000000000, %r10"));
    assert!(asm.contains("cqo"));
    assert!(asm.contains("idivq"));
}

#[test]
fn while_loop_with_break_and_continue() {
    // i = 0; sum = 0; while (i < 10) { i = i + 1; if (i == 3) continue; if (i == 8) break; sum = sum + i; }
    let body = vec![
        declare_int("i", 0),
        declare_int("sum", 0),
        while_loop(
            binary(AstBinaryOp::LessThan, var("i"), int(10)),
            vec![
                assign("i", binary(AstBinaryOp::Add, var("i"), int(1))),
                if_then(binary(AstBinaryOp::EqualTo, var("i"), int(3)), vec![cont()], None),
                if_then(binary(AstBinaryOp::EqualTo, var("i"), int(8)), vec![brk()], None),
                assign("sum", binary(AstBinaryOp::Add, var("sum"), var("i"))),
            ],
        ),
        ret(var("sum")),
    ];

    // 1 + 2 + 4 + 5 + 6 + 7
    let asm = compile_and_run(program(vec![entry(body)]), 25);

    let lines = lines(&asm);
    for label in [".Lwhile_start.0:", ".Lcontinue.while.0:", ".Lbreak.while.0:"] {
        assert_eq!(lines.iter().filter(|line| **line == label).count(), 1, "{label}");
    }
    assert!(lines.contains(&"jmp .Lcontinue.while.0"));
    assert!(lines.contains(&"jmp .Lbreak.while.0"));
}

#[test]
fn inclusive_range_loop() {
    let body = vec![
        declare_int("sum", 0),
        range_loop("i", int(1), int(10), vec![assign("sum", binary(AstBinaryOp::Add, var("sum"), var("i")))]),
        ret(var("sum")),
    ];

    compile_and_run(program(vec![entry(body)]), 55);
}

#[test]
fn nested_scopes_shadow() {
    let body = vec![
        declare_int("x", 1),
        if_then(int(1), vec![declare_int("x", 40), assign("x", binary(AstBinaryOp::Add, var("x"), int(1)))], None),
        ret(var("x")),
    ];

    compile_and_run(program(vec![entry(body)]), 1);
}

#[test]
fn logical_operators_short_circuit() {
    // 0 && f() never calls f, and 1 || f() never calls f; f would return 100.
    let f = function("f", &[], vec![ret(int(100))]);
    let and = binary(AstBinaryOp::LogicalAnd, int(0), call("f", vec![]));
    let or = binary(AstBinaryOp::LogicalOr, int(1), call("f", vec![]));
    let not = unary(AstUnaryOp::LogicalNot, int(5));

    let body = vec![ret(binary(AstBinaryOp::Add, binary(AstBinaryOp::Add, and, or), not))];
    compile_and_run(program(vec![f, entry(body)]), 1);
}

#[test]
fn call_with_stack_arguments() {
    // The 7th and 8th arguments are passed on the stack.
    let params = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let sum = params.iter().skip(1).fold(var("a"), |acc, param| binary(AstBinaryOp::Add, acc, var(param)));
    let add8 = function("нэмэх", &params, vec![ret(sum)]);

    let args = (1..=8).map(int).collect();
    let asm = compile_and_run(program(vec![add8, entry(vec![ret(call("нэмэх", args))])]), 36);

    let lines = lines(&asm);
    assert!(lines.contains(&"call nemeh"));
    assert!(lines.contains(&"pushq $8"));
    assert!(lines.contains(&"pushq $7"));
    assert!(lines.contains(&"addq $16, %rsp"));
    assert!(lines.contains(&"movl 16(%rbp), %r10d") || lines.contains(&"movl 16(%rbp), %eax"), "{asm}");
}

#[test]
fn odd_stack_arguments_are_padded() {
    let params = ["a", "b", "c", "d", "e", "f", "g"];
    let seventh = function("долоо", &params, vec![ret(var("g"))]);

    let args = (1..=7).map(int).collect();
    let asm = compile_and_run(program(vec![seventh, entry(vec![ret(call("долоо", args))])]), 7);

    // Seven 4-byte parameters, then the call result.
    assert_eq!(frame_allocations(&asm), vec![32, 16]);

    let lines = lines(&asm);
    let sub = lines.iter().position(|line| *line == "subq $8, %rsp").expect("padding");
    let push = lines.iter().position(|line| *line == "pushq $7").expect("push");
    assert!(sub < push);
    assert!(lines.contains(&"addq $16, %rsp"));
}

#[test]
fn static_and_file_scope_variables() {
    let counter = global("тоолуур", AstType::Int, Some(int(3)), None);
    let hidden = global("нууц", AstType::Long, None, Some(AstStorageClass::Static));

    let body = vec![
        assign("тоолуур", binary(AstBinaryOp::Add, var("тоолуур"), int(4))),
        ret(binary(AstBinaryOp::Add, var("тоолуур"), var("нууц"))),
    ];
    let asm = compile_and_run(program(vec![counter, hidden, entry(body)]), 7);

    let lines = lines(&asm);
    assert!(lines.contains(&".globl tooluur"));
    assert!(!lines.contains(&".globl nuuts"));
    assert!(lines.contains(&"tooluur:"));
    assert!(lines.contains(&".long 3"));
    assert!(lines.contains(&"nuuts:"));
    assert!(lines.contains(&".zero 8"));
    assert!(asm.contains("tooluur(%rip)"));
}

#[test]
fn public_function_is_global() {
    let mut helper = function("туслах", &[], vec![ret(int(2))]);
    if let libmnc::ast::AstDeclaration::Function(function) = &mut helper {
        function.is_public = true;
    }

    let asm = compile(program(vec![helper, entry(vec![ret(call("туслах", vec![]))])]), TargetOs::Linux);

    let lines = lines(&asm);
    assert!(lines.contains(&".globl tuslah"));
    assert!(!lines.contains(&".globl wndsen"));
}

#[test]
fn string_literal_passed_to_extern() {
    let print = extern_function("хэвлэ", &[AstType::String]);
    let body = vec![
        stmt(libmnc::ast::AstStatement::Expression(call("хэвлэ", vec![string("Сайн уу\n")]))),
        stmt(libmnc::ast::AstStatement::Expression(call("хэвлэ", vec![string("Сайн уу\n")]))),
        ret(int(0)),
    ];

    let asm = compile(program(vec![print, entry(body)]), TargetOs::Linux);
    let lines = lines(&asm);

    assert!(lines.contains(&".extern hevle"));
    assert!(lines.contains(&"call hevle@PLT"));
    assert_eq!(lines.iter().filter(|line| **line == "leaq .LC0(%rip), %rdi").count(), 2);
    assert_eq!(lines.iter().filter(|line| line.starts_with(".asciz")).count(), 1);
    assert!(lines.contains(&".LC0:"));
}

#[test]
fn string_literal_is_a_non_null_address() {
    let asm = compile_and_run(program(vec![entry(vec![ret(unary(AstUnaryOp::LogicalNot, string("")))])]), 0);

    let lines = lines(&asm);
    assert!(lines.contains(&"leaq .LC0(%rip), %r11"));
    assert!(lines.contains(&"cmpq $0, %r11"));
    assert!(!asm.contains("cmpq $0, .LC0(%rip)"));
}

#[test]
fn equal_string_literals_share_an_address() {
    let same = binary(AstBinaryOp::EqualTo, string("ижил"), string("ижил"));
    let asm = compile_and_run(program(vec![entry(vec![ret(same)])]), 1);

    let lines = lines(&asm);
    assert!(lines.contains(&"leaq .LC0(%rip), %r10"));
    assert!(lines.contains(&"leaq .LC0(%rip), %r11"));
    assert!(lines.contains(&"cmpq %r10, %r11"));
}

#[test]
fn entry_stub_is_optional() {
    let options = DriverOptions { emit_entry_stub: false, ..DriverOptions::for_target(TargetOs::Linux) };
    let output = Driver::new(options).compile(program(vec![entry(vec![ret(int(0))])])).unwrap();

    assert!(!output.text().contains("main:"));
    assert!(output.text().contains("wndsen:"));
}

#[test]
fn compile_to_file_writes_assembly() {
    let path = std::env::temp_dir().join(format!("mnc_{}_compile_to_file.s", std::process::id()));
    let driver = Driver::new(DriverOptions::for_target(TargetOs::Linux));

    let listing = driver.compile_to_file(program(vec![entry(vec![ret(int(3))])]), &path).unwrap();
    assert!(listing.is_none());

    let text = std::fs::read_to_string(&path).unwrap();
    _ = std::fs::remove_file(&path);

    assert!(text.contains("movl $3, %eax"));
}

mod run {
    /// Assembles, links and runs the program, if `MNC_RUN_EXECUTABLES` is set on an x86-64 Linux host.
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    pub fn run_if_enabled(asm: &str, expected_exit_code: i32) {
        use std::process::Command;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use libmnc::compiler_driver::options::TargetOs;
        use libmnc::compiler_driver::toolchain::Toolchain;

        static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

        if std::env::var("MNC_RUN_EXECUTABLES").is_err() {
            return;
        }

        // Tests run in parallel, so every program gets its own files.
        let stem = format!("mnc_{}_{}", std::process::id(), NEXT_ID.fetch_add(1, Ordering::Relaxed));
        let dir = std::env::temp_dir();
        let files = ScratchFiles([dir.join(format!("{stem}.s")), dir.join(format!("{stem}.o")), dir.join(stem)]);
        let [asm_file, obj_file, exe_file] = &files.0;

        std::fs::write(asm_file, asm).expect("failed to write the assembly file");

        let toolchain = Toolchain::new(TargetOs::Linux);
        let status = toolchain.assemble_command(asm_file, obj_file).status().expect("failed to run the assembler");
        assert!(status.success(), "assembler failed");

        let mut link = toolchain.link_command(obj_file, exe_file, Vec::<String>::new());
        link.args(["-e", "main"]);
        assert!(link.status().expect("failed to run the linker").success(), "linker failed");

        let status = Command::new(exe_file).status().expect("failed to run the executable");
        assert_eq!(status.code(), Some(expected_exit_code));
    }

    #[cfg(not(all(target_os = "linux", target_arch = "x86_64")))]
    pub fn run_if_enabled(_asm: &str, _expected_exit_code: i32) {}

    /// Deletes the files when dropped.
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    struct ScratchFiles([std::path::PathBuf; 3]);

    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    impl Drop for ScratchFiles {
        fn drop(&mut self) {
            for path in &self.0 {
                _ = std::fs::remove_file(path);
            }
        }
    }
}
