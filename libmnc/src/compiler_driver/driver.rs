// Copyright 2025-2026 Neil Henderson
//
//! The `driver` module defines `Driver`, which is the mnc compiler driver type.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, error, trace};

use super::diagnostics::printer::Printer;
use super::options::{DriverFlag, DriverOptions};
use super::{CompileError, CompileResult, SourceFile};
use crate::ast::AstRoot;
use crate::codegen::x86::{self, AsmFileWriter, StringPool};
use crate::ir;
use crate::sema;

/// State shared by the stages of one compilation.
#[derive(Debug, Default)]
pub struct CompileContext {
    /// String literals referenced by the emitted code.
    pub string_pool: StringPool,
}

impl CompileContext {
    /// Creates an empty compilation context.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output produced by the compiler driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerOutput {
    /// The assembly text of the whole program.
    Assembly(String),

    /// The Tacky IR listing, when [DriverOptions::print_ir] is set.
    IrListing(String),

    /// The legalized abstract assembly listing, when [DriverOptions::print_asm] is set.
    AsmListing(String),
}

impl CompilerOutput {
    /// The output text, whatever kind it is.
    pub fn text(&self) -> &str {
        match self {
            CompilerOutput::Assembly(text) | CompilerOutput::IrListing(text) | CompilerOutput::AsmListing(text) => text,
        }
    }
}

/// The mnc compiler driver.
///
/// The driver takes a parsed program and runs it through semantic analysis, Tacky IR lowering and x86-64 code
/// generation. Every stage consumes the complete output of the previous stage and the first error stops the pipeline.
/// Modify the [DriverOptions] to control the driver's behavior.
///
/// # Examples
///
/// ```no_run
/// # use libmnc::ast::AstRoot;
/// # use libmnc::compiler_driver::{Driver, options::DriverOptions};
/// # let ast = AstRoot(Vec::new());
/// let driver = Driver::new(DriverOptions::default());
/// match driver.compile(ast) {
///     Ok(output) => println!("{}", output.text()),
///     Err(err) => eprintln!("{err}"),
/// }
/// ```
#[derive(Debug, Default)]
pub struct Driver {
    options: DriverOptions,
}

impl Driver {
    /// Creates a new compiler driver with the given options.
    pub fn new(options: DriverOptions) -> Self {
        Self { options }
    }

    /// The compiler driver's options.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Is the given flag set in the options?
    pub fn is_flag_set(&self, flag: &str) -> bool {
        self.options.is_flag_set(flag)
    }

    /// Turns a flag on.
    pub fn set_flag(&mut self, flag: &str) {
        self.options.flags.insert(flag.to_string());
    }

    /// Compiles the program and returns the assembly text (or a listing, depending on the options).
    pub fn compile(&self, ast: AstRoot) -> CompileResult<CompilerOutput> {
        let context = CompileContext::new();
        let mut buffer = Vec::new();

        let output = self.compile_with_context(ast, &context, &mut buffer).inspect_err(log_failure)?;
        if let Some(listing) = output {
            return Ok(listing);
        }

        Ok(CompilerOutput::Assembly(String::from_utf8_lossy(&buffer).into_owned()))
    }

    /// Compiles the program and writes the assembly to the file at `asm_path`.
    ///
    /// If a listing option is set then the listing is returned instead and no file is written.
    pub fn compile_to_file(&self, ast: AstRoot, asm_path: &Path) -> CompileResult<Option<CompilerOutput>> {
        let context = CompileContext::new();

        // Run the stages up to emission first so that a failing program leaves no partial file behind.
        let mut buffer = Vec::new();
        if let Some(listing) = self.compile_with_context(ast, &context, &mut buffer).inspect_err(log_failure)? {
            return Ok(Some(listing));
        }

        let mut writer = BufWriter::new(File::create(asm_path)?);
        writer.write_all(&buffer)?;
        writer.flush()?;

        debug!("wrote {} bytes of assembly to '{}'", buffer.len(), asm_path.display());
        Ok(None)
    }

    /// Prints the error to `stderr` as a diagnostic.
    pub fn print_error(&self, error: &CompileError, source: &SourceFile) {
        self.print_error_to_buffer(error, source, std::io::stderr());
    }

    /// Prints the error as a diagnostic into the given `buffer`.
    pub fn print_error_to_buffer(&self, error: &CompileError, source: &SourceFile, buffer: impl Write) {
        let mut printer = Printer::new(buffer);
        printer.set_terse(self.is_flag_set(DriverFlag::PRINT_TERSE));
        // A failure to print a diagnostic has nowhere else to be reported.
        _ = printer.print(error, source);
    }

    /// Runs every stage of the pipeline, emitting into `out`.
    ///
    /// Returns `Ok(Some(listing))` when a listing option stops the pipeline early.
    fn compile_with_context(
        &self,
        mut ast: AstRoot,
        context: &CompileContext,
        out: &mut impl Write,
    ) -> CompileResult<Option<CompilerOutput>> {
        // Semantic analysis
        let mut symbols = sema::analyze(&mut ast)?;
        debug!("sema: {} top-level declarations, {} symbols", ast.0.len(), symbols.len());

        // Lower to Tacky IR
        let tacky = ir::translate(&ast, &mut symbols)?;
        debug!(
            "ir: {} functions, {} static variables, {} externs",
            tacky.functions.len(),
            tacky.statics.len(),
            tacky.externs.len()
        );

        if log::log_enabled!(log::Level::Trace) {
            trace!("tacky:\n{}", ir::printer::print(&tacky));
        }

        if self.options.print_ir {
            return Ok(Some(CompilerOutput::IrListing(ir::printer::print(&tacky))));
        }

        // Instruction selection
        let (mut asm, mut asm_symbols) = x86::generate(&tacky, &symbols)?;

        // Replace pseudo operands with stack slots
        x86::slot_assignment::assign_stack_slots(&mut asm, &mut asm_symbols)?;

        // Legalize operands and add the stack frame prologue
        x86::instruction_fixups::fixup_program(&mut asm, &asm_symbols)?;

        for function in &asm.functions {
            debug!("codegen: function '{}' frame size {:?}", function.name, asm_symbols.frame_size(&function.name));
        }

        if log::log_enabled!(log::Level::Trace) {
            trace!("asm:\n{}", x86::printer::print(&asm));
        }

        if self.options.print_asm {
            return Ok(Some(CompilerOutput::AsmListing(x86::printer::print(&asm))));
        }

        // Transliterate identifiers and emit
        x86::transliterate::transliterate_program(&mut asm)?;

        let mut writer = AsmFileWriter::new(out, self.options.target_os, &context.string_pool);
        x86::emit::emit_program(&asm, &mut writer, self.options.emit_entry_stub)?;

        debug!("emit: {} pooled string literals", context.string_pool.len());
        Ok(None)
    }
}

/// Logs a failed compilation. A rejected program is routine; anything else is a compiler or I/O failure.
fn log_failure(err: &CompileError) {
    if err.is_semantic() {
        debug!("program rejected: {err}");
    } else {
        error!("compilation failed: {err}");
    }
}
