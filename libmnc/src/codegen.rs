// Copyright 2025-2026 Neil Henderson
//
//! The codegen module converts the Tacky IR into an x86_64 assembly AST, assigns stack slots, legalizes operands and
//! then emits the assembly text.

pub mod x86;
