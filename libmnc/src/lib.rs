// Copyright 2025-2026 Neil Henderson
//
//! The mnc library: semantic analysis, Tacky IR lowering and x86-64 code generation for the Mongolian-keyword
//! language.

#![doc(html_no_source)]

pub mod ast;
pub mod codegen;
pub mod compiler_driver;
pub mod core;
pub mod ir;
pub mod sema;
