// Copyright 2025-2026 Neil Henderson
//
//! The `diagnostics` module defines the user-facing errors emitted by the compiler and the printer that renders them
//! against the source text.

pub mod error;
pub mod printer;
