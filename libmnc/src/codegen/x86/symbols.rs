// Copyright 2025-2026 Neil Henderson
//
//! The `symbols` module defines the `AsmSymbolTable` type, which is a symbol table for the back-end
//! assembly code generation.

use rustc_hash::FxHashMap;

use super::ast::AsmType;
use crate::core::{InternalError, Stage};
use crate::sema::symbol_table::{SymbolAttributes, SymbolTable};

/// A symbol in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmSymbol {
    Object { asm_type: AsmType, is_static: bool },
    Function { is_defined: bool, frame_size: Option<i32> },
}

/// A back-end table for assembly code symbols.
#[derive(Debug, Clone, Default)]
pub struct AsmSymbolTable {
    symbols: FxHashMap<String, AsmSymbol>,
}

impl AsmSymbolTable {
    /// Creates a back-end assembly symbol table from the front end's symbol table.
    pub fn from_frontend_symbols(sema_symbols: &SymbolTable) -> Result<Self, InternalError> {
        let mut symbols = FxHashMap::default();

        for (unique_name, symbol) in sema_symbols.iter() {
            let asm_symbol = match symbol.attrs {
                SymbolAttributes::Function { is_defined, .. } => AsmSymbol::Function { is_defined, frame_size: None },
                SymbolAttributes::Local => AsmSymbol::Object { asm_type: AsmType::try_from(&symbol.ty)?, is_static: false },
                SymbolAttributes::Static { .. } => {
                    AsmSymbol::Object { asm_type: AsmType::try_from(&symbol.ty)?, is_static: true }
                }
            };

            symbols.insert(unique_name.to_string(), asm_symbol);
        }

        Ok(Self { symbols })
    }

    /// Gets a symbol from the table by its name.
    pub fn get(&self, name: &str) -> Option<&AsmSymbol> {
        self.symbols.get(name)
    }

    /// Records the stack frame size of a function. The frame size can only be set once.
    pub fn set_frame_size(&mut self, function_name: &str, size: i32) -> Result<(), InternalError> {
        match self.symbols.get_mut(function_name) {
            Some(AsmSymbol::Function { frame_size: Some(_), .. }) => {
                Err(InternalError::FrameSizeAlreadySet(function_name.to_string()))
            }
            Some(AsmSymbol::Function { frame_size, .. }) => {
                *frame_size = Some(size);
                Ok(())
            }
            _ => Err(InternalError::missing_symbol(Stage::SlotAssignment, function_name)),
        }
    }

    /// The stack frame size of a function, once slot assignment has run.
    pub fn frame_size(&self, function_name: &str) -> Option<i32> {
        match self.symbols.get(function_name) {
            Some(AsmSymbol::Function { frame_size, .. }) => *frame_size,
            _ => None,
        }
    }
}
