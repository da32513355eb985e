// Copyright 2025-2026 Neil Henderson
//
//! The `symbol_table` module defines the [SymbolTable] type and its related types.

use rustc_hash::FxHashMap;

use crate::core::Type;

/// The initial value of a variable with static storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StaticInit {
    /// Initialized with a constant.
    Initial(i64),

    /// Declared without an initializer, so zero-initialized unless another declaration initializes it.
    Tentative,

    /// Declared `extern` and defined elsewhere.
    NoInitializer,
}

/// Symbol attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolAttributes {
    Function { is_defined: bool, is_global: bool },
    /// Parameters, automatic locals and IR temporaries.
    Local,
    Static { init: StaticInit, is_global: bool },
}

/// Metadata about a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub ty: Type,
    pub attrs: SymbolAttributes,
}

impl Symbol {
    /// Creates a function symbol.
    pub fn function(ty: Type, is_defined: bool, is_global: bool) -> Self {
        Self { ty, attrs: SymbolAttributes::Function { is_defined, is_global } }
    }

    /// Creates a symbol for a parameter, an automatic local variable or a temporary.
    pub fn local(ty: Type) -> Self {
        Self { ty, attrs: SymbolAttributes::Local }
    }

    /// Creates a symbol for a variable with static storage.
    pub fn static_var(ty: Type, init: StaticInit, is_global: bool) -> Self {
        Self { ty, attrs: SymbolAttributes::Static { init, is_global } }
    }

    /// Is the symbol a function?
    pub fn is_function(&self) -> bool {
        matches!(self.attrs, SymbolAttributes::Function { .. })
    }

    /// Does the symbol have static storage?
    pub fn is_static(&self) -> bool {
        matches!(self.attrs, SymbolAttributes::Static { .. })
    }

    /// Is the symbol defined?
    ///
    /// A function is defined once its body has been seen. A static variable is defined unless it was only declared
    /// `extern`. Locals are always defined.
    pub fn is_defined(&self) -> bool {
        match self.attrs {
            SymbolAttributes::Function { is_defined, .. } => is_defined,
            SymbolAttributes::Local => true,
            SymbolAttributes::Static { init, .. } => init != StaticInit::NoInitializer,
        }
    }
}

/// The symbol table, which maps unique names to their symbols.
///
/// Iteration visits symbols in the order they were first added.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Symbol>,
    order: Vec<String>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a symbol.
    pub fn add(&mut self, name: &str, symbol: Symbol) {
        if self.symbols.insert(name.to_string(), symbol).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Gets the symbol with the given unique name.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.order.iter().filter_map(|name| self.symbols.get(name).map(|symbol| (name.as_str(), symbol)))
    }
}
