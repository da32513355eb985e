// Copyright 2025-2026 Neil Henderson
//
//! The `ast_identifier` module defines [AstIdentifier].

use std::fmt;

use crate::core::SourceLocation;

/// An identifier and its location in the source.
///
/// The resolver rewrites `name` to the identifier's unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstIdentifier {
    pub name: String,
    pub loc: SourceLocation,
}

impl AstIdentifier {
    /// Creates a new identifier.
    pub fn new(name: impl Into<String>, loc: SourceLocation) -> Self {
        Self { name: name.into(), loc }
    }
}

impl fmt::Display for AstIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
