// Copyright 2025-2026 Neil Henderson
//
//! The `types` module defines [Type], the single type representation shared by the type checker, the IR translator
//! and instruction selection.

use std::fmt;

/// The resolved type of a symbol or expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `тоо`
    Int32,
    /// `64тоо`
    Int64,
    /// A string literal.
    String,
    Function { params: Vec<Type>, return_type: Box<Type> },
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int32 => write!(f, "тоо"),
            Type::Int64 => write!(f, "64тоо"),
            Type::String => write!(f, "мөр"),
            Type::Function { params, return_type } => {
                write!(f, "функц(")?;
                for (idx, param) in params.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {return_type}")
            }
        }
    }
}

impl Type {
    /// Creates a function type.
    pub fn function(params: Vec<Type>, return_type: Type) -> Self {
        Type::Function { params, return_type: Box::new(return_type) }
    }

    /// Is this a function type?
    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    /// Is this one of the integer types?
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Int32 | Type::Int64)
    }

    /// The function's arity, or `None` if this is not a function type.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Type::Function { params, .. } => Some(params.len()),
            _ => None,
        }
    }

    /// The common type that two operands are converted to before a binary operation.
    ///
    /// Equal types are unchanged; any mix of widths is promoted to `Int64`.
    pub fn common_type(a: &Type, b: &Type) -> Type {
        if a == b { a.clone() } else { Type::Int64 }
    }
}
