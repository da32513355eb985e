// Copyright 2025-2026 Neil Henderson
//
//! The `error` module defines [SemanticError], the errors reported by semantic analysis.

use std::fmt;

use crate::core::{SourceLocation, Type};

/// The kind of semantic error, with the names needed for its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    DuplicateVariable(String),
    DuplicateFunctionDefinition(String),
    UndeclaredVariable(String),
    UndeclaredFunction(String),
    InvalidAssignmentTarget(String),
    ArityMismatch { name: String, expected: usize, found: usize },
    /// A function name used as a value.
    WrongKind(String),
    /// A function redeclared over a variable, or vice versa.
    RedeclaredAsDifferentKind(String),
    NotAFunction(String),
    FunctionInsideFunction(String),
    /// A static variable initialized with something other than a constant.
    NonConstantInitializer(String),
    /// A block scope `extern` variable given an initializer.
    ExternWithInitializer(String),
    /// A value used where a value of another, unconvertible, type is required.
    IncompatibleTypes { expected: Type, found: Type },
    OutsideLoopBreak,
    OutsideLoopContinue,
}

/// A semantic error and the source location it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub loc: SourceLocation,
}

impl SemanticError {
    /// The name of the compiler module that reports semantic errors, shown in the diagnostic header.
    pub const MODULE: &'static str = "Семантик шинжилгээ";

    /// Creates a new semantic error.
    pub fn new(kind: SemanticErrorKind, loc: SourceLocation) -> Self {
        Self { kind, loc }
    }
}

impl std::error::Error for SemanticError {}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticErrorKind::DuplicateVariable(name) => write!(f, "хувьсагч '{name}' нь давхардсан байна"),
            SemanticErrorKind::DuplicateFunctionDefinition(name) => write!(f, "функц '{name}' нь давхардсан байна"),
            SemanticErrorKind::UndeclaredVariable(name) => write!(f, "хувьсагч '{name}'-г зарлаагүй байна"),
            SemanticErrorKind::UndeclaredFunction(name) => write!(f, "функц '{name}'-г зарлаагүй байна"),
            SemanticErrorKind::InvalidAssignmentTarget(found) => {
                write!(f, "хувьсагчид утга оноох үед зүүн талд хувьсагч байх ёстой, олдсон: '{found}'")
            }
            SemanticErrorKind::ArityMismatch { name, expected, found } => write!(
                f,
                "функц '{name}'-ийг дуудахдаа аргументын тоог буруу оруулсан байна: {expected} байх ёстой, {found} олдсон"
            ),
            SemanticErrorKind::WrongKind(name) => write!(f, "функц '{name}'-ийг хувьсагч мэт ашиглаж болохгүй"),
            SemanticErrorKind::RedeclaredAsDifferentKind(name) => {
                write!(f, "'{name}'-ийг өөр төрөлтэйгөөр дахин зарласан байна")
            }
            SemanticErrorKind::NotAFunction(name) => write!(f, "хувьсагч '{name}'-ийг функц мэт дуудаж байна"),
            SemanticErrorKind::FunctionInsideFunction(name) => write!(f, "функц дотор функц үүсгэж болохгүй: '{name}'"),
            SemanticErrorKind::NonConstantInitializer(name) => {
                write!(f, "глобал хувьсагч '{name}'-ийн анхны утга тогтмол байх ёстой")
            }
            SemanticErrorKind::ExternWithInitializer(name) => {
                write!(f, "функц доторх гадаад хувьсагч '{name}'-д анхны утга өгч болохгүй")
            }
            SemanticErrorKind::IncompatibleTypes { expected, found } => {
                write!(f, "төрөл таарахгүй байна: '{expected}' байх ёстой, '{found}' олдсон")
            }
            SemanticErrorKind::OutsideLoopBreak => write!(f, "давталтаас гадуур зогсох үйлдэл орсон байна."),
            SemanticErrorKind::OutsideLoopContinue => write!(f, "давталтаас гадуур үргэлжлүүлэх үйлдэл орсон байна."),
        }
    }
}
